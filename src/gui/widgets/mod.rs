use iced::{
    Color, Element, Length, Theme, border,
    widget::{button, column, container, container::Style, row, text},
};

use crate::core::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Projects,
    Preview,
}

impl Section {
    fn style(self, other: Self) -> impl Fn(&Theme) -> Style {
        move |theme: &Theme| {
            let style = container::bordered_box(theme).border(border::width(1));
            // darken the tab of the section being shown
            if self == other {
                let mut color_rgba = theme.palette().background.into_rgba8();
                color_rgba[0] /= 2;
                color_rgba[1] /= 2;
                color_rgba[2] /= 2;
                style.background(Color::from_rgb8(color_rgba[0], color_rgba[1], color_rgba[2]))
            } else {
                style.background(theme.palette().background)
            }
        }
    }
}

/// Header navigation, the screen's content, and a footer.
pub fn layout<'a, Message>(
    section: Section,
    content: impl Into<Element<'a, Message>>,
    navigate: impl Fn(Route) -> Message,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let tab = |label: &'a str, tab_section: Section, route: Route| {
        container(button(text(label)).style(button::text).on_press(navigate(route)))
            .style(section.style(tab_section))
            .padding(4)
    };

    let header = row![
        text("StoryPath").size(24),
        tab("Home", Section::Home, Route::Landing),
        tab("Projects", Section::Projects, Route::Projects),
        tab("Preview", Section::Preview, Route::Preview(None)),
    ]
    .spacing(16)
    .padding(10);

    let footer = container(text("StoryPath - location-based tours and hunts").size(12)).padding(10);

    column![
        header,
        container(content.into())
            .padding(20)
            .width(Length::Fill)
            .height(Length::Fill),
        footer,
    ]
    .into()
}

/// A form label above its input.
pub fn field<'a, Message: 'a>(
    label: &'a str,
    input: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    column![text(label).size(14), input.into()].spacing(4).into()
}

/// An inline error banner.
pub fn banner<'a, Message: 'a>(message: &'a str) -> Element<'a, Message> {
    container(text(message).style(text::danger))
        .padding(10)
        .style(container::bordered_box)
        .width(Length::Fill)
        .into()
}
