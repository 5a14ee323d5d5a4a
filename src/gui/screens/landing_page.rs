use iced::{
    Alignment::Center,
    Element, Task,
    widget::{button, column, container, text},
};

use crate::{
    core::route::Route,
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{Section, layout},
    },
};

#[derive(Debug, Clone)]
pub struct LandingPageScreen;

#[derive(Debug, Clone)]
pub enum LandingPageMessage {}

impl Screen for LandingPageScreen {
    type Message = LandingPageMessage;
    type ParentMessage = Route;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = column![
            text("StoryPath").size(40),
            text("Create location-based tours and treasure hunts, then preview how participants experience and score them."),
            button("Get Started").on_press(ScreenMessage::ParentMessage(Route::Projects)),
        ]
        .spacing(20)
        .padding(20)
        .align_x(Center);

        layout(
            Section::Home,
            container(content)
                .center_x(iced::Length::Fill)
                .center_y(iced::Length::Fill),
            ScreenMessage::ParentMessage,
        )
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {}
    }
}
