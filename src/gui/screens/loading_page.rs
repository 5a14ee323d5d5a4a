use std::convert::Infallible;

use iced::{
    Alignment::Center,
    Element, Task,
    widget::{column, container, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

/// Shown while the backend connection is being set up.
#[derive(Debug, Clone)]
pub struct LoadingPageScreen {
    failure: Option<String>,
}

impl LoadingPageScreen {
    pub fn connecting() -> Self {
        Self { failure: None }
    }

    pub fn failed(reason: String) -> Self {
        Self {
            failure: Some(reason),
        }
    }
}

impl Screen for LoadingPageScreen {
    type Message = Infallible;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = match &self.failure {
            None => column![text("Loading...")],
            Some(reason) => column![
                text("Could not open project data").size(24),
                text(reason).style(text::danger),
            ],
        }
        .spacing(10)
        .align_x(Center);

        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {}
    }
}
