use iced::{Element, Task, Theme};
use tracing::error;

use super::{
    AppState, Message,
    screens::{Screen, ScreenData, ScreenMessage, loading_page::LoadingPageScreen},
};
use crate::core::{
    api::{Backend, BackendConfig},
    route::Route,
};

/// Launch the authoring window against `backend`.
pub fn run(backend: BackendConfig) -> iced::Result {
    iced::application(
        move || StoryPathApp::new(backend.clone()),
        StoryPathApp::update,
        StoryPathApp::view,
    )
    .title("StoryPath")
    .theme(StoryPathApp::theme)
    .run()
}

pub struct StoryPathApp {
    state: Option<AppState>,
    screen: ScreenData,
}

impl StoryPathApp {
    fn new(backend: BackendConfig) -> (Self, Task<Message>) {
        (
            Self {
                state: None,
                screen: ScreenData::LoadingPage(LoadingPageScreen::connecting()),
            },
            Task::perform(
                async move {
                    Backend::connect(&backend)
                        .await
                        .map_err(|e| format!("{e:#}"))
                },
                Message::Connected,
            ),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Connected(Ok(backend)) => {
                let state = AppState::new(backend);
                let (screen, task) = ScreenData::open(Route::Landing, &state);
                self.state = Some(state);
                self.screen = screen;
                task
            }
            Message::Connected(Err(e)) => {
                error!("Failed to connect to the backend: {e}");
                self.screen = ScreenData::LoadingPage(LoadingPageScreen::failed(e));
                Task::none()
            }
            message => match self.state.as_mut() {
                Some(state) => self.screen.update(message, state).map(unwrap_message),
                None => Task::none(),
            },
        }
    }

    fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(unwrap_message)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn unwrap_message(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}
