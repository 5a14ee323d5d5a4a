pub mod landing_page;
pub mod loading_page;
pub mod location_edit;
pub mod location_list;
pub mod preview;
pub mod project_edit;
pub mod project_list;

use std::{
    convert::Infallible,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use iced::{Element, Task};

use crate::{
    core::route::Route,
    gui::{AppState, Message},
};

pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

impl<S: Screen> Clone for ScreenMessage<S> {
    fn clone(&self) -> Self {
        match self {
            ScreenMessage::ScreenMessage(msg) => ScreenMessage::ScreenMessage(msg.clone()),
            ScreenMessage::ParentMessage(msg) => ScreenMessage::ParentMessage(msg.clone()),
        }
    }
}

impl<S: Screen> fmt::Debug for ScreenMessage<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenMessage::ScreenMessage(msg) => f.debug_tuple("ScreenMessage").field(msg).finish(),
            ScreenMessage::ParentMessage(msg) => f.debug_tuple("ParentMessage").field(msg).finish(),
        }
    }
}

/// Tags the fetches a screen starts when it is opened. Results carrying any
/// other tag belong to an earlier visit and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(u64);

impl RequestId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        RequestId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

pub trait Screen: Sized + 'static {
    type Message: fmt::Debug + Clone + Send + 'static;
    type ParentMessage: fmt::Debug + Clone + Send + 'static;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

pub enum ScreenData {
    LandingPage(landing_page::LandingPageScreen),
    LoadingPage(loading_page::LoadingPageScreen),
    ProjectList(project_list::ProjectListScreen),
    ProjectEdit(project_edit::ProjectEditScreen),
    LocationList(location_list::LocationListScreen),
    LocationEdit(location_edit::LocationEditScreen),
    Preview(preview::PreviewScreen),
}

impl ScreenData {
    /// Build the screen for `route` along with the fetches it starts with.
    pub fn open(route: Route, state: &AppState) -> (Self, Task<Message>) {
        match route {
            Route::Landing => (
                ScreenData::LandingPage(landing_page::LandingPageScreen),
                Task::none(),
            ),
            Route::Projects => {
                let (screen, task) = project_list::ProjectListScreen::open(state);
                (ScreenData::ProjectList(screen), task.map(Message::ProjectList))
            }
            Route::NewProject => {
                let (screen, task) = project_edit::ProjectEditScreen::open(state, None);
                (ScreenData::ProjectEdit(screen), task.map(Message::ProjectEdit))
            }
            Route::EditProject(id) => {
                let (screen, task) = project_edit::ProjectEditScreen::open(state, Some(id));
                (ScreenData::ProjectEdit(screen), task.map(Message::ProjectEdit))
            }
            Route::Locations(project_id) => {
                let (screen, task) = location_list::LocationListScreen::open(state, project_id);
                (ScreenData::LocationList(screen), task.map(Message::LocationList))
            }
            Route::NewLocation(project_id) => {
                let (screen, task) = location_edit::LocationEditScreen::open_new(state, project_id);
                (ScreenData::LocationEdit(screen), task.map(Message::LocationEdit))
            }
            Route::EditLocation(id) => {
                let (screen, task) = location_edit::LocationEditScreen::open_existing(state, id);
                (ScreenData::LocationEdit(screen), task.map(Message::LocationEdit))
            }
            Route::Preview(project_id) => {
                let (screen, task) = preview::PreviewScreen::open(state, project_id);
                (ScreenData::Preview(screen), task.map(Message::Preview))
            }
        }
    }
}

/// Run a screen's own messages through it; its parent messages are routes to
/// navigate to.
fn forward<S: Screen<ParentMessage = Route>>(
    page: &mut S,
    message: ScreenMessage<S>,
    state: &mut AppState,
    wrap: fn(ScreenMessage<S>) -> Message,
) -> Task<ScreenMessage<ScreenData>> {
    match message {
        ScreenMessage::ScreenMessage(msg) => page
            .update(msg, state)
            .map(wrap)
            .map(ScreenMessage::ScreenMessage),
        ScreenMessage::ParentMessage(route) => {
            Task::done(ScreenMessage::ScreenMessage(Message::Navigate(route)))
        }
    }
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self {
            ScreenData::LandingPage(screen) => screen.view().map(Message::LandingPage),
            ScreenData::LoadingPage(screen) => screen.view().map(|msg| -> Message {
                match msg {
                    ScreenMessage::ScreenMessage(never) => match never {},
                    ScreenMessage::ParentMessage(never) => match never {},
                }
            }),
            ScreenData::ProjectList(screen) => screen.view().map(Message::ProjectList),
            ScreenData::ProjectEdit(screen) => screen.view().map(Message::ProjectEdit),
            ScreenData::LocationList(screen) => screen.view().map(Message::LocationList),
            ScreenData::LocationEdit(screen) => screen.view().map(Message::LocationEdit),
            ScreenData::Preview(screen) => screen.view().map(Message::Preview),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::Navigate(route)) => {
                tracing::debug!(%route, "navigating");
                let (screen, task) = ScreenData::open(route, state);
                *x = screen;
                task.map(ScreenMessage::ScreenMessage)
            }
            (ScreenData::LandingPage(page), Message::LandingPage(msg)) => {
                forward(page, msg, state, Message::LandingPage)
            }
            (ScreenData::ProjectList(page), Message::ProjectList(msg)) => {
                forward(page, msg, state, Message::ProjectList)
            }
            (ScreenData::ProjectEdit(page), Message::ProjectEdit(msg)) => {
                forward(page, msg, state, Message::ProjectEdit)
            }
            (ScreenData::LocationList(page), Message::LocationList(msg)) => {
                forward(page, msg, state, Message::LocationList)
            }
            (ScreenData::LocationEdit(page), Message::LocationEdit(msg)) => {
                forward(page, msg, state, Message::LocationEdit)
            }
            (ScreenData::Preview(page), Message::Preview(msg)) => {
                forward(page, msg, state, Message::Preview)
            }
            // results addressed to a screen of another kind; same-kind leftovers
            // are caught by each screen's RequestId
            _ => Task::none(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::core::api::{Backend, RestClient};

    // never contacted; update paths under test do not start requests
    let client = RestClient::new("http://127.0.0.1:9").expect("Failed to build client");
    AppState::new(Backend::Rest(client))
}
