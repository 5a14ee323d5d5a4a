use crate::{
    core::{api::Backend, route::Route},
    gui::screens::{
        ScreenMessage, landing_page::LandingPageScreen, location_edit::LocationEditScreen,
        location_list::LocationListScreen, preview::PreviewScreen,
        project_edit::ProjectEditScreen, project_list::ProjectListScreen,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    Connected(Result<Backend, String>),
    Navigate(Route),
    LandingPage(ScreenMessage<LandingPageScreen>),
    ProjectList(ScreenMessage<ProjectListScreen>),
    ProjectEdit(ScreenMessage<ProjectEditScreen>),
    LocationList(ScreenMessage<LocationListScreen>),
    LocationEdit(ScreenMessage<LocationEditScreen>),
    Preview(ScreenMessage<PreviewScreen>),
}
