use iced::{
    Element, Length, Task,
    widget::{Column, button, column, row, scrollable, text},
};

use crate::{
    core::{api::StoryPathApi, listing::ProjectList, model::ProjectId, route::Route},
    gui::{
        AppState,
        screens::{RequestId, Screen, ScreenMessage},
        widgets::{Section, layout},
    },
};

#[derive(Debug)]
pub struct ProjectListScreen {
    request: RequestId,
    list: Option<ProjectList>,
}

#[derive(Debug, Clone)]
pub enum ProjectListMessage {
    Loaded(RequestId, ProjectList),
    Delete(ProjectId),
    Deleted(ProjectId, Result<(), String>),
}

impl ProjectListScreen {
    pub fn open(state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let api = state.api();
        let request = RequestId::next();
        (
            Self {
                request,
                list: None,
            },
            Task::perform(async move { ProjectList::load(&api).await }, move |list| {
                ScreenMessage::ScreenMessage(ProjectListMessage::Loaded(request, list))
            }),
        )
    }
}

impl Screen for ProjectListScreen {
    type Message = ProjectListMessage;
    type ParentMessage = Route;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let header = column![
            text("Projects").size(28),
            button("Add Project").on_press(ScreenMessage::ParentMessage(Route::NewProject)),
        ]
        .spacing(10);

        let body: Element<'_, ScreenMessage<Self>> = match &self.list {
            None => text("Loading...").into(),
            Some(list) if list.is_empty() => text("Your project list is empty.").into(),
            Some(list) => {
                let heading = row![
                    text("Project").width(Length::FillPortion(2)),
                    text("Description").width(Length::FillPortion(3)),
                    text("Published").width(Length::FillPortion(1)),
                    text("Actions").width(Length::FillPortion(3)),
                ]
                .spacing(10);
                let rows = list.projects().iter().map(|project| {
                    row![
                        text(&project.title).width(Length::FillPortion(2)),
                        text(&project.description).width(Length::FillPortion(3)),
                        text(project.is_published.to_string()).width(Length::FillPortion(1)),
                        row![
                            button("Edit").on_press(ScreenMessage::ParentMessage(
                                ProjectList::edit_route(&project.id)
                            )),
                            button("View Locations").on_press(ScreenMessage::ParentMessage(
                                ProjectList::locations_route(&project.id)
                            )),
                            button("Delete").style(button::danger).on_press(
                                ScreenMessage::ScreenMessage(ProjectListMessage::Delete(
                                    project.id.clone()
                                ))
                            ),
                        ]
                        .spacing(6)
                        .width(Length::FillPortion(3)),
                    ]
                    .spacing(10)
                    .into()
                });
                scrollable(
                    Column::with_children(std::iter::once(heading.into()).chain(rows)).spacing(8),
                )
                .into()
            }
        };

        layout(
            Section::Projects,
            column![header, body].spacing(20),
            ScreenMessage::ParentMessage,
        )
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            ProjectListMessage::Loaded(request, list) => {
                if request == self.request {
                    self.list = Some(list);
                }
                Task::none()
            }
            ProjectListMessage::Delete(id) => {
                let api = state.api();
                let deleted = id.clone();
                Task::perform(
                    async move { api.delete_project(&id).await.map_err(|e| format!("{e:#}")) },
                    move |result| {
                        ScreenMessage::ScreenMessage(ProjectListMessage::Deleted(deleted.clone(), result))
                    },
                )
            }
            ProjectListMessage::Deleted(id, result) => {
                if let Some(list) = self.list.as_mut() {
                    list.finish_delete(&id, result);
                }
                Task::none()
            }
        }
    }
}
