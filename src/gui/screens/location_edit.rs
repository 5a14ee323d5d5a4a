use std::fmt;

use iced::{
    Element, Length, Task,
    widget::{button, column, pick_list, row, scrollable, text, text_editor, text_input},
};

use crate::{
    core::{
        api::StoryPathApi,
        editor::LocationEditor,
        model::{LocationId, LocationTrigger, Project, ProjectId},
        route::Route,
    },
    gui::{
        AppState,
        screens::{RequestId, Screen, ScreenMessage},
        widgets::{Section, banner, field, layout},
    },
};

/// A picker entry naming a project by its title.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectChoice {
    id: ProjectId,
    title: String,
}

impl fmt::Display for ProjectChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl From<&Project> for ProjectChoice {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
        }
    }
}

pub struct LocationEditScreen {
    request: RequestId,
    editor: Option<LocationEditor>,
    projects: Vec<Project>,
    content: text_editor::Content,
    saving: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum LocationEditMessage {
    Loaded(RequestId, Result<LocationEditor, String>),
    ProjectsLoaded(RequestId, Result<Vec<Project>, String>),
    ProjectSelected(ProjectChoice),
    NameChanged(String),
    TriggerSelected(LocationTrigger),
    PositionChanged(String),
    PointsChanged(String),
    ClueChanged(String),
    ContentEdited(text_editor::Action),
    Submit,
    Saved(Result<Route, String>),
}

fn fetch_projects(
    state: &AppState,
    request: RequestId,
) -> Task<ScreenMessage<LocationEditScreen>> {
    let api = state.api();
    Task::perform(
        async move { api.get_projects().await.map_err(|e| format!("{e:#}")) },
        move |result| {
            ScreenMessage::ScreenMessage(LocationEditMessage::ProjectsLoaded(request, result))
        },
    )
}

impl LocationEditScreen {
    fn with_editor(editor: Option<LocationEditor>) -> Self {
        let content = editor
            .as_ref()
            .map(|editor| text_editor::Content::with_text(&editor.form.location_content))
            .unwrap_or_default();
        Self {
            request: RequestId::next(),
            editor,
            projects: Vec::new(),
            content,
            saving: false,
            error: None,
        }
    }

    /// A blank form bound to `project_id`, or waiting for a project to be
    /// picked.
    pub fn open_new(
        state: &AppState,
        project_id: Option<ProjectId>,
    ) -> (Self, Task<ScreenMessage<Self>>) {
        let screen = Self::with_editor(Some(LocationEditor::new(project_id)));
        let fetch = fetch_projects(state, screen.request);
        (screen, fetch)
    }

    pub fn open_existing(state: &AppState, id: LocationId) -> (Self, Task<ScreenMessage<Self>>) {
        let screen = Self::with_editor(None);
        let request = screen.request;
        let api = state.api();
        let load = Task::perform(
            async move {
                LocationEditor::load(&api, &id)
                    .await
                    .map_err(|e| format!("{e:#}"))
            },
            move |result| ScreenMessage::ScreenMessage(LocationEditMessage::Loaded(request, result)),
        );
        (screen, Task::batch([load, fetch_projects(state, request)]))
    }

    fn form_view<'a>(&'a self, editor: &'a LocationEditor) -> Element<'a, ScreenMessage<Self>> {
        let msg = ScreenMessage::ScreenMessage;
        let form = &editor.form;
        let heading = if editor.is_new() {
            "Add Location"
        } else {
            "Edit Location"
        };

        let choices: Vec<ProjectChoice> = editor.projects().iter().map(ProjectChoice::from).collect();
        let selected = editor.bound_project().map(ProjectChoice::from);

        let mut submit = button(if self.saving { "Saving..." } else { "Save Location" });
        if !self.saving {
            submit = submit.on_press(msg(LocationEditMessage::Submit));
        }

        let mut content = column![text(heading).size(28)].spacing(14);
        if let Some(error) = &self.error {
            content = content.push(banner(error));
        }
        content
            .push(field(
                "Project",
                pick_list(choices, selected, move |v| msg(LocationEditMessage::ProjectSelected(v)))
                    .placeholder("Select a project"),
            ))
            .push(field(
                "Location Name",
                text_input("Name shown to participants", &form.location_name)
                    .on_input(move |v| msg(LocationEditMessage::NameChanged(v))),
            ))
            .push(field(
                "Location Trigger",
                pick_list(
                    LocationTrigger::ALL.to_vec(),
                    form.location_trigger,
                    move |v| msg(LocationEditMessage::TriggerSelected(v)),
                )
                .placeholder("Select trigger"),
            ))
            .push(field(
                "Location Position",
                text_input("(-27.4975, 153.0137)", &form.location_position)
                    .on_input(move |v| msg(LocationEditMessage::PositionChanged(v))),
            ))
            .push(field(
                "Score Points",
                text_input("0", &form.score_points)
                    .on_input(move |v| msg(LocationEditMessage::PointsChanged(v))),
            ))
            .push(field(
                "Clue",
                text_input("Optional clue to the next location", &form.clue)
                    .on_input(move |v| msg(LocationEditMessage::ClueChanged(v))),
            ))
            .push(field(
                "Location Content",
                text_editor(&self.content)
                    .height(Length::Fixed(200.0))
                    .on_action(move |action| msg(LocationEditMessage::ContentEdited(action))),
            ))
            .push(row![
                submit,
                button("Cancel")
                    .style(button::secondary)
                    .on_press(ScreenMessage::ParentMessage(Route::Locations(
                        form.project_id.clone()
                    ))),
            ]
            .spacing(10))
            .into()
    }
}

impl Screen for LocationEditScreen {
    type Message = LocationEditMessage;
    type ParentMessage = Route;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content: Element<'_, ScreenMessage<Self>> = match (&self.editor, &self.error) {
            (Some(editor), _) => scrollable(self.form_view(editor)).into(),
            (None, Some(error)) => banner(error),
            (None, None) => text("Loading...").into(),
        };
        layout(Section::Projects, content, ScreenMessage::ParentMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LocationEditMessage::Loaded(request, _) | LocationEditMessage::ProjectsLoaded(request, _)
                if request != self.request => {}
            LocationEditMessage::Loaded(_, Ok(mut editor)) => {
                editor.set_projects(self.projects.clone());
                self.content = text_editor::Content::with_text(&editor.form.location_content);
                self.editor = Some(editor);
            }
            LocationEditMessage::Loaded(_, Err(e)) => {
                self.error = Some(format!("Failed to load location: {e}"));
            }
            LocationEditMessage::ProjectsLoaded(_, Ok(projects)) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.set_projects(projects.clone());
                }
                self.projects = projects;
            }
            LocationEditMessage::ProjectsLoaded(_, Err(e)) => {
                tracing::error!("Failed to load projects: {e}");
            }
            LocationEditMessage::ContentEdited(action) => {
                self.content.perform(action);
            }
            LocationEditMessage::Saved(Ok(route)) => {
                self.saving = false;
                return Task::done(ScreenMessage::ParentMessage(route));
            }
            LocationEditMessage::Saved(Err(e)) => {
                self.saving = false;
                self.error = Some(e);
            }
            message => {
                let Some(editor) = self.editor.as_mut() else {
                    return Task::none();
                };
                let form = &mut editor.form;
                match message {
                    LocationEditMessage::ProjectSelected(choice) => editor.bind_project(choice.id),
                    LocationEditMessage::NameChanged(v) => form.location_name = v,
                    LocationEditMessage::TriggerSelected(v) => form.location_trigger = Some(v),
                    LocationEditMessage::PositionChanged(v) => form.location_position = v,
                    LocationEditMessage::PointsChanged(v) => form.score_points = v,
                    LocationEditMessage::ClueChanged(v) => form.clue = v,
                    LocationEditMessage::Submit => {
                        form.location_content = self.content.text().trim_end().to_string();
                        let submission = match editor.submission() {
                            Ok(submission) => submission,
                            Err(e) => {
                                tracing::error!("Failed to save location: {e}");
                                self.error = Some(e.to_string());
                                return Task::none();
                            }
                        };
                        self.saving = true;
                        self.error = None;
                        let api = state.api();
                        return Task::perform(
                            async move { submission.send(&api).await.map_err(|e| format!("{e:#}")) },
                            |result| {
                                ScreenMessage::ScreenMessage(LocationEditMessage::Saved(result))
                            },
                        );
                    }
                    _ => {}
                }
            }
        }
        Task::none()
    }
}
