use iced::{
    Element, Task,
    widget::{button, column, pick_list, row, scrollable, text, text_input, toggler},
};

use crate::{
    core::{
        editor::ProjectEditor,
        model::{HomescreenDisplay, ParticipantScoring, ProjectId},
        route::Route,
    },
    gui::{
        AppState,
        screens::{RequestId, Screen, ScreenMessage},
        widgets::{Section, banner, field, layout},
    },
};

#[derive(Debug)]
pub struct ProjectEditScreen {
    request: RequestId,
    editor: Option<ProjectEditor>,
    saving: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ProjectEditMessage {
    Loaded(RequestId, Result<ProjectEditor, String>),
    TitleChanged(String),
    DescriptionChanged(String),
    InstructionsChanged(String),
    InitialClueChanged(String),
    HomescreenSelected(HomescreenDisplay),
    ScoringSelected(ParticipantScoring),
    PublishedToggled(bool),
    Submit,
    Saved(Result<Route, String>),
}

impl ProjectEditScreen {
    /// A blank form, or one filled from project `id` once it arrives.
    pub fn open(state: &AppState, id: Option<ProjectId>) -> (Self, Task<ScreenMessage<Self>>) {
        let Some(id) = id else {
            return (
                Self {
                    request: RequestId::next(),
                    editor: Some(ProjectEditor::new()),
                    saving: false,
                    error: None,
                },
                Task::none(),
            );
        };
        let api = state.api();
        let request = RequestId::next();
        (
            Self {
                request,
                editor: None,
                saving: false,
                error: None,
            },
            Task::perform(
                async move {
                    ProjectEditor::load(&api, &id)
                        .await
                        .map_err(|e| format!("{e:#}"))
                },
                move |result| {
                    ScreenMessage::ScreenMessage(ProjectEditMessage::Loaded(request, result))
                },
            ),
        )
    }

    fn form_view<'a>(&'a self, editor: &'a ProjectEditor) -> Element<'a, ScreenMessage<Self>> {
        let msg = ScreenMessage::ScreenMessage;
        let form = &editor.form;
        let heading = if editor.is_new() {
            "Add Project"
        } else {
            "Edit Project"
        };

        let mut submit = button(if self.saving { "Saving..." } else { "Save Project" });
        if !self.saving {
            submit = submit.on_press(msg(ProjectEditMessage::Submit));
        }

        let mut content = column![text(heading).size(28)].spacing(14);
        if let Some(error) = &self.error {
            content = content.push(banner(error));
        }
        content
            .push(field(
                "Title",
                text_input("Project title", &form.title)
                    .on_input(move |v| msg(ProjectEditMessage::TitleChanged(v))),
            ))
            .push(field(
                "Description",
                text_input("What is this project about?", &form.description)
                    .on_input(move |v| msg(ProjectEditMessage::DescriptionChanged(v))),
            ))
            .push(field(
                "Instructions",
                text_input("How participants should play", &form.instructions)
                    .on_input(move |v| msg(ProjectEditMessage::InstructionsChanged(v))),
            ))
            .push(field(
                "Initial Clue",
                text_input("Optional first clue", &form.initial_clue)
                    .on_input(move |v| msg(ProjectEditMessage::InitialClueChanged(v))),
            ))
            .push(field(
                "Homescreen Display",
                pick_list(
                    HomescreenDisplay::ALL.to_vec(),
                    form.homescreen_display,
                    move |v| msg(ProjectEditMessage::HomescreenSelected(v)),
                )
                .placeholder("Select display option"),
            ))
            .push(field(
                "Participant Scoring",
                pick_list(
                    ParticipantScoring::ALL.to_vec(),
                    form.participant_scoring.clone(),
                    move |v| msg(ProjectEditMessage::ScoringSelected(v)),
                )
                .placeholder("Select scoring option"),
            ))
            .push(
                toggler(form.is_published)
                    .label("Published")
                    .on_toggle(move |v| msg(ProjectEditMessage::PublishedToggled(v))),
            )
            .push(row![
                submit,
                button("Cancel")
                    .style(button::secondary)
                    .on_press(ScreenMessage::ParentMessage(Route::Projects)),
            ]
            .spacing(10))
            .into()
    }
}

impl Screen for ProjectEditScreen {
    type Message = ProjectEditMessage;
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
        if let ProjectEditMessage::Loaded(request, result) = message {
            if request != self.request {
                return Task::none();
            }
            match result {
                Ok(editor) => self.editor = Some(editor),
                Err(e) => self.error = Some(format!("Failed to load project: {e}")),
            }
            return Task::none();
        }
        if let ProjectEditMessage::Saved(result) = message {
            self.saving = false;
            return match result {
                Ok(route) => Task::done(ScreenMessage::ParentMessage(route)),
                Err(e) => {
                    self.error = Some(e);
                    Task::none()
                }
            };
        }

        let Some(editor) = self.editor.as_mut() else {
            return Task::none();
        };
        let form = &mut editor.form;
        match message {
            ProjectEditMessage::TitleChanged(v) => form.title = v,
            ProjectEditMessage::DescriptionChanged(v) => form.description = v,
            ProjectEditMessage::InstructionsChanged(v) => form.instructions = v,
            ProjectEditMessage::InitialClueChanged(v) => form.initial_clue = v,
            ProjectEditMessage::HomescreenSelected(v) => form.homescreen_display = Some(v),
            ProjectEditMessage::ScoringSelected(v) => form.participant_scoring = Some(v),
            ProjectEditMessage::PublishedToggled(v) => form.is_published = v,
            ProjectEditMessage::Submit => {
                let submission = match editor.submission() {
                    Ok(submission) => submission,
                    Err(e) => {
                        tracing::error!("Failed to save project: {e}");
                        self.error = Some(e.to_string());
                        return Task::none();
                    }
                };
                self.saving = true;
                self.error = None;
                let api = state.api();
                return Task::perform(
                    async move { submission.send(&api).await.map_err(|e| format!("{e:#}")) },
                    |result| ScreenMessage::ScreenMessage(ProjectEditMessage::Saved(result)),
                );
            }
            ProjectEditMessage::Loaded(..) | ProjectEditMessage::Saved(_) => {}
        }
        Task::none()
    }
}
