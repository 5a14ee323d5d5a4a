//! Form state behind the project and location editors.
//!
//! Each editor is opened either blank or from a stored record, edits its form
//! in place, and on submit produces a validated submission. Validation happens
//! before anything is sent: a form that fails it never reaches the backend.

use tracing::{error, info};

use crate::core::{
    api::StoryPathApi,
    content,
    error::StoryPathError,
    model::{
        HomescreenDisplay, Location, LocationId, LocationTrigger, NewLocation, NewProject,
        ParticipantScoring, Project, ProjectId,
    },
    route::Route,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub initial_clue: String,
    pub homescreen_display: Option<HomescreenDisplay>,
    pub participant_scoring: Option<ParticipantScoring>,
    pub is_published: bool,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            instructions: project.instructions.clone(),
            initial_clue: project.initial_clue.clone().unwrap_or_default(),
            homescreen_display: Some(project.homescreen_display),
            participant_scoring: Some(project.participant_scoring.clone()),
            is_published: project.is_published,
        }
    }

    pub fn to_new_project(&self) -> Result<NewProject, StoryPathError> {
        if self.title.trim().is_empty() {
            return Err(StoryPathError::MissingField("title"));
        }
        let homescreen_display = self
            .homescreen_display
            .ok_or(StoryPathError::MissingField("homescreen_display"))?;
        let participant_scoring = self
            .participant_scoring
            .clone()
            .ok_or(StoryPathError::MissingField("participant_scoring"))?;
        Ok(NewProject {
            title: self.title.clone(),
            description: self.description.clone(),
            instructions: self.instructions.clone(),
            initial_clue: non_empty(&self.initial_clue),
            homescreen_display,
            participant_scoring,
            is_published: self.is_published,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectEditor {
    id: Option<ProjectId>,
    pub form: ProjectForm,
}

impl ProjectEditor {
    /// A blank editor that creates a project on submit.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_project(project: &Project) -> Self {
        Self {
            id: Some(project.id.clone()),
            form: ProjectForm::from_project(project),
        }
    }

    /// Open the editor on an existing project.
    pub async fn load<A: StoryPathApi>(api: &A, id: &ProjectId) -> anyhow::Result<Self> {
        Ok(Self::from_project(&api.get_project(id).await?))
    }

    pub fn id(&self) -> Option<&ProjectId> {
        self.id.as_ref()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn submission(&self) -> Result<ProjectSubmission, StoryPathError> {
        Ok(ProjectSubmission {
            id: self.id.clone(),
            project: self.form.to_new_project()?,
        })
    }

    /// Validate and save, logging any failure. Returns where to go next.
    pub async fn submit<A: StoryPathApi>(&self, api: &A) -> anyhow::Result<Route> {
        let submission = self.submission().inspect_err(|e| {
            error!("Failed to save the project: {e}");
        })?;
        submission.send(api).await
    }
}

/// A validated project, ready to create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSubmission {
    pub id: Option<ProjectId>,
    pub project: NewProject,
}

impl ProjectSubmission {
    pub async fn send<A: StoryPathApi>(&self, api: &A) -> anyhow::Result<Route> {
        let saved = match &self.id {
            Some(id) => api.update_project(id, &self.project).await,
            None => api.create_project(&self.project).await,
        }
        .inspect_err(|e| error!("Failed to save the project: {e:#}"))?;
        info!(id = %saved.id, title = %saved.title, "saved project");
        Ok(Route::Projects)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationForm {
    pub project_id: Option<ProjectId>,
    pub location_name: String,
    pub location_trigger: Option<LocationTrigger>,
    pub location_position: String,
    pub score_points: String,
    pub clue: String,
    pub location_content: String,
}

impl Default for LocationForm {
    fn default() -> Self {
        Self {
            project_id: None,
            location_name: String::new(),
            location_trigger: None,
            location_position: String::new(),
            score_points: "0".to_string(),
            clue: String::new(),
            location_content: String::new(),
        }
    }
}

impl LocationForm {
    pub fn from_location(location: &Location) -> Self {
        Self {
            project_id: Some(location.project_id.clone()),
            location_name: location.location_name.clone(),
            location_trigger: Some(location.location_trigger),
            location_position: location.location_position.clone(),
            score_points: location.score_points.to_string(),
            clue: location.clue.clone().unwrap_or_default(),
            location_content: location.location_content.clone(),
        }
    }

    /// Validate the form. The project binding is checked first; content is
    /// sanitized on the way out.
    pub fn to_new_location(&self) -> Result<NewLocation, StoryPathError> {
        let project_id = self
            .project_id
            .clone()
            .ok_or(StoryPathError::MissingProject)?;
        if self.location_name.trim().is_empty() {
            return Err(StoryPathError::MissingField("location_name"));
        }
        let location_trigger = self
            .location_trigger
            .ok_or(StoryPathError::MissingField("location_trigger"))?;
        if self.location_position.trim().is_empty() {
            return Err(StoryPathError::MissingField("location_position"));
        }
        let score_points = self.score_points.trim();
        if score_points.is_empty() {
            return Err(StoryPathError::MissingField("score_points"));
        }
        let score_points = score_points
            .parse::<u32>()
            .map_err(|_| StoryPathError::InvalidValue {
                field: "score_points",
                value: score_points.to_string(),
            })?;
        Ok(NewLocation {
            project_id,
            location_name: self.location_name.clone(),
            location_trigger,
            location_position: self.location_position.clone(),
            score_points,
            clue: non_empty(&self.clue),
            location_content: content::sanitize(&self.location_content),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationEditor {
    id: Option<LocationId>,
    pub form: LocationForm,
    projects: Vec<Project>,
}

impl LocationEditor {
    /// A blank editor bound to `project_id`, or unbound until a project is
    /// picked.
    pub fn new(project_id: Option<ProjectId>) -> Self {
        Self {
            id: None,
            form: LocationForm {
                project_id,
                ..LocationForm::default()
            },
            projects: Vec::new(),
        }
    }

    pub fn from_location(location: &Location) -> Self {
        Self {
            id: Some(location.id.clone()),
            form: LocationForm::from_location(location),
            projects: Vec::new(),
        }
    }

    /// Open the editor on an existing location.
    pub async fn load<A: StoryPathApi>(api: &A, id: &LocationId) -> anyhow::Result<Self> {
        Ok(Self::from_location(&api.get_location(id).await?))
    }

    pub fn id(&self) -> Option<&LocationId> {
        self.id.as_ref()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Projects offered by the picker. Never changes the current binding.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn bound_project(&self) -> Option<&Project> {
        let id = self.form.project_id.as_ref()?;
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn bind_project(&mut self, id: ProjectId) {
        self.form.project_id = Some(id);
    }

    pub fn submission(&self) -> Result<LocationSubmission, StoryPathError> {
        Ok(LocationSubmission {
            id: self.id.clone(),
            location: self.form.to_new_location()?,
        })
    }

    /// Validate and save, logging any failure. Returns where to go next.
    pub async fn submit<A: StoryPathApi>(&self, api: &A) -> anyhow::Result<Route> {
        let submission = self.submission().inspect_err(|e| {
            error!("Failed to save location: {e}");
        })?;
        submission.send(api).await
    }
}

/// A validated location, ready to create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSubmission {
    pub id: Option<LocationId>,
    pub location: NewLocation,
}

impl LocationSubmission {
    pub async fn send<A: StoryPathApi>(&self, api: &A) -> anyhow::Result<Route> {
        let saved = match &self.id {
            Some(id) => api.update_location(id, &self.location).await,
            None => api.create_location(&self.location).await,
        }
        .inspect_err(|e| error!("Failed to save location: {e:#}"))?;
        info!(id = %saved.id, project_id = %saved.project_id, "saved location");
        Ok(Route::Locations(Some(saved.project_id)))
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_location_form() -> LocationForm {
        LocationForm {
            project_id: Some("p1".into()),
            location_name: "Great Court".into(),
            location_trigger: Some(LocationTrigger::LocationEntry),
            location_position: "-27.4975, 153.0137".into(),
            score_points: "10".into(),
            clue: String::new(),
            location_content: "<p>Look for the sandstone arch</p>".into(),
        }
    }

    #[test]
    fn project_form_requires_title_and_choices() {
        let mut form = ProjectForm::default();
        assert!(matches!(
            form.to_new_project(),
            Err(StoryPathError::MissingField("title"))
        ));
        form.title = "Campus Walk".into();
        assert!(matches!(
            form.to_new_project(),
            Err(StoryPathError::MissingField("homescreen_display"))
        ));
        form.homescreen_display = Some(HomescreenDisplay::InitialClue);
        assert!(matches!(
            form.to_new_project(),
            Err(StoryPathError::MissingField("participant_scoring"))
        ));
        form.participant_scoring = Some(ParticipantScoring::NotScored);
        let project = form.to_new_project().unwrap();
        assert_eq!(project.initial_clue, None);
        assert!(!project.is_published);
    }

    #[test]
    fn location_form_checks_project_binding_first() {
        let form = LocationForm {
            project_id: None,
            location_name: String::new(),
            ..LocationForm::default()
        };
        assert!(matches!(
            form.to_new_location(),
            Err(StoryPathError::MissingProject)
        ));
    }

    #[test]
    fn location_form_rejects_non_numeric_points() {
        let form = LocationForm {
            score_points: "ten".into(),
            ..filled_location_form()
        };
        assert!(matches!(
            form.to_new_location(),
            Err(StoryPathError::InvalidValue { field: "score_points", .. })
        ));
    }

    #[test]
    fn location_form_sanitizes_content() {
        let form = LocationForm {
            location_content: "<p>Hi<script>x()</script></p>".into(),
            ..filled_location_form()
        };
        let location = form.to_new_location().unwrap();
        assert_eq!(location.location_content, "<p>Hi</p>");
        assert_eq!(location.score_points, 10);
        assert_eq!(location.clue, None);
    }

    #[test]
    fn new_location_editor_keeps_explicit_binding() {
        let mut editor = LocationEditor::new(None);
        editor.set_projects(vec![Project {
            id: "p1".into(),
            title: "First".into(),
            description: String::new(),
            instructions: String::new(),
            initial_clue: None,
            homescreen_display: HomescreenDisplay::AllLocations,
            participant_scoring: ParticipantScoring::NotScored,
            is_published: false,
        }]);
        assert_eq!(editor.form.project_id, None);
        assert!(editor.bound_project().is_none());
        editor.bind_project("p1".into());
        assert_eq!(editor.bound_project().map(|p| p.title.as_str()), Some("First"));
    }
}
