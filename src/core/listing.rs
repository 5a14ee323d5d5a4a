//! List state for the project and location screens.
//!
//! Rows are removed locally by id only after the backend confirmed the delete,
//! so the list never drifts from its index when it was reordered or reloaded in
//! between.

use tracing::{error, info};

use crate::core::{
    api::StoryPathApi,
    model::{Location, LocationId, Project, ProjectId},
    qr::QrSlot,
    route::Route,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectList {
    projects: Vec<Project>,
}

impl ProjectList {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Fetch every project. A failed fetch is logged and yields an empty list.
    pub async fn load<A: StoryPathApi>(api: &A) -> Self {
        match api.get_projects().await {
            Ok(projects) => Self::new(projects),
            Err(e) => {
                error!("Failed to fetch projects: {e:#}");
                Self::default()
            }
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn remove(&mut self, id: &ProjectId) -> Option<Project> {
        let index = self.projects.iter().position(|project| &project.id == id)?;
        Some(self.projects.remove(index))
    }

    /// Delete remotely, then drop the row. The list is untouched on failure.
    pub async fn delete<A: StoryPathApi>(&mut self, api: &A, id: &ProjectId) -> anyhow::Result<()> {
        let result = api.delete_project(id).await;
        self.finish_delete(id, result.as_ref().map(|_| ()).map_err(|e| format!("{e:#}")));
        result
    }

    /// Apply the outcome of a delete request for `id`.
    pub fn finish_delete(&mut self, id: &ProjectId, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.remove(id);
                info!(%id, "deleted project");
            }
            Err(e) => error!("Failed to delete project {id}: {e}"),
        }
    }

    pub fn edit_route(id: &ProjectId) -> Route {
        Route::EditProject(id.clone())
    }

    pub fn locations_route(id: &ProjectId) -> Route {
        Route::Locations(Some(id.clone()))
    }
}

pub const LOAD_LOCATIONS_FAILED: &str = "Failed to load locations.";
pub const LOAD_PROJECT_FAILED: &str = "Failed to load project details.";
pub const DELETE_LOCATION_FAILED: &str = "Failed to delete location.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationList {
    project_id: Option<ProjectId>,
    project_title: String,
    locations: Vec<Location>,
    error: Option<String>,
    qr: QrSlot,
}

impl LocationList {
    pub fn new(project_id: Option<ProjectId>, project_title: String, locations: Vec<Location>) -> Self {
        Self {
            project_id,
            project_title,
            locations,
            ..Self::default()
        }
    }

    /// Fetch a project's locations and its title side by side. Each failure
    /// sets the error banner and leaves its part empty.
    pub async fn load<A: StoryPathApi>(api: &A, project_id: Option<ProjectId>) -> Self {
        let mut list = Self {
            project_id: project_id.clone(),
            ..Self::default()
        };
        let Some(project_id) = project_id else {
            return list;
        };

        let (locations, project) = tokio::join!(
            api.get_locations_by_project_id(&project_id),
            api.get_project(&project_id)
        );
        match locations {
            Ok(locations) => list.locations = locations,
            Err(e) => {
                error!("Failed to load locations for project {project_id}: {e:#}");
                list.error = Some(LOAD_LOCATIONS_FAILED.to_string());
            }
        }
        match project {
            Ok(project) => list.project_title = project.title,
            Err(e) => {
                error!("Failed to load project {project_id}: {e:#}");
                list.error = Some(LOAD_PROJECT_FAILED.to_string());
            }
        }
        list
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn project_title(&self) -> &str {
        &self.project_title
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn remove(&mut self, id: &LocationId) -> Option<Location> {
        let index = self.locations.iter().position(|location| &location.id == id)?;
        if self.qr.location().is_some_and(|shown| &shown.id == id) {
            self.qr.close();
        }
        Some(self.locations.remove(index))
    }

    /// Delete remotely, then drop the row. On failure the banner is set and
    /// the rows stay as they were.
    pub async fn delete<A: StoryPathApi>(&mut self, api: &A, id: &LocationId) -> anyhow::Result<()> {
        let result = api.delete_location(id).await;
        self.finish_delete(id, result.as_ref().map(|_| ()).map_err(|e| format!("{e:#}")));
        result
    }

    /// Apply the outcome of a delete request for `id`.
    pub fn finish_delete(&mut self, id: &LocationId, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.remove(id);
                info!(%id, "deleted location");
            }
            Err(e) => {
                error!("Failed to delete location {id}: {e}");
                self.set_error(DELETE_LOCATION_FAILED);
            }
        }
    }

    /// Show the code for `id`, replacing any code already shown.
    pub fn show_qr(&mut self, id: &LocationId) -> bool {
        match self.locations.iter().find(|location| &location.id == id) {
            Some(location) => {
                self.qr.show(location.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_qr(&mut self) {
        self.qr.close();
    }

    pub fn qr(&self) -> &QrSlot {
        &self.qr
    }

    pub fn add_location_route(&self) -> Route {
        Route::NewLocation(self.project_id.clone())
    }

    pub fn preview_route(&self) -> Route {
        Route::Preview(self.project_id.clone())
    }
}
