mod backend;
mod rest;

use std::future::Future;

use crate::core::model::{Location, LocationId, NewLocation, NewProject, Project, ProjectId};

pub use backend::{Backend, BackendConfig};
pub use rest::RestClient;

/// CRUD access to the `project` and `location` collections.
///
/// Single-record lookups return the record itself; a backend whose wire format
/// wraps it in a one-element list unwraps it and reports
/// [`StoryPathError::NotFound`](crate::core::error::StoryPathError::NotFound)
/// when the list comes back empty.
pub trait StoryPathApi {
    fn get_projects(&self) -> impl Future<Output = anyhow::Result<Vec<Project>>> + Send;
    fn get_project(&self, id: &ProjectId) -> impl Future<Output = anyhow::Result<Project>> + Send;
    fn create_project(
        &self,
        project: &NewProject,
    ) -> impl Future<Output = anyhow::Result<Project>> + Send;
    fn update_project(
        &self,
        id: &ProjectId,
        project: &NewProject,
    ) -> impl Future<Output = anyhow::Result<Project>> + Send;
    fn delete_project(&self, id: &ProjectId) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Every location of every project.
    fn get_locations(&self) -> impl Future<Output = anyhow::Result<Vec<Location>>> + Send;
    fn get_locations_by_project_id(
        &self,
        project_id: &ProjectId,
    ) -> impl Future<Output = anyhow::Result<Vec<Location>>> + Send;
    fn get_location(
        &self,
        id: &LocationId,
    ) -> impl Future<Output = anyhow::Result<Location>> + Send;
    fn create_location(
        &self,
        location: &NewLocation,
    ) -> impl Future<Output = anyhow::Result<Location>> + Send;
    fn update_location(
        &self,
        id: &LocationId,
        location: &NewLocation,
    ) -> impl Future<Output = anyhow::Result<Location>> + Send;
    fn delete_location(&self, id: &LocationId) -> impl Future<Output = anyhow::Result<()>> + Send;
}
