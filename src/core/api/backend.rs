use std::path::PathBuf;

use tracing::info;

use crate::core::{
    api::{RestClient, StoryPathApi},
    db::LocalStore,
    model::{Location, LocationId, NewLocation, NewProject, Project, ProjectId},
};

/// Where project data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// A remote PostgREST-style service.
    Remote { url: String },
    /// A SQLite file on this machine.
    Local { path: PathBuf },
}

/// The data source a running client talks to.
#[derive(Debug, Clone)]
pub enum Backend {
    Rest(RestClient),
    Local(LocalStore),
}

impl Backend {
    pub async fn connect(config: &BackendConfig) -> anyhow::Result<Self> {
        match config {
            BackendConfig::Remote { url } => {
                info!(%url, "using remote backend");
                Ok(Backend::Rest(RestClient::new(url)?))
            }
            BackendConfig::Local { path } => {
                info!(path = %path.display(), "using local backend");
                Ok(Backend::Local(LocalStore::open(path).await?))
            }
        }
    }
}

impl StoryPathApi for Backend {
    async fn get_projects(&self) -> anyhow::Result<Vec<Project>> {
        match self {
            Backend::Rest(client) => client.get_projects().await,
            Backend::Local(store) => store.get_projects().await,
        }
    }

    async fn get_project(&self, id: &ProjectId) -> anyhow::Result<Project> {
        match self {
            Backend::Rest(client) => client.get_project(id).await,
            Backend::Local(store) => store.get_project(id).await,
        }
    }

    async fn create_project(&self, project: &NewProject) -> anyhow::Result<Project> {
        match self {
            Backend::Rest(client) => client.create_project(project).await,
            Backend::Local(store) => store.create_project(project).await,
        }
    }

    async fn update_project(&self, id: &ProjectId, project: &NewProject) -> anyhow::Result<Project> {
        match self {
            Backend::Rest(client) => client.update_project(id, project).await,
            Backend::Local(store) => store.update_project(id, project).await,
        }
    }

    async fn delete_project(&self, id: &ProjectId) -> anyhow::Result<()> {
        match self {
            Backend::Rest(client) => client.delete_project(id).await,
            Backend::Local(store) => store.delete_project(id).await,
        }
    }

    async fn get_locations(&self) -> anyhow::Result<Vec<Location>> {
        match self {
            Backend::Rest(client) => client.get_locations().await,
            Backend::Local(store) => store.get_locations().await,
        }
    }

    async fn get_locations_by_project_id(
        &self,
        project_id: &ProjectId,
    ) -> anyhow::Result<Vec<Location>> {
        match self {
            Backend::Rest(client) => client.get_locations_by_project_id(project_id).await,
            Backend::Local(store) => store.get_locations_by_project_id(project_id).await,
        }
    }

    async fn get_location(&self, id: &LocationId) -> anyhow::Result<Location> {
        match self {
            Backend::Rest(client) => client.get_location(id).await,
            Backend::Local(store) => store.get_location(id).await,
        }
    }

    async fn create_location(&self, location: &NewLocation) -> anyhow::Result<Location> {
        match self {
            Backend::Rest(client) => client.create_location(location).await,
            Backend::Local(store) => store.create_location(location).await,
        }
    }

    async fn update_location(
        &self,
        id: &LocationId,
        location: &NewLocation,
    ) -> anyhow::Result<Location> {
        match self {
            Backend::Rest(client) => client.update_location(id, location).await,
            Backend::Local(store) => store.update_location(id, location).await,
        }
    }

    async fn delete_location(&self, id: &LocationId) -> anyhow::Result<()> {
        match self {
            Backend::Rest(client) => client.delete_location(id).await,
            Backend::Local(store) => store.delete_location(id).await,
        }
    }
}
