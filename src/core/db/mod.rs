mod record;
mod state;

use std::{path::Path, sync::Arc};

use state::StoreState;
use tracing::debug;
use uuid::Uuid;

use crate::core::{
    api::StoryPathApi,
    error::StoryPathError,
    model::{Location, LocationId, NewLocation, NewProject, Project, ProjectId},
};
use record::{LocationRecord, ProjectRecord};

macro_rules! project_columns {
    () => {
        "id, title, description, instructions, initial_clue, homescreen_display, \
         participant_scoring, is_published"
    };
}

macro_rules! location_columns {
    () => {
        "id, project_id, location_name, location_trigger, location_position, score_points, \
         clue, location_content"
    };
}

/// Project and location storage in a local SQLite file.
///
/// Implements the same contract as the remote service. Deleting a project
/// cascades to its locations through the foreign key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    state: Arc<StoreState>,
}

impl LocalStore {
    /// Open (creating if missing) the database at `db_file` and apply migrations.
    pub async fn open<P: AsRef<Path>>(db_file: P) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(StoreState::new(db_file).await?),
        })
    }

    pub fn db_file(&self) -> &Path {
        self.state.db_file()
    }

    /// Flush pending writes and close the pool. Further calls fail.
    pub async fn close(&self) -> anyhow::Result<()> {
        self.state.close().await
    }
}

impl StoryPathApi for LocalStore {
    async fn get_projects(&self) -> anyhow::Result<Vec<Project>> {
        let mut conn = self.state.conn().await?;
        sqlx::query_as::<_, ProjectRecord>(concat!(
            "SELECT ",
            project_columns!(),
            " FROM project ORDER BY rowid ASC"
        ))
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(Project::try_from)
        .collect()
    }

    async fn get_project(&self, id: &ProjectId) -> anyhow::Result<Project> {
        let mut conn = self.state.conn().await?;
        let record = sqlx::query_as::<_, ProjectRecord>(concat!(
            "SELECT ",
            project_columns!(),
            " FROM project WHERE id = ?"
        ))
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StoryPathError::not_found("project", id))?;
        Project::try_from(record)
    }

    async fn create_project(&self, project: &NewProject) -> anyhow::Result<Project> {
        let mut conn = self.state.conn().await?;
        let id = Uuid::new_v4().to_string();
        let record = sqlx::query_as::<_, ProjectRecord>(concat!(
            "INSERT INTO project (",
            project_columns!(),
            ") VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING ",
            project_columns!()
        ))
        .bind(&id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.instructions)
        .bind(project.initial_clue.as_deref())
        .bind(project.homescreen_display.as_str())
        .bind(project.participant_scoring.as_str())
        .bind(project.is_published)
        .fetch_one(&mut *conn)
        .await?;
        debug!(%id, "created project");
        Project::try_from(record)
    }

    async fn update_project(&self, id: &ProjectId, project: &NewProject) -> anyhow::Result<Project> {
        let mut conn = self.state.conn().await?;
        let record = sqlx::query_as::<_, ProjectRecord>(concat!(
            "UPDATE project SET title = ?, description = ?, instructions = ?, initial_clue = ?, \
             homescreen_display = ?, participant_scoring = ?, is_published = ? \
             WHERE id = ? RETURNING ",
            project_columns!()
        ))
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.instructions)
        .bind(project.initial_clue.as_deref())
        .bind(project.homescreen_display.as_str())
        .bind(project.participant_scoring.as_str())
        .bind(project.is_published)
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StoryPathError::not_found("project", id))?;
        Project::try_from(record)
    }

    async fn delete_project(&self, id: &ProjectId) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        let result = sqlx::query("DELETE FROM project WHERE id = ?")
            .bind(id.as_str())
            .execute(&mut *conn)
            .await?;
        debug!(%id, rows = result.rows_affected(), "deleted project");
        Ok(())
    }

    async fn get_locations(&self) -> anyhow::Result<Vec<Location>> {
        let mut conn = self.state.conn().await?;
        sqlx::query_as::<_, LocationRecord>(concat!(
            "SELECT ",
            location_columns!(),
            " FROM location ORDER BY rowid ASC"
        ))
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(Location::try_from)
        .collect()
    }

    async fn get_locations_by_project_id(
        &self,
        project_id: &ProjectId,
    ) -> anyhow::Result<Vec<Location>> {
        let mut conn = self.state.conn().await?;
        sqlx::query_as::<_, LocationRecord>(concat!(
            "SELECT ",
            location_columns!(),
            " FROM location WHERE project_id = ? ORDER BY rowid ASC"
        ))
        .bind(project_id.as_str())
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(Location::try_from)
        .collect()
    }

    async fn get_location(&self, id: &LocationId) -> anyhow::Result<Location> {
        let mut conn = self.state.conn().await?;
        let record = sqlx::query_as::<_, LocationRecord>(concat!(
            "SELECT ",
            location_columns!(),
            " FROM location WHERE id = ?"
        ))
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StoryPathError::not_found("location", id))?;
        Location::try_from(record)
    }

    async fn create_location(&self, location: &NewLocation) -> anyhow::Result<Location> {
        let mut conn = self.state.conn().await?;
        let id = Uuid::new_v4().to_string();
        let record = sqlx::query_as::<_, LocationRecord>(concat!(
            "INSERT INTO location (",
            location_columns!(),
            ") VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING ",
            location_columns!()
        ))
        .bind(&id)
        .bind(location.project_id.as_str())
        .bind(&location.location_name)
        .bind(location.location_trigger.as_str())
        .bind(&location.location_position)
        .bind(i64::from(location.score_points))
        .bind(location.clue.as_deref())
        .bind(&location.location_content)
        .fetch_one(&mut *conn)
        .await?;
        debug!(%id, project_id = %location.project_id, "created location");
        Location::try_from(record)
    }

    async fn update_location(
        &self,
        id: &LocationId,
        location: &NewLocation,
    ) -> anyhow::Result<Location> {
        let mut conn = self.state.conn().await?;
        let record = sqlx::query_as::<_, LocationRecord>(concat!(
            "UPDATE location SET project_id = ?, location_name = ?, location_trigger = ?, \
             location_position = ?, score_points = ?, clue = ?, location_content = ? \
             WHERE id = ? RETURNING ",
            location_columns!()
        ))
        .bind(location.project_id.as_str())
        .bind(&location.location_name)
        .bind(location.location_trigger.as_str())
        .bind(&location.location_position)
        .bind(i64::from(location.score_points))
        .bind(location.clue.as_deref())
        .bind(&location.location_content)
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| StoryPathError::not_found("location", id))?;
        Location::try_from(record)
    }

    async fn delete_location(&self, id: &LocationId) -> anyhow::Result<()> {
        let mut conn = self.state.conn().await?;
        let result = sqlx::query("DELETE FROM location WHERE id = ?")
            .bind(id.as_str())
            .execute(&mut *conn)
            .await?;
        debug!(%id, rows = result.rows_affected(), "deleted location");
        Ok(())
    }
}
