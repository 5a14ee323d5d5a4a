use anyhow::Context;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::core::{
    api::StoryPathApi,
    error::StoryPathError,
    model::{Location, LocationId, NewLocation, NewProject, Project, ProjectId},
};

const PROJECT_TABLE: &str = "project";
const LOCATION_TABLE: &str = "location";

/// Client for a PostgREST-style service exposing `project` and `location`
/// tables.
///
/// Filters use the `column=eq.value` syntax, and writes ask for the stored row
/// back with `Prefer: return=representation`. Every read answers with a JSON
/// array, including lookups by id.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    client: Client,
}

impl RestClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, table))
    }

    async fn send(
        &self,
        method: &'static str,
        request: RequestBuilder,
    ) -> anyhow::Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(StoryPathError::Http {
            method,
            url,
            status: status.as_u16(),
            body,
        }
        .into())
    }

    async fn fetch_all<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: Option<(&str, &str)>,
    ) -> anyhow::Result<Vec<T>> {
        let mut request = self.request(Method::GET, table);
        if let Some((column, value)) = filter {
            request = request.query(&[(column, format!("eq.{value}"))]);
        }
        let rows = self
            .send("GET", request)
            .await?
            .json::<Vec<T>>()
            .await
            .with_context(|| format!("Failed to decode {table} rows"))?;
        debug!(table, count = rows.len(), "fetched rows");
        Ok(rows)
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        table: &'static str,
        id: &str,
    ) -> anyhow::Result<T> {
        first_row(self.fetch_all(table, Some(("id", id))).await?, table, id)
    }

    async fn insert<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        table: &'static str,
        body: &B,
    ) -> anyhow::Result<T> {
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body);
        let rows = self
            .send("POST", request)
            .await?
            .json::<Vec<T>>()
            .await
            .with_context(|| format!("Failed to decode created {table} row"))?;
        first_row(rows, table, "<new>")
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        table: &'static str,
        id: &str,
        body: &B,
    ) -> anyhow::Result<T> {
        let request = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(body);
        let rows = self
            .send("PATCH", request)
            .await?
            .json::<Vec<T>>()
            .await
            .with_context(|| format!("Failed to decode updated {table} row"))?;
        first_row(rows, table, id)
    }

    async fn remove(&self, table: &'static str, id: &str) -> anyhow::Result<()> {
        let request = self
            .request(Method::DELETE, table)
            .query(&[("id", format!("eq.{id}"))]);
        self.send("DELETE", request).await?;
        Ok(())
    }
}

fn first_row<T>(rows: Vec<T>, table: &'static str, id: &str) -> anyhow::Result<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| StoryPathError::not_found(table, id).into())
}

impl StoryPathApi for RestClient {
    async fn get_projects(&self) -> anyhow::Result<Vec<Project>> {
        self.fetch_all(PROJECT_TABLE, None).await
    }

    async fn get_project(&self, id: &ProjectId) -> anyhow::Result<Project> {
        self.fetch_one(PROJECT_TABLE, id.as_str()).await
    }

    async fn create_project(&self, project: &NewProject) -> anyhow::Result<Project> {
        self.insert(PROJECT_TABLE, project).await
    }

    async fn update_project(&self, id: &ProjectId, project: &NewProject) -> anyhow::Result<Project> {
        self.patch(PROJECT_TABLE, id.as_str(), project).await
    }

    async fn delete_project(&self, id: &ProjectId) -> anyhow::Result<()> {
        self.remove(PROJECT_TABLE, id.as_str()).await
    }

    async fn get_locations(&self) -> anyhow::Result<Vec<Location>> {
        self.fetch_all(LOCATION_TABLE, None).await
    }

    async fn get_locations_by_project_id(
        &self,
        project_id: &ProjectId,
    ) -> anyhow::Result<Vec<Location>> {
        self.fetch_all(LOCATION_TABLE, Some(("project_id", project_id.as_str())))
            .await
    }

    async fn get_location(&self, id: &LocationId) -> anyhow::Result<Location> {
        self.fetch_one(LOCATION_TABLE, id.as_str()).await
    }

    async fn create_location(&self, location: &NewLocation) -> anyhow::Result<Location> {
        self.insert(LOCATION_TABLE, location).await
    }

    async fn update_location(
        &self,
        id: &LocationId,
        location: &NewLocation,
    ) -> anyhow::Result<Location> {
        self.patch(LOCATION_TABLE, id.as_str(), location).await
    }

    async fn delete_location(&self, id: &LocationId) -> anyhow::Result<()> {
        self.remove(LOCATION_TABLE, id.as_str()).await
    }
}
