use std::fmt;

use crate::core::model::{LocationId, ProjectId};

/// Screens the client can navigate to, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Landing,
    /// `/project`
    Projects,
    /// `/edit`
    NewProject,
    /// `/edit/{id}`
    EditProject(ProjectId),
    /// `/locations` or `/project/{projectId}/locations`
    Locations(Option<ProjectId>),
    /// `/editlocations`, optionally `?project={projectId}`
    NewLocation(Option<ProjectId>),
    /// `/edit-location/{id}`
    EditLocation(LocationId),
    /// `/preview`, optionally `?project={projectId}`
    Preview(Option<ProjectId>),
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let project_scope = query.and_then(project_param);

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Landing,
            ["project"] => Route::Projects,
            ["edit"] => Route::NewProject,
            ["edit", id] => Route::EditProject(ProjectId::from(decode(id)?)),
            ["locations"] => Route::Locations(None),
            ["project", id, "locations"] => Route::Locations(Some(ProjectId::from(decode(id)?))),
            ["editlocations"] => Route::NewLocation(project_scope),
            ["edit-location", id] => Route::EditLocation(LocationId::from(decode(id)?)),
            ["preview"] => Route::Preview(project_scope),
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Projects => "/project".to_string(),
            Route::NewProject => "/edit".to_string(),
            Route::EditProject(id) => format!("/edit/{}", encode(id.as_str())),
            Route::Locations(None) => "/locations".to_string(),
            Route::Locations(Some(id)) => format!("/project/{}/locations", encode(id.as_str())),
            Route::NewLocation(scope) => with_project_param("/editlocations", scope.as_ref()),
            Route::EditLocation(id) => format!("/edit-location/{}", encode(id.as_str())),
            Route::Preview(scope) => with_project_param("/preview", scope.as_ref()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn project_param(query: &str) -> Option<ProjectId> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "project")
        .and_then(|(_, value)| decode(value))
        .filter(|value| !value.is_empty())
        .map(ProjectId::from)
}

fn with_project_param(path: &str, scope: Option<&ProjectId>) -> String {
    match scope {
        Some(id) => format!("{path}?project={}", encode(id.as_str())),
        None => path.to_string(),
    }
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn decode(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}
