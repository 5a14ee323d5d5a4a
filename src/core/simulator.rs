//! Participant playthrough simulation for the preview screen.
//!
//! A [`Simulator`] starts out loading. Once it holds a project and at least one
//! location it is ready: the first location is selected and every selection
//! counts as a visit. Visits are deduplicated by location id, and the score is
//! raised in the same step a location is first recorded as visited, so a
//! revisit can never score twice.

use std::{collections::HashSet, fmt};

use tracing::{debug, warn};

use crate::core::{
    api::StoryPathApi,
    content,
    model::{HomescreenDisplay, Location, LocationId, Project, ProjectId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    Loading,
    Ready,
}

#[derive(Debug, Clone, Default)]
pub struct Simulator {
    project: Option<Project>,
    locations: Vec<Location>,
    current: Option<usize>,
    visited: Vec<LocationId>,
    visited_ids: HashSet<LocationId>,
    score: u64,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ready session in one go; stays loading if either input is missing.
    pub fn with_data(project: Option<Project>, locations: Vec<Location>) -> Self {
        let mut simulator = Self::new();
        if let Some(project) = project {
            simulator.project_loaded(project);
        }
        simulator.locations_loaded(locations);
        simulator
    }

    pub fn project_loaded(&mut self, project: Project) {
        self.project = Some(project);
    }

    pub fn locations_loaded(&mut self, locations: Vec<Location>) {
        self.current = if locations.is_empty() { None } else { Some(0) };
        self.locations = locations;
    }

    pub fn state(&self) -> SimulatorState {
        if self.project.is_some() && !self.locations.is_empty() {
            SimulatorState::Ready
        } else {
            SimulatorState::Loading
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SimulatorState::Ready
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Make `id` the active location and record the visit.
    ///
    /// Returns `false`, changing nothing, when the session is still loading or
    /// `id` is not one of the fetched locations.
    pub fn select(&mut self, id: &LocationId) -> bool {
        if !self.is_ready() {
            return false;
        }
        let Some(index) = self.locations.iter().position(|location| &location.id == id) else {
            debug!(%id, "ignoring selection of unknown location");
            return false;
        };
        self.current = Some(index);
        self.visit(index);
        true
    }

    /// Record a visit to `location` and score it under the project's rule.
    ///
    /// Returns `true` only for the first visit to a location id in this
    /// session.
    pub fn track_visit(&mut self, location: &Location) -> bool {
        if !self.is_ready() {
            return false;
        }
        match self.locations.iter().position(|known| known.id == location.id) {
            Some(index) => self.visit(index),
            None => false,
        }
    }

    fn visit(&mut self, index: usize) -> bool {
        let (Some(project), Some(location)) = (self.project.as_ref(), self.locations.get(index))
        else {
            return false;
        };
        if !self.visited_ids.insert(location.id.clone()) {
            return false;
        }
        let points = project.participant_scoring.points_for(location);
        self.visited.push(location.id.clone());
        self.score += points;
        debug!(id = %location.id, points, score = self.score, "visited location");
        true
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.current.and_then(|index| self.locations.get(index))
    }

    pub fn visited_locations(&self) -> &[LocationId] {
        &self.visited
    }

    pub fn has_visited(&self, id: &LocationId) -> bool {
        self.visited_ids.contains(id)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn home(&self) -> Option<HomeScreen<'_>> {
        let project = self.project.as_ref().filter(|_| self.is_ready())?;
        let body = match project.homescreen_display {
            HomescreenDisplay::InitialClue => HomeBody::InitialClue(project.initial_clue.as_deref()),
            HomescreenDisplay::AllLocations => HomeBody::AllLocations(
                self.locations
                    .iter()
                    .map(|location| location.location_name.as_str())
                    .collect(),
            ),
        };
        Some(HomeScreen {
            title: &project.title,
            instructions: &project.instructions,
            body,
        })
    }

    pub fn active_location(&self) -> Option<ActiveLocation<'_>> {
        self.current_location()
            .filter(|_| self.is_ready())
            .map(|location| ActiveLocation { location })
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            visited: self.visited.len(),
            total: self.locations.len(),
        }
    }
}

/// Load the data a preview plays through.
///
/// With a project scope, that project and its own locations. Without one, the
/// first project the backend lists and every location it knows. Fetch errors
/// are logged and leave the simulator loading.
pub async fn load_preview<A: StoryPathApi>(api: &A, scope: Option<&ProjectId>) -> Simulator {
    let (project, locations) = tokio::join!(
        fetch_preview_project(api, scope),
        fetch_preview_locations(api, scope)
    );
    let project = project.unwrap_or_else(|e| {
        warn!("Failed to load preview project: {e:#}");
        None
    });
    let locations = locations.unwrap_or_else(|e| {
        warn!("Failed to load preview locations: {e:#}");
        Vec::new()
    });
    Simulator::with_data(project, locations)
}

pub async fn fetch_preview_project<A: StoryPathApi>(
    api: &A,
    scope: Option<&ProjectId>,
) -> anyhow::Result<Option<Project>> {
    match scope {
        Some(id) => Ok(Some(api.get_project(id).await?)),
        None => Ok(api.get_projects().await?.into_iter().next()),
    }
}

pub async fn fetch_preview_locations<A: StoryPathApi>(
    api: &A,
    scope: Option<&ProjectId>,
) -> anyhow::Result<Vec<Location>> {
    match scope {
        Some(id) => api.get_locations_by_project_id(id).await,
        None => api.get_locations().await,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeScreen<'a> {
    pub title: &'a str,
    pub instructions: &'a str,
    pub body: HomeBody<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeBody<'a> {
    InitialClue(Option<&'a str>),
    AllLocations(Vec<&'a str>),
}

impl fmt::Display for HomeScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Instructions: {}", self.instructions)?;
        match &self.body {
            HomeBody::InitialClue(clue) => write!(f, "Initial Clue: {}", clue.unwrap_or("")),
            HomeBody::AllLocations(names) => {
                write!(f, "All Locations:")?;
                for name in names {
                    write!(f, "\n  - {name}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActiveLocation<'a> {
    pub location: &'a Location,
}

impl ActiveLocation<'_> {
    pub fn clue(&self) -> Option<&str> {
        self.location.clue.as_deref().filter(|clue| !clue.is_empty())
    }

    /// The location's markup flattened to text.
    pub fn content_text(&self) -> String {
        content::to_plain_text(&self.location.location_content)
    }
}

impl fmt::Display for ActiveLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location;
        writeln!(f, "{}", location.location_name)?;
        writeln!(f, "Location Trigger: {}", location.location_trigger)?;
        write!(f, "Position: {}", location.location_position)?;
        if let Some(clue) = self.clue() {
            write!(f, "\nClue: {clue}")?;
        }
        let content = self.content_text();
        if !content.is_empty() {
            write!(f, "\n\n{content}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u64,
    pub visited: usize,
    pub total: usize,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Points: {}\nLocations Visited: {}/{}",
            self.score, self.visited, self.total
        )
    }
}
