use storypath::{
    HomescreenDisplay, LocalStore, Location, LocationId, LocationTrigger, NewLocation, NewProject,
    ParticipantScoring, Project, ProjectId,
};

/// Creates a LocalStore backed by a file in a fresh temp directory.
/// Returns both the store and the temp directory (which must be kept alive).
pub async fn create_test_store() -> (LocalStore, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let store = LocalStore::open(dir.path().join("test.db"))
        .await
        .expect("Failed to open test store");
    (store, dir)
}

/// Creates a NewProject with test data and the given scoring rule.
pub fn make_new_project(title: &str, scoring: ParticipantScoring) -> NewProject {
    NewProject {
        title: title.to_string(),
        description: format!("{title} description"),
        instructions: "Walk around and find every location".to_string(),
        initial_clue: Some("Start at the library".to_string()),
        homescreen_display: HomescreenDisplay::InitialClue,
        participant_scoring: scoring,
        is_published: false,
    }
}

/// Creates a NewLocation bound to `project_id`.
pub fn make_new_location(project_id: &ProjectId, name: &str, score_points: u32) -> NewLocation {
    NewLocation {
        project_id: project_id.clone(),
        location_name: name.to_string(),
        location_trigger: LocationTrigger::QrCodeScan,
        location_position: "(-27.4975, 153.0137)".to_string(),
        score_points,
        clue: Some(format!("Look near {name}")),
        location_content: format!("<p>Welcome to <strong>{name}</strong></p>"),
    }
}

/// Builds a Project in memory, without any backend.
pub fn project(id: &str, scoring: ParticipantScoring) -> Project {
    let new = make_new_project("Campus Tour", scoring);
    Project {
        id: ProjectId::new(id),
        title: new.title,
        description: new.description,
        instructions: new.instructions,
        initial_clue: new.initial_clue,
        homescreen_display: new.homescreen_display,
        participant_scoring: new.participant_scoring,
        is_published: new.is_published,
    }
}

/// Builds a Location in memory, bound to project `project_id`.
pub fn location(id: &str, project_id: &str, name: &str, score_points: u32) -> Location {
    let new = make_new_location(&ProjectId::new(project_id), name, score_points);
    Location {
        id: LocationId::new(id),
        project_id: new.project_id,
        location_name: new.location_name,
        location_trigger: new.location_trigger,
        location_position: new.location_position,
        score_points: new.score_points,
        clue: new.clue,
        location_content: new.location_content,
    }
}

/// Seeds a store with one project and `points.len()` locations scoring `points`.
pub async fn seed_project(
    store: &LocalStore,
    scoring: ParticipantScoring,
    points: &[u32],
) -> anyhow::Result<(Project, Vec<Location>)> {
    use storypath::StoryPathApi;

    let project = store
        .create_project(&make_new_project("Campus Tour", scoring))
        .await?;
    let mut locations = Vec::with_capacity(points.len());
    for (i, points) in points.iter().enumerate() {
        let new = make_new_location(&project.id, &format!("Stop {}", i + 1), *points);
        locations.push(store.create_location(&new).await?);
    }
    Ok((project, locations))
}
