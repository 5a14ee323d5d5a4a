use crate::core::model::{
    HomescreenDisplay, Location, LocationId, ParticipantScoring, Project, ProjectId,
};

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub initial_clue: Option<String>,
    pub homescreen_display: String,
    pub participant_scoring: String,
    pub is_published: bool,
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct LocationRecord {
    pub id: String,
    pub project_id: String,
    pub location_name: String,
    pub location_trigger: String,
    pub location_position: String,
    pub score_points: i64,
    pub clue: Option<String>,
    pub location_content: String,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = anyhow::Error;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let homescreen_display: HomescreenDisplay = record.homescreen_display.parse()?;
        Ok(Project {
            id: ProjectId::from(record.id),
            title: record.title,
            description: record.description,
            instructions: record.instructions,
            initial_clue: record.initial_clue,
            homescreen_display,
            participant_scoring: ParticipantScoring::from(record.participant_scoring),
            is_published: record.is_published,
        })
    }
}

impl TryFrom<LocationRecord> for Location {
    type Error = anyhow::Error;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Ok(Location {
            id: LocationId::from(record.id),
            project_id: ProjectId::from(record.project_id),
            location_name: record.location_name,
            location_trigger: record.location_trigger.parse()?,
            location_position: record.location_position,
            score_points: u32::try_from(record.score_points)?,
            clue: record.clue,
            location_content: record.location_content,
        })
    }
}
