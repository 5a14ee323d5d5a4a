use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::core::error::StoryPathError;

/// Wire ids arrive as JSON strings from some backends and integers from others.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }
    };
}

opaque_id!(
    /// Identifier assigned to a project by the data store.
    ProjectId
);
opaque_id!(
    /// Identifier assigned to a location by the data store.
    LocationId
);

/// What the participant's home screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomescreenDisplay {
    #[serde(rename = "Display initial clue")]
    InitialClue,
    #[serde(rename = "Display all locations")]
    AllLocations,
}

impl HomescreenDisplay {
    pub const ALL: [HomescreenDisplay; 2] =
        [HomescreenDisplay::InitialClue, HomescreenDisplay::AllLocations];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomescreenDisplay::InitialClue => "Display initial clue",
            HomescreenDisplay::AllLocations => "Display all locations",
        }
    }
}

impl fmt::Display for HomescreenDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomescreenDisplay {
    type Err = StoryPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomescreenDisplay::ALL
            .into_iter()
            .find(|display| display.as_str() == s)
            .ok_or_else(|| StoryPathError::InvalidValue {
                field: "homescreen_display",
                value: s.to_string(),
            })
    }
}

/// Rule that turns visited locations into a participant score.
///
/// Values written by other tools are kept verbatim in `Unrecognized` and score
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParticipantScoring {
    NotScored,
    ScannedQrCodes,
    LocationsEntered,
    Unrecognized(String),
}

impl ParticipantScoring {
    pub const ALL: [ParticipantScoring; 3] = [
        ParticipantScoring::NotScored,
        ParticipantScoring::ScannedQrCodes,
        ParticipantScoring::LocationsEntered,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ParticipantScoring::NotScored => "Not Scored",
            ParticipantScoring::ScannedQrCodes => "Number of Scanned QR Codes",
            ParticipantScoring::LocationsEntered => "Number of Locations Entered",
            ParticipantScoring::Unrecognized(value) => value,
        }
    }

    /// Points a first visit to `location` is worth under this rule.
    pub fn points_for(&self, location: &Location) -> u64 {
        match self {
            ParticipantScoring::ScannedQrCodes => 1,
            ParticipantScoring::LocationsEntered => u64::from(location.score_points),
            ParticipantScoring::NotScored | ParticipantScoring::Unrecognized(_) => 0,
        }
    }
}

impl fmt::Display for ParticipantScoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ParticipantScoring {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Not Scored" => ParticipantScoring::NotScored,
            "Number of Scanned QR Codes" => ParticipantScoring::ScannedQrCodes,
            "Number of Locations Entered" => ParticipantScoring::LocationsEntered,
            _ => ParticipantScoring::Unrecognized(value),
        }
    }
}

impl From<ParticipantScoring> for String {
    fn from(scoring: ParticipantScoring) -> Self {
        match scoring {
            ParticipantScoring::Unrecognized(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Condition that marks a location as reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationTrigger {
    #[serde(rename = "Location Entry")]
    LocationEntry,
    #[serde(rename = "QR Code Scan")]
    QrCodeScan,
    #[serde(rename = "Both Location Entry and QR Code Scan")]
    Both,
}

impl LocationTrigger {
    pub const ALL: [LocationTrigger; 3] = [
        LocationTrigger::LocationEntry,
        LocationTrigger::QrCodeScan,
        LocationTrigger::Both,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationTrigger::LocationEntry => "Location Entry",
            LocationTrigger::QrCodeScan => "QR Code Scan",
            LocationTrigger::Both => "Both Location Entry and QR Code Scan",
        }
    }
}

impl fmt::Display for LocationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationTrigger {
    type Err = StoryPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocationTrigger::ALL
            .into_iter()
            .find(|trigger| trigger.as_str() == s)
            .ok_or_else(|| StoryPathError::InvalidValue {
                field: "location_trigger",
                value: s.to_string(),
            })
    }
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A cleared points field arrives as `null`, and older rows may hold negative
/// values. Both read as 0 so one bad row never fails a whole collection.
fn nullable_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let Some(points) = Option::<i64>::deserialize(deserializer)? else {
        return Ok(0);
    };
    if points < 0 {
        warn!(points, "negative score_points read as 0");
        return Ok(0);
    }
    Ok(u32::try_from(points).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub instructions: String,
    #[serde(default)]
    pub initial_clue: Option<String>,
    pub homescreen_display: HomescreenDisplay,
    pub participant_scoring: ParticipantScoring,
    #[serde(default)]
    pub is_published: bool,
}

/// Authored project fields, sent on create and on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub initial_clue: Option<String>,
    pub homescreen_display: HomescreenDisplay,
    pub participant_scoring: ParticipantScoring,
    pub is_published: bool,
}

impl Project {
    pub fn to_new(&self) -> NewProject {
        NewProject {
            title: self.title.clone(),
            description: self.description.clone(),
            instructions: self.instructions.clone(),
            initial_clue: self.initial_clue.clone(),
            homescreen_display: self.homescreen_display,
            participant_scoring: self.participant_scoring.clone(),
            is_published: self.is_published,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub project_id: ProjectId,
    pub location_name: String,
    pub location_trigger: LocationTrigger,
    #[serde(default, deserialize_with = "nullable_string")]
    pub location_position: String,
    #[serde(default, deserialize_with = "nullable_points")]
    pub score_points: u32,
    #[serde(default)]
    pub clue: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub location_content: String,
}

/// Authored location fields, sent on create and on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub project_id: ProjectId,
    pub location_name: String,
    pub location_trigger: LocationTrigger,
    pub location_position: String,
    pub score_points: u32,
    pub clue: Option<String>,
    pub location_content: String,
}

impl Location {
    pub fn to_new(&self) -> NewLocation {
        NewLocation {
            project_id: self.project_id.clone(),
            location_name: self.location_name.clone(),
            location_trigger: self.location_trigger,
            location_position: self.location_position.clone(),
            score_points: self.score_points,
            clue: self.clue.clone(),
            location_content: self.location_content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_strings_and_integers() {
        let from_number: ProjectId = serde_json::from_str("42").unwrap();
        let from_text: ProjectId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }

    #[test]
    fn unknown_scoring_is_kept_and_scores_nothing() {
        let scoring: ParticipantScoring = serde_json::from_str("\"Time Taken\"").unwrap();
        assert_eq!(scoring, ParticipantScoring::Unrecognized("Time Taken".into()));
        assert_eq!(serde_json::to_string(&scoring).unwrap(), "\"Time Taken\"");
    }

    #[test]
    fn project_tolerates_null_text_columns() {
        let json = r#"{
            "id": 7,
            "title": "Campus Walk",
            "description": null,
            "instructions": null,
            "initial_clue": null,
            "homescreen_display": "Display all locations",
            "participant_scoring": "Number of Locations Entered",
            "is_published": true
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id.as_str(), "7");
        assert_eq!(project.description, "");
        assert_eq!(project.homescreen_display, HomescreenDisplay::AllLocations);
        assert_eq!(project.participant_scoring, ParticipantScoring::LocationsEntered);
    }

    #[test]
    fn location_points_tolerate_null_and_negative() {
        let row = |points: &str| {
            format!(
                r#"{{"id": 3, "project_id": 7, "location_name": "Library",
                    "location_trigger": "QR Code Scan", "score_points": {points}}}"#
            )
        };
        let cleared: Location = serde_json::from_str(&row("null")).unwrap();
        assert_eq!(cleared.score_points, 0);
        let negative: Location = serde_json::from_str(&row("-5")).unwrap();
        assert_eq!(negative.score_points, 0);
        let normal: Location = serde_json::from_str(&row("12")).unwrap();
        assert_eq!(normal.score_points, 12);
    }

    #[test]
    fn trigger_rejects_unknown_labels() {
        assert_eq!("QR Code Scan".parse::<LocationTrigger>().unwrap(), LocationTrigger::QrCodeScan);
        assert!("Teleport".parse::<LocationTrigger>().is_err());
    }
}
