#![allow(dead_code)]

mod fixtures;
pub mod mock_service;

pub use fixtures::*;

// Re-export commonly used types from storypath for tests
pub use storypath::{
    HomescreenDisplay, LocalStore, Location, LocationId, LocationTrigger, NewLocation, NewProject,
    ParticipantScoring, Project, ProjectId, Route, Simulator, StoryPathApi, StoryPathError,
};
