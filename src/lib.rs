pub mod config;
pub mod core;

pub use crate::core::api::{Backend, BackendConfig, RestClient, StoryPathApi};
pub use crate::core::db::LocalStore;
pub use crate::core::error::StoryPathError;
pub use crate::core::model::{
    HomescreenDisplay, Location, LocationId, LocationTrigger, NewLocation, NewProject,
    ParticipantScoring, Project, ProjectId,
};
pub use crate::core::route::Route;
pub use crate::core::simulator::Simulator;

#[cfg(feature = "gui")]
pub mod gui;
