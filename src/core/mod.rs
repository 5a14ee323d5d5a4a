pub mod api;
pub mod content;
pub mod db;
pub mod editor;
pub mod error;
pub mod listing;
pub mod model;
pub mod qr;
pub mod route;
pub mod simulator;
