//! Atlas - REST CRUD service for countries and greetings
//!
//! Layers, bottom up: `models` (entities), `db` (stores and transactions), `services`
//! (lifecycle rules), `api` (axum router). `state::AppState` wires them together.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod startup;
pub mod state;

pub use error::{Error, Result};
