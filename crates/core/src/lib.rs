//! # Uniplan Core
//!
//! Domain types, traits, and error definitions for the Uniplan academic
//! advisor. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The model backend is defined as a trait here; implementations live in
//! `uniplan-providers`. This enables:
//! - Swapping backends via configuration
//! - Easy testing with mock/stub model clients
//! - Clean dependency graph (all crates depend inward on core)

pub mod chat;
pub mod day;
pub mod error;
pub mod model;
pub mod profile;
pub mod response;
pub mod section;
pub mod time;

// Re-export key types at crate root for ergonomics
pub use chat::{ChatTurn, TurnRole};
pub use day::Day;
pub use error::{Error, ModelError, Result};
pub use model::ModelClient;
pub use profile::{StudentProfile, TimeBlock};
pub use response::{AdvisorReply, AdvisorResponse, Schedule, ScheduleBlock};
pub use section::{Professor, Section};
pub use time::parse_minutes;
