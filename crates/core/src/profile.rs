//! Student profile — the declared preferences the planner filters against.
//!
//! The frontend stores a setup blob in localStorage and sends it verbatim
//! as a JSON string with the shape `{"student": {...}}`. Parsing is
//! lenient end to end: a malformed or missing blob degrades to the empty
//! profile (no constraints) instead of failing the request.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::day::Day;

/// A declared availability interval for one weekday, in `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub from: String,
    pub to: String,
}

/// The student's declared scheduling preferences.
///
/// A day absent from `time_blocks` means "no constraint for that day",
/// not "unavailable". An empty `preferred_days` set disables day
/// filtering entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub preferred_days: BTreeSet<Day>,
    pub time_blocks: BTreeMap<Day, Vec<TimeBlock>>,
    pub interests: Vec<String>,
}

/// The setup envelope the frontend sends: `{"student": {...}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StudentSetup {
    student: StudentProfile,
}

impl StudentProfile {
    /// Parse a profile out of the raw setup JSON string.
    ///
    /// Any malformation (invalid JSON, wrong envelope, bad day codes)
    /// degrades to the default empty profile with a warning; the planner
    /// then runs unconstrained.
    pub fn from_setup_json(raw: &str) -> Self {
        match serde_json::from_str::<StudentSetup>(raw) {
            Ok(setup) => setup.student,
            Err(err) => {
                warn!(error = %err, "Malformed student setup JSON; using empty profile");
                Self::default()
            }
        }
    }

    /// Whether the profile imposes no filtering at all.
    pub fn is_unconstrained(&self) -> bool {
        self.preferred_days.is_empty() && self.time_blocks.is_empty()
    }
}
