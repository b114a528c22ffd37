//! The canonical advisor response shape.
//!
//! Both the model path and the offline fallback path converge on
//! [`AdvisorReply`], so callers never branch on which path ran. The
//! provider that produced a reply is carried in the type system as
//! [`AdvisorResponse`] rather than as a loose string key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::Day;

/// One block of a planned schedule as shown to the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub from: String,
    pub to: String,
    pub course: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub prof: String,
}

/// A day-keyed schedule. Days with no blocks are pruned before the map
/// is returned, so no key ever maps to an empty list. Block order within
/// a day follows catalog iteration order.
pub type Schedule = BTreeMap<Day, Vec<ScheduleBlock>>;

/// The provider-agnostic payload: `{message, schedule?, debug?}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorReply {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Map<String, serde_json::Value>>,
}

impl AdvisorReply {
    /// A schedule-less reply carrying only a message.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            schedule: None,
            debug: None,
        }
    }
}

/// A reply tagged with the provider that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorResponse {
    /// The external model answered and its output was extracted.
    Model(AdvisorReply),
    /// The deterministic offline planner answered.
    Fallback(AdvisorReply),
}

impl AdvisorResponse {
    /// The wire tag for this provider.
    pub fn provider_tag(&self) -> &'static str {
        match self {
            AdvisorResponse::Model(_) => "model",
            AdvisorResponse::Fallback(_) => "fallback",
        }
    }

    /// Borrow the shared payload.
    pub fn reply(&self) -> &AdvisorReply {
        match self {
            AdvisorResponse::Model(r) | AdvisorResponse::Fallback(r) => r,
        }
    }

    /// Consume into the payload with the provider tag folded into the
    /// debug map, ready for the wire.
    pub fn into_tagged_reply(self) -> AdvisorReply {
        let tag = self.provider_tag();
        let mut reply = match self {
            AdvisorResponse::Model(r) | AdvisorResponse::Fallback(r) => r,
        };
        let debug = reply.debug.get_or_insert_with(serde_json::Map::new);
        debug.insert("provider".into(), serde_json::Value::String(tag.into()));
        reply
    }
}
