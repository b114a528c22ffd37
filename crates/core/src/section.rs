//! Catalog entities: course sections and professor records.
//!
//! These are immutable facts owned by the catalog loader; the planner
//! only reads them. Field names follow the camelCase JSON fixtures the
//! frontend shares.

use serde::{Deserialize, Serialize};

use crate::day::Day;

/// One schedulable offering of a course with fixed days/time and
/// instructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub course_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,

    #[serde(default)]
    pub prof_id: String,

    /// Start time as `HH:MM`; may be malformed in the fixture, in which
    /// case time filtering skips this section's containment check.
    #[serde(default)]
    pub start: String,

    /// End time as `HH:MM`.
    #[serde(default)]
    pub end: String,

    /// Meeting weekdays.
    #[serde(default)]
    pub days: Vec<Day>,
}

/// A professor rating record, used only for display enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    pub prof_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_deserializes_from_fixture_shape() {
        let raw = r#"{
            "courseId": "CSE-3320",
            "courseTitle": "Operating Systems",
            "profId": "p-17",
            "start": "10:00",
            "end": "10:50",
            "days": ["mon", "wed", "fri"]
        }"#;
        let section: Section = serde_json::from_str(raw).unwrap();
        assert_eq!(section.course_id, "CSE-3320");
        assert_eq!(section.days, vec![Day::Mon, Day::Wed, Day::Fri]);
    }

    #[test]
    fn optional_fields_default() {
        let section: Section = serde_json::from_str(r#"{"courseId": "X"}"#).unwrap();
        assert!(section.course_title.is_none());
        assert!(section.days.is_empty());
        assert!(section.start.is_empty());
    }

    #[test]
    fn professor_rating_is_optional() {
        let prof: Professor =
            serde_json::from_str(r#"{"profId": "p-1", "name": "A. Grace"}"#).unwrap();
        assert_eq!(prof.name, "A. Grace");
        assert!(prof.rating.is_none());
    }
}
