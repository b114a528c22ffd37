//! Catalog loading for Uniplan.
//!
//! The catalog is a set of JSON fixtures shared with the frontend:
//! `schedule.json` (course sections for the term), `professors.json`
//! (rating records), `degree.json` (degree plan), and an optional
//! `required_classes.json` (free-text requirement notes).
//!
//! Loading is deliberately lenient: a missing, empty, BOM-prefixed, or
//! malformed file degrades to an empty structure with a warning, and a
//! single undecodable array entry is skipped rather than poisoning the
//! whole file. Malformed catalog data must never block planning.
//!
//! The catalog is loaded once and shared read-only across all requests;
//! [`CatalogStore`] guards against duplicate concurrent loads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use uniplan_core::{Professor, Section};

/// The read-only catalog every request plans against.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Sections for the term, in fixture order. The planner's greedy
    /// pass and its "first 4" semantics depend on this order.
    pub sections: Vec<Section>,

    /// Professor records keyed by `profId`.
    pub professors: HashMap<String, Professor>,

    /// Degree plan, kept as raw JSON for prompt assembly and health
    /// counts; the core never interprets it.
    pub degree_plan: Value,

    /// Free-text requirement notes for prompt assembly.
    pub required_classes: String,
}

impl Catalog {
    /// Load all fixtures from `data_dir`.
    ///
    /// Never fails: each fixture degrades independently to an empty
    /// value on any kind of malformation.
    pub fn load(data_dir: &Path) -> Self {
        if !data_dir.exists() {
            warn!(dir = %data_dir.display(), "Data directory missing; catalog is empty");
            return Self::default();
        }

        let sections = decode_entries::<Section>(load_json(&data_dir.join("schedule.json")));
        let professors = decode_entries::<Professor>(load_json(&data_dir.join("professors.json")))
            .into_iter()
            .map(|p| (p.prof_id.clone(), p))
            .collect::<HashMap<_, _>>();
        let degree_plan = load_json(&data_dir.join("degree.json"));
        let required_classes = match load_json(&data_dir.join("required_classes.json")) {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        info!(
            sections = sections.len(),
            professors = professors.len(),
            degree_courses = degree_course_count(&degree_plan),
            "Catalog loaded"
        );

        Self {
            sections,
            professors,
            degree_plan,
            required_classes,
        }
    }

    /// Number of core courses in the degree plan, for health reporting.
    pub fn degree_course_count(&self) -> usize {
        degree_course_count(&self.degree_plan)
    }
}

fn degree_course_count(degree_plan: &Value) -> usize {
    degree_plan
        .get("coreCourses")
        .and_then(Value::as_array)
        .map(|a| a.len())
        .unwrap_or(0)
}

/// Read a JSON file leniently: missing file, empty content, or malformed
/// JSON all yield `Value::Null` with a warning. A UTF-8 BOM is stripped
/// before parsing (some fixtures are saved by Windows editors).
pub fn load_json(path: &Path) -> Value {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => {
            warn!(path = %path.display(), "JSON fixture not found; using empty value");
            return Value::Null;
        }
    };

    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        warn!(path = %path.display(), "Empty JSON fixture; using empty value");
        return Value::Null;
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Malformed JSON fixture; using empty value");
            Value::Null
        }
    }
}

/// Decode an array of entries one at a time, skipping entries that fail
/// to decode so a single bad record does not drop the whole file.
fn decode_entries<T: serde::de::DeserializeOwned>(value: Value) -> Vec<T> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(entry) => out.push(entry),
            Err(err) => warn!(index = i, error = %err, "Skipping undecodable catalog entry"),
        }
    }
    out
}

/// A load-once holder for the shared catalog.
///
/// Concurrent callers racing on the first load resolve to a single load;
/// after that every caller gets the same `Arc`.
pub struct CatalogStore {
    data_dir: PathBuf,
    cell: OnceCell<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cell: OnceCell::new(),
        }
    }

    /// Get the catalog, loading it on first use.
    pub async fn get(&self) -> Arc<Catalog> {
        self.cell
            .get_or_init(|| async { Arc::new(Catalog::load(&self.data_dir)) })
            .await
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn loads_sections_and_professors() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            dir.path(),
            "schedule.json",
            r#"[
                {"courseId": "CSE-1310", "profId": "p-1", "start": "09:00", "end": "09:50", "days": ["mon", "wed"]},
                {"courseId": "CSE-1320", "profId": "p-2", "start": "11:00", "end": "12:20", "days": ["tue"]}
            ]"#,
        );
        write_fixture(
            dir.path(),
            "professors.json",
            r#"[{"profId": "p-1", "name": "B. Liskov", "rating": 4.9}]"#,
        );
        write_fixture(dir.path(), "degree.json", r#"{"coreCourses": [1, 2, 3]}"#);

        let catalog = Catalog::load(dir.path());
        assert_eq!(catalog.sections.len(), 2);
        assert_eq!(catalog.sections[0].course_id, "CSE-1310");
        assert_eq!(catalog.professors["p-1"].name, "B. Liskov");
        assert_eq!(catalog.degree_course_count(), 3);
    }

    #[test]
    fn missing_dir_yields_empty_catalog() {
        let catalog = Catalog::load(Path::new("/definitely/not/here"));
        assert!(catalog.sections.is_empty());
        assert!(catalog.professors.is_empty());
    }

    #[test]
    fn malformed_fixture_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "schedule.json", "{not valid json");
        let catalog = Catalog::load(dir.path());
        assert!(catalog.sections.is_empty());
    }

    #[test]
    fn empty_and_bom_fixtures_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "schedule.json", "   ");
        write_fixture(dir.path(), "professors.json", "\u{feff}[]");
        let catalog = Catalog::load(dir.path());
        assert!(catalog.sections.is_empty());
        assert!(catalog.professors.is_empty());
    }

    #[test]
    fn bad_entry_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            dir.path(),
            "schedule.json",
            r#"[
                {"courseId": "GOOD", "profId": "p-1", "start": "09:00", "end": "09:50", "days": ["mon"]},
                {"courseId": "BAD", "days": ["notaday"]},
                {"courseId": "ALSO-GOOD", "profId": "p-2", "start": "10:00", "end": "10:50", "days": ["fri"]}
            ]"#,
        );
        let catalog = Catalog::load(dir.path());
        let ids: Vec<_> = catalog.sections.iter().map(|s| s.course_id.as_str()).collect();
        assert_eq!(ids, vec!["GOOD", "ALSO-GOOD"]);
    }

    #[tokio::test]
    async fn store_loads_once_under_concurrency() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            dir.path(),
            "schedule.json",
            r#"[{"courseId": "X", "profId": "p", "start": "09:00", "end": "09:50", "days": ["mon"]}]"#,
        );

        let store = Arc::new(CatalogStore::new(dir.path()));
        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.get().await })
        };
        let b = store.get().await;
        let a = a.await.unwrap();

        // Both callers see the same shared instance.
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.sections.len(), 1);
    }
}
