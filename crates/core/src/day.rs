//! Weekday codes used throughout the catalog and schedule types.
//!
//! Days serialize as the three-letter lowercase codes the frontend and
//! catalog fixtures use (`"sun"`, `"mon"`, ...). The derived `Ord` follows
//! the week starting on Sunday, so a `BTreeMap<Day, _>` iterates in
//! display order without extra sorting.

use serde::{Deserialize, Serialize};

/// A day of the week, ordered sun..sat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Day {
    /// The wire code for this day (`"mon"`, `"tue"`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            Day::Sun => "sun",
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Day::Mon).unwrap(), "\"mon\"");
        assert_eq!(serde_json::to_string(&Day::Sat).unwrap(), "\"sat\"");
    }

    #[test]
    fn deserializes_from_code() {
        let day: Day = serde_json::from_str("\"wed\"").unwrap();
        assert_eq!(day, Day::Wed);
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(serde_json::from_str::<Day>("\"monday\"").is_err());
    }

    #[test]
    fn ordering_starts_on_sunday() {
        let mut days = vec![Day::Fri, Day::Sun, Day::Tue];
        days.sort();
        assert_eq!(days, vec![Day::Sun, Day::Tue, Day::Fri]);
    }
}
