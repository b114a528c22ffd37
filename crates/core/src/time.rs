//! Wall-clock parsing for interval comparisons.
//!
//! Catalog times arrive as `HH:MM` strings. Everything that compares
//! intervals does so on minutes since midnight. Malformed input yields
//! `None` rather than an error: callers treat an unparseable time as
//! "constraint cannot be evaluated, do not enforce it", so bad catalog
//! data never blocks planning.

/// Parse an `HH:MM` string into minutes since midnight.
///
/// Returns `None` for anything that is not two numeric fields joined by a
/// single colon (missing colon, extra fields, non-numeric parts, empty
/// input).
pub fn parse_minutes(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_times() {
        assert_eq!(parse_minutes("00:00"), Some(0));
        assert_eq!(parse_minutes("09:30"), Some(570));
        assert_eq!(parse_minutes("23:59"), Some(1439));
    }

    #[test]
    fn parses_single_digit_hours() {
        assert_eq!(parse_minutes("9:05"), Some(545));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_minutes(" 10:00 "), Some(600));
    }

    #[test]
    fn rejects_missing_colon() {
        assert_eq!(parse_minutes("0930"), None);
    }

    #[test]
    fn rejects_non_numeric_parts() {
        assert_eq!(parse_minutes("nine:30"), None);
        assert_eq!(parse_minutes("09:3o"), None);
    }

    #[test]
    fn rejects_empty_and_extra_fields() {
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("09:30:00"), None);
    }
}
