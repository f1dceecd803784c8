//! Time normalization for human- and planner-supplied clock strings.
//!
//! The backend and the planner both emit times in whatever shape the model
//! produced ("10am", "7:30 PM", "All Day", "14:30:00"). Everything downstream
//! wants either a canonical `HH:MM:00`, the all-day marker, or nothing.

use regex::Regex;
use std::sync::OnceLock;

/// Sentinel meaning "no time-of-day component".
pub const ALL_DAY: &str = "all-day";

fn clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?\s*(am|pm)?$").expect("clock pattern")
    })
}

/// Normalize an optional raw time string.
///
/// Returns `None` when no time was specified (absent or blank), [`ALL_DAY`]
/// for "all day"/"allday" (case-insensitive), or a canonical `HH:MM:00`
/// string for 12/24-hour clock input. Strings that match none of the above
/// pass through unchanged; this never fails.
///
/// Deliberately permissive: hours outside 1-12 with a meridiem ("13pm") are
/// converted numerically rather than rejected.
pub fn normalize_time(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    if lower == "all day" || lower == "allday" {
        return Some(ALL_DAY.to_string());
    }

    let caps = match clock_re().captures(value) {
        Some(caps) => caps,
        None => return Some(value.to_string()),
    };

    // One or two digits always parse.
    let mut hours: u32 = caps[1].parse().unwrap_or(0);
    let minutes: u32 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
        Some("pm") if hours < 12 => hours += 12,
        Some("am") if hours == 12 => hours = 0,
        _ => {}
    }

    Some(format!("{hours:02}:{minutes:02}:00"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afternoon_12h() {
        assert_eq!(normalize_time(Some("2pm")).as_deref(), Some("14:00:00"));
        assert_eq!(normalize_time(Some("7:30pm")).as_deref(), Some("19:30:00"));
        assert_eq!(normalize_time(Some("12pm")).as_deref(), Some("12:00:00"));
    }

    #[test]
    fn test_midnight_12h() {
        assert_eq!(normalize_time(Some("12am")).as_deref(), Some("00:00:00"));
        assert_eq!(normalize_time(Some("12:45 AM")).as_deref(), Some("00:45:00"));
    }

    #[test]
    fn test_24h_short_form() {
        assert_eq!(normalize_time(Some("9")).as_deref(), Some("09:00:00"));
        assert_eq!(normalize_time(Some("14:30")).as_deref(), Some("14:30:00"));
    }

    #[test]
    fn test_all_day_marker() {
        assert_eq!(normalize_time(Some("All Day")).as_deref(), Some(ALL_DAY));
        assert_eq!(normalize_time(Some("allday")).as_deref(), Some(ALL_DAY));
        assert_eq!(normalize_time(Some("  ALL DAY  ")).as_deref(), Some(ALL_DAY));
    }

    #[test]
    fn test_absent_and_blank() {
        assert_eq!(normalize_time(None), None);
        assert_eq!(normalize_time(Some("")), None);
        assert_eq!(normalize_time(Some("   ")), None);
    }

    #[test]
    fn test_non_matching_passes_through() {
        // Already-canonical HH:MM:SS does not match the 12-hour pattern.
        assert_eq!(normalize_time(Some("14:30:00")).as_deref(), Some("14:30:00"));
        assert_eq!(normalize_time(Some("noonish")).as_deref(), Some("noonish"));
    }

    #[test]
    fn test_out_of_range_hour_is_not_rejected() {
        assert_eq!(normalize_time(Some("13pm")).as_deref(), Some("13:00:00"));
        assert_eq!(normalize_time(Some("99")).as_deref(), Some("99:00:00"));
    }
}
