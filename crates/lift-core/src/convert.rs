//! Field conversions applied uniformly by the entity transformers.
//!
//! Conversions here are pure and total — values outside expected ranges are
//! clamped, never rejected. Per-record validation happens earlier, at the
//! parse-and-validate boundary.

use crate::sheet::{CellValue, ContactValue};
use chrono::{DateTime, NaiveDate, Utc};

/// Default hour-per-day scaling factor for rendering durations as day counts.
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// The seven priority labels, lowest first.
pub const PRIORITY_LABELS: [&str; 7] =
    ["Lowest", "Lower", "Low", "Medium", "High", "Higher", "Highest"];

/// Inclusive lower bound of each priority band, aligned with
/// [`PRIORITY_LABELS`].
const PRIORITY_BOUNDS: [i64; 7] = [0, 143, 286, 429, 572, 715, 858];

/// Drop the time-of-day from a source timestamp.
#[must_use]
pub fn date_only(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Render a duration in hours as a day-count string (e.g. `2d`, `2.5d`).
///
/// `hours_per_day` defaults to [`DEFAULT_HOURS_PER_DAY`] at the call sites;
/// non-positive factors fall back to the default rather than dividing by
/// zero.
#[must_use]
pub fn hours_to_day_count(hours: f64, hours_per_day: f64) -> String {
    let factor = if hours_per_day > 0.0 {
        hours_per_day
    } else {
        DEFAULT_HOURS_PER_DAY
    };
    format!("{}d", trim_number(hours / factor))
}

/// Render raw effort hours as a suffixed hour string (e.g. `12h`).
#[must_use]
pub fn hours_to_effort(hours: f64) -> String {
    format!("{}h", trim_number(hours))
}

/// Render a fractional ratio as a whole percentage string (`0.5` → `50%`).
///
/// The ratio is clamped to `[0, 1]` before rendering.
#[must_use]
pub fn ratio_to_percent(ratio: f64) -> String {
    let clamped = ratio.clamp(0.0, 1.0);
    format!("{}%", (clamped * 100.0).round() as i64)
}

/// Map a 0-1000 priority value to one of the seven ordered labels.
///
/// Band lower bounds are inclusive: 858 and everything above maps to
/// `Highest`, 857 still maps to `Higher`. Out-of-range values are clamped
/// into the scale so the mapping stays total.
#[must_use]
pub fn priority_label(value: i64) -> &'static str {
    let clamped = value.clamp(0, 1000);
    let idx = PRIORITY_BOUNDS
        .iter()
        .rposition(|bound| clamped >= *bound)
        .unwrap_or(0);
    PRIORITY_LABELS[idx]
}

/// Combine a name and optional address into one contact cell value.
///
/// Falls back to a name-only contact when the address is absent or blank.
#[must_use]
pub fn contact_value(name: &str, email: Option<&str>) -> CellValue {
    CellValue::Contact(ContactValue {
        name: name.to_owned(),
        email: email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_owned),
    })
}

/// Format a float with up to two decimals, trimming trailing zeros.
fn trim_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let mut s = format!("{rounded:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Lowest")]
    #[case(142, "Lowest")]
    #[case(143, "Lower")]
    #[case(285, "Lower")]
    #[case(286, "Low")]
    #[case(428, "Low")]
    #[case(429, "Medium")]
    #[case(500, "Medium")]
    #[case(571, "Medium")]
    #[case(572, "High")]
    #[case(714, "High")]
    #[case(715, "Higher")]
    #[case(857, "Higher")]
    #[case(858, "Highest")]
    #[case(950, "Highest")]
    #[case(1000, "Highest")]
    fn priority_bands_have_inclusive_lower_bounds(#[case] value: i64, #[case] label: &str) {
        assert_eq!(priority_label(value), label);
    }

    #[test]
    fn priority_is_total_over_the_scale() {
        let mut previous = 0;
        for value in 0..=1000 {
            let idx = PRIORITY_LABELS
                .iter()
                .position(|l| *l == priority_label(value))
                .unwrap();
            assert!(idx >= previous, "labels must never step backwards");
            previous = idx;
        }
        assert_eq!(previous, PRIORITY_LABELS.len() - 1);
    }

    #[test]
    fn priority_clamps_out_of_range_values() {
        assert_eq!(priority_label(-5), "Lowest");
        assert_eq!(priority_label(20_000), "Highest");
    }

    #[test]
    fn day_count_uses_scaling_factor() {
        assert_eq!(hours_to_day_count(16.0, 8.0), "2d");
        assert_eq!(hours_to_day_count(20.0, 8.0), "2.5d");
        assert_eq!(hours_to_day_count(8.0, 0.0), "1d"); // falls back to default
    }

    #[test]
    fn effort_trims_trailing_zeros() {
        assert_eq!(hours_to_effort(12.0), "12h");
        assert_eq!(hours_to_effort(1.25), "1.25h");
        assert_eq!(hours_to_effort(1.5), "1.5h");
    }

    #[test]
    fn ratio_renders_whole_percent() {
        assert_eq!(ratio_to_percent(0.5), "50%");
        assert_eq!(ratio_to_percent(0.0), "0%");
        assert_eq!(ratio_to_percent(1.0), "100%");
        assert_eq!(ratio_to_percent(0.333), "33%");
        assert_eq!(ratio_to_percent(1.7), "100%"); // clamped
    }

    #[test]
    fn date_only_drops_time() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        assert_eq!(date_only(ts), NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn contact_falls_back_to_name_only() {
        let with_email = contact_value("Dana Cruz", Some("dana@example.com"));
        assert_eq!(
            with_email,
            CellValue::Contact(ContactValue {
                name: "Dana Cruz".into(),
                email: Some("dana@example.com".into())
            })
        );

        let blank = contact_value("Dana Cruz", Some("   "));
        assert_eq!(
            blank,
            CellValue::Contact(ContactValue {
                name: "Dana Cruz".into(),
                email: None
            })
        );
    }
}
