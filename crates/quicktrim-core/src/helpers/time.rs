// crates/quicktrim-core/src/helpers/time.rs
//
// Time formatting shared by the overlay readout, status messages and the
// encoder argument builder. All three must agree on the same string, so there
// is exactly one implementation and it lives here.

/// Format a position in seconds as `HH:MM:SS`.
///
/// Sub-second precision is floored, never rounded — `59.9` is still in the
/// 59th second. Hours are not capped at two digits. Negative input is treated
/// as zero; callers are expected to clamp before formatting anyway.
///
/// ```
/// use quicktrim_core::helpers::time::format_hms;
/// assert_eq!(format_hms(0.0),    "00:00:00");
/// assert_eq!(format_hms(3661.0), "01:01:01");
/// assert_eq!(format_hms(59.9),   "00:00:59");
/// ```
pub fn format_hms(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds.floor() as u64 } else { 0 };
    let (minutes, secs) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(format_hms(0.0), "00:00:00");
    }

    #[test]
    fn carries_into_hours_and_minutes() {
        assert_eq!(format_hms(3661.0), "01:01:01");
        assert_eq!(format_hms(3599.0), "00:59:59");
        assert_eq!(format_hms(3600.0), "01:00:00");
    }

    #[test]
    fn floors_instead_of_rounding() {
        assert_eq!(format_hms(59.9), "00:00:59");
        assert_eq!(format_hms(0.999), "00:00:00");
    }

    #[test]
    fn hours_are_not_capped() {
        assert_eq!(format_hms(360_000.0), "100:00:00");
    }

    #[test]
    fn negative_and_nan_format_as_zero() {
        assert_eq!(format_hms(-4.0), "00:00:00");
        assert_eq!(format_hms(f64::NAN), "00:00:00");
    }
}
