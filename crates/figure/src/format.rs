//! Tick label formatting.

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

/// Formats a number of seconds as a duration: `H:MM:SS`, prefixed with
/// `N day(s), ` past one day and suffixed with `.ffffff` for fractional
/// seconds. Negative durations borrow whole days, so `-1` second is
/// `-1 day, 23:59:59`.
///
/// Non-finite values are printed as plain numbers.
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() {
        return seconds.to_string();
    }
    let total = (seconds * MICROS_PER_SECOND as f64).round_ties_even() as i64;
    let days = total.div_euclid(MICROS_PER_DAY);
    let rem = total.rem_euclid(MICROS_PER_DAY);

    let micros = rem % MICROS_PER_SECOND;
    let secs = rem / MICROS_PER_SECOND;
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);

    let mut out = String::new();
    if days != 0 {
        let plural = if days.abs() == 1 { "" } else { "s" };
        out.push_str(&format!("{days} day{plural}, "));
    }
    out.push_str(&format!("{h}:{m:02}:{s:02}"));
    if micros != 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}

/// Formats a tick value with at most two decimals.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_under_a_day() {
        assert_eq!(format_seconds(0.0), "0:00:00");
        assert_eq!(format_seconds(59.0), "0:00:59");
        assert_eq!(format_seconds(3661.0), "1:01:01");
    }

    #[test]
    fn seconds_with_days() {
        assert_eq!(format_seconds(86_400.0), "1 day, 0:00:00");
        assert_eq!(format_seconds(2.0 * 86_400.0 + 7200.0), "2 days, 2:00:00");
    }

    #[test]
    fn fractional_seconds() {
        assert_eq!(format_seconds(1.5), "0:00:01.500000");
    }

    #[test]
    fn negative_seconds_borrow_a_day() {
        assert_eq!(format_seconds(-1.0), "-1 day, 23:59:59");
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(1.234_56), "1.23");
        assert_eq!(format_number(-0.001), "0");
    }
}
