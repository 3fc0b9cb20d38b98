use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whole work days between two calendar dates.
///
/// Takes the absolute day difference and subtracts every Saturday and Sunday
/// in the inclusive range between the two dates. Holidays are not
/// considered. The argument order does not matter and the result never goes
/// below zero, so a span that starts or ends on a weekend day can come out
/// as 0 even when the raw difference is positive.
pub fn work_days_remaining(from: NaiveDate, to: NaiveDate) -> i64 {
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    let days = (hi - lo).num_days();
    let weekend_days = lo
        .iter_days()
        .take_while(|d| *d <= hi)
        .filter(|d| is_weekend(*d))
        .count() as i64;
    (days - weekend_days).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01 is a Monday.
    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn same_day_is_zero() {
        for day in 1..=14 {
            assert_eq!(work_days_remaining(jan(day), jan(day)), 0, "day {day}");
        }
    }

    #[test]
    fn symmetric_under_swap() {
        for a in 1..=20 {
            for b in 1..=20 {
                assert_eq!(
                    work_days_remaining(jan(a), jan(b)),
                    work_days_remaining(jan(b), jan(a)),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn weekday_span_without_weekend() {
        assert_eq!(work_days_remaining(jan(1), jan(5)), 4);
    }

    #[test]
    fn one_full_weekend_removes_two_days() {
        // Friday -> Monday: 3 raw days, Saturday and Sunday in between.
        let raw = (jan(8) - jan(5)).num_days();
        assert_eq!(raw, 3);
        assert_eq!(work_days_remaining(jan(5), jan(8)), raw - 2);
        assert_eq!(work_days_remaining(jan(1), jan(8)), 5);
    }

    #[test]
    fn two_weeks_out() {
        assert_eq!(work_days_remaining(jan(1), jan(15)), 10);
    }

    #[test]
    fn weekend_only_span_saturates_at_zero() {
        assert_eq!(work_days_remaining(jan(6), jan(7)), 0);
        assert_eq!(work_days_remaining(jan(6), jan(6)), 0);
    }

    #[test]
    fn crosses_year_boundary() {
        let fri = NaiveDate::from_ymd_opt(2023, 12, 29).unwrap();
        assert_eq!(work_days_remaining(fri, jan(2)), 2);
    }

    #[test]
    fn weekend_detection() {
        assert!(!is_weekend(jan(5)));
        assert!(is_weekend(jan(6)));
        assert!(is_weekend(jan(7)));
        assert!(!is_weekend(jan(8)));
    }
}
