use chrono::{Datelike, Duration, NaiveDate};

/// How many calendar days, starting today, a customer can book into.
pub const BOOKING_WINDOW_DAYS: usize = 7;

pub fn next_days(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    today.iter_days().take(count).collect()
}

pub fn within_booking_window(today: NaiveDate, date: NaiveDate) -> bool {
    date >= today && date < today + Duration::days(BOOKING_WINDOW_DAYS as i64)
}

/// Sunday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    next_days(start, 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_days_starts_today() {
        let days = next_days(date(2025, 12, 29), BOOKING_WINDOW_DAYS);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2025, 12, 29));
        assert_eq!(days[6], date(2026, 1, 4));
    }

    #[test]
    fn booking_window_bounds() {
        let today = date(2025, 6, 2);
        assert!(within_booking_window(today, today));
        assert!(within_booking_window(today, date(2025, 6, 8)));
        assert!(!within_booking_window(today, date(2025, 6, 9)));
        assert!(!within_booking_window(today, date(2025, 6, 1)));
    }

    #[test]
    fn weeks_start_on_sunday() {
        assert_eq!(week_start(date(2025, 6, 4)), date(2025, 6, 1));
        assert_eq!(week_start(date(2025, 6, 1)), date(2025, 6, 1));
        assert_eq!(week_days(date(2025, 6, 1))[6], date(2025, 6, 7));
    }
}
