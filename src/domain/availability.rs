use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Distance between two consecutive bookable slots.
pub const SLOT_MINUTES: i64 = 30;

const SLOT_FORMAT: &str = "%H:%M";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("invalid time `{0}`, expected HH:MM")]
    InvalidTime(String),

    #[error("working hours must start before they end")]
    EmptyWindow,

    #[error("weekday {0} is out of range 0-6")]
    InvalidWeekday(u8),
}

/// A daily opening window plus the weekdays it applies to.
///
/// Weekdays are counted from Sunday (`0`) to Saturday (`6`). The window is
/// half-open: a slot starting exactly at `end` is not bookable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
    pub days: Vec<u8>,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: "09:00".into(),
            end: "18:00".into(),
            days: vec![1, 2, 3, 4, 5],
        }
    }
}

impl WorkingHours {
    /// Opening hours of the shop itself, used when no settings were saved yet.
    pub fn business_default() -> Self {
        Self {
            start: "09:00".into(),
            end: "19:00".into(),
            days: vec![1, 2, 3, 4, 5, 6],
        }
    }

    pub fn window(&self) -> Result<(NaiveTime, NaiveTime), SlotError> {
        let start = parse_slot(&self.start)?;
        let end = parse_slot(&self.end)?;
        if start >= end {
            return Err(SlotError::EmptyWindow);
        }
        Ok((start, end))
    }

    pub fn validate(&self) -> Result<(), SlotError> {
        self.window()?;
        if let Some(day) = self.days.iter().find(|d| **d > 6) {
            return Err(SlotError::InvalidWeekday(*day));
        }
        Ok(())
    }

    /// Sorts and deduplicates the weekday list, keeping the stored form stable.
    pub fn normalized(mut self) -> Self {
        self.days.sort_unstable();
        self.days.dedup();
        self
    }

    pub fn works_on(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday().num_days_from_sunday() as u8;
        self.days.contains(&weekday)
    }

    pub fn covers(&self, time: NaiveTime) -> bool {
        match self.window() {
            Ok((start, end)) => time >= start && time < end,
            Err(_) => false,
        }
    }

    /// Every slot start inside the window, `SLOT_MINUTES` apart.
    pub fn candidate_slots(&self) -> Vec<NaiveTime> {
        let Ok((start, end)) = self.window() else {
            return Vec::new();
        };
        let step = Duration::minutes(SLOT_MINUTES);
        let mut slots = Vec::new();
        let mut current = start;
        while current < end {
            slots.push(current);
            let (next, wrapped) = current.overflowing_add_signed(step);
            if wrapped != 0 {
                break;
            }
            current = next;
        }
        slots
    }
}

pub fn parse_slot(value: &str) -> Result<NaiveTime, SlotError> {
    NaiveTime::parse_from_str(value.trim(), SLOT_FORMAT)
        .map_err(|_| SlotError::InvalidTime(value.to_string()))
}

pub fn format_slot(time: NaiveTime) -> String {
    time.format(SLOT_FORMAT).to_string()
}

/// Canonical `HH:MM` form of a user-supplied slot, e.g. `9:00` -> `09:00`.
pub fn normalize_slot(value: &str) -> Result<String, SlotError> {
    parse_slot(value).map(format_slot)
}

fn is_booked<S: AsRef<str>>(booked: &[S], time: NaiveTime) -> bool {
    booked
        .iter()
        .any(|taken| parse_slot(taken.as_ref()).is_ok_and(|t| t == time))
}

/// A slot is free when the barber works that weekday, the time is one of the
/// slot starts inside the working window and no booking holds that time.
/// `9:00` and `09:00` name the same slot.
pub fn is_slot_available<S: AsRef<str>>(
    hours: &WorkingHours,
    date: NaiveDate,
    slot: &str,
    booked: &[S],
) -> bool {
    let Ok(time) = parse_slot(slot) else {
        return false;
    };
    hours.works_on(date) && hours.candidate_slots().contains(&time) && !is_booked(booked, time)
}

pub fn available_slots<S: AsRef<str>>(
    hours: &WorkingHours,
    date: NaiveDate,
    booked: &[S],
) -> Vec<String> {
    if !hours.works_on(date) {
        return Vec::new();
    }
    hours
        .candidate_slots()
        .into_iter()
        .filter(|time| !is_booked(booked, *time))
        .map(format_slot)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hours(start: &str, end: &str, days: &[u8]) -> WorkingHours {
        WorkingHours {
            start: start.into(),
            end: end.into(),
            days: days.to_vec(),
        }
    }

    #[test]
    fn slots_cover_half_open_window() {
        // 2025-06-02 is a Monday
        let h = hours("09:00", "11:00", &[1]);
        let slots = available_slots::<&str>(&h, date(2025, 6, 2), &[]);
        assert_eq!(slots, vec!["09:00", "09:30", "10:00", "10:30"]);
    }

    #[test]
    fn booked_times_are_excluded() {
        let h = hours("09:00", "11:00", &[1]);
        let slots = available_slots(&h, date(2025, 6, 2), &["09:30", "10:30"]);
        assert_eq!(slots, vec!["09:00", "10:00"]);
    }

    #[test]
    fn day_off_has_no_slots() {
        // 2025-06-01 is a Sunday
        let h = hours("09:00", "18:00", &[1, 2, 3, 4, 5]);
        assert!(available_slots::<&str>(&h, date(2025, 6, 1), &[]).is_empty());
        assert!(!is_slot_available::<&str>(&h, date(2025, 6, 1), "10:00", &[]));
    }

    #[test]
    fn end_time_is_not_bookable() {
        let h = hours("09:00", "18:00", &[1]);
        assert!(is_slot_available::<&str>(&h, date(2025, 6, 2), "17:30", &[]));
        assert!(!is_slot_available::<&str>(&h, date(2025, 6, 2), "18:00", &[]));
        assert!(!is_slot_available::<&str>(&h, date(2025, 6, 2), "08:30", &[]));
    }

    #[test]
    fn occupied_slot_is_unavailable() {
        let h = hours("09:00", "18:00", &[1]);
        assert!(!is_slot_available(&h, date(2025, 6, 2), "10:00", &["10:00"]));
        assert!(is_slot_available(&h, date(2025, 6, 2), "10:30", &["10:00"]));
    }

    #[test]
    fn unpadded_times_name_the_same_slot() {
        let h = hours("09:00", "18:00", &[1]);
        assert!(!is_slot_available(&h, date(2025, 6, 2), "9:00", &["09:00"]));
        assert!(!is_slot_available(&h, date(2025, 6, 2), "09:00", &["9:00"]));
        let slots = available_slots(&h, date(2025, 6, 2), &["9:30"]);
        assert_eq!(&slots[..2], ["09:00", "10:00"]);
    }

    #[test]
    fn off_grid_time_is_not_a_slot() {
        let h = hours("09:00", "18:00", &[1]);
        assert!(!is_slot_available::<&str>(&h, date(2025, 6, 2), "09:15", &[]));
    }

    #[test]
    fn window_late_in_the_day_does_not_wrap() {
        let h = hours("23:00", "23:59", &[1]);
        assert_eq!(h.candidate_slots().len(), 2);
    }

    #[test]
    fn validation_rejects_bad_windows() {
        assert_eq!(
            hours("18:00", "09:00", &[1]).validate(),
            Err(SlotError::EmptyWindow)
        );
        assert_eq!(
            hours("09:00", "18:00", &[7]).validate(),
            Err(SlotError::InvalidWeekday(7))
        );
        assert!(matches!(
            hours("9h", "18:00", &[1]).validate(),
            Err(SlotError::InvalidTime(_))
        ));
    }

    #[test]
    fn normalize_pads_hours() {
        assert_eq!(normalize_slot("9:00").unwrap(), "09:00");
        assert!(normalize_slot("25:00").is_err());
    }
}
