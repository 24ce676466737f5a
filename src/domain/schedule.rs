use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    availability::{WorkingHours, format_slot, parse_slot},
    calendar::{week_days, week_start},
};

/// First and last row of the weekly grid; rows are 30 minutes apart.
const GRID_OPEN_HOUR: u32 = 8;
const GRID_CLOSE_HOUR: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookedSlot {
    pub date: NaiveDate,
    pub time: String,
    pub appointment_id: Uuid,
    pub client_id: Uuid,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScheduleCell {
    UnavailableDay,
    OutsideHours,
    Booked {
        appointment_id: Uuid,
        client_id: Uuid,
        services: Vec<String>,
    },
    Available,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleRow {
    pub time: String,
    pub cells: Vec<ScheduleCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeekSchedule {
    pub week_start: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub working_hours: WorkingHours,
    pub rows: Vec<ScheduleRow>,
}

pub fn grid_times() -> Vec<String> {
    (GRID_OPEN_HOUR..GRID_CLOSE_HOUR)
        .flat_map(|hour| [0, 30].map(move |minute| (hour, minute)))
        .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
        .map(format_slot)
        .collect()
}

/// Builds the week (Sunday first) that contains `any_day`.
///
/// A booking always shows up in its cell, even if the barber's hours changed
/// after it was made; otherwise the cell reflects working days and hours.
pub fn build_week(hours: &WorkingHours, any_day: NaiveDate, booked: &[BookedSlot]) -> WeekSchedule {
    let start = week_start(any_day);
    let days = week_days(start);

    let by_cell: HashMap<(NaiveDate, &str), &BookedSlot> = booked
        .iter()
        .map(|slot| ((slot.date, slot.time.as_str()), slot))
        .collect();

    let rows = grid_times()
        .into_iter()
        .map(|time| {
            let in_hours = parse_slot(&time)
                .map(|t| hours.covers(t))
                .unwrap_or(false);
            let cells = days
                .iter()
                .map(|day| match by_cell.get(&(*day, time.as_str())) {
                    Some(slot) => ScheduleCell::Booked {
                        appointment_id: slot.appointment_id,
                        client_id: slot.client_id,
                        services: slot.services.clone(),
                    },
                    None if !hours.works_on(*day) => ScheduleCell::UnavailableDay,
                    None if !in_hours => ScheduleCell::OutsideHours,
                    None => ScheduleCell::Available,
                })
                .collect();
            ScheduleRow { time, cells }
        })
        .collect();

    WeekSchedule {
        week_start: start,
        days,
        working_hours: hours.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_half_hour_rows() {
        let times = grid_times();
        assert_eq!(times.len(), 24);
        assert_eq!(times.first().map(String::as_str), Some("08:00"));
        assert_eq!(times.last().map(String::as_str), Some("19:30"));
    }

    #[test]
    fn cells_reflect_days_hours_and_bookings() {
        let hours = WorkingHours {
            start: "09:00".into(),
            end: "18:00".into(),
            days: vec![1, 2, 3, 4, 5],
        };
        // Wednesday 2025-06-04, week starts Sunday 2025-06-01
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let booking = BookedSlot {
            date: monday,
            time: "10:00".into(),
            appointment_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            services: vec!["Classic cut".into()],
        };
        let week = build_week(
            &hours,
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            std::slice::from_ref(&booking),
        );

        assert_eq!(week.week_start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let row = |t: &str| week.rows.iter().find(|r| r.time == t).unwrap();

        assert_eq!(row("10:00").cells[0], ScheduleCell::UnavailableDay);
        assert!(matches!(row("10:00").cells[1], ScheduleCell::Booked { .. }));
        assert_eq!(row("10:30").cells[1], ScheduleCell::Available);
        assert_eq!(row("08:30").cells[1], ScheduleCell::OutsideHours);
        assert_eq!(row("18:00").cells[2], ScheduleCell::OutsideHours);
    }
}
