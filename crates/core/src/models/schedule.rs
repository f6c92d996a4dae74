use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slots::DaySchedule;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Stored schedule row for one barber and weekday (0 = Sunday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdaySchedule {
    pub id: Uuid,
    pub barber_id: Uuid,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
}

impl WeekdaySchedule {
    pub fn day_schedule(&self) -> DaySchedule {
        DaySchedule {
            start_time: self.start_time,
            end_time: self.end_time,
            is_active: self.is_active,
            break_start: self.break_start,
            break_end: self.break_end,
        }
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.day_of_week).unwrap_or("Unknown")
    }
}

pub fn day_name(day_of_week: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(day_of_week)).copied()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDayRequest {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
    #[serde(default)]
    pub break_start: Option<NaiveTime>,
    #[serde(default)]
    pub break_end: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWeekRequest {
    pub days: Vec<ScheduleDayRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekScheduleResponse {
    pub barber_id: Uuid,
    pub days: Vec<WeekdaySchedule>,
}

/// Opening hours every new barber starts with: Monday to Friday 09:00-19:00,
/// Saturday 09:00-18:00, closed on Sunday.
pub fn default_week() -> Vec<ScheduleDayRequest> {
    (0..7u8)
        .map(|day_of_week| {
            let (start, end, is_active) = match day_of_week {
                0 => ((0, 0), (0, 0), false),
                6 => ((9, 0), (18, 0), true),
                _ => ((9, 0), (19, 0), true),
            };
            ScheduleDayRequest {
                day_of_week,
                start_time: hm(start),
                end_time: hm(end),
                is_active,
                break_start: None,
                break_end: None,
            }
        })
        .collect()
}

fn hm((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}
