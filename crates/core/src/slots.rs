//! Slot availability for one barber on one day.
//!
//! Candidate start times are laid on a fixed grid of [`BLOCK_MINUTES`] from the
//! start of the working window. A booking occupies `ceil(duration / block)`
//! consecutive blocks, so a 45 minute service holds two blocks and the
//! remaining 15 minutes are absorbed rather than offered to anyone else.
//!
//! All arithmetic is in whole minutes since midnight. Working windows that
//! cross midnight are not supported and yield no slots.

use std::collections::HashSet;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Grid granularity in minutes.
pub const BLOCK_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// One barber's working window for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
}

impl DaySchedule {
    /// An active day with no break.
    pub fn open(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            start_time,
            end_time,
            is_active: true,
            break_start: None,
            break_end: None,
        }
    }

    pub fn with_break(mut self, break_start: NaiveTime, break_end: NaiveTime) -> Self {
        self.break_start = Some(break_start);
        self.break_end = Some(break_end);
        self
    }

    /// The break as `[start, end)` in minutes; a half-specified break is ignored.
    fn break_window(&self) -> Option<(u32, u32)> {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => {
                Some((minutes_since_midnight(start), minutes_since_midnight(end)))
            }
            _ => None,
        }
    }
}

/// A non-cancelled appointment already holding part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSpan {
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Number of grid blocks a booking of `duration_minutes` occupies.
///
/// Never less than one: even a zero-length entry holds its starting block.
pub fn blocks_for(duration_minutes: u32) -> u32 {
    duration_minutes.div_ceil(BLOCK_MINUTES).max(1)
}

/// Returns every start time at which a booking of `requested_duration`
/// minutes fits inside the working window without touching the break or any
/// existing booking. The result is strictly ascending.
///
/// Malformed windows (`end_time <= start_time`) produce an empty list.
pub fn compute_available_slots(
    schedule: &DaySchedule,
    bookings: &[BookedSpan],
    requested_duration: u32,
) -> Vec<NaiveTime> {
    if !schedule.is_active {
        return Vec::new();
    }

    let day_start = minutes_since_midnight(schedule.start_time);
    let day_end = minutes_since_midnight(schedule.end_time);
    if day_end <= day_start {
        return Vec::new();
    }

    // Each booking blocks its own span, independent of the requested duration.
    let occupied: HashSet<u32> = bookings
        .iter()
        .flat_map(|booking| {
            (minutes_since_midnight(booking.start_time)..MINUTES_PER_DAY)
                .step_by(BLOCK_MINUTES as usize)
                .take(blocks_for(booking.duration_minutes) as usize)
        })
        .collect();

    let break_window = schedule.break_window();
    let blocks_needed = blocks_for(requested_duration);

    (day_start..day_end)
        .step_by(BLOCK_MINUTES as usize)
        .filter(|&candidate| candidate.saturating_add(requested_duration) <= day_end)
        .filter(|&candidate| {
            (0..blocks_needed)
                .map(|i| candidate + i * BLOCK_MINUTES)
                .all(|block| !occupied.contains(&block) && !in_break(block, break_window))
        })
        .filter_map(time_from_minutes)
        .collect()
}

/// Same as [`compute_available_slots`], treating a missing schedule as a
/// day off.
pub fn compute_available_slots_for_day(
    schedule: Option<&DaySchedule>,
    bookings: &[BookedSpan],
    requested_duration: u32,
) -> Vec<NaiveTime> {
    schedule
        .map(|schedule| compute_available_slots(schedule, bookings, requested_duration))
        .unwrap_or_default()
}

fn in_break(block: u32, break_window: Option<(u32, u32)>) -> bool {
    break_window.is_some_and(|(start, end)| block >= start && block < end)
}
