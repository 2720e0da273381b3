//! Day-scoped time slot model.
//!
//! A slot is a half-open wall-clock interval `[start, end)` on one
//! teaching day. Slots on different days never overlap.
//!
//! # Zero-length slots
//! A slot with `start == end` is representable. It never overlaps
//! anything, not even another zero-length slot at the same instant.
//! Input validation flags `start >= end` separately.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Day of the teaching week.
///
/// Ordered Sunday first, matching a Sunday-Thursday working week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All days, Sunday first.
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// The default teaching week (Sunday through Thursday).
    pub const TEACHING_WEEK: [Day; 5] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
    ];

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = String;

    /// Accepts full names and three-letter abbreviations, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| {
                let name = d.name().to_ascii_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| format!("unknown day '{s}'"))
    }
}

/// A meeting interval `[start, end)` on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Teaching day.
    pub day: Day,
    /// Start time (inclusive).
    pub start: NaiveTime,
    /// End time (exclusive).
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Creates a slot from explicit times.
    pub fn new(day: Day, start: NaiveTime, end: NaiveTime) -> Self {
        Self { day, start, end }
    }

    /// Creates a slot from hour/minute pairs.
    ///
    /// Out-of-range components fall back to midnight, which yields a slot
    /// that fails [`TimeSlot::validate`].
    pub fn hm(day: Day, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            day,
            start: hm(start.0, start.1),
            end: hm(end.0, end.1),
        }
    }

    /// Whether `start < end`.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Checks the `start < end` invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(format!("invalid time slot {self}: start must be before end"))
        }
    }

    /// Start as minutes since midnight.
    #[inline]
    pub fn start_minute(&self) -> i64 {
        minute_of_day(self.start)
    }

    /// End as minutes since midnight.
    #[inline]
    pub fn end_minute(&self) -> i64 {
        minute_of_day(self.end)
    }

    /// Duration in whole minutes (0 for inverted slots).
    pub fn duration_minutes(&self) -> i64 {
        (self.end_minute() - self.start_minute()).max(0)
    }

    /// Duration in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }

    /// Whether two slots overlap (same day, half-open intervals intersect).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Wall-clock time from hour and minute, midnight when out of range.
pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Minutes since midnight.
#[inline]
pub(crate) fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}
