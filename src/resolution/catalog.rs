//! Reference catalogs for the resolution engine: standard daily time
//! blocks and the room inventory.
//!
//! These are configuration data. The defaults mirror the committee's
//! standard week; tests substitute small fixtures.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::time_slot::{hm, minute_of_day};
use crate::models::{Day, TimeSlot};

/// A standard teaching block within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Block start.
    pub start: NaiveTime,
    /// Block end (exclusive).
    pub end: NaiveTime,
}

impl TimeBlock {
    /// Creates a block from hour/minute pairs.
    pub fn hm(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            start: hm(start.0, start.1),
            end: hm(end.0, end.1),
        }
    }

    /// Block length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (minute_of_day(self.end) - minute_of_day(self.start)).max(0)
    }

    /// The block placed on a day.
    pub fn on(&self, day: Day) -> TimeSlot {
        TimeSlot::new(day, self.start, self.end)
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room number, e.g. "101" or "B204".
    pub number: String,
    /// Seat capacity.
    pub capacity: u32,
}

impl Room {
    /// Creates a room.
    pub fn new(number: impl Into<String>, capacity: u32) -> Self {
        Self {
            number: number.into(),
            capacity,
        }
    }

    /// Floor number: the first digit of the room number.
    pub fn floor(&self) -> Option<u32> {
        self.number.chars().find_map(|c| c.to_digit(10))
    }

    /// Whether the room is on the first floor.
    pub fn is_first_floor(&self) -> bool {
        self.floor() == Some(1)
    }
}

/// Six ~90-minute blocks spanning the working day.
pub fn default_time_blocks() -> Vec<TimeBlock> {
    vec![
        TimeBlock::hm((8, 0), (9, 30)),
        TimeBlock::hm((9, 30), (11, 0)),
        TimeBlock::hm((11, 0), (12, 30)),
        TimeBlock::hm((12, 30), (14, 0)),
        TimeBlock::hm((14, 0), (15, 30)),
        TimeBlock::hm((15, 30), (17, 0)),
    ]
}

/// Default room inventory.
pub fn default_rooms() -> Vec<Room> {
    vec![
        Room::new("101", 30),
        Room::new("102", 30),
        Room::new("103", 40),
        Room::new("104", 50),
        Room::new("201", 35),
        Room::new("202", 45),
        Room::new("203", 60),
        Room::new("301", 80),
        Room::new("302", 100),
        Room::new("303", 120),
    ]
}

/// Default teaching days (Sunday through Thursday).
pub fn default_days() -> Vec<Day> {
    Day::TEACHING_WEEK.to_vec()
}
