//! Section model.
//!
//! A section is one scheduled instance of a course. It owns its meeting
//! slots but only references its instructor and room by name; the engine
//! assumes no foreign-key identity for either.

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A scheduled teaching unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Course code (e.g., "CS101").
    pub course_code: String,
    /// Human-readable course name.
    pub course_name: String,
    /// Instructor name.
    pub instructor: String,
    /// Room name, if assigned.
    #[serde(default)]
    pub room: Option<String>,
    /// Seat capacity.
    pub capacity: u32,
    /// Current enrollment.
    pub enrolled_count: u32,
    /// Weekly meetings.
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl Section {
    /// Creates a section with no instructor, room or meetings.
    pub fn new(id: impl Into<String>, course_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            course_code: course_code.into(),
            course_name: String::new(),
            instructor: String::new(),
            room: None,
            capacity: 0,
            enrolled_count: 0,
            time_slots: Vec::new(),
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.course_name = name.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets capacity and enrollment.
    pub fn with_enrollment(mut self, capacity: u32, enrolled_count: u32) -> Self {
        self.capacity = capacity;
        self.enrolled_count = enrolled_count;
        self
    }

    /// Adds a meeting slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Seats over capacity (0 when within capacity).
    pub fn overage(&self) -> u32 {
        self.enrolled_count.saturating_sub(self.capacity)
    }

    /// Whether enrollment exceeds capacity.
    pub fn is_over_capacity(&self) -> bool {
        self.enrolled_count > self.capacity
    }

    /// Duration of the first meeting in minutes, if any.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.time_slots.first().map(TimeSlot::duration_minutes)
    }

    /// Display label, e.g. `"CS101 (S1)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.course_code, self.id)
    }

    /// Whether the instructor field names someone.
    pub fn has_instructor(&self) -> bool {
        !self.instructor.trim().is_empty()
    }
}
