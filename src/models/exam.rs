//! Exam model.
//!
//! An exam occupies the minute range `[time, time + duration)` on a single
//! calendar date. Exams on different dates never collide.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::time_slot::minute_of_day;

/// Exam sitting kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    Midterm,
    Midterm2,
    Final,
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExamType::Midterm => "midterm",
            ExamType::Midterm2 => "second midterm",
            ExamType::Final => "final",
        };
        f.write_str(s)
    }
}

/// A scheduled exam sitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    /// Unique exam identifier.
    pub id: String,
    /// Course this exam belongs to.
    pub course_code: String,
    /// Exam kind.
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time.
    pub time: NaiveTime,
    /// Length in minutes.
    pub duration_minutes: u32,
    /// Room, if assigned.
    #[serde(default)]
    pub room: Option<String>,
}

impl Exam {
    /// Creates an exam.
    pub fn new(
        id: impl Into<String>,
        course_code: impl Into<String>,
        exam_type: ExamType,
        date: NaiveDate,
        time: NaiveTime,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            course_code: course_code.into(),
            exam_type,
            date,
            time,
            duration_minutes,
            room: None,
        }
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Start as minutes since midnight.
    #[inline]
    pub fn start_minute(&self) -> i64 {
        minute_of_day(self.time)
    }

    /// End (exclusive) as minutes since midnight. May exceed 1440.
    #[inline]
    pub fn end_minute(&self) -> i64 {
        self.start_minute() + i64::from(self.duration_minutes)
    }

    /// Whether two exams collide: same date and overlapping minute ranges.
    pub fn collides_with(&self, other: &Self) -> bool {
        self.date == other.date
            && self.start_minute() < other.end_minute()
            && other.start_minute() < self.end_minute()
    }

    /// Display label, e.g. `"CS101 final"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.course_code, self.exam_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time_slot::hm;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn test_exam_minutes() {
        let e = Exam::new("E1", "CS101", ExamType::Final, date(10), hm(9, 0), 120);
        assert_eq!(e.start_minute(), 540);
        assert_eq!(e.end_minute(), 660);
        assert_eq!(e.label(), "CS101 final");
    }

    #[test]
    fn test_exam_same_date_overlap() {
        let a = Exam::new("E1", "CS101", ExamType::Midterm, date(10), hm(9, 0), 120);
        let b = Exam::new("E2", "MATH101", ExamType::Midterm, date(10), hm(10, 0), 60);
        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));
    }

    #[test]
    fn test_exam_back_to_back_no_collision() {
        let a = Exam::new("E1", "CS101", ExamType::Midterm, date(10), hm(9, 0), 60);
        let b = Exam::new("E2", "MATH101", ExamType::Midterm, date(10), hm(10, 0), 60);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_exam_different_dates_never_collide() {
        let a = Exam::new("E1", "CS101", ExamType::Final, date(10), hm(9, 0), 180);
        let b = Exam::new("E2", "MATH101", ExamType::Final, date(11), hm(9, 0), 180);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_exam_serde_type_field() {
        let e = Exam::new("E1", "CS101", ExamType::Midterm2, date(5), hm(13, 30), 90)
            .with_room("Hall A");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "midterm2");
        let back: Exam = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }
}
