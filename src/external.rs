//! Externally fixed courses owned by other departments.
//!
//! The set is materialized once per evaluation run (typically from a JSON
//! export) and is read-only afterwards. External meetings and exams are
//! constraints: they take part in overlap checks and fill the resolution
//! engine's occupied sets, but are never themselves moved.
//!
//! # JSON shape
//!
//! ```json
//! [
//!   {
//!     "code": "PHYS101",
//!     "name": "General Physics",
//!     "sections": [{
//!       "id": "PHYS101-1", "course_code": "PHYS101", "course_name": "General Physics",
//!       "instructor": "Dr. Hale", "capacity": 60, "enrolled_count": 55,
//!       "time_slots": [{ "day": "monday", "start": "09:00:00", "end": "10:30:00" }]
//!     }],
//!     "exams": []
//!   }
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Exam, ExternalCourse, Section, TimeSlot};
use crate::timeslots;

/// Immutable set of external courses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalCourseSet {
    courses: Vec<ExternalCourse>,
}

impl ExternalCourseSet {
    /// An empty set (no external constraints).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps already-materialized courses.
    pub fn from_courses(courses: Vec<ExternalCourse>) -> Self {
        debug!(count = courses.len(), "external courses loaded");
        Self { courses }
    }

    /// Parses a JSON array of external courses.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let courses: Vec<ExternalCourse> = serde_json::from_str(json)?;
        Ok(Self::from_courses(courses))
    }

    /// Reads and parses a JSON file of external courses.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// All external courses.
    pub fn courses(&self) -> &[ExternalCourse] {
        &self.courses
    }

    /// Looks up a course by code.
    pub fn get(&self, code: &str) -> Option<&ExternalCourse> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Whether the set contains no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Every external meeting pattern, paired with its course.
    pub fn sections(&self) -> impl Iterator<Item = (&ExternalCourse, &Section)> {
        self.courses
            .iter()
            .flat_map(|c| c.sections.iter().map(move |s| (c, s)))
    }

    /// Every external meeting slot.
    pub fn occupied_slots(&self) -> Vec<TimeSlot> {
        self.courses.iter().flat_map(|c| c.slots().copied()).collect()
    }

    /// Every external exam, paired with its course.
    pub fn exams(&self) -> impl Iterator<Item = (&ExternalCourse, &Exam)> {
        self.courses
            .iter()
            .flat_map(|c| c.exams.iter().map(move |e| (c, e)))
    }

    /// Checks the loaded data and returns human-readable problems.
    ///
    /// Problems never abort an evaluation; they are reported alongside it.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut codes = HashSet::new();

        for course in &self.courses {
            if course.code.trim().is_empty() {
                errors.push(format!("External course '{}' has no code", course.name));
            } else if !codes.insert(course.code.as_str()) {
                errors.push(format!("Duplicate external course code: {}", course.code));
            }

            for section in &course.sections {
                for slot in section.time_slots.iter().filter(|s| !s.is_valid()) {
                    errors.push(format!(
                        "External course {} section {}: invalid time slot {}",
                        course.code, section.id, slot
                    ));
                }
                for (i, j) in timeslots::validate_collection(&section.time_slots).conflicts {
                    errors.push(format!(
                        "External course {} section {}: meetings {} and {} overlap",
                        course.code, section.id, section.time_slots[i], section.time_slots[j]
                    ));
                }
            }

            for exam in course.exams.iter().filter(|e| e.duration_minutes == 0) {
                errors.push(format!(
                    "External course {} exam {} has zero duration",
                    course.code, exam.id
                ));
            }
        }

        for e in &errors {
            warn!(problem = %e, "external course data");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, ExamType};
    use chrono::{NaiveDate, NaiveTime};

    const SAMPLE: &str = r#"[
      {
        "code": "PHYS101",
        "name": "General Physics",
        "sections": [{
          "id": "PHYS101-1", "course_code": "PHYS101", "course_name": "General Physics",
          "instructor": "Dr. Hale", "capacity": 60, "enrolled_count": 55,
          "time_slots": [
            { "day": "monday", "start": "09:00:00", "end": "10:30:00" },
            { "day": "wednesday", "start": "09:00:00", "end": "10:30:00" }
          ]
        }],
        "exams": [{
          "id": "PHYS101-F", "course_code": "PHYS101", "type": "final",
          "date": "2026-01-12", "time": "09:00:00", "duration_minutes": 120
        }]
      },
      { "code": "CHEM101", "name": "Chemistry" }
    ]"#;

    #[test]
    fn test_load_from_json() {
        let set = ExternalCourseSet::from_json_str(SAMPLE).unwrap();
        assert_eq!(set.courses().len(), 2);
        assert_eq!(set.occupied_slots().len(), 2);
        assert_eq!(set.exams().count(), 1);
        assert_eq!(set.sections().count(), 1);
        assert!(set.get("CHEM101").unwrap().sections.is_empty());
        assert!(set.validate().is_empty());
    }

    #[test]
    fn test_load_bad_json() {
        assert!(ExternalCourseSet::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ExternalCourseSet::from_json_file("/nonexistent/external.json").unwrap_err();
        assert!(matches!(err, crate::error::TimetableError::Io(_)));
    }

    #[test]
    fn test_validate_reports_problems() {
        let bad_section = Section::new("X-1", "X")
            .with_slot(TimeSlot::hm(Day::Sunday, (10, 0), (9, 0)))
            .with_slot(TimeSlot::hm(Day::Monday, (9, 0), (11, 0)))
            .with_slot(TimeSlot::hm(Day::Monday, (10, 0), (12, 0)));
        let exam = Exam::new(
            "X-F",
            "X",
            ExamType::Final,
            NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            0,
        );
        let set = ExternalCourseSet::from_courses(vec![
            ExternalCourse::new("X", "Ext").with_section(bad_section).with_exam(exam),
            ExternalCourse::new("X", "Dup"),
            ExternalCourse::new("  ", "Blank"),
        ]);

        let errors = set.validate();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.contains("invalid time slot")));
        assert!(errors.iter().any(|e| e.contains("overlap")));
        assert!(errors.iter().any(|e| e.contains("zero duration")));
        assert!(errors.iter().any(|e| e.contains("Duplicate")));
        assert!(errors.iter().any(|e| e.contains("no code")));
    }

    #[test]
    fn test_empty_set() {
        let set = ExternalCourseSet::empty();
        assert!(set.is_empty());
        assert!(set.occupied_slots().is_empty());
        assert!(set.validate().is_empty());
    }
}
