//! Student model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Exam, Section};

/// A student's term view: enrolled sections, their exams and academic history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Study level (year).
    pub level: u8,
    /// Enrolled sections this term.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Exams of the enrolled courses.
    #[serde(default)]
    pub exams: Vec<Exam>,
    /// Codes of completed courses.
    #[serde(default)]
    pub completed_courses: BTreeSet<String>,
}

impl Student {
    /// Creates a student with no enrollments.
    pub fn new(id: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            level,
            sections: Vec::new(),
            exams: Vec::new(),
            completed_courses: BTreeSet::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enrolls in a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds an exam.
    pub fn with_exam(mut self, exam: Exam) -> Self {
        self.exams.push(exam);
        self
    }

    /// Records a completed course.
    pub fn with_completed(mut self, code: impl Into<String>) -> Self {
        self.completed_courses.insert(code.into());
        self
    }

    /// Distinct enrolled course codes, in enrollment order.
    pub fn enrolled_courses(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.sections
            .iter()
            .map(|s| s.course_code.as_str())
            .filter(|code| seen.insert(*code))
            .collect()
    }

    /// Whether the student is enrolled in a course.
    pub fn is_enrolled_in(&self, code: &str) -> bool {
        self.sections.iter().any(|s| s.course_code == code)
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
