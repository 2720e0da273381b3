//! Externally owned course model.

use serde::{Deserialize, Serialize};

use super::{Exam, Section, TimeSlot};

/// A course owned by another department.
///
/// Same shape as managed sections and exams, but never produced or
/// modified here. It only ever appears on the other side of a conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalCourse {
    /// Course code.
    pub code: String,
    /// Course name.
    #[serde(default)]
    pub name: String,
    /// Fixed meeting patterns.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Fixed exam sittings.
    #[serde(default)]
    pub exams: Vec<Exam>,
}

impl ExternalCourse {
    /// Creates an external course with no meetings.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            sections: Vec::new(),
            exams: Vec::new(),
        }
    }

    /// Adds a meeting pattern.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds an exam.
    pub fn with_exam(mut self, exam: Exam) -> Self {
        self.exams.push(exam);
        self
    }

    /// All meeting slots across sections.
    pub fn slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.sections.iter().flat_map(|s| s.time_slots.iter())
    }
}
