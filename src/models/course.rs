//! Course catalog and curriculum.
//!
//! The curriculum answers two questions for the checker: which courses a
//! course depends on (prerequisites) and which courses a student level
//! must take (required courses).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A catalog course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Student level this course belongs to, if any.
    #[serde(default)]
    pub level: Option<u8>,
    /// Whether students at `level` must take it.
    #[serde(default)]
    pub required: bool,
    /// Codes of courses that must be completed first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Creates an elective course with no level.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            level: None,
            required: false,
            prerequisites: Vec::new(),
        }
    }

    /// Sets the student level.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    /// Marks the course as required for its level.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds a prerequisite course code.
    pub fn with_prerequisite(mut self, code: impl Into<String>) -> Self {
        self.prerequisites.push(code.into());
        self
    }
}

/// Course catalog keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    courses: BTreeMap<String, Course>,
}

impl Curriculum {
    /// Creates an empty curriculum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.insert(course);
        self
    }

    /// Adds (or replaces) a course.
    pub fn insert(&mut self, course: Course) {
        self.courses.insert(course.code.clone(), course);
    }

    /// Looks up a course.
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Prerequisite codes of a course (empty when unknown).
    pub fn prerequisites_of(&self, code: &str) -> &[String] {
        self.courses
            .get(code)
            .map(|c| c.prerequisites.as_slice())
            .unwrap_or(&[])
    }

    /// Required course codes for a level, sorted by code.
    pub fn required_for_level(&self, level: u8) -> Vec<&str> {
        self.courses
            .values()
            .filter(|c| c.required && c.level == Some(level))
            .map(|c| c.code.as_str())
            .collect()
    }

    /// All courses offered at a level, sorted by code.
    pub fn courses_for_level(&self, level: u8) -> Vec<&Course> {
        self.courses
            .values()
            .filter(|c| c.level == Some(level))
            .collect()
    }

    /// Iterates all courses in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl FromIterator<Course> for Curriculum {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut curriculum = Self::new();
        for course in iter {
            curriculum.insert(course);
        }
        curriculum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Curriculum {
        Curriculum::new()
            .with_course(Course::new("CS101", "Intro").with_level(1).required())
            .with_course(Course::new("MATH101", "Calculus I").with_level(1).required())
            .with_course(Course::new("ART100", "Drawing").with_level(1))
            .with_course(
                Course::new("CS201", "Data Structures")
                    .with_level(2)
                    .required()
                    .with_prerequisite("CS101"),
            )
    }

    #[test]
    fn test_prerequisites_lookup() {
        let c = sample();
        assert_eq!(c.prerequisites_of("CS201"), ["CS101".to_string()]);
        assert!(c.prerequisites_of("CS101").is_empty());
        assert!(c.prerequisites_of("UNKNOWN").is_empty());
    }

    #[test]
    fn test_required_for_level() {
        let c = sample();
        assert_eq!(c.required_for_level(1), vec!["CS101", "MATH101"]);
        assert_eq!(c.required_for_level(2), vec!["CS201"]);
        assert!(c.required_for_level(3).is_empty());
        assert_eq!(c.courses_for_level(1).len(), 3);
    }

    #[test]
    fn test_from_iter() {
        let c: Curriculum = vec![Course::new("A", "a"), Course::new("B", "b")]
            .into_iter()
            .collect();
        assert_eq!(c.len(), 2);
        assert!(c.get("A").is_some());
    }
}
