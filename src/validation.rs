//! Input validation for timetable data.
//!
//! Checks structural integrity of sections and curricula before any
//! conflict detection. Detects:
//! - Duplicate section IDs
//! - Sections without a course code
//! - Invalid meeting slots (`start >= end`)
//! - Sections with zero seats
//! - Prerequisites naming unknown courses
//! - Circular prerequisite chains (DAG validation)
//!
//! Every problem is collected; validation never stops at the first.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::models::{Curriculum, Section};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two sections share the same ID.
    DuplicateId,
    /// A section has no course code.
    MissingCourseCode,
    /// A meeting slot ends at or before its start.
    InvalidTimeSlot,
    /// A section has no seats.
    ZeroCapacity,
    /// A prerequisite names a course not in the curriculum.
    UnknownPrerequisite,
    /// Prerequisite graph contains a cycle.
    CyclicPrerequisite,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a section roster.
///
/// Checks:
/// 1. No duplicate section IDs
/// 2. Every section has a course code
/// 3. Every meeting slot has `start < end`
/// 4. Every section has at least one seat
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_sections(sections: &[Section]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for s in sections {
        if !ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section ID: {}", s.id),
            ));
        }

        if s.course_code.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingCourseCode,
                format!("Section '{}' has no course code", s.id),
            ));
        }

        for slot in &s.time_slots {
            if let Err(reason) = slot.validate() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeSlot,
                    format!("Section '{}': {reason}", s.id),
                ));
            }
        }

        if s.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Section '{}' has zero capacity", s.id),
            ));
        }
    }

    finish(errors)
}

/// Validates a curriculum's prerequisite graph.
///
/// Checks:
/// 1. Every prerequisite names a course in the curriculum
/// 2. No circular prerequisite chains
pub fn validate_curriculum(curriculum: &Curriculum) -> ValidationResult {
    let mut errors = Vec::new();

    for course in curriculum.iter() {
        for pre in &course.prerequisites {
            if curriculum.get(pre).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPrerequisite,
                    format!("Course '{}' requires unknown course '{}'", course.code, pre),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(curriculum) {
        errors.push(cycle_err);
    }

    finish(errors)
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists. Nodes are visited
/// in course-code order so the reported course is stable.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(curriculum: &Curriculum) -> Option<ValidationError> {
    // prerequisite → courses that require it
    let mut adj: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for course in curriculum.iter() {
        for pre in &course.prerequisites {
            adj.entry(pre.as_str()).or_default().push(course.code.as_str());
        }
    }

    let mut visited = BTreeSet::new();
    let mut in_stack = BTreeSet::new();

    for course in curriculum.iter() {
        let node = course.code.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicPrerequisite,
                format!("Circular prerequisite chain involving course '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &BTreeMap<&'a str, Vec<&'a str>>,
    visited: &mut BTreeSet<&'a str>,
    in_stack: &mut BTreeSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // back edge
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}
