//! Schedule conflict model.
//!
//! A conflict is a detected violation of a scheduling rule. Conflicts are
//! value objects created fresh on every evaluation; they carry no identity
//! and two runs over the same input compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Conflict category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Two sections of one student meet at the same time.
    TimeOverlap,
    /// An instructor teaches two sections at the same time.
    FacultyConflict,
    /// A room is booked twice at the same time.
    RoomConflict,
    /// A student sits two exams at the same time.
    ExamOverlap,
    /// Enrolled without completing prerequisites.
    PrerequisiteViolation,
    /// Enrollment above section capacity.
    CapacityExceeded,
    /// Too many teaching hours in one day.
    ExcessiveDailyLoad,
    /// A required course for the student's level is not taken.
    MissingRequiredCourse,
}

impl ConflictType {
    /// Snake-case tag, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictType::TimeOverlap => "time_overlap",
            ConflictType::FacultyConflict => "faculty_conflict",
            ConflictType::RoomConflict => "room_conflict",
            ConflictType::ExamOverlap => "exam_overlap",
            ConflictType::PrerequisiteViolation => "prerequisite_violation",
            ConflictType::CapacityExceeded => "capacity_exceeded",
            ConflictType::ExcessiveDailyLoad => "excessive_daily_load",
            ConflictType::MissingRequiredCourse => "missing_required_course",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conflict severity. Ordered `Warning < Error < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory.
    Warning,
    /// Violates a hard policy, tolerable short-term.
    Error,
    /// Blocks a valid schedule.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Kind of entity a conflict refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Student,
    Section,
    Faculty,
    Room,
    Course,
    Exam,
}

/// An entity involved in a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AffectedEntity {
    /// Entity kind.
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Entity identifier.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AffectedEntity {
    /// Creates an entity reference.
    pub fn new(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: id.into(),
            name: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the display name unless it is empty.
    pub(crate) fn with_name_if_present(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.name = Some(name);
        }
        self
    }

    /// Section reference. An empty name is left out.
    pub fn section(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(EntityType::Section, id).with_name_if_present(name)
    }

    /// Student reference. An empty name is left out.
    pub fn student(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(EntityType::Student, id).with_name_if_present(name)
    }
}

/// A detected scheduling conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    /// Conflict category.
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    /// How serious the conflict is.
    pub severity: Severity,
    /// Short headline.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Entities involved.
    pub affected_entities: Vec<AffectedEntity>,
    /// Human-readable remedies.
    pub resolution_suggestions: Vec<String>,
    /// Whether a mechanical fix is permitted without human judgment.
    pub auto_resolvable: bool,
}

impl ScheduleConflict {
    /// Creates a conflict with no entities or suggestions.
    pub fn new(
        conflict_type: ConflictType,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            conflict_type,
            severity,
            title: title.into(),
            description: description.into(),
            affected_entities: Vec::new(),
            resolution_suggestions: Vec::new(),
            auto_resolvable: false,
        }
    }

    /// Adds an affected entity.
    pub fn with_entity(mut self, entity: AffectedEntity) -> Self {
        self.affected_entities.push(entity);
        self
    }

    /// Adds a resolution suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.resolution_suggestions.push(suggestion.into());
        self
    }

    /// Sets the auto-resolvable flag.
    pub fn auto_resolvable(mut self, auto: bool) -> Self {
        self.auto_resolvable = auto;
        self
    }

    /// Affected entities of a given kind.
    pub fn entities_of(&self, entity_type: EntityType) -> impl Iterator<Item = &AffectedEntity> {
        self.affected_entities
            .iter()
            .filter(move |e| e.entity_type == entity_type)
    }

    /// IDs of affected sections, in order.
    pub fn section_ids(&self) -> Vec<&str> {
        self.entities_of(EntityType::Section)
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Whether the conflict names an entity with this id and kind.
    pub fn involves(&self, entity_type: EntityType, id: &str) -> bool {
        self.entities_of(entity_type).any(|e| e.id == id)
    }
}
