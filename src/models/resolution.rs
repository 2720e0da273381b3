//! Resolution option model.
//!
//! Options are proposals only. Applying one (persisting a new time slot,
//! room or instructor) is the caller's responsibility.

use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// Kind of fix an option proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionType {
    ChangeTime,
    ChangeRoom,
    ChangeInstructor,
    AddSection,
    Manual,
}

/// Disruption caused by applying an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// Concrete change to one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionAction {
    /// Section to change.
    pub section_id: String,
    /// Meeting being replaced; the first meeting when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces_time_slot: Option<TimeSlot>,
    /// Replacement slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_time_slot: Option<TimeSlot>,
    /// Replacement room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_room: Option<String>,
    /// Replacement instructor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_instructor: Option<String>,
}

impl ResolutionAction {
    /// Moves a section to a new slot.
    pub fn move_to(section_id: impl Into<String>, slot: TimeSlot) -> Self {
        Self {
            section_id: section_id.into(),
            replaces_time_slot: None,
            new_time_slot: Some(slot),
            new_room: None,
            new_instructor: None,
        }
    }

    /// Moves a section to a new room.
    pub fn relocate(section_id: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            replaces_time_slot: None,
            new_time_slot: None,
            new_room: Some(room.into()),
            new_instructor: None,
        }
    }
}

/// A proposed fix for a conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOption {
    /// Fix kind.
    #[serde(rename = "type")]
    pub resolution_type: ResolutionType,
    /// Human-readable description.
    pub description: String,
    /// Disruption level.
    pub impact: Impact,
    /// Whether the fix may be applied without human judgment.
    pub auto_resolvable: bool,
    /// Concrete change, absent for manual options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ResolutionAction>,
    /// Score of the underlying candidate (0-100), when scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
}

impl ResolutionOption {
    /// A manual (human-decided) option.
    pub fn manual(description: impl Into<String>, impact: Impact) -> Self {
        Self {
            resolution_type: ResolutionType::Manual,
            description: description.into(),
            impact,
            auto_resolvable: false,
            action: None,
            score: None,
        }
    }
}

/// Scored candidate time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeTimeSlot {
    /// Candidate slot.
    pub time_slot: TimeSlot,
    /// Preference score (0-100).
    pub score: i32,
    /// Human-readable reason.
    pub reason: String,
}

/// Scored candidate room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRoom {
    /// Room number.
    pub room: String,
    /// Seat capacity.
    pub capacity: u32,
    /// Preference score (0-100).
    pub score: i32,
    /// Human-readable reason.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    #[test]
    fn test_option_json_round_trip() {
        let opt = ResolutionOption {
            resolution_type: ResolutionType::ChangeTime,
            description: "Move CS101 (S1) to Tuesday 11:00-12:30".into(),
            impact: Impact::Low,
            auto_resolvable: true,
            action: Some(ResolutionAction::move_to(
                "S1",
                TimeSlot::hm(Day::Tuesday, (11, 0), (12, 30)),
            )),
            score: Some(100),
        };
        let v = serde_json::to_value(&opt).unwrap();
        assert_eq!(v["type"], "change_time");
        assert_eq!(v["impact"], "low");
        assert_eq!(v["action"]["section_id"], "S1");
        assert!(v["action"].get("new_room").is_none());

        let back: ResolutionOption = serde_json::from_value(v).unwrap();
        assert_eq!(back, opt);
    }

    #[test]
    fn test_manual_option() {
        let m = ResolutionOption::manual("Talk to the registrar", Impact::High);
        assert_eq!(m.resolution_type, ResolutionType::Manual);
        assert!(!m.auto_resolvable);
        assert!(m.action.is_none());

        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("score"));
    }
}
