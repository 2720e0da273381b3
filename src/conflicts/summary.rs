//! Dashboard-level conflict counts.
//!
//! Reporting only: nothing in the engine makes decisions from a summary.
//!
//! | Field | Definition |
//! |-------|-----------|
//! | total | Number of conflicts |
//! | by_type | Count per conflict category |
//! | by_severity | Count per severity |
//! | auto_resolvable | Conflicts flagged auto-resolvable |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ConflictType, ScheduleConflict, Severity};

/// Aggregate counts over a conflict list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictSummary {
    /// Number of conflicts.
    pub total: usize,
    /// Count per category (only categories present).
    pub by_type: BTreeMap<ConflictType, usize>,
    /// Count per severity (only severities present).
    pub by_severity: BTreeMap<Severity, usize>,
    /// Number of auto-resolvable conflicts.
    pub auto_resolvable: usize,
}

impl ConflictSummary {
    /// Computes the summary of a conflict list.
    pub fn calculate(conflicts: &[ScheduleConflict]) -> Self {
        let mut summary = Self {
            total: conflicts.len(),
            ..Self::default()
        };
        for c in conflicts {
            *summary.by_type.entry(c.conflict_type).or_insert(0) += 1;
            *summary.by_severity.entry(c.severity).or_insert(0) += 1;
            if c.auto_resolvable {
                summary.auto_resolvable += 1;
            }
        }
        summary
    }

    /// Count for one category.
    pub fn count_of(&self, conflict_type: ConflictType) -> usize {
        self.by_type.get(&conflict_type).copied().unwrap_or(0)
    }

    /// Count for one severity.
    pub fn count_with(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }

    /// Whether any critical conflict is present.
    pub fn has_blocking(&self) -> bool {
        self.count_with(Severity::Critical) > 0
    }

    /// Conflicts that need a human decision.
    pub fn manual(&self) -> usize {
        self.total - self.auto_resolvable
    }
}

/// Reduces a conflict list to counts by type, severity and auto-resolvability.
pub fn summarize(conflicts: &[ScheduleConflict]) -> ConflictSummary {
    ConflictSummary::calculate(conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict(t: ConflictType, s: Severity, auto: bool) -> ScheduleConflict {
        ScheduleConflict::new(t, s, "t", "d").auto_resolvable(auto)
    }

    #[test]
    fn test_summary_counts() {
        let conflicts = vec![
            conflict(ConflictType::TimeOverlap, Severity::Critical, true),
            conflict(ConflictType::TimeOverlap, Severity::Critical, true),
            conflict(ConflictType::CapacityExceeded, Severity::Warning, true),
            conflict(ConflictType::ExamOverlap, Severity::Critical, false),
            conflict(ConflictType::PrerequisiteViolation, Severity::Error, false),
        ];
        let s = summarize(&conflicts);
        assert_eq!(s.total, 5);
        assert_eq!(s.count_of(ConflictType::TimeOverlap), 2);
        assert_eq!(s.count_of(ConflictType::RoomConflict), 0);
        assert_eq!(s.count_with(Severity::Critical), 3);
        assert_eq!(s.count_with(Severity::Error), 1);
        assert_eq!(s.count_with(Severity::Warning), 1);
        assert_eq!(s.auto_resolvable, 3);
        assert_eq!(s.manual(), 2);
        assert!(s.has_blocking());
    }

    #[test]
    fn test_summary_empty() {
        let s = summarize(&[]);
        assert_eq!(s, ConflictSummary::default());
        assert!(!s.has_blocking());
    }

    #[test]
    fn test_summary_serializes_with_tags() {
        let s = summarize(&[conflict(ConflictType::RoomConflict, Severity::Error, true)]);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["by_type"]["room_conflict"], 1);
        assert_eq!(v["by_severity"]["error"], 1);
    }
}
