//! Conflict resolution: ranked alternative slots and rooms, resolution
//! options per conflict type, and the single-shot auto-resolve policy.
//!
//! # Algorithm
//!
//! 1. Enumerate day × standard block candidates whose length matches the
//!    section's meeting length (within the configured tolerance).
//! 2. Drop candidates overlapping any occupied slot.
//! 3. Score survivors (base 70, midday/off-hours and day adjustments) and
//!    keep the best `max`.
//!
//! Rooms follow the same pattern with a capacity-fit score.
//!
//! This is a local search over single-section moves. It does not search
//! combinations of moves and does not re-validate the whole timetable;
//! [`ConflictResolutionEngine::recheck`] is the one re-check pass.
//!
//! # Example
//!
//! ```
//! use u_timetable::resolution::ConflictResolutionEngine;
//! use u_timetable::models::{Day, Section, TimeSlot};
//!
//! let engine = ConflictResolutionEngine::default();
//! let section = Section::new("S1", "CS101")
//!     .with_slot(TimeSlot::hm(Day::Sunday, (8, 0), (9, 30)));
//!
//! let alternatives = engine.suggest_alternative_time_slots(&section, &[], 3);
//! assert_eq!(alternatives.len(), 3);
//! assert_eq!(alternatives[0].score, 100);
//! ```

pub mod catalog;
pub mod scoring;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{AutoResolvePolicy, ResolutionConfig};
use crate::conflicts::{group_by_instructor, ConflictChecker};
use crate::external::ExternalCourseSet;
use crate::models::{
    AffectedEntity, AlternativeRoom, AlternativeTimeSlot, ConflictType, EntityType, Impact,
    ResolutionAction, ResolutionOption, ResolutionType, ScheduleConflict, Section, Severity,
    TimeSlot,
};
use crate::timeslots;

/// Outcome of an auto-resolve attempt.
///
/// Non-findings are ordinary outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AutoResolution {
    /// An auto-resolvable option was selected.
    Resolved {
        option: ResolutionOption,
        message: String,
    },
    /// The conflict is not auto-resolvable.
    ManualRequired { message: String },
    /// No generated option qualified.
    NoAutoOption { message: String },
}

impl AutoResolution {
    /// Whether an option was selected.
    pub fn is_resolved(&self) -> bool {
        matches!(self, AutoResolution::Resolved { .. })
    }

    /// The selected option, if any.
    pub fn option(&self) -> Option<&ResolutionOption> {
        match self {
            AutoResolution::Resolved { option, .. } => Some(option),
            _ => None,
        }
    }

    /// Human-readable outcome.
    pub fn message(&self) -> &str {
        match self {
            AutoResolution::Resolved { message, .. }
            | AutoResolution::ManualRequired { message }
            | AutoResolution::NoAutoOption { message } => message,
        }
    }
}

/// Proposes fixes for detected conflicts.
#[derive(Debug, Clone, Default)]
pub struct ConflictResolutionEngine {
    config: ResolutionConfig,
    external: ExternalCourseSet,
}

impl ConflictResolutionEngine {
    /// Creates an engine over the given catalogs and scoring.
    pub fn new(config: ResolutionConfig) -> Self {
        Self {
            config,
            external: ExternalCourseSet::empty(),
        }
    }

    /// Adds externally fixed meetings to every occupied set.
    pub fn with_external(mut self, external: ExternalCourseSet) -> Self {
        self.external = external;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    /// Ranks free standard slots for a section.
    ///
    /// Candidates are every configured day × time block whose length is
    /// within the duration tolerance of the section's first meeting (all
    /// blocks when the section has no meetings). Candidates overlapping
    /// `occupied` or equal to a current meeting are skipped. Returns at most
    /// `max`, highest score first, ties in day-then-block order.
    pub fn suggest_alternative_time_slots(
        &self,
        section: &Section,
        occupied: &[TimeSlot],
        max: usize,
    ) -> Vec<AlternativeTimeSlot> {
        let duration = section.duration_minutes();
        let mut candidates = Vec::new();

        for &day in &self.config.days {
            for block in &self.config.time_blocks {
                if let Some(d) = duration {
                    if (block.duration_minutes() - d).abs() > self.config.duration_tolerance_minutes {
                        continue;
                    }
                }
                let slot = block.on(day);
                if section.time_slots.contains(&slot) || timeslots::collides_with_any(&slot, occupied) {
                    continue;
                }
                let score = scoring::time_slot_score(&slot, &self.config.scoring);
                candidates.push(AlternativeTimeSlot {
                    time_slot: slot,
                    score,
                    reason: scoring::time_slot_reason(score),
                });
            }
        }

        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(max);
        debug!(section = %section.id, found = candidates.len(), "alternative time slots");
        candidates
    }

    /// Ranks free rooms with at least `required_capacity` seats.
    ///
    /// The section's current room and every room in `occupied_rooms` are
    /// skipped. Returns at most `max`, highest score first.
    pub fn suggest_alternative_rooms(
        &self,
        section: &Section,
        occupied_rooms: &[String],
        required_capacity: u32,
        max: usize,
    ) -> Vec<AlternativeRoom> {
        let mut candidates: Vec<AlternativeRoom> = self
            .config
            .rooms
            .iter()
            .filter(|r| r.capacity >= required_capacity)
            .filter(|r| section.room.as_deref() != Some(r.number.as_str()))
            .filter(|r| !occupied_rooms.contains(&r.number))
            .map(|r| {
                let score = scoring::room_score(r, required_capacity, &self.config.scoring);
                AlternativeRoom {
                    room: r.number.clone(),
                    capacity: r.capacity,
                    score,
                    reason: scoring::room_reason(r, required_capacity, score),
                }
            })
            .collect();

        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(max);
        debug!(section = %section.id, found = candidates.len(), "alternative rooms");
        candidates
    }

    /// Builds resolution options for a conflict.
    ///
    /// `all_sections` is the current timetable; affected sections are
    /// looked up in it by id.
    pub fn generate_resolution_options(
        &self,
        conflict: &ScheduleConflict,
        all_sections: &[Section],
    ) -> Vec<ResolutionOption> {
        let options = match conflict.conflict_type {
            ConflictType::TimeOverlap | ConflictType::FacultyConflict => {
                self.time_options(conflict, all_sections)
            }
            ConflictType::RoomConflict => self.room_options(conflict, all_sections),
            ConflictType::CapacityExceeded => self.capacity_options(conflict, all_sections),
            ConflictType::ExamOverlap => exam_options(conflict),
            ConflictType::PrerequisiteViolation
            | ConflictType::ExcessiveDailyLoad
            | ConflictType::MissingRequiredCourse => vec![manual_fallback(conflict)],
        };
        debug!(
            conflict = %conflict.conflict_type,
            options = options.len(),
            "resolution options generated"
        );
        options
    }

    /// Picks one auto-resolvable option for a conflict.
    ///
    /// Single shot: options are generated once and one is chosen per the
    /// configured policy. Nothing is re-validated.
    pub fn auto_resolve_conflict(
        &self,
        conflict: &ScheduleConflict,
        all_sections: &[Section],
    ) -> AutoResolution {
        if !conflict.auto_resolvable {
            return AutoResolution::ManualRequired {
                message: format!("'{}' requires manual intervention", conflict.title),
            };
        }

        let options = self.generate_resolution_options(conflict, all_sections);
        let chosen = match self.config.policy {
            AutoResolvePolicy::FirstGenerated => options.into_iter().find(|o| o.auto_resolvable),
            AutoResolvePolicy::BestScore => options
                .into_iter()
                .filter(|o| o.auto_resolvable)
                .fold(None, |best: Option<ResolutionOption>, o| match best {
                    Some(b) if b.score.unwrap_or(0) >= o.score.unwrap_or(0) => Some(b),
                    _ => Some(o),
                }),
        };

        match chosen {
            Some(option) => {
                info!(conflict = %conflict.conflict_type, option = %option.description, "auto-resolved");
                AutoResolution::Resolved {
                    message: format!("Resolved '{}': {}", conflict.title, option.description),
                    option,
                }
            }
            None => {
                info!(conflict = %conflict.conflict_type, "no auto-resolvable option");
                AutoResolution::NoAutoOption {
                    message: format!("No auto-resolvable option for '{}'", conflict.title),
                }
            }
        }
    }

    /// Conflicts the option would introduce for its section.
    ///
    /// Applies the action to a copy of the timetable and re-runs the
    /// faculty, room and external checks once, keeping only conflicts that
    /// name the changed section. A changed section whose own meetings
    /// overlap is reported as a `time_overlap`. Options without an action
    /// yield nothing.
    pub fn recheck(&self, option: &ResolutionOption, all_sections: &[Section]) -> Vec<ScheduleConflict> {
        let Some(action) = &option.action else {
            return Vec::new();
        };
        let updated: Vec<Section> = all_sections
            .iter()
            .map(|s| {
                if s.id == action.section_id {
                    apply_action(s, action)
                } else {
                    s.clone()
                }
            })
            .collect();
        let Some(changed) = updated.iter().find(|s| s.id == action.section_id) else {
            return Vec::new();
        };

        let checker = ConflictChecker::default();
        let found = [
            self_overlaps(changed),
            checker.check_faculty_conflicts(&group_by_instructor(&updated)),
            checker.check_room_conflicts(&updated),
            checker.check_external_overlaps(std::slice::from_ref(changed), &self.external),
        ]
        .concat();

        let introduced: Vec<ScheduleConflict> = found
            .into_iter()
            .filter(|c| c.involves(EntityType::Section, &action.section_id))
            .collect();
        debug!(section = %action.section_id, introduced = introduced.len(), "recheck");
        introduced
    }

    // ======================== Option builders ========================

    fn time_options(&self, conflict: &ScheduleConflict, all_sections: &[Section]) -> Vec<ResolutionOption> {
        let affected = conflict.section_ids();
        let mut options = Vec::new();

        for section in find_sections(&affected, all_sections) {
            let mut occupied = self.occupied_slots(section, &affected, all_sections);
            let replaced = section
                .time_slots
                .iter()
                .position(|t| timeslots::collides_with_any(t, &occupied))
                .or_else(|| (!section.time_slots.is_empty()).then_some(0));
            let replaces = replaced.and_then(|i| section.time_slots.get(i).copied());

            // the section's remaining meetings stay put
            occupied.extend(
                section
                    .time_slots
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| Some(*i) != replaced)
                    .map(|(_, t)| *t),
            );

            for alt in self.suggest_alternative_time_slots(section, &occupied, self.config.max_suggestions) {
                let auto = alt.score >= self.config.auto_resolve_min_score;
                options.push(ResolutionOption {
                    resolution_type: ResolutionType::ChangeTime,
                    description: format!(
                        "Move {} to {} ({})",
                        section.label(),
                        alt.time_slot,
                        alt.reason
                    ),
                    impact: if auto { Impact::Low } else { Impact::Medium },
                    auto_resolvable: auto,
                    action: Some(ResolutionAction {
                        replaces_time_slot: replaces,
                        ..ResolutionAction::move_to(&section.id, alt.time_slot)
                    }),
                    score: Some(alt.score),
                });
            }
        }

        if options.is_empty() {
            options.push(manual_fallback(conflict));
        }
        options
    }

    fn room_options(&self, conflict: &ScheduleConflict, all_sections: &[Section]) -> Vec<ResolutionOption> {
        let affected = conflict.section_ids();
        let mut options = Vec::new();

        for section in find_sections(&affected, all_sections) {
            let occupied = self.occupied_rooms(section, all_sections);
            let required = section.capacity.max(section.enrolled_count);

            for alt in self.suggest_alternative_rooms(section, &occupied, required, self.config.max_suggestions) {
                let auto = alt.score >= self.config.auto_resolve_min_score;
                options.push(ResolutionOption {
                    resolution_type: ResolutionType::ChangeRoom,
                    description: format!("Move {} to room {} ({})", section.label(), alt.room, alt.reason),
                    impact: if auto { Impact::Low } else { Impact::Medium },
                    auto_resolvable: auto,
                    action: Some(ResolutionAction::relocate(&section.id, alt.room)),
                    score: Some(alt.score),
                });
            }
        }

        if options.is_empty() {
            options.push(manual_fallback(conflict));
        }
        options
    }

    fn capacity_options(&self, conflict: &ScheduleConflict, all_sections: &[Section]) -> Vec<ResolutionOption> {
        let affected = conflict.section_ids();
        let mut options = Vec::new();

        for section in find_sections(&affected, all_sections) {
            options.push(ResolutionOption {
                resolution_type: ResolutionType::AddSection,
                description: format!(
                    "Open an additional section of {} for the {} students over capacity",
                    section.course_code,
                    section.overage()
                ),
                impact: Impact::Medium,
                auto_resolvable: false,
                action: None,
                score: None,
            });

            let occupied = self.occupied_rooms(section, all_sections);
            for alt in self.suggest_alternative_rooms(
                section,
                &occupied,
                section.enrolled_count,
                self.config.max_suggestions,
            ) {
                options.push(ResolutionOption {
                    resolution_type: ResolutionType::ChangeRoom,
                    description: format!(
                        "Move {} to larger room {} ({} seats)",
                        section.label(),
                        alt.room,
                        alt.capacity
                    ),
                    impact: Impact::Low,
                    auto_resolvable: true,
                    action: Some(ResolutionAction::relocate(&section.id, alt.room)),
                    score: Some(alt.score),
                });
            }
        }

        if options.is_empty() {
            options.push(manual_fallback(conflict));
        }
        options
    }

    // ======================== Occupancy ========================

    /// Slots a section cannot move into: the other affected sections, every
    /// section sharing its instructor or room, and external meetings.
    fn occupied_slots(&self, section: &Section, affected: &[&str], all_sections: &[Section]) -> Vec<TimeSlot> {
        let mut occupied: Vec<TimeSlot> = all_sections
            .iter()
            .filter(|o| o.id != section.id)
            .filter(|o| {
                affected.contains(&o.id.as_str())
                    || (section.has_instructor() && o.instructor == section.instructor)
                    || (section.room.is_some() && o.room == section.room)
            })
            .flat_map(|o| o.time_slots.iter().copied())
            .collect();
        occupied.extend(self.external.occupied_slots());
        occupied
    }

    /// Rooms in use while the section meets, from the timetable and external meetings.
    fn occupied_rooms(&self, section: &Section, all_sections: &[Section]) -> Vec<String> {
        let managed = all_sections
            .iter()
            .filter(|o| o.id != section.id)
            .map(|o| (o.room.as_ref(), o.time_slots.as_slice()));
        let external = self
            .external
            .sections()
            .map(|(_, o)| (o.room.as_ref(), o.time_slots.as_slice()));

        let mut rooms: Vec<String> = managed
            .chain(external)
            .filter(|(_, slots)| timeslots::any_overlap(&section.time_slots, slots))
            .filter_map(|(room, _)| room.cloned())
            .collect();
        rooms.sort();
        rooms.dedup();
        rooms
    }
}

/// Applies an action to a copy of the section.
///
/// The new slot replaces `replaces_time_slot` when present in the section,
/// otherwise the first meeting; a section with no meetings gains one.
pub fn apply_action(section: &Section, action: &ResolutionAction) -> Section {
    let mut updated = section.clone();
    if let Some(new_slot) = action.new_time_slot {
        let index = action
            .replaces_time_slot
            .and_then(|old| updated.time_slots.iter().position(|t| *t == old))
            .unwrap_or(0);
        match updated.time_slots.get_mut(index) {
            Some(slot) => *slot = new_slot,
            None => updated.time_slots.push(new_slot),
        }
    }
    if let Some(room) = &action.new_room {
        updated.room = Some(room.clone());
    }
    if let Some(instructor) = &action.new_instructor {
        updated.instructor = instructor.clone();
    }
    updated
}

/// One `time_overlap` per pair of a section's own meetings that overlap.
fn self_overlaps(section: &Section) -> Vec<ScheduleConflict> {
    timeslots::validate_collection(&section.time_slots)
        .conflicts
        .into_iter()
        .map(|(i, j)| {
            let (a, b) = (section.time_slots[i], section.time_slots[j]);
            ScheduleConflict::new(
                ConflictType::TimeOverlap,
                Severity::Critical,
                format!("{} meets twice at once", section.label()),
                format!("{} has overlapping meetings ({} overlaps {}).", section.label(), a, b),
            )
            .with_entity(AffectedEntity::section(&section.id, &section.course_name))
            .with_suggestion(format!("Choose another slot for {}", section.label()))
        })
        .collect()
}

fn find_sections<'a>(ids: &[&str], all_sections: &'a [Section]) -> Vec<&'a Section> {
    ids.iter()
        .filter_map(|id| all_sections.iter().find(|s| s.id == *id))
        .collect()
}

fn exam_options(conflict: &ScheduleConflict) -> Vec<ResolutionOption> {
    let exams: Vec<&str> = conflict
        .entities_of(EntityType::Exam)
        .map(|e| e.name.as_deref().unwrap_or(e.id.as_str()))
        .collect();
    let target = exams.last().copied().unwrap_or("one of the exams");
    vec![
        ResolutionOption::manual(
            format!("Reschedule {target} to a slot with no overlapping exams"),
            Impact::High,
        ),
        ResolutionOption::manual("Arrange a make-up sitting for the affected students", Impact::Medium),
    ]
}

fn manual_fallback(conflict: &ScheduleConflict) -> ResolutionOption {
    let description = conflict
        .resolution_suggestions
        .first()
        .cloned()
        .unwrap_or_else(|| format!("Review '{}' manually", conflict.title));
    ResolutionOption::manual(description, Impact::Medium)
}
