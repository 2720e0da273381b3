//! Conflict detection.
//!
//! Each detector is a pure function of its explicit inputs and returns a
//! fresh `Vec<ScheduleConflict>`. Composite checks concatenate detector
//! output; no detector shares an accumulator with another.
//!
//! # Categories
//!
//! | Detector | Type | Severity | Auto |
//! |----------|------|----------|------|
//! | `check_student_schedule` | time_overlap | critical | yes |
//! | `check_faculty_conflicts` | faculty_conflict | critical | yes |
//! | `check_room_conflicts` | room_conflict | error | yes |
//! | `check_exam_conflicts` | exam_overlap | critical | no |
//! | `check_prerequisites` | prerequisite_violation | error | no |
//! | `check_capacity` | capacity_exceeded | error / warning | overage ≤ 5 |
//! | `check_daily_load` | excessive_daily_load | warning | yes |
//! | `check_missing_required` | missing_required_course | error | no |
//!
//! Student-scoped checks run together through [`ConflictChecker::detect_all`];
//! faculty, room and capacity checks span the whole timetable and run
//! separately (or together through [`ConflictChecker::check_timetable`]).
//!
//! # Example
//!
//! ```
//! use u_timetable::conflicts::ConflictChecker;
//! use u_timetable::models::{ConflictType, Curriculum, Day, Section, Student, TimeSlot};
//!
//! let x = Section::new("X", "CS101").with_slot(TimeSlot::hm(Day::Sunday, (9, 0), (10, 0)));
//! let y = Section::new("Y", "MATH101").with_slot(TimeSlot::hm(Day::Sunday, (9, 30), (10, 30)));
//! let student = Student::new("S", 1).with_section(x).with_section(y);
//!
//! let conflicts = ConflictChecker::default().detect_all(&student, &Curriculum::new(), None);
//! assert_eq!(conflicts.len(), 1);
//! assert_eq!(conflicts[0].conflict_type, ConflictType::TimeOverlap);
//! ```

mod external;
mod student;
mod summary;
mod timetable;

pub use summary::{summarize, ConflictSummary};
pub use timetable::group_by_instructor;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::CheckerConfig;
use crate::external::ExternalCourseSet;
use crate::models::{Curriculum, Exam, ScheduleConflict, Section, Student};

/// Evaluates sections, exams and students against the conflict categories.
#[derive(Debug, Clone, Default)]
pub struct ConflictChecker {
    config: CheckerConfig,
}

impl ConflictChecker {
    /// Creates a checker with the given thresholds.
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Active thresholds.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Overlapping meetings among one student's sections.
    pub fn check_student_schedule(&self, student: &Student) -> Vec<ScheduleConflict> {
        student::schedule_overlaps(student)
    }

    /// Instructors teaching overlapping sections.
    ///
    /// `by_instructor` maps instructor name to that instructor's sections;
    /// see [`group_by_instructor`].
    pub fn check_faculty_conflicts(
        &self,
        by_instructor: &BTreeMap<String, Vec<Section>>,
    ) -> Vec<ScheduleConflict> {
        timetable::faculty_overlaps(by_instructor)
    }

    /// Rooms booked by two sections at overlapping times.
    pub fn check_room_conflicts(&self, sections: &[Section]) -> Vec<ScheduleConflict> {
        timetable::room_overlaps(sections)
    }

    /// Same-date, overlapping exams of one student.
    pub fn check_exam_conflicts(&self, student: &Student) -> Vec<ScheduleConflict> {
        student::exam_overlaps(student)
    }

    /// Enrolled courses whose prerequisites the student has not completed.
    pub fn check_prerequisites(
        &self,
        student: &Student,
        curriculum: &Curriculum,
    ) -> Vec<ScheduleConflict> {
        student::prerequisite_gaps(student, curriculum)
    }

    /// Sections enrolled beyond capacity.
    ///
    /// Severity is `error` when the overage ratio exceeds
    /// `capacity_error_ratio`, otherwise `warning`. Auto-resolvable when the
    /// overage is at most `auto_resolve_max_overage` seats.
    pub fn check_capacity(&self, sections: &[Section]) -> Vec<ScheduleConflict> {
        timetable::over_capacity(sections, &self.config)
    }

    /// Days on which the student's scheduled hours exceed `max_daily_hours`.
    pub fn check_daily_load(&self, student: &Student, max_daily_hours: f64) -> Vec<ScheduleConflict> {
        student::daily_load(student, max_daily_hours)
    }

    /// Required courses for the student's level that are not enrolled.
    pub fn check_missing_required(
        &self,
        student: &Student,
        curriculum: &Curriculum,
    ) -> Vec<ScheduleConflict> {
        student::missing_required(student, curriculum)
    }

    /// Managed sections clashing with external meetings on a shared room or instructor.
    pub fn check_external_overlaps(
        &self,
        sections: &[Section],
        external: &ExternalCourseSet,
    ) -> Vec<ScheduleConflict> {
        external::section_overlaps(sections, external)
    }

    /// Managed exams clashing with external exams in the same room.
    pub fn check_external_exam_conflicts(
        &self,
        exams: &[Exam],
        external: &ExternalCourseSet,
    ) -> Vec<ScheduleConflict> {
        external::exam_overlaps(exams, external)
    }

    /// All student-scoped checks in one pass.
    ///
    /// Runs schedule overlaps, exam overlaps, prerequisites and missing
    /// required courses, plus daily load when a limit is given.
    pub fn detect_all(
        &self,
        student: &Student,
        curriculum: &Curriculum,
        max_daily_hours: Option<f64>,
    ) -> Vec<ScheduleConflict> {
        let schedule = self.check_student_schedule(student);
        let exams = self.check_exam_conflicts(student);
        let prereqs = self.check_prerequisites(student, curriculum);
        let required = self.check_missing_required(student, curriculum);
        let load = max_daily_hours
            .map(|h| self.check_daily_load(student, h))
            .unwrap_or_default();

        debug!(
            student = %student.id,
            time_overlap = schedule.len(),
            exam_overlap = exams.len(),
            prerequisite = prereqs.len(),
            missing_required = required.len(),
            daily_load = load.len(),
            "student conflicts detected"
        );

        [schedule, exams, prereqs, required, load].concat()
    }

    /// [`detect_all`](Self::detect_all) with the daily-hour limit from
    /// [`CheckerConfig::max_daily_hours`]. A `None` limit skips the
    /// daily load check.
    pub fn detect_all_configured(&self, student: &Student, curriculum: &Curriculum) -> Vec<ScheduleConflict> {
        self.detect_all(student, curriculum, self.config.max_daily_hours)
    }

    /// Timetable-wide checks: faculty, room, capacity and external overlaps.
    pub fn check_timetable(
        &self,
        sections: &[Section],
        external: &ExternalCourseSet,
    ) -> Vec<ScheduleConflict> {
        let faculty = self.check_faculty_conflicts(&group_by_instructor(sections));
        let rooms = self.check_room_conflicts(sections);
        let capacity = self.check_capacity(sections);
        let ext = self.check_external_overlaps(sections, external);

        debug!(
            sections = sections.len(),
            faculty = faculty.len(),
            room = rooms.len(),
            capacity = capacity.len(),
            external = ext.len(),
            "timetable conflicts detected"
        );

        [faculty, rooms, capacity, ext].concat()
    }
}
