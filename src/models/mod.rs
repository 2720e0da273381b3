//! Timetable domain models.
//!
//! Transient value types built from persisted records at evaluation time.
//! Nothing here holds identity beyond plain string ids, and every type
//! round-trips through serde with the snake_case field names shown.
//!
//! # Domain Mappings
//!
//! | u-timetable | Registrar record | Committee view |
//! |-------------|------------------|----------------|
//! | Section | Class offering | Timetable row |
//! | TimeSlot | Meeting pattern | Grid cell |
//! | Exam | Exam sitting | Exam calendar entry |
//! | ScheduleConflict | - | Conflict report line |
//! | ResolutionOption | - | Proposed fix |

mod conflict;
mod course;
mod exam;
mod external_course;
mod resolution;
mod section;
mod student;
pub(crate) mod time_slot;

pub use conflict::{AffectedEntity, ConflictType, EntityType, ScheduleConflict, Severity};
pub use course::{Course, Curriculum};
pub use exam::{Exam, ExamType};
pub use external_course::ExternalCourse;
pub use resolution::{
    AlternativeRoom, AlternativeTimeSlot, Impact, ResolutionAction, ResolutionOption,
    ResolutionType,
};
pub use section::Section;
pub use student::Student;
pub use time_slot::{Day, TimeSlot};
