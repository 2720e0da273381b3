//! Timetable conflict detection and resolution for academic scheduling.
//!
//! Evaluates a term's sections, students and exams against eight conflict
//! categories, proposes ranked fixes for what it finds, and plans how many
//! sections each course needs. Everything is a pure function of its
//! explicit inputs; nothing here persists or applies a change.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `Section`, `Exam`, `Student`,
//!   `Curriculum`, `ScheduleConflict`, `ResolutionOption`
//! - **`timeslots`**: Half-open overlap primitives and collection checks
//! - **`external`**: Read-only set of other departments' fixed courses
//! - **`conflicts`**: `ConflictChecker` and conflict summaries
//! - **`resolution`**: `ConflictResolutionEngine`, catalogs and scoring
//! - **`generator`**: `ScheduleGenerator` capacity planning reports
//! - **`validation`**: Input integrity checks (duplicate IDs, bad slots, prerequisite cycles)
//! - **`config`**: `EngineConfig` thresholds and catalogs, loadable from TOML
//! - **`error`**: `TimetableError` and the crate `Result` alias
//!
//! # Data flow
//!
//! Sections, students and external courses go into the checker; its
//! `ScheduleConflict` list goes into the resolution engine; ranked
//! `ResolutionOption`s come out for a reviewer (or the auto-resolve policy)
//! to act on.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

pub mod config;
pub mod conflicts;
pub mod error;
pub mod external;
pub mod generator;
pub mod models;
pub mod resolution;
pub mod timeslots;
pub mod validation;

pub use error::{Result, TimetableError};
