//! Capacity planning for a term.
//!
//! # Algorithm
//!
//! 1. Check that every requested level has enrollment, faculty and
//!    courses; fail with the full list of what is missing otherwise.
//! 2. For each level and each course of that level:
//!    `sections_needed = ceil(students / section_capacity)`.
//! 3. Attach validation problems in the external courses, sections and
//!    curriculum, plus the conflicts already present in the timetable.
//!
//! The generator never assigns slots or rooms. Its report feeds a human
//! planning step; conflict resolution happens elsewhere.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{CheckerConfig, GeneratorConfig};
use crate::conflicts::{summarize, ConflictChecker, ConflictSummary};
use crate::error::{Result, TimetableError};
use crate::external::ExternalCourseSet;
use crate::models::{Curriculum, ScheduleConflict, Section};
use crate::validation;

/// Headcount for one student level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEnrollment {
    /// Students at this level.
    pub students: u32,
    /// Per-course headcount where it differs from `students`.
    #[serde(default)]
    pub by_course: BTreeMap<String, u32>,
}

impl LevelEnrollment {
    /// Creates an enrollment with a uniform headcount.
    pub fn new(students: u32) -> Self {
        Self {
            students,
            by_course: BTreeMap::new(),
        }
    }

    /// Overrides the headcount for one course.
    pub fn with_course(mut self, code: impl Into<String>, students: u32) -> Self {
        self.by_course.insert(code.into(), students);
        self
    }

    /// Expected students for a course.
    pub fn students_for(&self, code: &str) -> u32 {
        self.by_course.get(code).copied().unwrap_or(self.students)
    }
}

/// What to plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Term label, e.g. "2025-fall".
    pub term: String,
    /// Student levels to plan for.
    pub target_levels: Vec<u8>,
}

impl GenerationRequest {
    /// Creates a request for a term and its levels.
    pub fn new(term: impl Into<String>, target_levels: Vec<u8>) -> Self {
        Self {
            term: term.into(),
            target_levels,
        }
    }
}

/// Inputs the generator plans from.
#[derive(Debug, Clone, Default)]
pub struct PlanningData {
    /// Enrollment per level.
    pub enrollment: BTreeMap<u8, LevelEnrollment>,
    /// Instructors available per level.
    pub faculty: BTreeMap<u8, Vec<String>>,
    /// Course catalog.
    pub curriculum: Curriculum,
    /// Sections already on the timetable.
    pub sections: Vec<Section>,
    /// Externally fixed courses.
    pub external: ExternalCourseSet,
}

impl PlanningData {
    /// Starts from a curriculum with no enrollment, faculty or sections.
    pub fn new(curriculum: Curriculum) -> Self {
        Self {
            curriculum,
            ..Self::default()
        }
    }

    /// Sets the enrollment for a level.
    pub fn with_enrollment(mut self, level: u8, enrollment: LevelEnrollment) -> Self {
        self.enrollment.insert(level, enrollment);
        self
    }

    /// Sets the instructors available to a level.
    pub fn with_faculty(mut self, level: u8, instructors: Vec<String>) -> Self {
        self.faculty.insert(level, instructors);
        self
    }

    /// Sets the sections already on the timetable.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Sets the externally fixed courses.
    pub fn with_external(mut self, external: ExternalCourseSet) -> Self {
        self.external = external;
        self
    }
}

/// Section demand for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoursePlan {
    /// Course code.
    pub course_code: String,
    /// Course name.
    pub course_name: String,
    /// Whether the course is required for its level.
    pub required: bool,
    /// Expected students.
    pub students: u32,
    /// Sections of this course already on the timetable.
    pub existing_sections: usize,
    /// `ceil(students / section_capacity)`.
    pub sections_needed: u32,
}

/// Section demand for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelPlan {
    /// Student level.
    pub level: u8,
    /// Students at this level.
    pub students: u32,
    /// Instructors available.
    pub faculty: usize,
    /// Demand per course, in code order.
    pub courses: Vec<CoursePlan>,
    /// Sum of `sections_needed` over the level's courses.
    pub total_sections_needed: u32,
}

/// Planning report for a term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Term label from the request.
    pub term: String,
    /// Seats per planned section.
    pub section_capacity: u32,
    /// One plan per requested level, in request order.
    pub levels: Vec<LevelPlan>,
    /// Sum of `sections_needed` over all levels.
    pub total_sections_needed: u32,
    /// Problems in the external course data.
    pub external_errors: Vec<String>,
    /// Structural problems in the given sections.
    pub section_errors: Vec<String>,
    /// Unknown or circular prerequisites in the curriculum.
    pub curriculum_errors: Vec<String>,
    /// Conflicts already present in the given sections.
    pub conflicts: Vec<ScheduleConflict>,
    /// Counts over `conflicts`.
    pub summary: ConflictSummary,
}

/// Thin orchestrator over capacity math and the conflict checker.
///
/// # Example
///
/// ```
/// use u_timetable::config::GeneratorConfig;
/// use u_timetable::generator::{GenerationRequest, LevelEnrollment, PlanningData, ScheduleGenerator};
/// use u_timetable::models::{Course, Curriculum};
///
/// let curriculum = Curriculum::new().with_course(Course::new("CS101", "Intro").with_level(1).required());
/// let data = PlanningData::new(curriculum)
///     .with_enrollment(1, LevelEnrollment::new(95))
///     .with_faculty(1, vec!["Dr. Lee".into()]);
///
/// let report = ScheduleGenerator::new(GeneratorConfig::default())
///     .generate(&GenerationRequest::new("2025-fall", vec![1]), &data)
///     .unwrap();
/// assert_eq!(report.levels[0].courses[0].sections_needed, 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: GeneratorConfig,
    checker: ConflictChecker,
}

impl ScheduleGenerator {
    /// Creates a generator with default checker thresholds.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            checker: ConflictChecker::default(),
        }
    }

    /// Uses custom thresholds for the pre-existing conflict scan.
    pub fn with_checker(mut self, config: CheckerConfig) -> Self {
        self.checker = ConflictChecker::new(config);
        self
    }

    /// Builds the planning report.
    ///
    /// # Errors
    /// - `InvalidInput` if no levels are requested or the section capacity is zero
    /// - `MissingData` listing every level lacking enrollment, faculty or courses
    pub fn generate(&self, request: &GenerationRequest, data: &PlanningData) -> Result<GenerationReport> {
        if request.target_levels.is_empty() {
            return Err(TimetableError::InvalidInput("no target levels requested".into()));
        }
        let capacity = self.config.section_capacity;
        if capacity == 0 {
            return Err(TimetableError::InvalidInput("section capacity must be positive".into()));
        }

        let mut seen = BTreeSet::new();
        let levels: Vec<u8> = request
            .target_levels
            .iter()
            .copied()
            .filter(|l| seen.insert(*l))
            .collect();

        let missing = missing_data(&levels, data);
        if !missing.is_empty() {
            info!(term = %request.term, missing = missing.len(), "generation aborted");
            return Err(TimetableError::MissingData(missing));
        }

        let mut plans = Vec::with_capacity(levels.len());
        for level in levels {
            let Some(enrollment) = data.enrollment.get(&level) else {
                continue;
            };
            let courses: Vec<CoursePlan> = data
                .curriculum
                .courses_for_level(level)
                .into_iter()
                .map(|c| {
                    let students = enrollment.students_for(&c.code);
                    CoursePlan {
                        course_code: c.code.clone(),
                        course_name: c.name.clone(),
                        required: c.required,
                        students,
                        existing_sections: data
                            .sections
                            .iter()
                            .filter(|s| s.course_code == c.code)
                            .count(),
                        sections_needed: students.div_ceil(capacity),
                    }
                })
                .collect();
            plans.push(LevelPlan {
                level,
                students: enrollment.students,
                faculty: data.faculty.get(&level).map_or(0, Vec::len),
                total_sections_needed: courses.iter().map(|c| c.sections_needed).sum(),
                courses,
            });
        }

        let section_errors = messages(validation::validate_sections(&data.sections));
        let curriculum_errors = messages(validation::validate_curriculum(&data.curriculum));
        let conflicts = self.checker.check_timetable(&data.sections, &data.external);
        let report = GenerationReport {
            term: request.term.clone(),
            section_capacity: capacity,
            total_sections_needed: plans.iter().map(|p| p.total_sections_needed).sum(),
            levels: plans,
            external_errors: data.external.validate(),
            section_errors,
            curriculum_errors,
            summary: summarize(&conflicts),
            conflicts,
        };

        info!(
            term = %report.term,
            levels = report.levels.len(),
            sections_needed = report.total_sections_needed,
            conflicts = report.conflicts.len(),
            "schedule plan generated"
        );
        Ok(report)
    }
}

fn messages(result: validation::ValidationResult) -> Vec<String> {
    match result {
        Ok(()) => Vec::new(),
        Err(errors) => errors.into_iter().map(|e| e.message).collect(),
    }
}

fn missing_data(levels: &[u8], data: &PlanningData) -> Vec<String> {
    let mut missing = Vec::new();
    for &level in levels {
        if !data.enrollment.contains_key(&level) {
            missing.push(format!("no enrollment data for level {level}"));
        }
        if data.faculty.get(&level).map_or(true, |f| f.is_empty()) {
            missing.push(format!("no faculty assigned to level {level}"));
        }
        if data.curriculum.courses_for_level(level).is_empty() {
            missing.push(format!("no courses defined for level {level}"));
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConflictType, Course, Day, ExternalCourse, TimeSlot};

    fn curriculum() -> Curriculum {
        Curriculum::new()
            .with_course(Course::new("CS101", "Intro").with_level(1).required())
            .with_course(Course::new("MATH101", "Calculus").with_level(1).required())
            .with_course(Course::new("ART100", "Drawing").with_level(1))
            .with_course(Course::new("CS201", "Data Structures").with_level(2).required())
    }

    fn data() -> PlanningData {
        PlanningData::new(curriculum())
            .with_enrollment(1, LevelEnrollment::new(61).with_course("ART100", 12))
            .with_enrollment(2, LevelEnrollment::new(30))
            .with_faculty(1, vec!["Dr. Lee".into(), "Dr. Kim".into()])
            .with_faculty(2, vec!["Dr. Park".into()])
    }

    fn generator() -> ScheduleGenerator {
        ScheduleGenerator::new(GeneratorConfig::default())
    }

    #[test]
    fn test_sections_needed_ceil() {
        let report = generator()
            .generate(&GenerationRequest::new("2025-fall", vec![1, 2]), &data())
            .unwrap();

        let l1 = &report.levels[0];
        assert_eq!(l1.level, 1);
        assert_eq!(l1.faculty, 2);
        let needed: Vec<(&str, u32)> = l1
            .courses
            .iter()
            .map(|c| (c.course_code.as_str(), c.sections_needed))
            .collect();
        // 61 / 30 → 3, override 12 / 30 → 1
        assert_eq!(needed, vec![("ART100", 1), ("CS101", 3), ("MATH101", 3)]);
        assert_eq!(l1.total_sections_needed, 7);

        // exactly 30 → 1
        assert_eq!(report.levels[1].courses[0].sections_needed, 1);
        assert_eq!(report.total_sections_needed, 8);
        assert!(report.conflicts.is_empty());
        assert!(report.external_errors.is_empty());
    }

    #[test]
    fn test_custom_section_capacity() {
        let generator = ScheduleGenerator::new(GeneratorConfig {
            section_capacity: 25,
        });
        let report = generator
            .generate(&GenerationRequest::new("t", vec![2]), &data())
            .unwrap();
        assert_eq!(report.section_capacity, 25);
        assert_eq!(report.levels[0].courses[0].sections_needed, 2);
    }

    #[test]
    fn test_zero_students_need_no_sections() {
        let data = data().with_enrollment(2, LevelEnrollment::new(0));
        let report = generator()
            .generate(&GenerationRequest::new("t", vec![2]), &data)
            .unwrap();
        assert_eq!(report.levels[0].courses[0].sections_needed, 0);
    }

    #[test]
    fn test_missing_data_lists_everything() {
        let data = data().with_faculty(2, vec![]);
        let err = generator()
            .generate(&GenerationRequest::new("t", vec![1, 2, 3]), &data)
            .unwrap_err();

        match err {
            TimetableError::MissingData(missing) => assert_eq!(
                missing,
                vec![
                    "no faculty assigned to level 2".to_string(),
                    "no enrollment data for level 3".to_string(),
                    "no faculty assigned to level 3".to_string(),
                    "no courses defined for level 3".to_string(),
                ]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_request_rejected() {
        let err = generator()
            .generate(&GenerationRequest::new("t", vec![]), &data())
            .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidInput(_)));
    }

    #[test]
    fn test_duplicate_levels_planned_once() {
        let report = generator()
            .generate(&GenerationRequest::new("t", vec![2, 2]), &data())
            .unwrap();
        assert_eq!(report.levels.len(), 1);
    }

    #[test]
    fn test_report_carries_existing_problems() {
        let sections = vec![
            Section::new("A", "CS101")
                .with_instructor("Dr. Lee")
                .with_enrollment(30, 30)
                .with_slot(TimeSlot::hm(Day::Sunday, (9, 0), (10, 30))),
            Section::new("B", "MATH101")
                .with_instructor("Dr. Lee")
                .with_enrollment(30, 30)
                .with_slot(TimeSlot::hm(Day::Sunday, (10, 0), (11, 30))),
        ];
        let external = ExternalCourseSet::from_courses(vec![
            ExternalCourse::new("", "Nameless"),
        ]);
        let data = data().with_sections(sections).with_external(external);

        let report = generator()
            .generate(&GenerationRequest::new("t", vec![1]), &data)
            .unwrap();

        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].conflict_type, ConflictType::FacultyConflict);
        assert_eq!(report.summary.total, 1);
        assert_eq!(report.external_errors.len(), 1);
        assert!(report.section_errors.is_empty());
        assert!(report.curriculum_errors.is_empty());

        let cs101 = report.levels[0]
            .courses
            .iter()
            .find(|c| c.course_code == "CS101")
            .unwrap();
        assert_eq!(cs101.existing_sections, 1);
    }

    #[test]
    fn test_report_carries_curriculum_problems() {
        let mut data = data();
        data.curriculum.insert(Course::new("CS101", "Intro").with_level(1).required().with_prerequisite("CS201"));
        data.curriculum.insert(
            Course::new("CS201", "Data Structures")
                .with_level(2)
                .required()
                .with_prerequisite("CS101")
                .with_prerequisite("CS999"),
        );

        let report = generator()
            .generate(&GenerationRequest::new("t", vec![1, 2]), &data)
            .unwrap();
        assert_eq!(report.curriculum_errors.len(), 2);
        assert!(report.curriculum_errors.iter().any(|e| e.contains("CS999")));
        assert!(report.curriculum_errors.iter().any(|e| e.contains("Circular")));
    }

    #[test]
    fn test_report_serializes() {
        let report = generator()
            .generate(&GenerationRequest::new("2025-fall", vec![2]), &data())
            .unwrap();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["term"], "2025-fall");
        assert_eq!(v["levels"][0]["courses"][0]["course_code"], "CS201");
        assert_eq!(v["summary"]["total"], 0);
    }
}
