//! Per-student detectors: meeting overlaps, exam collisions, prerequisite
//! gaps, daily load and missing required courses.

use crate::models::{
    AffectedEntity, ConflictType, Curriculum, EntityType, ScheduleConflict, Severity, Student,
};
use crate::timeslots;

fn student_entity(student: &Student) -> AffectedEntity {
    AffectedEntity::student(&student.id, student.display_name())
}

/// One `time_overlap` per unordered pair of sections with any overlapping meeting.
pub(crate) fn schedule_overlaps(student: &Student) -> Vec<ScheduleConflict> {
    let sections = &student.sections;
    let mut conflicts = Vec::new();

    for i in 0..sections.len() {
        for j in (i + 1)..sections.len() {
            let (a, b) = (&sections[i], &sections[j]);
            let pairs = timeslots::overlapping_pairs(&a.time_slots, &b.time_slots);
            let Some((sa, sb)) = pairs.first() else {
                continue;
            };

            conflicts.push(
                ScheduleConflict::new(
                    ConflictType::TimeOverlap,
                    Severity::Critical,
                    format!("Class time conflict: {} and {}", a.course_code, b.course_code),
                    format!(
                        "{} is enrolled in {} and {}, which meet at the same time ({} overlaps {}).",
                        student.display_name(),
                        a.label(),
                        b.label(),
                        sa,
                        sb
                    ),
                )
                .with_entity(student_entity(student))
                .with_entity(AffectedEntity::section(&a.id, &a.course_name))
                .with_entity(AffectedEntity::section(&b.id, &b.course_name))
                .with_suggestion(format!("Move {} to a free time slot", b.label()))
                .with_suggestion(format!("Move {} to a free time slot", a.label()))
                .with_suggestion(format!(
                    "Enroll the student in another section of {} or {}",
                    a.course_code, b.course_code
                ))
                .auto_resolvable(true),
            );
        }
    }
    conflicts
}

/// One `exam_overlap` per pair of exams on the same date with overlapping times.
pub(crate) fn exam_overlaps(student: &Student) -> Vec<ScheduleConflict> {
    let exams = &student.exams;
    let mut conflicts = Vec::new();

    for i in 0..exams.len() {
        for j in (i + 1)..exams.len() {
            let (a, b) = (&exams[i], &exams[j]);
            if !a.collides_with(b) {
                continue;
            }
            conflicts.push(
                ScheduleConflict::new(
                    ConflictType::ExamOverlap,
                    Severity::Critical,
                    format!("Exam conflict: {} and {}", a.label(), b.label()),
                    format!(
                        "{} has {} at {} and {} at {} on {}.",
                        student.display_name(),
                        a.label(),
                        a.time.format("%H:%M"),
                        b.label(),
                        b.time.format("%H:%M"),
                        a.date
                    ),
                )
                .with_entity(student_entity(student))
                .with_entity(AffectedEntity::new(EntityType::Exam, &a.id).with_name(a.label()))
                .with_entity(AffectedEntity::new(EntityType::Exam, &b.id).with_name(b.label()))
                .with_suggestion("Reschedule one of the exams")
                .with_suggestion("Arrange a make-up sitting for the student"),
            );
        }
    }
    conflicts
}

/// One `prerequisite_violation` per enrolled course with uncompleted prerequisites.
pub(crate) fn prerequisite_gaps(student: &Student, curriculum: &Curriculum) -> Vec<ScheduleConflict> {
    student
        .enrolled_courses()
        .into_iter()
        .filter_map(|code| {
            let missing: Vec<&str> = curriculum
                .prerequisites_of(code)
                .iter()
                .map(String::as_str)
                .filter(|p| !student.completed_courses.contains(*p))
                .collect();
            if missing.is_empty() {
                return None;
            }

            let mut course = AffectedEntity::new(EntityType::Course, code);
            if let Some(c) = curriculum.get(code) {
                course = course.with_name(&c.name);
            }
            Some(
                ScheduleConflict::new(
                    ConflictType::PrerequisiteViolation,
                    Severity::Error,
                    format!("Missing prerequisites for {code}"),
                    format!(
                        "{} is enrolled in {} without completing: {}.",
                        student.display_name(),
                        code,
                        missing.join(", ")
                    ),
                )
                .with_entity(student_entity(student))
                .with_entity(course)
                .with_suggestion(format!("Complete {} before taking {}", missing.join(", "), code))
                .with_suggestion("Request a prerequisite waiver from the department"),
            )
        })
        .collect()
}

/// One `excessive_daily_load` per day whose scheduled hours exceed the limit.
pub(crate) fn daily_load(student: &Student, max_daily_hours: f64) -> Vec<ScheduleConflict> {
    let hours = timeslots::hours_by_day(student.sections.iter().flat_map(|s| s.time_slots.iter()));

    hours
        .into_iter()
        .filter(|(_, h)| *h > max_daily_hours)
        .map(|(day, h)| {
            let meeting: Vec<_> = student
                .sections
                .iter()
                .filter(|s| s.time_slots.iter().any(|t| t.day == day))
                .collect();
            let codes: Vec<&str> = meeting.iter().map(|s| s.course_code.as_str()).collect();

            let mut conflict = ScheduleConflict::new(
                ConflictType::ExcessiveDailyLoad,
                Severity::Warning,
                format!("Heavy load on {day}"),
                format!(
                    "{} has {:.1} hours of classes on {} (limit {:.1}): {}.",
                    student.display_name(),
                    h,
                    day,
                    max_daily_hours,
                    codes.join(", ")
                ),
            )
            .with_entity(student_entity(student));
            for s in &meeting {
                conflict = conflict.with_entity(AffectedEntity::section(&s.id, &s.course_name));
            }
            conflict
                .with_suggestion(format!("Move one of {} to another day", codes.join(", ")))
                .auto_resolvable(true)
        })
        .collect()
}

/// One `missing_required_course` listing every required code not enrolled.
pub(crate) fn missing_required(student: &Student, curriculum: &Curriculum) -> Vec<ScheduleConflict> {
    let missing: Vec<&str> = curriculum
        .required_for_level(student.level)
        .into_iter()
        .filter(|code| !student.is_enrolled_in(code))
        .collect();
    if missing.is_empty() {
        return Vec::new();
    }

    let mut conflict = ScheduleConflict::new(
        ConflictType::MissingRequiredCourse,
        Severity::Error,
        format!("Missing required courses for level {}", student.level),
        format!(
            "{} is not enrolled in required course(s): {}.",
            student.display_name(),
            missing.join(", ")
        ),
    )
    .with_entity(student_entity(student));
    for code in &missing {
        conflict = conflict.with_entity(AffectedEntity::new(EntityType::Course, *code));
    }
    vec![conflict.with_suggestion(format!("Enroll in {}", missing.join(", ")))]
}
