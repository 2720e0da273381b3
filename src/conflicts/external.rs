//! Overlaps between managed sections/exams and externally fixed courses.
//!
//! The external course is always the other side of the conflict: entity
//! type `course`, never `section`, so resolution only ever moves the
//! managed section.

use crate::external::ExternalCourseSet;
use crate::models::{
    AffectedEntity, ConflictType, EntityType, Exam, ScheduleConflict, Section, Severity,
};
use crate::timeslots;

fn external_entity(code: &str, name: &str) -> AffectedEntity {
    AffectedEntity::new(EntityType::Course, code).with_name_if_present(name)
}

/// Managed sections sharing a room or instructor with an external meeting at the same time.
pub(crate) fn section_overlaps(
    sections: &[Section],
    external: &ExternalCourseSet,
) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();

    for s in sections {
        for (course, ext) in external.sections() {
            let pairs = timeslots::overlapping_pairs(&s.time_slots, &ext.time_slots);
            let Some((slot, _)) = pairs.first() else {
                continue;
            };

            let shared_room = match (&s.room, &ext.room) {
                (Some(a), Some(b)) if a == b => Some(a.as_str()),
                _ => None,
            };
            if let Some(room) = shared_room {
                conflicts.push(
                    ScheduleConflict::new(
                        ConflictType::RoomConflict,
                        Severity::Error,
                        format!("Room {room} is used by external course {}", course.code),
                        format!(
                            "Room {} is booked for {} while {} ({}) meets there ({}).",
                            room,
                            s.label(),
                            course.code,
                            course.name,
                            slot
                        ),
                    )
                    .with_entity(AffectedEntity::new(EntityType::Room, room).with_name(room))
                    .with_entity(AffectedEntity::section(&s.id, &s.course_name))
                    .with_entity(external_entity(&course.code, &course.name))
                    .with_suggestion(format!("Move {} to another room", s.label()))
                    .auto_resolvable(true),
                );
            }

            if s.has_instructor() && s.instructor == ext.instructor {
                conflicts.push(
                    ScheduleConflict::new(
                        ConflictType::FacultyConflict,
                        Severity::Critical,
                        format!("Instructor double-booked: {}", s.instructor),
                        format!(
                            "{} teaches {} and external course {} at the same time ({}).",
                            s.instructor,
                            s.label(),
                            course.code,
                            slot
                        ),
                    )
                    .with_entity(
                        AffectedEntity::new(EntityType::Faculty, &s.instructor)
                            .with_name(&s.instructor),
                    )
                    .with_entity(AffectedEntity::section(&s.id, &s.course_name))
                    .with_entity(external_entity(&course.code, &course.name))
                    .with_suggestion(format!("Move {} to another time", s.label()))
                    .auto_resolvable(true),
                );
            }
        }
    }
    conflicts
}

/// Managed exams colliding with an external exam in the same room.
pub(crate) fn exam_overlaps(exams: &[Exam], external: &ExternalCourseSet) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();

    for exam in exams {
        for (course, ext) in external.exams() {
            let same_room = matches!((&exam.room, &ext.room), (Some(a), Some(b)) if a == b);
            if !same_room || !exam.collides_with(ext) {
                continue;
            }
            conflicts.push(
                ScheduleConflict::new(
                    ConflictType::ExamOverlap,
                    Severity::Error,
                    format!("Exam room clash with external course {}", course.code),
                    format!(
                        "{} and {} are both in room {} on {}.",
                        exam.label(),
                        ext.label(),
                        exam.room.as_deref().unwrap_or_default(),
                        exam.date
                    ),
                )
                .with_entity(AffectedEntity::new(EntityType::Exam, &exam.id).with_name(exam.label()))
                .with_entity(external_entity(&course.code, &course.name))
                .with_suggestion(format!("Move {} to another room or time", exam.label())),
            );
        }
    }
    conflicts
}
