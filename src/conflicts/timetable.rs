//! Whole-timetable detectors: instructor double-booking, room
//! double-booking and over-capacity sections.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::CheckerConfig;
use crate::models::{
    AffectedEntity, ConflictType, EntityType, ScheduleConflict, Section, Severity, TimeSlot,
};
use crate::timeslots;

/// Groups sections by instructor name. Sections without an instructor are skipped.
pub fn group_by_instructor(sections: &[Section]) -> BTreeMap<String, Vec<Section>> {
    let mut map: BTreeMap<String, Vec<Section>> = BTreeMap::new();
    for s in sections.iter().filter(|s| s.has_instructor()) {
        map.entry(s.instructor.clone()).or_default().push(s.clone());
    }
    map
}

pub(crate) fn faculty_overlaps(by_instructor: &BTreeMap<String, Vec<Section>>) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();

    for (instructor, sections) in by_instructor {
        if instructor.trim().is_empty() {
            continue;
        }
        for i in 0..sections.len() {
            for j in (i + 1)..sections.len() {
                let (a, b) = (&sections[i], &sections[j]);
                let pairs = timeslots::overlapping_pairs(&a.time_slots, &b.time_slots);
                let Some((sa, _)) = pairs.first() else {
                    continue;
                };
                conflicts.push(
                    ScheduleConflict::new(
                        ConflictType::FacultyConflict,
                        Severity::Critical,
                        format!("Instructor double-booked: {instructor}"),
                        format!(
                            "{} teaches {} and {} at the same time ({}).",
                            instructor,
                            a.label(),
                            b.label(),
                            sa
                        ),
                    )
                    .with_entity(
                        AffectedEntity::new(EntityType::Faculty, instructor).with_name(instructor),
                    )
                    .with_entity(AffectedEntity::section(&a.id, &a.course_name))
                    .with_entity(AffectedEntity::section(&b.id, &b.course_name))
                    .with_suggestion(format!("Move {} to a time {} is free", b.label(), instructor))
                    .with_suggestion(format!("Assign another instructor to {}", b.label()))
                    .auto_resolvable(true),
                );
            }
        }
    }
    conflicts
}

pub(crate) fn room_overlaps(sections: &[Section]) -> Vec<ScheduleConflict> {
    let mut bookings: BTreeMap<&str, Vec<(&Section, &TimeSlot)>> = BTreeMap::new();
    for s in sections {
        if let Some(room) = s.room.as_deref().filter(|r| !r.trim().is_empty()) {
            for slot in &s.time_slots {
                bookings.entry(room).or_default().push((s, slot));
            }
        }
    }

    let mut conflicts = Vec::new();
    for (room, list) in &bookings {
        let mut reported: BTreeSet<(&str, &str)> = BTreeSet::new();
        for i in 0..list.len() {
            for j in (i + 1)..list.len() {
                let ((a, sa), (b, sb)) = (list[i], list[j]);
                if a.id == b.id
                    || !timeslots::overlaps(sa, sb)
                    || !reported.insert((a.id.as_str(), b.id.as_str()))
                {
                    continue;
                }
                conflicts.push(
                    ScheduleConflict::new(
                        ConflictType::RoomConflict,
                        Severity::Error,
                        format!("Room double-booked: {room}"),
                        format!(
                            "Room {} is booked for {} and {} at the same time ({} overlaps {}).",
                            room,
                            a.label(),
                            b.label(),
                            sa,
                            sb
                        ),
                    )
                    .with_entity(AffectedEntity::new(EntityType::Room, *room).with_name(*room))
                    .with_entity(AffectedEntity::section(&a.id, &a.course_name))
                    .with_entity(AffectedEntity::section(&b.id, &b.course_name))
                    .with_suggestion(format!("Move {} to another room", b.label()))
                    .with_suggestion(format!("Move {} to another time", b.label()))
                    .auto_resolvable(true),
                );
            }
        }
    }
    conflicts
}

pub(crate) fn over_capacity(sections: &[Section], config: &CheckerConfig) -> Vec<ScheduleConflict> {
    sections
        .iter()
        .filter(|s| s.is_over_capacity())
        .map(|s| {
            let overage = s.overage();
            let ratio = if s.capacity == 0 {
                f64::INFINITY
            } else {
                f64::from(overage) / f64::from(s.capacity)
            };
            let severity = if ratio > config.capacity_error_ratio {
                Severity::Error
            } else {
                Severity::Warning
            };
            let detail = if s.capacity == 0 {
                format!("{} has {} students but no seats.", s.label(), s.enrolled_count)
            } else {
                format!(
                    "{} has {} students for {} seats ({} over, {:.0}%).",
                    s.label(),
                    s.enrolled_count,
                    s.capacity,
                    overage,
                    ratio * 100.0
                )
            };

            let mut conflict = ScheduleConflict::new(
                ConflictType::CapacityExceeded,
                severity,
                format!("Section over capacity: {}", s.label()),
                detail,
            )
            .with_entity(AffectedEntity::section(&s.id, &s.course_name));
            if let Some(room) = &s.room {
                conflict = conflict.with_entity(AffectedEntity::new(EntityType::Room, room));
            }
            conflict
                .with_suggestion("Move the section to a larger room")
                .with_suggestion(format!("Open an additional section of {}", s.course_code))
                .with_suggestion("Cap enrollment at capacity")
                .auto_resolvable(overage <= config.auto_resolve_max_overage)
        })
        .collect()
}
