//! Interval-overlap primitives over day-scoped time slots.
//!
//! Every other component builds on these checks. Overlap is half-open:
//! `[09:00, 10:00)` and `[10:00, 11:00)` do not overlap. It is symmetric,
//! and slots on different days never overlap.
//!
//! A zero-length slot never overlaps anything, including another
//! zero-length slot at the same instant. This follows from the strict
//! inequalities and is intentional.
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Day, TimeSlot};
//! use u_timetable::timeslots;
//!
//! let slots = vec![
//!     TimeSlot::hm(Day::Sunday, (9, 0), (10, 0)),
//!     TimeSlot::hm(Day::Sunday, (9, 30), (10, 30)),
//!     TimeSlot::hm(Day::Sunday, (10, 0), (11, 0)),
//! ];
//! let report = timeslots::validate_collection(&slots);
//! assert!(!report.valid);
//! assert_eq!(report.conflicts, vec![(0, 1), (1, 2)]);
//! ```

use std::collections::BTreeMap;

use crate::models::{Day, TimeSlot};

/// Whether two slots overlap.
#[inline]
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.overlaps(b)
}

/// Result of a collection-level overlap check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotValidation {
    /// `true` when no pair overlaps.
    pub valid: bool,
    /// Every overlapping unordered pair `(i, j)`, `i < j`, in lexicographic order.
    pub conflicts: Vec<(usize, usize)>,
}

/// Checks all unordered pairs of a collection. O(n²).
///
/// Reports every overlapping pair, not just the first.
pub fn validate_collection(slots: &[TimeSlot]) -> SlotValidation {
    let mut conflicts = Vec::new();
    for i in 0..slots.len() {
        for j in (i + 1)..slots.len() {
            if overlaps(&slots[i], &slots[j]) {
                conflicts.push((i, j));
            }
        }
    }
    SlotValidation {
        valid: conflicts.is_empty(),
        conflicts,
    }
}

/// Whether any slot of `a` overlaps any slot of `b`.
pub fn any_overlap(a: &[TimeSlot], b: &[TimeSlot]) -> bool {
    a.iter().any(|x| b.iter().any(|y| overlaps(x, y)))
}

/// All overlapping `(slot_of_a, slot_of_b)` pairs.
pub fn overlapping_pairs<'a>(a: &'a [TimeSlot], b: &'a [TimeSlot]) -> Vec<(&'a TimeSlot, &'a TimeSlot)> {
    a.iter()
        .flat_map(|x| b.iter().filter(move |y| overlaps(x, y)).map(move |y| (x, y)))
        .collect()
}

/// Whether `slot` overlaps anything in `occupied`.
pub fn collides_with_any<'a, I>(slot: &TimeSlot, occupied: I) -> bool
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    occupied.into_iter().any(|o| overlaps(slot, o))
}

/// Scheduled hours per day, summed over all slots.
pub fn hours_by_day<'a, I>(slots: I) -> BTreeMap<Day, f64>
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    let mut hours: BTreeMap<Day, f64> = BTreeMap::new();
    for slot in slots {
        *hours.entry(slot.day).or_insert(0.0) += slot.duration_hours();
    }
    hours
}
