//! Heuristic scores for candidate slots and rooms.
//!
//! Scores are integers clamped to `0..=100`. The constants come from
//! [`ScoringConfig`]; defaults are the committee-tuned values (base 70,
//! midday +20, early/late −20, Tue/Wed +10, Sun/Thu −5).

use crate::config::ScoringConfig;
use crate::models::TimeSlot;

use super::catalog::Room;

/// Scores a candidate meeting slot.
pub fn time_slot_score(slot: &TimeSlot, scoring: &ScoringConfig) -> i32 {
    let mut score = scoring.base_score;

    if slot.start >= scoring.midday_start && slot.start <= scoring.midday_end {
        score += scoring.midday_bonus;
    }
    if slot.start < scoring.early_cutoff || slot.start > scoring.late_cutoff {
        score -= scoring.off_hours_penalty;
    }

    if scoring.preferred_days.contains(&slot.day) {
        score += scoring.preferred_day_bonus;
    } else if scoring.edge_days.contains(&slot.day) {
        score -= scoring.edge_day_penalty;
    }

    score.clamp(0, 100)
}

/// Scores a candidate room for a required seat count.
///
/// A required capacity of zero counts as an oversized fit.
pub fn room_score(room: &Room, required_capacity: u32, scoring: &ScoringConfig) -> i32 {
    let ratio = if required_capacity == 0 {
        f64::INFINITY
    } else {
        f64::from(room.capacity) / f64::from(required_capacity)
    };

    let mut score = scoring.base_score;
    score += if ratio < 1.0 {
        -scoring.undersized_penalty
    } else if ratio <= scoring.tight_fit_ratio {
        scoring.tight_fit_bonus
    } else if ratio <= scoring.good_fit_ratio {
        scoring.good_fit_bonus
    } else {
        scoring.oversized_bonus
    };
    if room.is_first_floor() {
        score += scoring.first_floor_bonus;
    }

    score.clamp(0, 100)
}

/// Quality band for a score.
pub fn band(score: i32) -> &'static str {
    match score {
        90.. => "Optimal",
        80..=89 => "Good",
        70..=79 => "Acceptable",
        60..=69 => "Fair",
        _ => "Less ideal",
    }
}

/// Human-readable reason for a time slot score.
pub fn time_slot_reason(score: i32) -> String {
    format!("{} time slot", band(score))
}

/// Human-readable reason for a room score.
pub fn room_reason(room: &Room, required_capacity: u32, score: i32) -> String {
    format!(
        "{} room: {} seats for {} students",
        band(score),
        room.capacity,
        required_capacity
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Day;

    fn scoring() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_time_score_midday_midweek() {
        let s = TimeSlot::hm(Day::Tuesday, (11, 0), (12, 30));
        assert_eq!(time_slot_score(&s, &scoring()), 100);
    }

    #[test]
    fn test_time_score_window_edges_inclusive() {
        let at_ten = TimeSlot::hm(Day::Monday, (10, 0), (11, 30));
        let at_two = TimeSlot::hm(Day::Monday, (14, 0), (15, 30));
        assert_eq!(time_slot_score(&at_ten, &scoring()), 90);
        assert_eq!(time_slot_score(&at_two, &scoring()), 90);
    }

    #[test]
    fn test_time_score_penalties() {
        // early Sunday: 70 - 20 - 5
        let early = TimeSlot::hm(Day::Sunday, (8, 0), (9, 30));
        assert_eq!(time_slot_score(&early, &scoring()), 45);

        // 09:00 is not early, 16:00 is not late
        let nine = TimeSlot::hm(Day::Monday, (9, 0), (10, 30));
        let four = TimeSlot::hm(Day::Monday, (16, 0), (17, 30));
        assert_eq!(time_slot_score(&nine, &scoring()), 70);
        assert_eq!(time_slot_score(&four, &scoring()), 70);

        // late Thursday: 70 - 20 - 5
        let late = TimeSlot::hm(Day::Thursday, (16, 30), (18, 0));
        assert_eq!(time_slot_score(&late, &scoring()), 45);
    }

    #[test]
    fn test_time_score_clamped() {
        let mut cfg = scoring();
        cfg.base_score = 95;
        let s = TimeSlot::hm(Day::Wednesday, (11, 0), (12, 30));
        assert_eq!(time_slot_score(&s, &cfg), 100);

        cfg.base_score = 5;
        let s = TimeSlot::hm(Day::Sunday, (7, 0), (8, 30));
        assert_eq!(time_slot_score(&s, &cfg), 0);
    }

    #[test]
    fn test_room_score_bands() {
        let cfg = scoring();
        // ratio 1.0 → +30, floor 3
        assert_eq!(room_score(&Room::new("301", 30), 30, &cfg), 100);
        // ratio 1.2 → still tight
        assert_eq!(room_score(&Room::new("301", 36), 30, &cfg), 100);
        // ratio 1.5 → +20
        assert_eq!(room_score(&Room::new("301", 45), 30, &cfg), 90);
        // ratio 2.0 → +10
        assert_eq!(room_score(&Room::new("301", 60), 30, &cfg), 80);
        // undersized → −50
        assert_eq!(room_score(&Room::new("301", 20), 30, &cfg), 20);
        // first floor bonus: 70 + 10 + 5
        assert_eq!(room_score(&Room::new("101", 60), 30, &cfg), 85);
        // zero requirement counts as oversized
        assert_eq!(room_score(&Room::new("301", 60), 0, &cfg), 80);
    }

    #[test]
    fn test_bands() {
        assert_eq!(band(100), "Optimal");
        assert_eq!(band(90), "Optimal");
        assert_eq!(band(89), "Good");
        assert_eq!(band(80), "Good");
        assert_eq!(band(70), "Acceptable");
        assert_eq!(band(60), "Fair");
        assert_eq!(band(59), "Less ideal");
        assert_eq!(band(0), "Less ideal");
        assert_eq!(time_slot_reason(85), "Good time slot");
    }
}
