//! Answer scoring: streak multiplier and time bonus.

/// Streak multiplier never exceeds this (reached at a streak of 20).
pub const MAX_STREAK_MULTIPLIER: f64 = 3.0;

/// Largest time bonus, earned by answering instantly.
pub const MAX_TIME_BONUS: u32 = 50;

/// Points for one answer: `base * min(1 + 0.1 * streak, 3) + time_bonus`, rounded.
/// Wrong answers score 0. The time bonus is added after the multiplier.
pub fn score(is_correct: bool, base_points: u32, current_streak: u32, time_bonus: u32) -> u32 {
    if !is_correct {
        return 0;
    }
    let multiplier = (1.0 + 0.1 * f64::from(current_streak)).min(MAX_STREAK_MULTIPLIER);
    (f64::from(base_points) * multiplier + f64::from(time_bonus)).round() as u32
}

/// Bonus proportional to the fraction of time left, `floor(remaining / total * 50)`.
pub fn time_bonus(time_remaining: u32, time_per_question: u32) -> u32 {
    if time_per_question == 0 {
        return 0;
    }
    let remaining = time_remaining.min(time_per_question);
    (f64::from(remaining) / f64::from(time_per_question) * f64::from(MAX_TIME_BONUS)).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_points_without_streak() {
        assert_eq!(score(true, 100, 0, 0), 100);
    }

    #[test]
    fn streak_doubles_at_ten() {
        assert_eq!(score(true, 100, 10, 0), 200);
    }

    #[test]
    fn streak_multiplier_caps_at_three() {
        assert_eq!(score(true, 100, 30, 0), 300);
        assert_eq!(score(true, 100, 20, 0), 300);
    }

    #[test]
    fn wrong_answer_scores_nothing() {
        assert_eq!(score(false, 100, 5, 20), 0);
    }

    #[test]
    fn time_bonus_is_not_multiplied() {
        // 100 * 1.5 + 20
        assert_eq!(score(true, 100, 5, 20), 170);
    }

    #[test]
    fn rounds_to_nearest() {
        // 15 * 1.1 = 16.5
        assert_eq!(score(true, 15, 1, 0), 17);
        // 10 * 1.3 = 13
        assert_eq!(score(true, 10, 3, 0), 13);
    }

    #[test]
    fn time_bonus_scales_with_time_left() {
        assert_eq!(time_bonus(30, 30), 50);
        assert_eq!(time_bonus(15, 30), 25);
        assert_eq!(time_bonus(10, 30), 16);
        assert_eq!(time_bonus(0, 30), 0);
    }

    #[test]
    fn time_bonus_is_capped() {
        assert_eq!(time_bonus(45, 30), 50);
        assert_eq!(time_bonus(5, 0), 0);
    }
}
