//! Grade, feedback and "brain age" from raw session performance.

use crate::game_engine::models::{EvaluationResult, FeedbackCategory, Grade};

/// Youngest (best) brain age.
pub const MIN_BRAIN_AGE: u32 = 20;
/// Oldest (worst) brain age.
pub const MAX_BRAIN_AGE: u32 = 80;

const YEARS_PER_MISTAKE: u32 = 3;
const YEARS_PER_SLOW_SECOND: f32 = 5.0;
/// Seconds per correct answer before the speed penalty applies.
const SPEED_THRESHOLD_SECS: f32 = 1.0;
/// Average used when nothing was answered correctly.
const NO_CORRECT_AVERAGE_SECS: f32 = 10.0;

/// Evaluate a session. `total == 0` yields the degenerate result
/// (grade F, feedback none, brain age 0), which callers must not persist.
pub fn evaluate(correct: u32, total: u32, elapsed_seconds: u32) -> EvaluationResult {
    if total == 0 {
        return EvaluationResult {
            grade: Grade::F,
            feedback: FeedbackCategory::None,
            brain_age: 0,
        };
    }

    let percentage = correct as f32 * 100.0 / total as f32;
    let grade = grade_for(percentage);

    let mistakes = total.saturating_sub(correct);
    let mut age = MIN_BRAIN_AGE.saturating_add(mistakes.saturating_mul(YEARS_PER_MISTAKE));

    let average = if correct > 0 {
        elapsed_seconds as f32 / correct as f32
    } else {
        NO_CORRECT_AVERAGE_SECS
    };
    if average > SPEED_THRESHOLD_SECS {
        // Truncated, as the penalty is counted in whole years.
        age = age.saturating_add(((average - SPEED_THRESHOLD_SECS) * YEARS_PER_SLOW_SECOND) as u32);
    }

    EvaluationResult {
        grade,
        feedback: grade.feedback(),
        brain_age: age.clamp(MIN_BRAIN_AGE, MAX_BRAIN_AGE),
    }
}

fn grade_for(percentage: f32) -> Grade {
    match percentage {
        p if p >= 95.0 => Grade::APlus,
        p if p >= 90.0 => Grade::A,
        p if p >= 85.0 => Grade::BPlus,
        p if p >= 80.0 => Grade::B,
        p if p >= 70.0 => Grade::CPlus,
        p if p >= 60.0 => Grade::C,
        p if p >= 40.0 => Grade::D,
        _ => Grade::E,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_run_at_threshold_speed() {
        let r = evaluate(10, 10, 10);
        assert_eq!(r.grade.as_str(), "A+");
        assert_eq!(r.feedback, FeedbackCategory::Excellent);
        assert_eq!(r.brain_age, 20);
    }

    #[test]
    fn nothing_correct_clamps_to_oldest() {
        let r = evaluate(0, 10, 100);
        assert_eq!(r.grade, Grade::E);
        assert_eq!(r.feedback, FeedbackCategory::Bad);
        assert_eq!(r.brain_age, 80);
    }

    #[test]
    fn half_correct_without_speed_penalty() {
        let r = evaluate(5, 10, 5);
        assert_eq!(r.grade, Grade::D);
        assert_eq!(r.feedback, FeedbackCategory::Poor);
        assert_eq!(r.brain_age, 35);
    }

    #[test]
    fn empty_session_is_degenerate() {
        let r = evaluate(0, 0, 30);
        assert_eq!(r.grade, Grade::F);
        assert_eq!(r.brain_age, 0);
        assert!(r.is_degenerate());
        assert!(!evaluate(1, 1, 1).is_degenerate());
    }

    #[test]
    fn slow_answers_add_truncated_years() {
        // 8/10 correct: 20 + 2*3 = 26; 20s / 8 = 2.5s avg → 1.5s excess → 7.5 → 7.
        let r = evaluate(8, 10, 20);
        assert_eq!(r.grade, Grade::B);
        assert_eq!(r.brain_age, 33);
    }

    #[test]
    fn extreme_inputs_clamp_instead_of_overflowing() {
        assert_eq!(evaluate(1, 1, 1_000_000_000).brain_age, 80);
        assert_eq!(evaluate(1, 1, u32::MAX).brain_age, 80);
        assert_eq!(evaluate(0, u32::MAX, 0).brain_age, 80);
        assert_eq!(evaluate(u32::MAX, u32::MAX, u32::MAX).brain_age, 20);
    }

    #[test]
    fn grade_boundaries() {
        let cases = [
            (95, Grade::APlus), (94, Grade::A), (90, Grade::A), (85, Grade::BPlus),
            (80, Grade::B), (70, Grade::CPlus), (60, Grade::C), (40, Grade::D), (39, Grade::E),
        ];
        for (correct, expected) in cases {
            assert_eq!(evaluate(correct, 100, 0).grade, expected, "{correct}%");
        }
    }
}
