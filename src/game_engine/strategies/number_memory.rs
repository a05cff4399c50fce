use rand::seq::index::sample;
use rand::{Rng, RngCore};

use crate::game_engine::difficulty::Difficulty;
use crate::game_engine::helpers::{fill_options, question_id};
use crate::game_engine::models::{GameType, Question};
use crate::game_engine::strategies::QuestionStrategy;

/// A digit string flashes; pick it back out from near misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberMemoryStrategy;

impl NumberMemoryStrategy {
    fn digit_count(difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy   => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard   => 8,
        }
    }

    /// Replace `count` distinct positions with a different digit each.
    fn change_digits(rng: &mut dyn RngCore, digits: &[u8], count: usize) -> Vec<u8> {
        let mut out = digits.to_vec();
        for i in sample(rng, digits.len(), count.min(digits.len())) {
            // Adding 1..=9 mod 10 can never land on the same digit.
            out[i] = (out[i] + rng.gen_range(1..=9)) % 10;
        }
        out
    }

    fn swap_adjacent(rng: &mut dyn RngCore, digits: &[u8]) -> Vec<u8> {
        let mut out = digits.to_vec();
        if out.len() >= 2 {
            let i = rng.gen_range(0..out.len() - 1);
            out.swap(i, i + 1);
        }
        out
    }

    fn render(digits: &[u8]) -> String {
        digits.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

impl QuestionStrategy for NumberMemoryStrategy {
    fn game_type(&self) -> GameType {
        GameType::NumberMemory
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        let len = Self::digit_count(Difficulty::from_spec(difficulty));
        let id = question_id(rng, GameType::NumberMemory);

        let digits: Vec<u8> = (0..len).map(|_| rng.gen_range(0..10)).collect();
        let answer = Self::render(&digits);

        // Each position bumped by one: distinct from the answer and each other.
        let fallback: Vec<String> = (0..len)
            .map(|i| {
                let mut d = digits.clone();
                d[i] = (d[i] + 1) % 10;
                Self::render(&d)
            })
            .collect();

        let options = fill_options(
            rng,
            answer.clone(),
            |r| {
                let mutated = match r.gen_range(0..3) {
                    0 => Self::change_digits(r, &digits, 1),
                    1 => Self::change_digits(r, &digits, 2),
                    _ => Self::swap_adjacent(r, &digits),
                };
                Some(Self::render(&mutated))
            },
            fallback,
        );

        Question::multiple_choice(id, "Which number was shown?", options, answer.clone())
            .with_flash(vec![answer])
    }

    fn duration_seconds(&self) -> u32 {
        60
    }

    fn target_question_count(&self) -> u32 {
        10
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn differing_positions(a: &str, b: &str) -> usize {
        a.chars().zip(b.chars()).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn digit_length_follows_difficulty() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = NumberMemoryStrategy;
        for (difficulty, len) in [("EASY", 4), ("MEDIUM", 6), ("HARD", 8), ("???", 6)] {
            let q = s.generate_question(&mut rng, difficulty);
            assert_eq!(q.answer.len(), len);
            assert_eq!(q.flash_items, vec![q.answer.clone()]);
        }
    }

    #[test]
    fn distractors_are_near_misses() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut s = NumberMemoryStrategy;
        for _ in 0..200 {
            let q = s.generate_question(&mut rng, "MEDIUM");
            assert_eq!(q.options.len(), 4);
            assert_eq!(q.options.iter().filter(|o| **o == q.answer).count(), 1);
            for o in q.options.iter().filter(|o| **o != q.answer) {
                assert_eq!(o.len(), q.answer.len());
                let diff = differing_positions(o, &q.answer);
                assert!((1..=2).contains(&diff), "{o} vs {}", q.answer);
            }
        }
    }

    #[test]
    fn uniform_digits_still_get_three_distractors() {
        let mut rng = StdRng::seed_from_u64(0);
        let digits = [7u8; 4];
        let changed = NumberMemoryStrategy::change_digits(&mut rng, &digits, 2);
        assert_eq!(changed.iter().filter(|d| **d != 7).count(), 2);
        assert_eq!(NumberMemoryStrategy::swap_adjacent(&mut rng, &digits), digits.to_vec());
    }
}
