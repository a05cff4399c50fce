use rand::seq::index::sample;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::game_engine::difficulty::Difficulty;
use crate::game_engine::helpers::{fill_options, question_id};
use crate::game_engine::models::{GameType, Question};
use crate::game_engine::strategies::QuestionStrategy;

const FLASH_COUNT: usize = 4;

/// Four numbers flash by; pick the largest.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatestNumberStrategy;

impl GreatestNumberStrategy {
    /// Exclusive upper bound of the drawn numbers.
    fn limit(difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Hard => 200,
            _ => 100,
        }
    }
}

impl QuestionStrategy for GreatestNumberStrategy {
    fn game_type(&self) -> GameType {
        GameType::ReflexGreatest
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        let limit = Self::limit(Difficulty::from_spec(difficulty));
        let id = question_id(rng, GameType::ReflexGreatest);

        let mut flash: Vec<u32> = sample(rng, limit as usize - 1, FLASH_COUNT)
            .into_iter()
            .map(|i| i as u32 + 1)
            .collect();
        flash.shuffle(rng);
        let max = flash.iter().copied().max().unwrap_or(1);

        let options = fill_options(
            rng,
            max.to_string(),
            |r| Some(r.gen_range(1..limit).to_string()),
            (1..limit).map(|n| n.to_string()),
        );

        Question::multiple_choice(id, "Which number was the greatest?", options, max.to_string())
            .with_flash(flash.iter().map(u32::to_string).collect())
    }

    fn duration_seconds(&self) -> u32 {
        45
    }

    fn target_question_count(&self) -> u32 {
        20
    }
}
