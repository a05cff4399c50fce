use rand::{Rng, RngCore};

use crate::game_engine::difficulty::Difficulty;
use crate::game_engine::helpers::{fill_options, question_id};
use crate::game_engine::models::{GameType, Question};
use crate::game_engine::strategies::QuestionStrategy;

/// Flash payload prefix: `VISUAL:<targets>:<distractors>`.
pub const VISUAL_PREFIX: &str = "VISUAL";

/// How many target and distractor shapes the renderer scatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualCountConfig {
    pub targets: u32,
    pub distractors: u32,
}

impl VisualCountConfig {
    pub fn encode(&self) -> String {
        format!("{VISUAL_PREFIX}:{}:{}", self.targets, self.distractors)
    }

    pub fn parse(item: &str) -> Option<VisualCountConfig> {
        let mut parts = item.trim().split(':');
        if parts.next()? != VISUAL_PREFIX {
            return None;
        }
        let targets = parts.next()?.parse().ok()?;
        let distractors = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(VisualCountConfig { targets, distractors })
    }
}

/// Count the target shapes among distractors.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualCountStrategy;

impl QuestionStrategy for VisualCountStrategy {
    fn game_type(&self) -> GameType {
        GameType::VisualCount
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        let hard = Difficulty::from_spec(difficulty) == Difficulty::Hard;
        let id = question_id(rng, GameType::VisualCount);

        let config = if hard {
            VisualCountConfig { targets: rng.gen_range(5..12), distractors: rng.gen_range(15..25) }
        } else {
            VisualCountConfig { targets: rng.gen_range(2..9), distractors: rng.gen_range(4..11) }
        };
        let answer = config.targets.to_string();

        let options = fill_options(
            rng,
            answer.clone(),
            |r| Some(r.gen_range(2..10u32).to_string()),
            (2..10u32).map(|n| n.to_string()),
        );

        Question::multiple_choice(id, "How many targets were there?", options, answer)
            .with_flash(vec![config.encode()])
    }

    fn duration_seconds(&self) -> u32 {
        60
    }

    fn target_question_count(&self) -> u32 {
        12
    }
}
