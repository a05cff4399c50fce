use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::game_engine::difficulty::TableSpec;
use crate::game_engine::helpers::{fill_options, question_id};
use crate::game_engine::models::{GameType, Question};
use crate::game_engine::strategies::QuestionStrategy;

const MULTIPLIERS: std::ops::RangeInclusive<u32> = 1..=10;

/// Times-table drill. Facts are dealt from a shuffled pool without
/// replacement; the pool is rebuilt when it runs out or the spec changes.
#[derive(Debug, Clone, Default)]
pub struct MultiplicationStrategy {
    /// Remaining (table, multiplier) facts; the next one is popped off the end.
    pool: Vec<(u32, u32)>,
    pool_spec: Option<String>,
    last: Option<(u32, u32)>,
}

impl MultiplicationStrategy {
    fn refresh(&mut self, rng: &mut dyn RngCore, spec: &str) {
        let tables = TableSpec::parse(spec).tables();
        self.pool = tables
            .flat_map(|t| MULTIPLIERS.map(move |m| (t, m)))
            .collect();
        self.pool.shuffle(rng);

        // Keep the previous fact from coming straight back.
        if let (Some(last), Some(len)) = (self.last, self.pool.len().checked_sub(1)) {
            if self.pool[len] == last && len > 0 {
                let other = rng.gen_range(0..len);
                self.pool.swap(len, other);
            }
        }
        self.pool_spec = Some(spec.to_string());
        debug!(target: "strategy", spec, facts = self.pool.len(), "multiplication pool refreshed");
    }

    fn next_fact(&mut self, rng: &mut dyn RngCore, spec: &str) -> (u32, u32) {
        if self.pool.is_empty() || self.pool_spec.as_deref() != Some(spec) {
            self.refresh(rng, spec);
        }
        let fact = self.pool.pop().unwrap_or((7, 7));
        self.last = Some(fact);
        fact
    }

    /// Facts left before the next refresh.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }
}

impl QuestionStrategy for MultiplicationStrategy {
    fn game_type(&self) -> GameType {
        GameType::Multiplication
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        let id = question_id(rng, GameType::Multiplication);
        let (table, multiplier) = self.next_fact(rng, difficulty);
        let answer = i64::from(table) * i64::from(multiplier);
        let step = i64::from(table);

        let options = fill_options(
            rng,
            answer.to_string(),
            |r| {
                let fake = match r.gen_range(0..3) {
                    0 => answer + step,
                    1 => answer - step,
                    _ => answer + r.gen_range(-5..=5),
                };
                (fake > 0).then(|| fake.to_string())
            },
            (1..).map(|d| (answer + d).to_string()),
        );

        Question::multiple_choice(id, format!("{table} × {multiplier} = ?"), options, answer.to_string())
    }

    fn duration_seconds(&self) -> u32 {
        60
    }

    fn target_question_count(&self) -> u32 {
        10
    }
}
