//! Question strategies, one per game type.
//!
//! | Module | Game types |
//! |--------|------------|
//! | [`arithmetic`] | CALCULATION, LOGIC_SYMBOL |
//! | [`greatest`] | REFLEX_GREATEST |
//! | [`geography`] | FLAG_QUIZ, MAP_QUIZ |
//! | [`number_memory`] | NUMBER_MEMORY |
//! | [`visual_count`] | VISUAL_COUNT |
//! | [`multiplication`] | MULTIPLICATION |
//! | [`poker`] | POKER_HAND |
//! | [`daily_test`] | DAILY_TEST |
//!
//! A strategy instance is owned by exactly one session. Anything it remembers
//! between questions (used countries, the multiplication pool, the daily test
//! cursor) lives on the instance and starts fresh with it.

pub mod arithmetic;
pub mod geography;
pub mod greatest;
pub mod multiplication;
pub mod number_memory;
pub mod poker;
pub mod visual_count;

use rand::RngCore;

use crate::game_engine::models::{GameType, Question};

pub use arithmetic::{CalculationStrategy, LogicSymbolStrategy};
pub use daily_test::DailyTestStrategy;
pub use geography::{FlagQuizStrategy, MapQuizStrategy};
pub use greatest::GreatestNumberStrategy;
pub use multiplication::MultiplicationStrategy;
pub use number_memory::NumberMemoryStrategy;
pub use poker::PokerHandStrategy;
pub use visual_count::VisualCountStrategy;

/// Uniform contract every game implements.
pub trait QuestionStrategy {
    fn game_type(&self) -> GameType;

    /// Game whose question comes next. Differs from [`game_type`] only for
    /// composite games.
    ///
    /// [`game_type`]: QuestionStrategy::game_type
    fn current_game_type(&self) -> GameType {
        self.game_type()
    }

    /// `difficulty` is the raw difficulty string; each strategy reads its own
    /// dialect of it (see [`crate::game_engine::difficulty`]).
    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question;

    fn check_answer(&self, question: &Question, input: &str) -> bool {
        input.trim() == question.answer
    }

    fn duration_seconds(&self) -> u32;

    fn target_question_count(&self) -> u32;

    /// Most distinct questions this game can produce for `difficulty`.
    fn max_questions(&self, _difficulty: &str) -> u32 {
        u32::MAX
    }
}

/// Closed set of strategies, so sessions and the daily test can own them by
/// value.
#[derive(Debug, Clone)]
pub enum GameStrategy {
    Calculation(CalculationStrategy),
    LogicSymbol(LogicSymbolStrategy),
    GreatestNumber(GreatestNumberStrategy),
    FlagQuiz(FlagQuizStrategy),
    MapQuiz(MapQuizStrategy),
    NumberMemory(NumberMemoryStrategy),
    VisualCount(VisualCountStrategy),
    Multiplication(MultiplicationStrategy),
    PokerHand(PokerHandStrategy),
    DailyTest(DailyTestStrategy),
}

impl GameStrategy {
    /// Fresh strategy with no remembered state.
    pub fn new(game_type: GameType) -> GameStrategy {
        match game_type {
            GameType::Calculation    => GameStrategy::Calculation(CalculationStrategy),
            GameType::LogicSymbol    => GameStrategy::LogicSymbol(LogicSymbolStrategy),
            GameType::ReflexGreatest => GameStrategy::GreatestNumber(GreatestNumberStrategy),
            GameType::FlagQuiz       => GameStrategy::FlagQuiz(FlagQuizStrategy::default()),
            GameType::MapQuiz        => GameStrategy::MapQuiz(MapQuizStrategy::default()),
            GameType::NumberMemory   => GameStrategy::NumberMemory(NumberMemoryStrategy),
            GameType::VisualCount    => GameStrategy::VisualCount(VisualCountStrategy),
            GameType::Multiplication => GameStrategy::Multiplication(MultiplicationStrategy::default()),
            GameType::PokerHand      => GameStrategy::PokerHand(PokerHandStrategy),
            GameType::DailyTest      => GameStrategy::DailyTest(DailyTestStrategy::new()),
        }
    }

    fn as_dyn(&self) -> &dyn QuestionStrategy {
        match self {
            GameStrategy::Calculation(s)    => s,
            GameStrategy::LogicSymbol(s)    => s,
            GameStrategy::GreatestNumber(s) => s,
            GameStrategy::FlagQuiz(s)       => s,
            GameStrategy::MapQuiz(s)        => s,
            GameStrategy::NumberMemory(s)   => s,
            GameStrategy::VisualCount(s)    => s,
            GameStrategy::Multiplication(s) => s,
            GameStrategy::PokerHand(s)      => s,
            GameStrategy::DailyTest(s)      => s,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn QuestionStrategy {
        match self {
            GameStrategy::Calculation(s)    => s,
            GameStrategy::LogicSymbol(s)    => s,
            GameStrategy::GreatestNumber(s) => s,
            GameStrategy::FlagQuiz(s)       => s,
            GameStrategy::MapQuiz(s)        => s,
            GameStrategy::NumberMemory(s)   => s,
            GameStrategy::VisualCount(s)    => s,
            GameStrategy::Multiplication(s) => s,
            GameStrategy::PokerHand(s)      => s,
            GameStrategy::DailyTest(s)      => s,
        }
    }
}

impl QuestionStrategy for GameStrategy {
    fn game_type(&self) -> GameType {
        self.as_dyn().game_type()
    }

    fn current_game_type(&self) -> GameType {
        self.as_dyn().current_game_type()
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        self.as_dyn_mut().generate_question(rng, difficulty)
    }

    fn check_answer(&self, question: &Question, input: &str) -> bool {
        self.as_dyn().check_answer(question, input)
    }

    fn duration_seconds(&self) -> u32 {
        self.as_dyn().duration_seconds()
    }

    fn target_question_count(&self) -> u32 {
        self.as_dyn().target_question_count()
    }

    fn max_questions(&self, difficulty: &str) -> u32 {
        self.as_dyn().max_questions(difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_game_type_builds_its_own_strategy() {
        for g in GameType::ALL {
            let s = GameStrategy::new(g);
            assert_eq!(s.game_type(), g);
            assert!(s.duration_seconds() > 0);
            assert!(s.target_question_count() > 0);
        }
    }

    #[test]
    fn budgets_match_the_game_table() {
        let table = [
            (GameType::Calculation, 60, 10),
            (GameType::LogicSymbol, 60, 15),
            (GameType::ReflexGreatest, 45, 20),
            (GameType::FlagQuiz, 60, 15),
            (GameType::MapQuiz, 60, 15),
            (GameType::NumberMemory, 60, 10),
            (GameType::VisualCount, 60, 12),
            (GameType::Multiplication, 60, 10),
            (GameType::PokerHand, 120, 10),
            (GameType::DailyTest, 480, 32),
        ];
        for (g, secs, rounds) in table {
            let s = GameStrategy::new(g);
            assert_eq!(s.duration_seconds(), secs, "{g}");
            assert_eq!(s.target_question_count(), rounds, "{g}");
        }
    }
}
