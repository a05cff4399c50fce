//! Game session engine: question strategies, scoring and the session loop.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: cards, game types, questions, grades, results |
//! | `difficulty`  | Difficulty spec parsing (`"EASY"`, `"EUROPE|HARD"`, `"7"`, `"2-9"`) |
//! | `catalog`     | Country table, flag emoji and map assets for the geography games |
//! | `deck`        | 52-card deck for poker deals |
//! | `evaluator`   | Best five-card hand out of seven, with the cards that make it |
//! | `helpers`     | Question ids and option-list building shared by strategies |
//! | `strategies`  | One question strategy per game type, plus the daily test |
//! | `generator`   | Tag resolution and one-off `generate_question()` |
//! | `performance` | Grade, feedback and brain age from raw performance |
//! | `countdown`   | Tokenised session countdown |
//! | `session`     | Session state machine; returns directives instead of acting |
//! | `runtime`     | tokio task that drives a session and owns its timers |
//! | `persistence` | Result store and profile sync traits, in-memory store, recorder |

pub mod catalog;
pub mod countdown;
pub mod deck;
pub mod difficulty;
pub mod evaluator;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod performance;
pub mod persistence;
pub mod runtime;
pub mod session;
pub mod strategies;

pub use generator::{generate_question, resolve_game_type, QuestionRequest};
pub use models::{
    Card, EvaluationResult, FeedbackCategory, GameResult, GameType, Grade, Question, ViewState,
};
pub use performance::evaluate;
pub use persistence::{
    AvatarUpdate, GlobalStats, InMemoryResultStore, ProfileSync, ProfileUpdate, ResultRecorder,
    ResultStore,
};
pub use runtime::{spawn_session, SessionCommand, SessionHandle};
pub use session::{
    Directive, Phase, RoundProgress, SessionConfig, SessionController, SessionEvent,
    SessionOutcome, SessionTimings,
};
pub use strategies::{GameStrategy, QuestionStrategy};
