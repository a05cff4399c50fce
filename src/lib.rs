//! # brain_trainer
//!
//! Session engine for a brain-training app: ten mini-games behind one
//! question contract, a timed session loop, and a grade / "brain age"
//! evaluator.
//!
//! ## How it works
//!
//! 1. Pick a game with a [`SessionConfig`] (game tag, difficulty spec,
//!    optional round target, flash override, practice flag, RNG seed).
//! 2. Wrap it in a [`SessionController`] and hand that to [`spawn_session`].
//!    The returned [`SessionHandle`] takes player commands and yields
//!    [`SessionEvent`]s: intros, questions with their view state, remaining
//!    time, answer results and the final outcome.
//! 3. When the session ends its [`GameResult`] goes to the attached
//!    [`ResultRecorder`], which stores it and syncs the profile if signed in.
//!
//! The controller itself is a plain state machine. Tests and alternative
//! drivers can call it directly and interpret the [`Directive`]s it returns.
//!
//! ## Games
//!
//! | Tag | Game | Time | Rounds |
//! |-----|------|------|--------|
//! | `CALCULATION` | arithmetic, answers in 0..=50 | 60 s | 10 |
//! | `LOGIC_SYMBOL` | find the missing operator(s) | 60 s | 15 |
//! | `REFLEX_GREATEST` | pick the greatest of four numbers | 45 s | 20 |
//! | `FLAG_QUIZ` | name the country of a flag | 60 s | 15 |
//! | `MAP_QUIZ` | name the country on a map | 60 s | 15 |
//! | `NUMBER_MEMORY` | recall a flashed number | 60 s | 10 |
//! | `VISUAL_COUNT` | count flashed targets | 60 s | 12 |
//! | `MULTIPLICATION` | times tables | 60 s | 10 |
//! | `POKER_HAND` | name the best hand of seven cards | 120 s | 10 |
//! | `DAILY_TEST` | four questions from each of eight games | 480 s | 32 |
//!
//! ## Quick start
//!
//! ```rust
//! use brain_trainer::{generate_question, QuestionRequest};
//!
//! let q = generate_question(&QuestionRequest {
//!     game_type: "FLAG_QUIZ".into(),
//!     difficulty: "EUROPE|EASY".into(),
//!     rng_seed: Some(42),
//! });
//! assert!(q.options.contains(&q.answer));
//! ```
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use brain_trainer::{
//!     spawn_session, InMemoryResultStore, ResultRecorder, SessionConfig, SessionController,
//!     SessionTimings,
//! };
//!
//! # async fn run() {
//! let recorder = Arc::new(ResultRecorder::new(Arc::new(InMemoryResultStore::new())));
//! let controller = SessionController::new(SessionConfig::new("CALCULATION"), SessionTimings::default());
//! let mut session = spawn_session(controller, Some(recorder));
//! session.start().unwrap();
//! while let Some(event) = session.next_event().await {
//!     println!("{event:?}");
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod game_engine;
pub mod telemetry;
pub mod view_adapter;

// Convenience re-exports so callers can use `brain_trainer::spawn_session`
// directly without reaching into `game_engine::`.
pub use config::{EngineConfig, SessionSettings};
pub use error::{ConfigError, PersistenceError, SessionError, SyncError};
pub use game_engine::{
    generate_question, spawn_session, AvatarUpdate, Directive, EvaluationResult,
    FeedbackCategory, GameResult, GameType, GlobalStats, Grade, InMemoryResultStore, Phase,
    ProfileSync, ProfileUpdate, Question, QuestionRequest, ResultRecorder, ResultStore,
    RoundProgress, SessionCommand, SessionConfig, SessionController, SessionEvent, SessionHandle,
    SessionOutcome, SessionTimings, ViewState,
};

#[cfg(test)]
mod tests;
