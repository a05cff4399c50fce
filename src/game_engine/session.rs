//! Session controller: the per-session state machine.
//!
//! ```text
//! NotStarted ─start─▶ [Intro ─ack─▶] [Flashing ─flash elapsed─▶] Input ─answer─▶ Feedback ─▶ next round | Finished
//!                                                                  └─(poker)─▶ AwaitingContinue ─continue─▶ next round | Finished
//! ```
//!
//! The controller never sleeps or spawns. Every call returns a list of
//! [`Directive`]s: events for the presentation layer, countdown start/stop
//! requests, delayed continuations and the result to persist. The runtime
//! carries them out and feeds timers back in. Each delayed continuation
//! carries a token; a continuation whose token is no longer current is
//! ignored, so a late timer can never act on a newer round.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::config::SessionSettings;
use crate::game_engine::countdown::{Countdown, TickOutcome};
use crate::game_engine::generator::resolve_game_type;
use crate::game_engine::models::{EvaluationResult, GameResult, GameType, Question, ViewState};
use crate::game_engine::performance;
use crate::game_engine::strategies::{GameStrategy, QuestionStrategy};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unknown tags resolve to CALCULATION, as in [`SessionConfig::new`].
    #[serde(deserialize_with = "game_type_or_fallback")]
    pub game_type: GameType,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// `None` uses the game's default round count.
    #[serde(default)]
    pub target_rounds: Option<u32>,
    /// Flash time override; `None` uses the configured default.
    #[serde(default)]
    pub flash_duration_ms: Option<u64>,
    /// Practice sessions are scored but never persisted.
    #[serde(default)]
    pub practice: bool,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn game_type_or_fallback<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GameType, D::Error> {
    let tag = String::deserialize(deserializer)?;
    Ok(resolve_game_type(&tag))
}

fn default_difficulty() -> String {
    "MEDIUM".to_string()
}

impl SessionConfig {
    /// Unknown tags resolve to CALCULATION.
    pub fn new(game_tag: &str) -> SessionConfig {
        SessionConfig {
            game_type: resolve_game_type(game_tag),
            difficulty: default_difficulty(),
            target_rounds: None,
            flash_duration_ms: None,
            practice: false,
            rng_seed: None,
        }
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn rounds(mut self, rounds: u32) -> Self {
        self.target_rounds = Some(rounds);
        self
    }

    pub fn flash_duration(mut self, flash: Duration) -> Self {
        self.flash_duration_ms = Some(flash.as_millis() as u64);
        self
    }

    pub fn practice(mut self, practice: bool) -> Self {
        self.practice = practice;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// Pacing the controller schedules with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    pub answer_feedback: Duration,
    pub daily_test_flash: Duration,
    pub memory_flash: Duration,
    pub poker_flash: Duration,
}

impl From<&SessionSettings> for SessionTimings {
    fn from(s: &SessionSettings) -> Self {
        SessionTimings {
            answer_feedback: s.answer_feedback(),
            daily_test_flash: s.daily_test_flash(),
            memory_flash: s.memory_flash(),
            poker_flash: s.poker_flash(),
        }
    }
}

impl Default for SessionTimings {
    fn default() -> Self {
        SessionTimings::from(&SessionSettings::default())
    }
}

// ---------------------------------------------------------------------------
// Events and directives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    /// Waiting for the player to acknowledge a new game type.
    Intro,
    Flashing,
    Input,
    /// Answer shown; next round is scheduled.
    Feedback,
    /// Poker only: answer shown, waiting for an explicit continue.
    AwaitingContinue,
    Finished,
}

/// 1-based round number out of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundProgress {
    pub current: u32,
    pub total: u32,
}

impl fmt::Display for RoundProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub game_type: GameType,
    pub score: u32,
    pub total_rounds: u32,
    pub elapsed_seconds: u32,
    pub timed_out: bool,
    pub practice: bool,
    pub evaluation: EvaluationResult,
}

/// What the presentation layer is told.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Intro {
        game_type: GameType,
        progress: RoundProgress,
    },
    Question {
        question: Question,
        view: ViewState,
        progress: RoundProgress,
        /// Flash time (per reveal step for poker); `None` without a flash phase.
        flash_duration_ms: Option<u64>,
    },
    ViewChanged {
        view: ViewState,
    },
    TimeLeft {
        seconds: u64,
    },
    AnswerResult {
        correct: bool,
        answer: String,
    },
    Finished(SessionOutcome),
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Emit(SessionEvent),
    /// (Re)start the countdown timer; ticks must carry `token`.
    StartCountdown { token: u64, remaining: Duration },
    CancelCountdown,
    /// Call [`SessionController::on_flash_elapsed`] after `delay`.
    RevealInputAfter { token: u64, delay: Duration },
    /// Call [`SessionController::on_advance_due`] after `delay`.
    AdvanceAfter { token: u64, delay: Duration },
    Persist(GameResult),
}

/// Continuation that came due while paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    RevealInput,
    Advance,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct SessionController {
    config: SessionConfig,
    timings: SessionTimings,
    strategy: GameStrategy,
    rng: StdRng,

    phase: Phase,
    paused: bool,
    score: u32,
    /// Completed rounds.
    round: u32,
    target_rounds: u32,
    countdown: Countdown,
    last_game_type: Option<GameType>,
    question: Option<Question>,
    continuation: u64,
    deferred: Option<Deferred>,
    started_at: Option<DateTime<Utc>>,
    outcome: Option<SessionOutcome>,
}

impl SessionController {
    pub fn new(config: SessionConfig, timings: SessionTimings) -> SessionController {
        let strategy = GameStrategy::new(config.game_type);
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let countdown = Countdown::new(Duration::from_secs(strategy.duration_seconds() as u64));
        SessionController {
            config,
            timings,
            strategy,
            rng,
            phase: Phase::NotStarted,
            paused: false,
            score: 0,
            round: 0,
            target_rounds: 0,
            countdown,
            last_game_type: None,
            question: None,
            continuation: 0,
            deferred: None,
            started_at: None,
            outcome: None,
        }
    }

    // ---- accessors ---------------------------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn completed_rounds(&self) -> u32 {
        self.round
    }

    pub fn target_rounds(&self) -> u32 {
        self.target_rounds
    }

    pub fn remaining_time(&self) -> Duration {
        self.countdown.remaining()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Set once, by the first finalize.
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    // ---- commands ----------------------------------------------------------

    /// Begin the session. A second call does nothing.
    pub fn start(&mut self, now: DateTime<Utc>) -> Vec<Directive> {
        if self.phase != Phase::NotStarted {
            return Vec::new();
        }
        let requested = self.config.target_rounds.unwrap_or_else(|| self.strategy.target_question_count());
        let available = self.strategy.max_questions(&self.config.difficulty);
        self.target_rounds = requested.min(available).max(1);

        self.score = 0;
        self.round = 0;
        self.paused = false;
        self.countdown = Countdown::new(Duration::from_secs(self.strategy.duration_seconds() as u64));
        self.started_at = Some(now);

        info!(
            target: "session",
            game = %self.config.game_type.tag(),
            difficulty = %self.config.difficulty,
            rounds = self.target_rounds,
            practice = self.config.practice,
            "session started"
        );

        let mut out = Vec::new();
        self.begin_round(&mut out);
        out
    }

    pub fn acknowledge_intro(&mut self) -> Vec<Directive> {
        if self.phase != Phase::Intro {
            return Vec::new();
        }
        // Acknowledging also lifts a pause taken during the intro.
        self.paused = false;
        let mut out = Vec::new();
        self.present_question(&mut out);
        out
    }

    /// Ignored unless a question is waiting for input and the session is
    /// not paused.
    pub fn submit_answer(&mut self, input: &str) -> Vec<Directive> {
        if self.phase != Phase::Input || self.paused {
            return Vec::new();
        }
        let Some(question) = &self.question else {
            return Vec::new();
        };
        let correct = self.strategy.check_answer(question, input);
        let answer = question.answer.clone();
        if correct {
            self.score += 1;
        }
        debug!(target: "session", round = self.round + 1, correct, "answer submitted");

        let mut out = vec![Directive::Emit(SessionEvent::AnswerResult { correct, answer })];
        if self.config.game_type == GameType::PokerHand {
            self.phase = Phase::AwaitingContinue;
            self.sync_countdown(&mut out);
        } else {
            self.phase = Phase::Feedback;
            let token = self.next_continuation();
            out.push(Directive::AdvanceAfter { token, delay: self.timings.answer_feedback });
        }
        out
    }

    /// Poker only: leave the answered deal and move on.
    pub fn continue_round(&mut self, now: DateTime<Utc>) -> Vec<Directive> {
        if self.phase != Phase::AwaitingContinue {
            return Vec::new();
        }
        self.paused = false;
        let mut out = Vec::new();
        self.advance(now, &mut out);
        out
    }

    pub fn set_paused(&mut self, paused: bool, now: DateTime<Utc>) -> Vec<Directive> {
        if matches!(self.phase, Phase::NotStarted | Phase::Finished) || self.paused == paused {
            return Vec::new();
        }
        self.paused = paused;
        debug!(target: "session", paused, "pause toggled");

        let mut out = Vec::new();
        if !paused {
            match self.deferred.take() {
                Some(Deferred::RevealInput) if self.phase == Phase::Flashing => self.reveal_input(&mut out),
                Some(Deferred::Advance) if self.phase == Phase::Feedback => self.advance(now, &mut out),
                _ => {}
            }
        }
        self.sync_countdown(&mut out);
        out
    }

    /// Abandon without a result.
    pub fn quit(&mut self) -> Vec<Directive> {
        if self.phase == Phase::Finished {
            return Vec::new();
        }
        info!(target: "session", completed = self.round, score = self.score, "session abandoned");
        let mut out = Vec::new();
        if self.countdown.pause() {
            out.push(Directive::CancelCountdown);
        }
        self.phase = Phase::Finished;
        self.question = None;
        self.deferred = None;
        out
    }

    // ---- timer callbacks ---------------------------------------------------

    pub fn on_flash_elapsed(&mut self, token: u64) -> Vec<Directive> {
        if self.phase != Phase::Flashing || token != self.continuation {
            return Vec::new();
        }
        let mut out = Vec::new();
        if self.paused {
            self.deferred = Some(Deferred::RevealInput);
        } else {
            self.reveal_input(&mut out);
        }
        out
    }

    pub fn on_advance_due(&mut self, token: u64, now: DateTime<Utc>) -> Vec<Directive> {
        if self.phase != Phase::Feedback || token != self.continuation {
            return Vec::new();
        }
        let mut out = Vec::new();
        if self.paused {
            self.deferred = Some(Deferred::Advance);
        } else {
            self.advance(now, &mut out);
        }
        out
    }

    pub fn on_tick(&mut self, token: u64, remaining: Duration, now: DateTime<Utc>) -> Vec<Directive> {
        match self.countdown.tick(token, remaining) {
            TickOutcome::Stale => Vec::new(),
            TickOutcome::Running(left) => {
                vec![Directive::Emit(SessionEvent::TimeLeft { seconds: left.as_secs() })]
            }
            TickOutcome::Expired => {
                let mut out = vec![Directive::Emit(SessionEvent::TimeLeft { seconds: 0 })];
                self.finalize_into(true, now, &mut out);
                out
            }
        }
    }

    /// Score the session. Only the first call has any effect.
    pub fn finalize(&mut self, timed_out: bool, now: DateTime<Utc>) -> Vec<Directive> {
        let mut out = Vec::new();
        self.finalize_into(timed_out, now, &mut out);
        out
    }

    // ---- internals ---------------------------------------------------------

    fn progress(&self) -> RoundProgress {
        RoundProgress { current: self.round + 1, total: self.target_rounds }
    }

    fn next_continuation(&mut self) -> u64 {
        self.continuation += 1;
        self.continuation
    }

    fn flash_duration(&self) -> Duration {
        if self.config.game_type == GameType::DailyTest {
            return self.timings.daily_test_flash;
        }
        let default = match self.config.game_type {
            GameType::PokerHand => self.timings.poker_flash,
            _ => self.timings.memory_flash,
        };
        self.config.flash_duration_ms.map(Duration::from_millis).unwrap_or(default)
    }

    /// The clock runs while a round is on screen and the player is not paused.
    fn sync_countdown(&mut self, out: &mut Vec<Directive>) {
        let wants = !self.paused
            && matches!(self.phase, Phase::Flashing | Phase::Input | Phase::Feedback);
        if wants {
            if let Some(ticket) = self.countdown.start() {
                out.push(Directive::StartCountdown { token: ticket.token, remaining: ticket.remaining });
            }
        } else if self.countdown.pause() {
            out.push(Directive::CancelCountdown);
        }
    }

    fn begin_round(&mut self, out: &mut Vec<Directive>) {
        let game_type = self.strategy.current_game_type();
        if self.last_game_type != Some(game_type) {
            self.last_game_type = Some(game_type);
            self.phase = Phase::Intro;
            self.question = None;
            self.sync_countdown(out);
            debug!(target: "session", game = %game_type.tag(), "intro");
            out.push(Directive::Emit(SessionEvent::Intro { game_type, progress: self.progress() }));
            return;
        }
        self.present_question(out);
    }

    fn present_question(&mut self, out: &mut Vec<Directive>) {
        let mut question = self.strategy.generate_question(&mut self.rng, &self.config.difficulty);
        question.sort_options();
        let progress = self.progress();
        debug!(target: "session", id = %question.id, %progress, "question");

        let flash = self.flash_duration();
        let (view, flash_duration_ms) = if self.config.game_type == GameType::PokerHand {
            // The renderer reveals the streets itself; input is open at once.
            (ViewState::Input, Some(flash.as_millis() as u64))
        } else if question.has_flash() {
            (ViewState::Flashing, Some(flash.as_millis() as u64))
        } else {
            (ViewState::Input, None)
        };

        self.phase = match view {
            ViewState::Flashing => Phase::Flashing,
            ViewState::Input    => Phase::Input,
        };
        out.push(Directive::Emit(SessionEvent::Question {
            question: question.clone(),
            view,
            progress,
            flash_duration_ms,
        }));
        if view == ViewState::Flashing {
            let token = self.next_continuation();
            out.push(Directive::RevealInputAfter { token, delay: flash });
        }
        self.question = Some(question);
        self.sync_countdown(out);
    }

    fn reveal_input(&mut self, out: &mut Vec<Directive>) {
        self.phase = Phase::Input;
        out.push(Directive::Emit(SessionEvent::ViewChanged { view: ViewState::Input }));
    }

    fn advance(&mut self, now: DateTime<Utc>, out: &mut Vec<Directive>) {
        self.round += 1;
        if self.round >= self.target_rounds {
            self.finalize_into(false, now, out);
        } else {
            self.begin_round(out);
        }
    }

    fn finalize_into(&mut self, timed_out: bool, now: DateTime<Utc>, out: &mut Vec<Directive>) {
        if self.phase == Phase::Finished {
            return;
        }
        if self.countdown.pause() {
            out.push(Directive::CancelCountdown);
        }
        self.phase = Phase::Finished;
        self.question = None;
        self.deferred = None;

        let elapsed_seconds = self
            .started_at
            .map(|start| (now - start).num_seconds().max(0) as u32)
            .unwrap_or(0);
        let evaluation = performance::evaluate(self.score, self.target_rounds, elapsed_seconds);
        let outcome = SessionOutcome {
            game_type: self.config.game_type,
            score: self.score,
            total_rounds: self.target_rounds,
            elapsed_seconds,
            timed_out,
            practice: self.config.practice,
            evaluation,
        };
        info!(
            target: "session",
            game = %outcome.game_type.tag(),
            score = outcome.score,
            total = outcome.total_rounds,
            elapsed_seconds,
            timed_out,
            grade = %evaluation.grade,
            brain_age = evaluation.brain_age,
            "session finished"
        );

        out.push(Directive::Emit(SessionEvent::Finished(outcome.clone())));
        if !self.config.practice && !evaluation.is_degenerate() {
            out.push(Directive::Persist(GameResult {
                date: now,
                game_type: self.config.game_type,
                score: self.score,
                duration_seconds: elapsed_seconds,
                grade: evaluation.grade,
                brain_age: Some(evaluation.brain_age),
            }));
        }
        self.outcome = Some(outcome);
    }
}
