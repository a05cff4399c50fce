//! Async driver for a [`SessionController`].
//!
//! [`spawn_session`] moves the controller into a tokio task. Player commands
//! arrive over one channel, timer callbacks over another, and events go back
//! out through the [`SessionHandle`]. The countdown runs as its own task and
//! is aborted whenever the controller stops or restarts it.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, Instrument};

use crate::error::SessionError;
use crate::game_engine::countdown::TICK;
use crate::game_engine::persistence::ResultRecorder;
use crate::game_engine::session::{Directive, SessionController, SessionEvent, SessionOutcome};

/// Player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    AcknowledgeIntro,
    SubmitAnswer(String),
    /// Poker: move past an answered deal.
    Continue,
    SetPaused(bool),
    Quit,
}

#[derive(Debug)]
enum TimerEvent {
    Tick { token: u64, remaining: Duration },
    FlashElapsed(u64),
    AdvanceDue(u64),
}

pub struct SessionHandle {
    commands: UnboundedSender<SessionCommand>,
    events: UnboundedReceiver<SessionEvent>,
    task: JoinHandle<Option<SessionOutcome>>,
}

impl SessionHandle {
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }

    pub fn start(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Start)
    }

    pub fn acknowledge_intro(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::AcknowledgeIntro)
    }

    pub fn answer(&self, input: impl Into<String>) -> Result<(), SessionError> {
        self.send(SessionCommand::SubmitAnswer(input.into()))
    }

    pub fn continue_round(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Continue)
    }

    pub fn set_paused(&self, paused: bool) -> Result<(), SessionError> {
        self.send(SessionCommand::SetPaused(paused))
    }

    pub fn quit(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Quit)
    }

    /// Next event; `None` once the session task has ended and the backlog is
    /// drained.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the session task. `None` when the session was quit.
    pub async fn join(self) -> Result<Option<SessionOutcome>, SessionError> {
        Ok(self.task.await?)
    }
}

/// Run `controller` on the current tokio runtime. Dropping every command
/// sender (including the handle) quits the session.
pub fn spawn_session(controller: SessionController, recorder: Option<Arc<ResultRecorder>>) -> SessionHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (timer_tx, timer_rx) = mpsc::unbounded_channel();

    let actor = SessionActor {
        controller,
        recorder,
        events: event_tx,
        timers: timer_tx,
        countdown: None,
    };
    let span = info_span!("session", game = %actor.controller.config().game_type.tag());
    let task = tokio::spawn(actor.run(command_rx, timer_rx).instrument(span));

    SessionHandle { commands: command_tx, events: event_rx, task }
}

struct SessionActor {
    controller: SessionController,
    recorder: Option<Arc<ResultRecorder>>,
    events: UnboundedSender<SessionEvent>,
    timers: UnboundedSender<TimerEvent>,
    countdown: Option<JoinHandle<()>>,
}

impl SessionActor {
    async fn run(
        mut self,
        mut commands: UnboundedReceiver<SessionCommand>,
        mut timers: UnboundedReceiver<TimerEvent>,
    ) -> Option<SessionOutcome> {
        loop {
            let directives = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.on_command(command),
                    None => {
                        debug!(target: "session", "command channel closed");
                        self.controller.quit()
                    }
                },
                Some(timer) = timers.recv() => self.on_timer(timer),
            };
            self.apply(directives);
            if self.controller.is_finished() {
                break;
            }
        }
        self.cancel_countdown();
        info!(target: "session", score = self.controller.score(), "session task ended");
        self.controller.outcome().cloned()
    }

    fn on_command(&mut self, command: SessionCommand) -> Vec<Directive> {
        let now = Utc::now();
        match command {
            SessionCommand::Start => self.controller.start(now),
            SessionCommand::AcknowledgeIntro => self.controller.acknowledge_intro(),
            SessionCommand::SubmitAnswer(input) => self.controller.submit_answer(&input),
            SessionCommand::Continue => self.controller.continue_round(now),
            SessionCommand::SetPaused(paused) => self.controller.set_paused(paused, now),
            SessionCommand::Quit => self.controller.quit(),
        }
    }

    fn on_timer(&mut self, timer: TimerEvent) -> Vec<Directive> {
        let now = Utc::now();
        match timer {
            TimerEvent::Tick { token, remaining } => self.controller.on_tick(token, remaining, now),
            TimerEvent::FlashElapsed(token) => self.controller.on_flash_elapsed(token),
            TimerEvent::AdvanceDue(token) => self.controller.on_advance_due(token, now),
        }
    }

    fn apply(&mut self, directives: Vec<Directive>) {
        for directive in directives {
            match directive {
                Directive::Emit(event) => {
                    // Nobody listening is fine; the session still runs to its end.
                    let _ = self.events.send(event);
                }
                Directive::StartCountdown { token, remaining } => {
                    self.cancel_countdown();
                    self.countdown = Some(spawn_countdown(self.timers.clone(), token, remaining));
                }
                Directive::CancelCountdown => self.cancel_countdown(),
                Directive::RevealInputAfter { token, delay } => {
                    self.schedule(delay, TimerEvent::FlashElapsed(token));
                }
                Directive::AdvanceAfter { token, delay } => {
                    self.schedule(delay, TimerEvent::AdvanceDue(token));
                }
                Directive::Persist(result) => match &self.recorder {
                    Some(recorder) => {
                        let recorder = Arc::clone(recorder);
                        tokio::spawn(async move {
                            recorder.record(result).await;
                        });
                    }
                    None => debug!(target: "persistence", "no recorder attached, result dropped"),
                },
            }
        }
    }

    fn schedule(&self, delay: Duration, timer: TimerEvent) {
        let timers = self.timers.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = timers.send(timer);
        });
    }

    fn cancel_countdown(&mut self) {
        if let Some(task) = self.countdown.take() {
            task.abort();
        }
    }
}

fn spawn_countdown(timers: UnboundedSender<TimerEvent>, token: u64, remaining: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut left = remaining;
        while !left.is_zero() {
            let step = left.min(TICK);
            tokio::time::sleep(step).await;
            left -= step;
            if timers.send(TimerEvent::Tick { token, remaining: left }).is_err() {
                break;
            }
        }
    })
}
