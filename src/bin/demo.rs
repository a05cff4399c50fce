//! Tour of the engine.
//!
//! Run with: `cargo run --bin demo`
//!
//! 1. **One question per game** with fixed seeds, so the output is
//!    reproducible. Flash content and map images are shown the way the
//!    view adapter hands them to a renderer.
//! 2. **A short practice session** driven through the async runtime, with a
//!    bot that answers every question correctly. Practice results are never
//!    stored, so the store stays empty.
//!
//! `LOG_LEVEL=debug` shows the session log; `BRAIN_TRAINER_CONFIG` points
//! at an optional TOML file with session pacing.

use std::sync::Arc;

use brain_trainer::telemetry::init_tracing;
use brain_trainer::view_adapter::{event_payload, flash_payload};
use brain_trainer::{
    generate_question, spawn_session, EngineConfig, GameType, InMemoryResultStore,
    QuestionRequest, ResultRecorder, ResultStore, SessionConfig, SessionController, SessionError,
    SessionEvent, SessionTimings,
};

fn difficulty_for(game: GameType) -> &'static str {
    match game {
        GameType::FlagQuiz | GameType::MapQuiz => "EUROPE|EASY",
        GameType::Multiplication => "TABLE_7",
        _ => "MEDIUM",
    }
}

fn print_question(game: GameType, seed: u64) {
    let q = generate_question(&QuestionRequest {
        game_type: game.tag().to_string(),
        difficulty: difficulty_for(game).to_string(),
        rng_seed: Some(seed),
    });
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{game}]  ID: {}  Difficulty: {}", q.id, difficulty_for(game));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if q.has_flash() {
        println!("  Flash: {}", flash_payload(&q));
    }
    if let Some(image) = &q.image_res {
        println!("  Image: {image}");
    }
    if !q.prompt.is_empty() {
        println!("  Q: {}", q.prompt);
    }
    for option in &q.options {
        let marker = if *option == q.answer { "✓" } else { " " };
        println!("   {marker} {option}");
    }
    println!();
}

async fn practice_run(config: &EngineConfig) -> Result<(), SessionError> {
    let store = Arc::new(InMemoryResultStore::new());
    let recorder = Arc::new(ResultRecorder::new(store.clone()));
    let session = SessionConfig::new("NUMBER_MEMORY").difficulty("EASY").rounds(3).practice(true).seed(7);
    let controller = SessionController::new(session, SessionTimings::from(&config.session));
    let mut handle = spawn_session(controller, Some(recorder));

    handle.start()?;
    let mut pending: Option<String> = None;
    while let Some(event) = handle.next_event().await {
        println!("  {}", event_payload(&event));
        match &event {
            SessionEvent::Intro { .. } => handle.acknowledge_intro()?,
            SessionEvent::Question { question, .. } => {
                // Answers sent during the flash are ignored; hold on to it.
                pending = Some(question.answer.clone());
            }
            SessionEvent::ViewChanged { .. } => {
                if let Some(answer) = pending.take() {
                    handle.answer(answer)?;
                }
            }
            SessionEvent::Finished(_) => break,
            _ => {}
        }
    }
    let outcome = handle.join().await?;
    if let Some(outcome) = outcome {
        println!();
        println!(
            "  Score {}/{}  Grade {}  Brain age {}",
            outcome.score, outcome.total_rounds, outcome.evaluation.grade, outcome.evaluation.brain_age
        );
    }
    let stored = store.recent_results(None, 10).await.map(|r| r.len()).unwrap_or(0);
    println!("  Stored results: {stored}");
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let config = EngineConfig::load_from_env();

    println!();
    println!("══ One question per game ══");
    println!();
    for (i, game) in GameType::ALL.into_iter().enumerate() {
        print_question(game, 100 + i as u64);
    }

    println!("══ Practice session: NUMBER_MEMORY, 3 rounds ══");
    println!();
    if let Err(e) = practice_run(&config).await {
        eprintln!("session failed: {e}");
    }
}
