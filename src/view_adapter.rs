use serde_json::{json, Value};

use crate::game_engine::catalog;
use crate::game_engine::models::{Card, Question};
use crate::game_engine::session::{SessionEvent, SessionOutcome};
use crate::game_engine::strategies::poker::PokerDeal;
use crate::game_engine::strategies::visual_count::VisualCountConfig;

/// Card string for the renderer: rank 10 is spelled out ("10S"), the rest use
/// the two-character notation ("AS", "9D").
fn to_client_card(c: &Card) -> String {
    if c.rank.0 == 10 {
        format!("10{}", c.suit)
    } else {
        c.to_string()
    }
}

fn card_entry(id: usize, c: &Card, winning: &[usize]) -> Value {
    json!({ "id": id, "card": to_client_card(c), "isCombination": winning.contains(&id) })
}

/// Street-by-street reveal for a poker deal. Card ids count hole cards first.
fn poker_flash(deal: &PokerDeal) -> Value {
    let win = &deal.winning_indices;
    let hole: Vec<Value> = deal.hole.iter().enumerate().map(|(i, c)| card_entry(i, c, win)).collect();
    let board: Vec<Value> = deal
        .board
        .iter()
        .enumerate()
        .map(|(i, c)| card_entry(i + 2, c, win))
        .collect();
    json!({
        "kind": "poker",
        "hole_cards": hole,
        "streets": {
            "flop":  board[..3].to_vec(),
            "turn":  board[3].clone(),
            "river": board[4].clone()
        },
        "winning_indices": win
    })
}

/// Structured form of a question's flash items, or `null` without a flash
/// phase. Unrecognised items are passed through as plain strings.
pub fn flash_payload(question: &Question) -> Value {
    if !question.has_flash() {
        return Value::Null;
    }
    if let Some(deal) = PokerDeal::parse(&question.flash_items) {
        return poker_flash(&deal);
    }
    if let [item] = question.flash_items.as_slice() {
        if let Some(cfg) = VisualCountConfig::parse(item) {
            return json!({ "kind": "visual_count", "targets": cfg.targets, "distractors": cfg.distractors });
        }
    }
    json!({ "kind": "items", "items": question.flash_items })
}

/// Question body without view state. Map questions also carry the asset
/// to fall back to when `image` cannot be loaded.
pub fn question_payload(question: &Question) -> Value {
    let mut body = json!({
        "id": question.id,
        "prompt": question.prompt,
        "options": question.options,
        "image": question.image_res,
        "flash": flash_payload(question)
    });
    if question.image_res.is_some() {
        body["image_fallback"] = json!(catalog::FALLBACK_MAP_ASSET);
    }
    body
}

fn outcome_payload(outcome: &SessionOutcome) -> Value {
    let eval = &outcome.evaluation;
    json!({
        "game_type": outcome.game_type.tag(),
        "game_name": outcome.game_type.to_string(),
        "score": outcome.score,
        "total": outcome.total_rounds,
        "elapsed_seconds": outcome.elapsed_seconds,
        "timed_out": outcome.timed_out,
        "practice": outcome.practice,
        "grade": eval.grade.as_str(),
        "feedback": eval.feedback,
        "brain_age": eval.brain_age
    })
}

/// Map a session event to the message the presentation layer consumes.
/// Every message has a `"type"` discriminator.
pub fn event_payload(event: &SessionEvent) -> Value {
    match event {
        SessionEvent::Intro { game_type, progress } => json!({
            "type": "intro",
            "game_type": game_type.tag(),
            "game_name": game_type.to_string(),
            "progress": progress.to_string()
        }),
        SessionEvent::Question { question, view, progress, flash_duration_ms } => json!({
            "type": "question",
            "question": question_payload(question),
            "view": view,
            "progress": progress.to_string(),
            "flash_duration_ms": flash_duration_ms
        }),
        SessionEvent::ViewChanged { view } => json!({ "type": "view", "view": view }),
        SessionEvent::TimeLeft { seconds } => json!({
            "type": "time_left",
            "seconds": seconds,
            "clock": format!("{}:{:02}", seconds / 60, seconds % 60)
        }),
        SessionEvent::AnswerResult { correct, answer } => json!({
            "type": "answer",
            "correct": correct,
            "answer": answer
        }),
        SessionEvent::Finished(outcome) => json!({
            "type": "finished",
            "outcome": outcome_payload(outcome)
        }),
    }
}
