use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game_engine::models::{GameType, Question};
use crate::game_engine::strategies::{GameStrategy, QuestionStrategy};

/// Resolve a game tag, falling back to CALCULATION for unknown tags.
pub fn resolve_game_type(tag: &str) -> GameType {
    GameType::from_tag(tag).unwrap_or_else(|| {
        warn!(target: "strategy", tag, "unknown game type, falling back to CALCULATION");
        GameType::Calculation
    })
}

/// Fresh strategy for a game tag.
pub fn strategy_for(tag: &str) -> GameStrategy {
    GameStrategy::new(resolve_game_type(tag))
}

/// One-off question request, outside of any session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub game_type: String,
    #[serde(default)]
    pub difficulty: String,
    /// Same seed, same question.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Core dispatch: build the strategy and draw a single question from it.
pub fn generate_question(request: &QuestionRequest) -> Question {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let mut strategy = strategy_for(&request.game_type);
    let mut question = strategy.generate_question(&mut rng, &request.difficulty);
    question.sort_options();
    question
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tag: &str, seed: u64) -> QuestionRequest {
        QuestionRequest { game_type: tag.into(), difficulty: "MEDIUM".into(), rng_seed: Some(seed) }
    }

    #[test]
    fn unknown_tag_falls_back_to_calculation() {
        assert_eq!(resolve_game_type("CHESS"), GameType::Calculation);
        assert_eq!(strategy_for("").game_type(), GameType::Calculation);
        assert!(generate_question(&request("CHESS", 1)).id.starts_with("CA-"));
    }

    #[test]
    fn seeded_requests_are_deterministic() {
        for g in GameType::ALL {
            let a = generate_question(&request(g.tag(), 42));
            let b = generate_question(&request(g.tag(), 42));
            assert_eq!(a, b, "{g}");
        }
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let req: QuestionRequest = serde_json::from_str(r#"{"game_type":"POKER_HAND"}"#).unwrap();
        assert_eq!(req.difficulty, "");
        assert_eq!(req.rng_seed, None);
        assert_eq!(generate_question(&req).flash_items.len(), 5);
    }
}
