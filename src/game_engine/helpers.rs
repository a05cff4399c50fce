//! Shared builder functions used by the question strategies.
//!
//! Every strategy assembles the same pieces: an id, an answer, a handful of
//! distinct distractors, and a shuffled option list. These helpers centralise
//! that work so strategy files only hold the game logic.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::game_engine::models::GameType;

/// Options shown for a multiple-choice question, answer included.
pub const OPTION_COUNT: usize = 4;

/// Upper bound on candidate draws when filling distractors.
pub const MAX_FILL_ATTEMPTS: usize = 1000;

/// Question id in the `PREFIX-1F2E3D4C` form.
pub fn question_id(rng: &mut dyn RngCore, game_type: GameType) -> String {
    format!("{}-{:08X}", game_type.id_prefix(), rng.next_u32())
}

/// Build `answer` plus up to `OPTION_COUNT - 1` distinct distractors drawn
/// from `candidate`, then shuffle.
///
/// `candidate` returns `None` for draws it rejects outright. After
/// [`MAX_FILL_ATTEMPTS`] draws the list is topped up from `fallback`, which
/// yields values in a deterministic order; whatever is still short stays
/// short rather than looping forever.
pub fn fill_options<F, I>(
    rng: &mut dyn RngCore,
    answer: String,
    mut candidate: F,
    fallback: I,
) -> Vec<String>
where
    F: FnMut(&mut dyn RngCore) -> Option<String>,
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(answer.clone());
    let mut options = vec![answer];

    let mut attempts = 0;
    while options.len() < OPTION_COUNT && attempts < MAX_FILL_ATTEMPTS {
        attempts += 1;
        if let Some(c) = candidate(&mut *rng) {
            if seen.insert(c.clone()) {
                options.push(c);
            }
        }
    }

    for c in fallback {
        if options.len() >= OPTION_COUNT {
            break;
        }
        if seen.insert(c.clone()) {
            options.push(c);
        }
    }

    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn question_ids_carry_the_game_prefix() {
        let mut rng = StdRng::seed_from_u64(1);
        let id = question_id(&mut rng, GameType::FlagQuiz);
        assert!(id.starts_with("FQ-"));
        assert_eq!(id.len(), 11);
        assert!(id[3..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fill_produces_distinct_options_with_the_answer_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = fill_options(
            &mut rng,
            "5".to_string(),
            |r| Some(r.gen_range(0..10).to_string()),
            std::iter::empty(),
        );
        assert_eq!(options.len(), OPTION_COUNT);
        assert_eq!(options.iter().filter(|o| *o == "5").count(), 1);
        let unique: HashSet<_> = options.iter().collect();
        assert_eq!(unique.len(), OPTION_COUNT);
    }

    #[test]
    fn exhausted_generator_falls_back() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = fill_options(
            &mut rng,
            "1".to_string(),
            |_| Some("1".to_string()),
            (2..10).map(|n| n.to_string()),
        );
        let mut sorted = options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["1", "2", "3", "4"]);
    }
}
