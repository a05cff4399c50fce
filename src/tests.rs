//! Crate-level tests for `brain_trainer`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → identical question for every game; entropy smoke test |
//! | Options | Answer present exactly once; only the answer checks true; ids carry the game prefix |
//! | Geography | No repeated country until the region's pool is used up |
//! | Daily test | Eight games, four questions each, in order |
//! | Evaluation | Grade / brain-age reference points |
//! | Sessions | Round clamping; serialized event shape |

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game_engine::catalog::{self, Continent};
use crate::game_engine::difficulty::Region;
use crate::game_engine::strategies::daily_test::{DAILY_GAMES, QUESTIONS_PER_GAME};
use crate::game_engine::strategies::{GameStrategy, QuestionStrategy};
use crate::game_engine::evaluate;
use crate::{
    generate_question, Directive, GameType, Grade, QuestionRequest, SessionConfig,
    SessionController, SessionEvent, SessionTimings,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn req(game: GameType, difficulty: &str, seed: u64) -> QuestionRequest {
    QuestionRequest {
        game_type: game.tag().to_string(),
        difficulty: difficulty.to_string(),
        rng_seed: Some(seed),
    }
}

/// A difficulty string each game understands.
fn difficulty_for(game: GameType) -> &'static str {
    match game {
        GameType::FlagQuiz | GameType::MapQuiz => "WORLD|MEDIUM",
        _ => "MEDIUM",
    }
}

/// Five seeds that span different RNG states.
const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_question() {
    for game in GameType::ALL {
        let a = generate_question(&req(game, difficulty_for(game), 12345));
        let b = generate_question(&req(game, difficulty_for(game), 12345));
        assert_eq!(a, b, "question mismatch for {game:?}");
    }
}

#[test]
fn entropy_seed_produces_a_valid_question() {
    for game in GameType::ALL {
        let q = generate_question(&QuestionRequest {
            game_type: game.tag().to_string(),
            difficulty: difficulty_for(game).to_string(),
            rng_seed: None,
        });
        assert!(q.options.contains(&q.answer), "{game:?}");
    }
}

// ── option invariants ────────────────────────────────────────────────────────

#[test]
fn answer_appears_exactly_once_and_alone_checks_true() {
    for game in GameType::ALL {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut strategy = GameStrategy::new(game);
            for _ in 0..5 {
                let q = strategy.generate_question(&mut rng, difficulty_for(game));
                let hits = q.options.iter().filter(|o| **o == q.answer).count();
                assert_eq!(hits, 1, "{game:?} seed={seed}: {:?} / {}", q.options, q.answer);
                assert!(q.options.len() >= 2, "{game:?} seed={seed}: too few options");
                for o in &q.options {
                    assert_eq!(strategy.check_answer(&q, o), *o == q.answer, "{game:?} option {o}");
                }
            }
        }
    }
}

#[test]
fn question_ids_carry_the_game_prefix() {
    for game in GameType::ALL {
        let q = generate_question(&req(game, difficulty_for(game), 3));
        let (prefix, hex) = q.id.split_once('-').expect("id has a dash");
        // Daily test questions come from the sub-game.
        if game != GameType::DailyTest {
            assert_eq!(prefix, game.id_prefix(), "{game:?}");
        }
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn flash_games_have_flash_items() {
    for game in [GameType::NumberMemory, GameType::VisualCount, GameType::PokerHand] {
        for seed in SEEDS {
            let q = generate_question(&req(game, difficulty_for(game), seed));
            assert!(q.has_flash(), "{game:?} seed={seed}");
        }
    }
    let q = generate_question(&req(GameType::Calculation, "EASY", 1));
    assert!(!q.has_flash());
}

// ── geography ────────────────────────────────────────────────────────────────

#[test]
fn flag_quiz_does_not_repeat_until_the_region_is_used_up() {
    let europe = Some(Region::Continent(Continent::Europe));
    let pool = catalog::countries_in(europe).count();
    assert!(pool > 10);

    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut strategy = GameStrategy::new(GameType::FlagQuiz);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..pool {
            let q = strategy.generate_question(&mut rng, "EUROPE|HARD");
            assert!(seen.insert(q.answer.clone()), "seed={seed}: {} repeated early", q.answer);
        }
    }
}

#[test]
fn map_quiz_images_exist_for_every_answer() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut strategy = GameStrategy::new(GameType::MapQuiz);
    for _ in 0..30 {
        let q = strategy.generate_question(&mut rng, "WORLD|EASY");
        let image = q.image_res.as_deref().expect("map question has an image");
        assert!(image.starts_with("map_") || image == catalog::FALLBACK_MAP_ASSET);
        assert!(q.prompt.is_empty());
    }
}

// ── daily test ───────────────────────────────────────────────────────────────

#[test]
fn daily_test_walks_each_game_in_blocks_of_four() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut strategy = GameStrategy::new(GameType::DailyTest);
    let mut order = Vec::new();
    for _ in 0..DAILY_GAMES.len() * QUESTIONS_PER_GAME {
        let game = strategy.current_game_type();
        let q = strategy.generate_question(&mut rng, "MEDIUM");
        assert!(q.id.starts_with(game.id_prefix()), "{} from {game:?}", q.id);
        order.push(game);
    }
    let expected: Vec<GameType> = DAILY_GAMES
        .iter()
        .flat_map(|g| std::iter::repeat(*g).take(QUESTIONS_PER_GAME))
        .collect();
    assert_eq!(order, expected);
}

// ── evaluation ───────────────────────────────────────────────────────────────

#[test]
fn evaluation_reference_points() {
    let cases = [
        ((10, 10, 10), Grade::APlus, 20),
        ((0, 10, 100), Grade::E, 80),
        ((5, 10, 5), Grade::D, 35),
    ];
    for ((correct, total, elapsed), grade, age) in cases {
        let r = evaluate(correct, total, elapsed);
        assert_eq!(r.grade, grade, "({correct},{total},{elapsed})");
        assert_eq!(r.brain_age, age, "({correct},{total},{elapsed})");
    }
    assert!(evaluate(0, 0, 0).is_degenerate());
}

// ── sessions ─────────────────────────────────────────────────────────────────

#[test]
fn rounds_are_clamped_to_what_the_game_can_produce() {
    let config = SessionConfig::new("MAP_QUIZ").difficulty("OCEANIA|EASY").rounds(500).seed(4);
    let available = GameStrategy::new(GameType::MapQuiz).max_questions("OCEANIA|EASY");
    let mut c = SessionController::new(config, SessionTimings::default());
    c.start(chrono::Utc::now());
    assert_eq!(c.target_rounds(), available.min(500));
    assert!(c.target_rounds() >= 1);
}

#[test]
fn events_serialize_with_an_event_tag() {
    let mut c = SessionController::new(SessionConfig::new("CALCULATION").seed(1), SessionTimings::default());
    let directives = c.start(chrono::Utc::now());
    let intro = directives
        .iter()
        .find_map(|d| match d {
            Directive::Emit(e @ SessionEvent::Intro { .. }) => Some(e.clone()),
            _ => None,
        })
        .expect("start emits an intro");
    let v = serde_json::to_value(&intro).unwrap();
    assert_eq!(v["event"], "intro");
    assert_eq!(v["game_type"], "CALCULATION");
    assert_eq!(v["progress"]["current"], 1);
    assert_eq!(v["progress"]["total"], 10);
}
