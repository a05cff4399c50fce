//! POKER_HAND: name the best hand in a 7-card deal.
//!
//! The deal travels to the renderer as flash items in street order:
//!
//! | Item | Content | Example |
//! |------|---------|---------|
//! | 0 | hole cards | `"AS,KD"` |
//! | 1 | flop | `"QS,JS,TS"` |
//! | 2 | turn | `"2H"` |
//! | 3 | river | `"3D"` |
//! | 4 | winning card indices | `"WIN:0,2,3,4,5"` |
//!
//! Indices count hole cards first, then the board.

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

use crate::game_engine::deck::Deck;
use crate::game_engine::evaluator::{evaluate_hand, HandCategory, HandEvaluation};
use crate::game_engine::helpers::{fill_options, question_id};
use crate::game_engine::models::{Card, GameType, Question, Rank, Suit};
use crate::game_engine::strategies::QuestionStrategy;

const HOLE_CARDS: usize = 2;
const BOARD_CARDS: usize = 5;
/// Deals that ignore both hole cards are redealt this many times at most.
const MAX_DEALS: usize = 100;
const WIN_PREFIX: &str = "WIN:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokerDeal {
    pub hole: [Card; HOLE_CARDS],
    pub board: [Card; BOARD_CARDS],
    pub winning_indices: Vec<usize>,
}

impl PokerDeal {
    fn deal(rng: &mut dyn RngCore) -> Option<(PokerDeal, HandEvaluation)> {
        let mut deck = Deck::new_shuffled(rng);
        let hole = deck.deal_array::<HOLE_CARDS>()?;
        let board = deck.deal_array::<BOARD_CARDS>()?;
        Some(Self::evaluated(hole, board))
    }

    fn evaluated(hole: [Card; HOLE_CARDS], board: [Card; BOARD_CARDS]) -> (PokerDeal, HandEvaluation) {
        let eval = evaluate_hand(&Self::seven(&hole, &board));
        let deal = PokerDeal { hole, board, winning_indices: eval.winning_indices.clone() };
        (deal, eval)
    }

    /// Fixed royal flush, used only if no deal could be made.
    fn fallback() -> (PokerDeal, HandEvaluation) {
        let spade = |r: u8| Card { rank: Rank(r), suit: Suit::Spades };
        let hole = [spade(14), spade(13)];
        let board = [
            spade(12),
            spade(11),
            spade(10),
            Card { rank: Rank(2), suit: Suit::Hearts },
            Card { rank: Rank(3), suit: Suit::Diamonds },
        ];
        Self::evaluated(hole, board)
    }

    fn seven(hole: &[Card], board: &[Card]) -> Vec<Card> {
        hole.iter().chain(board).copied().collect()
    }

    pub fn cards(&self) -> Vec<Card> {
        Self::seven(&self.hole, &self.board)
    }

    pub fn encode(&self) -> Vec<String> {
        let join = |cards: &[Card]| cards.iter().map(Card::to_string).collect::<Vec<_>>().join(",");
        let indices = self.winning_indices.iter().map(usize::to_string).collect::<Vec<_>>().join(",");
        vec![
            join(&self.hole[..]),
            join(&self.board[..3]),
            self.board[3].to_string(),
            self.board[4].to_string(),
            format!("{WIN_PREFIX}{indices}"),
        ]
    }

    /// Inverse of [`encode`](Self::encode). `None` on any malformed item.
    pub fn parse(items: &[String]) -> Option<PokerDeal> {
        let [hole, flop, turn, river, win] = items else {
            return None;
        };
        let cards = |s: &str| -> Option<Vec<Card>> {
            s.split(',').map(|c| c.parse().ok()).collect()
        };
        let hole: [Card; HOLE_CARDS] = cards(hole.as_str())?.try_into().ok()?;
        let mut board = cards(flop.as_str())?;
        board.extend(cards(turn.as_str())?);
        board.extend(cards(river.as_str())?);
        let board: [Card; BOARD_CARDS] = board.try_into().ok()?;

        let indices = win.strip_prefix(WIN_PREFIX)?;
        let winning_indices = if indices.is_empty() {
            Vec::new()
        } else {
            indices
                .split(',')
                .map(|i| i.trim().parse::<usize>().ok().filter(|i| *i < HOLE_CARDS + BOARD_CARDS))
                .collect::<Option<Vec<usize>>>()?
        };
        Some(PokerDeal { hole, board, winning_indices })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PokerHandStrategy;

impl QuestionStrategy for PokerHandStrategy {
    fn game_type(&self) -> GameType {
        GameType::PokerHand
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, _difficulty: &str) -> Question {
        let id = question_id(rng, GameType::PokerHand);

        let mut dealt = None;
        for attempt in 1..=MAX_DEALS {
            let Some(next) = PokerDeal::deal(rng) else {
                break;
            };
            let uses_hole = next.1.uses_any_of_first(HOLE_CARDS);
            dealt = Some(next);
            if uses_hole {
                break;
            }
            if attempt == MAX_DEALS {
                debug!(target: "strategy", game = "POKER_HAND", "no deal used a hole card, accepting last");
            }
        }
        let (deal, eval) = dealt.unwrap_or_else(PokerDeal::fallback);

        let answer = eval.category.name().to_string();
        let options = fill_options(
            rng,
            answer.clone(),
            |r| HandCategory::ALL.choose(r).map(|c| c.name().to_string()),
            HandCategory::ALL.iter().map(|c| c.name().to_string()),
        );

        Question::multiple_choice(id, "What is the best hand?", options, answer)
            .with_flash(deal.encode())
    }

    fn duration_seconds(&self) -> u32 {
        120
    }

    fn target_question_count(&self) -> u32 {
        10
    }
}
