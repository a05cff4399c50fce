//! Best-hand classification over a 7-card deal (2 hole + 5 community).
//!
//! Alongside the category, the evaluator reports *which* cards make the hand,
//! as indices into the input slice. The set is the minimal one for the
//! category: a pair reports two cards, high card reports one. The renderer
//! relies on this to highlight only the cards that count.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_engine::models::{Card, Rank, Suit};

/// Hand categories, weakest first so `Ord` follows poker precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::RoyalFlush,
        HandCategory::StraightFlush,
        HandCategory::FourOfAKind,
        HandCategory::FullHouse,
        HandCategory::Flush,
        HandCategory::Straight,
        HandCategory::ThreeOfAKind,
        HandCategory::TwoPair,
        HandCategory::Pair,
        HandCategory::HighCard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::RoyalFlush    => "Royal Flush",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind   => "Four of a Kind",
            HandCategory::FullHouse     => "Full House",
            HandCategory::Flush         => "Flush",
            HandCategory::Straight      => "Straight",
            HandCategory::ThreeOfAKind  => "Three of a Kind",
            HandCategory::TwoPair       => "Two Pair",
            HandCategory::Pair          => "Pair",
            HandCategory::HighCard      => "High Card",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub category: HandCategory,
    /// Indices into the evaluated slice of the cards that form the hand.
    pub winning_indices: Vec<usize>,
}

impl HandEvaluation {
    fn new(category: HandCategory, winning_indices: Vec<usize>) -> Self {
        HandEvaluation { category, winning_indices }
    }

    /// True if any of the first `hole_count` input cards is part of the hand.
    pub fn uses_any_of_first(&self, hole_count: usize) -> bool {
        self.winning_indices.iter().any(|&i| i < hole_count)
    }
}

/// (original index, card), kept sorted by rank descending.
type Indexed = (usize, Card);

/// Evaluate the best category among `cards` (normally 7).
pub fn evaluate_hand(cards: &[Card]) -> HandEvaluation {
    let mut sorted: Vec<Indexed> = cards.iter().copied().enumerate().collect();
    // Stable: equal ranks keep their deal order.
    sorted.sort_by(|a, b| b.1.rank.cmp(&a.1.rank));

    let mut by_rank: BTreeMap<Rank, Vec<usize>> = BTreeMap::new();
    for &(i, c) in &sorted {
        by_rank.entry(c.rank).or_default().push(i);
    }

    let flush_cards: Vec<Indexed> = flush_suit(&sorted)
        .map(|suit| sorted.iter().copied().filter(|(_, c)| c.suit == suit).collect())
        .unwrap_or_default();

    if !flush_cards.is_empty() {
        if let Some(sf) = straight_indices(&flush_cards) {
            // Ace-high and not the wheel (A-2-3-4-5 also contains an ace).
            let ranks: Vec<Rank> = sf.iter().map(|&i| cards[i].rank).collect();
            let royal = ranks.contains(&Rank::ACE) && !ranks.contains(&Rank(2));
            let category = if royal { HandCategory::RoyalFlush } else { HandCategory::StraightFlush };
            return HandEvaluation::new(category, sf);
        }
    }

    if let Some(quads) = by_rank.values().find(|v| v.len() == 4) {
        return HandEvaluation::new(HandCategory::FourOfAKind, quads.clone());
    }

    // Highest ranks first.
    let trips: Vec<Rank> = by_rank.iter().rev().filter(|(_, v)| v.len() >= 3).map(|(r, _)| *r).collect();
    let pairs: Vec<Rank> = by_rank.iter().rev().filter(|(_, v)| v.len() >= 2).map(|(r, _)| *r).collect();
    let take = |rank: Rank, n: usize| -> Vec<usize> {
        by_rank.get(&rank).map(|v| v.iter().copied().take(n).collect()).unwrap_or_default()
    };

    if let Some(&three) = trips.first() {
        if let Some(&pair) = pairs.iter().find(|&&r| r != three) {
            let mut indices = take(three, 3);
            indices.extend(take(pair, 2));
            return HandEvaluation::new(HandCategory::FullHouse, indices);
        }
    }

    if !flush_cards.is_empty() {
        let indices = flush_cards.iter().take(5).map(|(i, _)| *i).collect();
        return HandEvaluation::new(HandCategory::Flush, indices);
    }

    if let Some(straight) = straight_indices(&sorted) {
        return HandEvaluation::new(HandCategory::Straight, straight);
    }

    if let Some(&three) = trips.first() {
        return HandEvaluation::new(HandCategory::ThreeOfAKind, take(three, 3));
    }

    match pairs.as_slice() {
        [high, low, ..] => {
            let mut indices = take(*high, 2);
            indices.extend(take(*low, 2));
            HandEvaluation::new(HandCategory::TwoPair, indices)
        }
        [only] => HandEvaluation::new(HandCategory::Pair, take(*only, 2)),
        [] => {
            let top = sorted.first().map(|(i, _)| vec![*i]).unwrap_or_default();
            HandEvaluation::new(HandCategory::HighCard, top)
        }
    }
}

/// Suit holding five or more cards, if any.
fn flush_suit(cards: &[Indexed]) -> Option<Suit> {
    Suit::ALL
        .into_iter()
        .find(|&s| cards.iter().filter(|(_, c)| c.suit == s).count() >= 5)
}

/// Five distinct consecutive ranks, highest run first, wheel last.
/// `cards` must be sorted by rank descending.
fn straight_indices(cards: &[Indexed]) -> Option<Vec<usize>> {
    let mut ranks: Vec<u8> = cards.iter().map(|(_, c)| c.rank.0).collect();
    ranks.dedup();
    if ranks.len() < 5 {
        return None;
    }

    let first_of = |rank: u8| -> Option<usize> {
        cards.iter().find(|(_, c)| c.rank.0 == rank).map(|(i, _)| *i)
    };

    for window in ranks.windows(5) {
        if window[0] - window[4] == 4 {
            return window.iter().map(|&r| first_of(r)).collect();
        }
    }

    if [14u8, 5, 4, 3, 2].iter().all(|r| ranks.contains(r)) {
        return [14u8, 5, 4, 3, 2].iter().map(|&r| first_of(r)).collect();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(raw: &[&str]) -> Vec<Card> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    #[test]
    fn royal_flush_uses_the_five_broadway_spades() {
        let eval = evaluate_hand(&hand(&["AS", "KS", "QS", "JS", "TS", "2H", "3D"]));
        assert_eq!(eval.category, HandCategory::RoyalFlush);
        assert_eq!(sorted(eval.winning_indices), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn full_house_uses_trips_and_pair() {
        let eval = evaluate_hand(&hand(&["2H", "2D", "2S", "5H", "5D", "9C", "KC"]));
        assert_eq!(eval.category, HandCategory::FullHouse);
        assert_eq!(sorted(eval.winning_indices), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn high_card_reports_only_the_top_card() {
        let eval = evaluate_hand(&hand(&["2H", "7D", "9S", "JC", "KH", "3D", "4S"]));
        assert_eq!(eval.category, HandCategory::HighCard);
        assert_eq!(eval.winning_indices, vec![4]);
    }

    #[test]
    fn steel_wheel_is_a_straight_flush_not_royal() {
        let eval = evaluate_hand(&hand(&["AH", "2H", "3H", "4H", "5H", "KD", "QC"]));
        assert_eq!(eval.category, HandCategory::StraightFlush);
        assert_eq!(sorted(eval.winning_indices), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn wheel_straight_is_detected() {
        let eval = evaluate_hand(&hand(&["AH", "2D", "3C", "4S", "5H", "9D", "JC"]));
        assert_eq!(eval.category, HandCategory::Straight);
        assert_eq!(sorted(eval.winning_indices), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn higher_straight_beats_wheel_run() {
        // A-2-3-4-5-6: the six-high run wins.
        let eval = evaluate_hand(&hand(&["AH", "2D", "3C", "4S", "5H", "6D", "JC"]));
        assert_eq!(eval.category, HandCategory::Straight);
        assert_eq!(sorted(eval.winning_indices), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn quads_report_four_cards() {
        let eval = evaluate_hand(&hand(&["9H", "9D", "9C", "9S", "KH", "KD", "2C"]));
        assert_eq!(eval.category, HandCategory::FourOfAKind);
        assert_eq!(sorted(eval.winning_indices), vec![0, 1, 2, 3]);
    }

    #[test]
    fn flush_takes_five_highest_of_suit() {
        let eval = evaluate_hand(&hand(&["2C", "9C", "KC", "4C", "7C", "JC", "AD"]));
        assert_eq!(eval.category, HandCategory::Flush);
        // J, K, 9, 7, 4 of clubs (the 2 is the sixth club).
        assert_eq!(sorted(eval.winning_indices), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn two_trips_make_a_full_house_with_the_higher_set() {
        let eval = evaluate_hand(&hand(&["3H", "3D", "3C", "8S", "8H", "8D", "2C"]));
        assert_eq!(eval.category, HandCategory::FullHouse);
        assert_eq!(sorted(eval.winning_indices), vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn two_pair_picks_the_two_highest_pairs() {
        let eval = evaluate_hand(&hand(&["4H", "4D", "TC", "TS", "QH", "QD", "2C"]));
        assert_eq!(eval.category, HandCategory::TwoPair);
        assert_eq!(sorted(eval.winning_indices), vec![2, 3, 4, 5]);
    }

    #[test]
    fn trips_and_pair_categories() {
        let trips = evaluate_hand(&hand(&["7H", "7D", "7C", "2S", "9H", "JD", "KC"]));
        assert_eq!(trips.category, HandCategory::ThreeOfAKind);
        assert_eq!(trips.winning_indices.len(), 3);

        let pair = evaluate_hand(&hand(&["7H", "7D", "3C", "2S", "9H", "JD", "KC"]));
        assert_eq!(pair.category, HandCategory::Pair);
        assert_eq!(sorted(pair.winning_indices), vec![0, 1]);
    }

    #[test]
    fn category_order_follows_poker_precedence() {
        for pair in HandCategory::ALL.windows(2) {
            assert!(pair[0] > pair[1], "{} should outrank {}", pair[0], pair[1]);
        }
    }
}
