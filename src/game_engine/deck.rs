//! 52-card deck for poker deals.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game_engine::models::{Card, Rank, Suit};

pub const DECK_SIZE: usize = 52;

/// Shuffled deck, dealt from the top (the end of the vector).
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: Vec<Card> = (2u8..=14)
            .flat_map(|r| Suit::ALL.into_iter().map(move |suit| Card { rank: Rank(r), suit }))
            .collect();
        cards.shuffle(rng);
        Deck { cards }
    }

    /// `None` once the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// `N` cards at once. Deals nothing and returns `None` if fewer remain.
    pub fn deal_array<const N: usize>(&mut self) -> Option<[Card; N]> {
        let start = self.cards.len().checked_sub(N)?;
        self.cards.split_off(start).try_into().ok()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn full_deck_has_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = Deck::new_shuffled(&mut rng);
        let mut seen = HashSet::new();
        while let Some(card) = deck.deal() {
            assert!(seen.insert(card), "duplicate {card}");
        }
        assert_eq!(seen.len(), DECK_SIZE);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn short_deck_refuses_a_bigger_hand() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut deck = Deck::new_shuffled(&mut rng);
        let _: [Card; 50] = deck.deal_array().unwrap();
        assert!(deck.deal_array::<3>().is_none());
        assert_eq!(deck.remaining(), 2);
        assert!(deck.deal_array::<2>().is_some());
    }

    #[test]
    fn same_seed_same_order() {
        let top = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            Deck::new_shuffled(&mut rng).deal_array::<7>()
        };
        assert_eq!(top(99), top(99));
        assert_ne!(top(99), top(100));
    }
}
