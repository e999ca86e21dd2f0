use rand::Rng;
use crate::drill_engine::models::{Card, Hand, Rank, Suit, HAND_SIZE};

/// A standard 52-card deck. Built fresh for every round, sliced into hands,
/// then dropped.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled deck: suits in [`Suit::ALL`] order, ranks A, 2..K.
    pub fn ordered() -> Self {
        let cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::DEAL_ORDER.iter().map(move |&rank| Card { rank, suit }))
            .collect();
        Deck { cards }
    }

    /// Build a fresh ordered deck and shuffle it with `rng`.
    pub fn new_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();

        // Fisher-Yates shuffle
        for i in (1..deck.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            deck.cards.swap(i, j);
        }

        deck
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// First 13 cards as the only hand; the other 39 are never dealt.
    pub fn deal_single(self) -> Hand {
        Hand::new(self.cards[..HAND_SIZE].to_vec())
    }

    /// Cards `[0, 13)` as hand N and `[13, 26)` as hand S. The remaining 26
    /// stay unseen.
    pub fn deal_pair(self) -> (Hand, Hand) {
        let north = Hand::new(self.cards[..HAND_SIZE].to_vec());
        let south = Hand::new(self.cards[HAND_SIZE..2 * HAND_SIZE].to_vec());
        (north, south)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn deck_has_52_unique_cards() {
        let mut rng = StdRng::seed_from_u64(42);
        let deck = Deck::new_shuffled(&mut rng);
        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(deck.cards().len(), 52);
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn deck_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<Card> {
            let mut rng = StdRng::seed_from_u64(seed);
            Deck::new_shuffled(&mut rng).cards().to_vec()
        };
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }

    #[test]
    fn pair_hands_are_disjoint_and_follow_deck_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::new_shuffled(&mut rng);
        let expected = deck.cards().to_vec();
        let (north, south) = deck.deal_pair();

        assert_eq!(north.cards(), &expected[..13]);
        assert_eq!(south.cards(), &expected[13..26]);
        let n: HashSet<Card> = north.cards().iter().copied().collect();
        assert!(south.cards().iter().all(|c| !n.contains(c)));
    }

    #[test]
    fn single_hand_is_first_thirteen() {
        let mut rng = StdRng::seed_from_u64(3);
        let deck = Deck::new_shuffled(&mut rng);
        let expected = deck.cards()[..13].to_vec();
        let hand = deck.deal_single();
        assert_eq!(hand.cards(), expected.as_slice());
        assert_eq!(hand.suit_counts().total(), 13);
    }

    #[test]
    fn shuffle_spreads_each_card_uniformly_across_positions() {
        const TRIALS: usize = 20_000;
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let tracked = [0usize, 25, 51];
        let mut hits = vec![[0usize; 52]; tracked.len()];
        let ordered = Deck::ordered();

        for _ in 0..TRIALS {
            let deck = Deck::new_shuffled(&mut rng);
            for (slot, &idx) in tracked.iter().enumerate() {
                let target = ordered.cards()[idx];
                let pos = deck.cards().iter().position(|&c| c == target).unwrap();
                hits[slot][pos] += 1;
            }
        }

        // Expected ~385 per position with a standard deviation near 19.
        let expected = TRIALS as f64 / 52.0;
        for row in &hits {
            for &count in row.iter() {
                let dev = (count as f64 - expected).abs();
                assert!(dev < expected * 0.3, "position count {count} too far from {expected:.1}");
            }
        }
    }
}
