//! Round engine: picks the round shape, deals, hides a suit and computes the
//! count the player has to name.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::drill_engine::{
    config::RoundConfig,
    deck::Deck,
    models::{Hand, RoundType, Suit, SuitCounts, SUIT_SIZE},
    options::clamp_count,
};

/// Map a uniform draw in `[0, 1)` to a round type.
///
/// With the default bounds: `r < 0.10` is a sum round, `r < 0.30` a double
/// round, anything else single.
pub fn round_type_for_draw(r: f64, weights: &RoundConfig) -> RoundType {
    if r < weights.sum_below {
        RoundType::Sum
    } else if r < weights.double_below {
        RoundType::Double
    } else {
        RoundType::Single
    }
}

pub fn select_round_type<R: Rng + ?Sized>(rng: &mut R, weights: &RoundConfig) -> RoundType {
    round_type_for_draw(rng.gen::<f64>(), weights)
}

/// Hidden suit count inside the visible hand.
pub fn single_target(counts: &SuitCounts, hidden: Suit) -> u8 {
    clamp_count(i32::from(counts.get(hidden)))
}

/// Hidden suit count among the 26 cards neither hand holds.
///
/// Dealt hands are disjoint, so this lands in `[0, 13]` on its own; hands
/// built elsewhere may overlap and are clamped instead.
pub fn remainder_target(north: &SuitCounts, south: &SuitCounts, hidden: Suit) -> u8 {
    clamp_count(
        i32::from(SUIT_SIZE) - i32::from(north.get(hidden)) - i32::from(south.get(hidden)),
    )
}

/// The hands visible to the player this round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum DealtHands {
    Single { hand: Hand },
    Pair { north: Hand, south: Hand },
}

/// Everything fixed at round start. Only built through [`RoundSetup::deal`],
/// [`RoundSetup::from_hand`] or [`RoundSetup::from_pair`], so the answer always
/// matches the hands and lies in `[0, 13]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSetup {
    round_type: RoundType,
    hands: DealtHands,
    hidden_suit: Suit,
    correct_answer: u8,
}

impl RoundSetup {
    /// Deal a fresh deck for `round_type` and pick the hidden suit.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R, round_type: RoundType) -> Self {
        let deck = Deck::new_shuffled(rng);
        let hidden_suit = Suit::ALL[rng.gen_range(0..Suit::ALL.len())];

        match round_type {
            RoundType::Single => Self::from_hand(deck.deal_single(), hidden_suit),
            RoundType::Double | RoundType::Sum => {
                let (north, south) = deck.deal_pair();
                Self::from_pair(round_type, north, south, hidden_suit)
            }
        }
    }

    /// Single round over an already dealt hand.
    pub fn from_hand(hand: Hand, hidden_suit: Suit) -> Self {
        let correct_answer = single_target(&hand.suit_counts(), hidden_suit);
        RoundSetup {
            round_type: RoundType::Single,
            hands: DealtHands::Single { hand },
            hidden_suit,
            correct_answer,
        }
    }

    /// Double or sum round over two already dealt, disjoint hands.
    pub fn from_pair(round_type: RoundType, north: Hand, south: Hand, hidden_suit: Suit) -> Self {
        let correct_answer =
            remainder_target(&north.suit_counts(), &south.suit_counts(), hidden_suit);
        RoundSetup {
            round_type,
            hands: DealtHands::Pair { north, south },
            hidden_suit,
            correct_answer,
        }
    }

    pub fn round_type(&self) -> RoundType {
        self.round_type
    }

    pub fn hands(&self) -> &DealtHands {
        &self.hands
    }

    pub fn hidden_suit(&self) -> Suit {
        self.hidden_suit
    }

    pub fn correct_answer(&self) -> u8 {
        self.correct_answer
    }

    /// Per-suit counts of each visible hand, N before S.
    pub fn visible_counts(&self) -> Vec<SuitCounts> {
        match &self.hands {
            DealtHands::Single { hand }        => vec![hand.suit_counts()],
            DealtHands::Pair { north, south } => vec![north.suit_counts(), south.suit_counts()],
        }
    }

    /// Composition recorded in the statistics: the first visible hand.
    pub fn recorded_counts(&self) -> SuitCounts {
        match &self.hands {
            DealtHands::Single { hand }    => hand.suit_counts(),
            DealtHands::Pair { north, .. } => north.suit_counts(),
        }
    }
}
