use std::fmt;
use serde::{Deserialize, Serialize};

/// Number of cards in one suit, and in one dealt hand.
pub const SUIT_SIZE: u8 = 13;

/// Cards per hand.
pub const HAND_SIZE: usize = 13;

// ---------------------------------------------------------------------------
// Card primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// Display order used everywhere a hand is laid out.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades   => "Spades",
            Suit::Hearts   => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs    => "Clubs",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades   => "♠",
            Suit::Hearts   => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs    => "♣",
        }
    }

    /// Lowercase identifier, matching the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            Suit::Spades   => "spades",
            Suit::Hearts   => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs    => "clubs",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Rank 2..=14 where 14 = Ace. The value only drives display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    /// Deck construction order within a suit: A, 2..10, J, Q, K.
    pub const DEAL_ORDER: [Rank; 13] = [
        Rank(14), Rank(2), Rank(3), Rank(4), Rank(5), Rank(6), Rank(7),
        Rank(8), Rank(9), Rank(10), Rank(11), Rank(12), Rank(13),
    ];

    pub fn symbol(self) -> &'static str {
        match self.0 {
            2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
            7 => "7", 8 => "8", 9 => "9", 10 => "10",
            11 => "J", 12 => "Q", 13 => "K", 14 => "A",
            _ => "?",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

// ---------------------------------------------------------------------------
// Hands and suit tallies
// ---------------------------------------------------------------------------

/// Thirteen cards drawn without replacement from one shuffle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Hand { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn suit_counts(&self) -> SuitCounts {
        SuitCounts::from_cards(&self.cards)
    }

    /// Cards grouped by suit in [`Suit::ALL`] order, each group Ace first.
    pub fn grouped_by_suit(&self) -> Vec<(Suit, Vec<Card>)> {
        Suit::ALL
            .iter()
            .map(|&suit| {
                let mut group: Vec<Card> =
                    self.cards.iter().copied().filter(|c| c.suit == suit).collect();
                group.sort_by(|a, b| b.rank.cmp(&a.rank));
                (suit, group)
            })
            .collect()
    }
}

/// Per-suit card count over one hand. Always sums to the hand size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitCounts {
    pub spades: u8,
    pub hearts: u8,
    pub diamonds: u8,
    pub clubs: u8,
}

impl SuitCounts {
    pub fn new(spades: u8, hearts: u8, diamonds: u8, clubs: u8) -> Self {
        SuitCounts { spades, hearts, diamonds, clubs }
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = SuitCounts::default();
        for card in cards {
            *counts.slot(card.suit) += 1;
        }
        counts
    }

    pub fn get(&self, suit: Suit) -> u8 {
        match suit {
            Suit::Spades   => self.spades,
            Suit::Hearts   => self.hearts,
            Suit::Diamonds => self.diamonds,
            Suit::Clubs    => self.clubs,
        }
    }

    fn slot(&mut self, suit: Suit) -> &mut u8 {
        match suit {
            Suit::Spades   => &mut self.spades,
            Suit::Hearts   => &mut self.hearts,
            Suit::Diamonds => &mut self.diamonds,
            Suit::Clubs    => &mut self.clubs,
        }
    }

    pub fn total(&self) -> u32 {
        Suit::ALL.iter().map(|&s| u32::from(self.get(s))).sum()
    }

    /// Suit-identity-free key: the four counts sorted descending, e.g. `"4-3-3-3"`.
    pub fn signature(&self) -> String {
        let mut counts = [self.spades, self.hearts, self.diamonds, self.clubs];
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts.iter().map(|c| c.to_string()).collect::<Vec<_>>().join("-")
    }
}

// ---------------------------------------------------------------------------
// Round metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundType {
    /// One visible hand; count the hidden suit inside it.
    Single,
    /// Two visible hands; count the hidden suit among the 26 undealt cards.
    Double,
    /// Same target as `Double`, answers shown as additions.
    Sum,
}

impl fmt::Display for RoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundType::Single => write!(f, "single"),
            RoundType::Double => write!(f, "double"),
            RoundType::Sum    => write!(f, "sum"),
        }
    }
}

/// How an answer option is shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OptionLabel {
    Plain,
    /// `first + second`, always summing to the option's value.
    Sum { first: u8, second: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// The integer compared against the correct answer.
    pub value: u8,
    pub label: OptionLabel,
}

impl AnswerOption {
    pub fn plain(value: u8) -> Self {
        AnswerOption { value, label: OptionLabel::Plain }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            OptionLabel::Plain                 => write!(f, "{}", self.value),
            OptionLabel::Sum { first, second } => write!(f, "{} + {}", first, second),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
    Timeout,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Correct   => write!(f, "correct"),
            Outcome::Incorrect => write!(f, "incorrect"),
            Outcome::Timeout   => write!(f, "timeout"),
        }
    }
}
