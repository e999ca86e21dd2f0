//! # suit_count_drill
//!
//! Engine for a timed suit-counting drill.
//!
//! Each round deals 13-card hands from a freshly shuffled deck, hides one
//! suit and asks how many cards of that suit the player cannot see. Three
//! close answer options are offered while a countdown runs; the countdown's
//! starting value tightens after streaks of correct answers and relaxes after
//! misses. Results are aggregated by hand shape (e.g. `"5-4-3-1"`) and
//! written through to a key-value store.
//!
//! ## Round types
//!
//! - **single** (70%): one hand is shown with one suit's tally withheld; the
//!   answer is that suit's count in the hand.
//! - **double** (20%): hands N and S are shown as counts; the answer is how
//!   many cards of the hidden suit sit in the 26 undealt cards.
//! - **sum** (10%): same target as double, but options read like `2 + 3`.
//!
//! ## Quick start
//!
//! ```rust
//! use suit_count_drill::{DrillConfig, MemoryStore, Outcome, Session};
//!
//! let mut session = Session::with_seed(DrillConfig::default(), MemoryStore::new(), 42);
//!
//! let round = session.start_round();
//! println!("How many {} are left?", round.hidden_suit().name());
//! for option in round.options() {
//!     println!("  [{}]", option);
//! }
//!
//! let answer = round.correct_answer();
//! let result = session.submit_answer(answer).unwrap();
//! assert_eq!(result.outcome, Outcome::Correct);
//!
//! // Already resolved: later answers and ticks are ignored.
//! assert!(session.submit_answer(answer).is_none());
//! assert_eq!(session.get_stats().total_wins, 1);
//! ```
//!
//! The host drives the countdown with `Session::tick` every 100 ms or with
//! `Session::advance(elapsed)`; a round left unanswered resolves as
//! `Outcome::Timeout` exactly once.

pub mod client_adapter;
pub mod drill_engine;

// Convenience re-exports so callers can use `suit_count_drill::Session`
// directly without reaching into `drill_engine::`.
pub use client_adapter::to_client_state;
pub use drill_engine::{
    AnswerOption, Card, ConfigError, DealtHands, DrillConfig, FileStore, Hand, KeyValueStore,
    MemoryStore, OptionLabel, Outcome, Rank, Round, RoundResult, RoundSetup, RoundType, Session,
    StatsAggregator, StatsSummary, StoreError, Suit, SuitCounts, TimerState,
};
