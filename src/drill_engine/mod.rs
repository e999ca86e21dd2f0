//! Core drill engine: dealing, round logic, answer options, timing and stats.
//!
//! ## Module overview
//!
//! | Module    | Purpose |
//! |-----------|---------|
//! | `models`  | Shared types: cards, hands, suit counts, round types, options |
//! | `deck`    | 52-card deck with Fisher-Yates shuffle and slice dealing |
//! | `round`   | Round-type selection, hidden suit and target computation |
//! | `options` | Close-neighbour answer options, plain and sum-rendered |
//! | `timer`   | Adaptive base time and the per-round countdown |
//! | `stats`   | Signature-keyed win/loss aggregation with write-through |
//! | `store`   | Key-value persistence trait with memory and file backends |
//! | `session` | Session object tying the above together, one round at a time |
//! | `config`  | JSON configuration with defaults and validation |
//! | `error`   | Error types |

pub mod config;
pub mod deck;
pub mod error;
pub mod models;
pub mod options;
pub mod round;
pub mod session;
pub mod stats;
pub mod store;
pub mod timer;

// Re-export the public API surface so callers can use
// `drill_engine::Session` without reaching into sub-modules.
pub use config::{DrillConfig, RoundConfig, TimerConfig, DEFAULT_STATS_KEY};
pub use error::{ConfigError, StoreError, ValidationError};
pub use models::{
    AnswerOption, Card, Hand, OptionLabel, Outcome, Rank, RoundType, Suit, SuitCounts,
};
pub use round::{DealtHands, RoundSetup};
pub use session::{Round, RoundResult, Session};
pub use stats::{CombinationSummary, StatsAggregator, StatsRecord, StatsSummary};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use timer::{AdaptiveTimer, Countdown, TickOutcome, TimerState};
