//! Win/loss statistics keyed by hand-composition signature.
//!
//! The persisted blob keeps the shape
//! `{ "totalGames", "totalWins", "combinations": { "<sig>": { "games", "wins" } } }`
//! under one key. Every mutation is written through to the store at once.
//! Storage failures are logged and never interrupt play; the in-memory record
//! stays authoritative for the rest of the session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::drill_engine::{
    error::StoreError,
    models::SuitCounts,
    store::KeyValueStore,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboRecord {
    pub games: u64,
    pub wins: u64,
}

/// The persisted structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    #[serde(default)]
    pub total_games: u64,
    #[serde(default)]
    pub total_wins: u64,
    #[serde(default)]
    pub combinations: BTreeMap<String, ComboRecord>,
}

/// Percentage with one decimal place; 0 when nothing was played.
pub fn win_rate(wins: u64, games: u64) -> f64 {
    if games == 0 {
        0.0
    } else {
        (wins as f64 / games as f64 * 1000.0).round() / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_games: u64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub win_rate: f64,
    pub combinations: BTreeMap<String, ComboRecord>,
}

/// One signature's numbers, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationSummary {
    pub signature: String,
    pub games: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate: f64,
}

pub struct StatsAggregator<S: KeyValueStore> {
    store: S,
    key: String,
    record: StatsRecord,
}

impl<S: KeyValueStore> StatsAggregator<S> {
    /// Load the record under `key`. A missing entry, an unreadable store or
    /// malformed JSON all start from an empty record.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let record = match store.get(&key) {
            Ok(Some(text)) => match serde_json::from_str::<StatsRecord>(&text) {
                Ok(record) => record,
                Err(err) => {
                    warn!(key = %key, error = %err, "malformed statistics, starting empty");
                    StatsRecord::default()
                }
            },
            Ok(None) => StatsRecord::default(),
            Err(err) => {
                warn!(key = %key, error = %err, "statistics unreadable, starting empty");
                StatsRecord::default()
            }
        };
        debug!(key = %key, total_games = record.total_games, "statistics loaded");
        StatsAggregator { store, key, record }
    }

    pub fn record(&self) -> &StatsRecord {
        &self.record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Count one resolved round against the composition's signature.
    pub fn record_game(&mut self, counts: &SuitCounts, is_correct: bool) {
        let signature = counts.signature();
        let combo = self.record.combinations.entry(signature.clone()).or_default();
        combo.games += 1;
        self.record.total_games += 1;
        if is_correct {
            combo.wins += 1;
            self.record.total_wins += 1;
        }
        debug!(%signature, is_correct, "round recorded");
        self.flush();
    }

    pub fn get_stats(&self) -> StatsSummary {
        StatsSummary {
            total_games: self.record.total_games,
            total_wins: self.record.total_wins,
            total_losses: self.record.total_games.saturating_sub(self.record.total_wins),
            win_rate: win_rate(self.record.total_wins, self.record.total_games),
            combinations: self.record.combinations.clone(),
        }
    }

    /// Clear every counter and persist the empty record.
    pub fn reset_stats(&mut self) {
        self.record = StatsRecord::default();
        info!(key = %self.key, "statistics reset");
        self.flush();
    }

    /// Per-signature summaries in signature order.
    pub fn combination_summaries(&self) -> Vec<CombinationSummary> {
        self.record
            .combinations
            .iter()
            .map(|(signature, combo)| CombinationSummary {
                signature: signature.clone(),
                games: combo.games,
                wins: combo.wins,
                losses: combo.games.saturating_sub(combo.wins),
                win_rate: win_rate(combo.wins, combo.games),
            })
            .collect()
    }

    /// The `n` signatures with the lowest win rate, worst first.
    pub fn worst_combinations(&self, n: usize) -> Vec<CombinationSummary> {
        let mut all = self.combination_summaries();
        all.sort_by(|a, b| a.win_rate.total_cmp(&b.win_rate));
        all.truncate(n);
        all
    }

    /// Every signature, most played first.
    pub fn most_played(&self) -> Vec<CombinationSummary> {
        let mut all = self.combination_summaries();
        all.sort_by(|a, b| b.games.cmp(&a.games));
        all
    }

    fn flush(&mut self) {
        if let Err(err) = self.try_flush() {
            warn!(key = %self.key, error = %err, "failed to persist statistics");
        }
    }

    fn try_flush(&mut self) -> Result<(), StoreError> {
        let text = serde_json::to_string(&self.record)?;
        self.store.set(&self.key, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::store::MemoryStore;
    use serde_json::json;

    const KEY: &str = "cardGameStats";

    fn empty() -> StatsAggregator<MemoryStore> {
        StatsAggregator::load(MemoryStore::new(), KEY)
    }

    fn stored_json(agg: &StatsAggregator<MemoryStore>) -> serde_json::Value {
        let text = agg.store().get(KEY).unwrap().expect("record persisted");
        serde_json::from_str(&text).unwrap()
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                key: key.to_string(),
            })
        }
    }

    #[test]
    fn permuted_suits_share_one_signature() {
        let mut agg = empty();
        agg.record_game(&SuitCounts::new(4, 3, 3, 3), true);
        agg.record_game(&SuitCounts::new(3, 4, 3, 3), true);
        let stats = agg.get_stats();
        assert_eq!(stats.combinations.len(), 1);
        assert_eq!(stats.combinations["4-3-3-3"], ComboRecord { games: 2, wins: 2 });
    }

    #[test]
    fn totals_and_win_rate() {
        let mut agg = empty();
        agg.record_game(&SuitCounts::new(5, 4, 3, 1), true);
        agg.record_game(&SuitCounts::new(5, 4, 3, 1), false);
        agg.record_game(&SuitCounts::new(4, 4, 4, 1), true);
        let stats = agg.get_stats();
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.total_wins, 2);
        assert_eq!(stats.total_losses, 1);
        assert_eq!(stats.win_rate, 66.7);
        assert_eq!(stats.combinations["5-4-3-1"], ComboRecord { games: 2, wins: 1 });
    }

    #[test]
    fn win_rate_is_zero_without_games() {
        assert_eq!(empty().get_stats().win_rate, 0.0);
        assert_eq!(win_rate(1, 3), 33.3);
        assert_eq!(win_rate(2, 2), 100.0);
    }

    #[test]
    fn every_mutation_is_written_through_with_stable_keys() {
        let mut agg = empty();
        agg.record_game(&SuitCounts::new(5, 4, 3, 1), true);
        assert_eq!(
            stored_json(&agg),
            json!({
                "totalGames": 1,
                "totalWins": 1,
                "combinations": { "5-4-3-1": { "games": 1, "wins": 1 } }
            })
        );
    }

    #[test]
    fn reset_then_get_is_empty_and_persisted() {
        let mut agg = empty();
        agg.record_game(&SuitCounts::new(6, 3, 2, 2), false);
        agg.reset_stats();
        let stats = agg.get_stats();
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.total_wins, 0);
        assert_eq!(stats.total_losses, 0);
        assert!(stats.combinations.is_empty());
        assert_eq!(
            stored_json(&agg),
            json!({ "totalGames": 0, "totalWins": 0, "combinations": {} })
        );
    }

    #[test]
    fn loads_existing_record() {
        let store = MemoryStore::with_entry(
            KEY,
            r#"{"totalGames":4,"totalWins":3,"combinations":{"4-4-3-2":{"games":4,"wins":3}}}"#,
        );
        let mut agg = StatsAggregator::load(store, KEY);
        agg.record_game(&SuitCounts::new(2, 4, 3, 4), true);
        assert_eq!(agg.record().total_games, 5);
        assert_eq!(agg.record().combinations["4-4-3-2"], ComboRecord { games: 5, wins: 4 });
    }

    #[test]
    fn malformed_record_falls_back_to_default() {
        let agg = StatsAggregator::load(MemoryStore::with_entry(KEY, "{not json"), KEY);
        assert_eq!(agg.record(), &StatsRecord::default());
    }

    #[test]
    fn partial_record_fills_missing_fields() {
        let agg = StatsAggregator::load(MemoryStore::with_entry(KEY, r#"{"totalGames":2}"#), KEY);
        assert_eq!(agg.record().total_games, 2);
        assert_eq!(agg.record().total_wins, 0);
        assert!(agg.record().combinations.is_empty());
    }

    #[test]
    fn combination_missing_a_field_is_kept() {
        let store = MemoryStore::with_entry(
            KEY,
            r#"{"totalGames":3,"totalWins":1,"combinations":{"4-3-3-3":{"games":2},"5-3-3-2":{"games":1,"wins":1}}}"#,
        );
        let agg = StatsAggregator::load(store, KEY);
        assert_eq!(agg.record().total_games, 3);
        assert_eq!(agg.record().combinations["4-3-3-3"], ComboRecord { games: 2, wins: 0 });
        assert_eq!(agg.record().combinations["5-3-3-2"], ComboRecord { games: 1, wins: 1 });
        assert_eq!(agg.get_stats().total_losses, 2);
    }

    #[test]
    fn write_failure_keeps_memory_authoritative() {
        let mut agg = StatsAggregator::load(FailingStore, KEY);
        agg.record_game(&SuitCounts::new(7, 2, 2, 2), true);
        agg.record_game(&SuitCounts::new(2, 7, 2, 2), false);
        assert_eq!(agg.get_stats().total_games, 2);
        assert_eq!(agg.record().combinations["7-2-2-2"].wins, 1);
    }

    #[test]
    fn summaries_rank_worst_and_most_played() {
        let mut agg = empty();
        for _ in 0..3 {
            agg.record_game(&SuitCounts::new(4, 3, 3, 3), true);
        }
        agg.record_game(&SuitCounts::new(5, 4, 3, 1), false);
        agg.record_game(&SuitCounts::new(5, 4, 2, 2), true);
        agg.record_game(&SuitCounts::new(5, 4, 2, 2), false);

        let worst = agg.worst_combinations(2);
        assert_eq!(worst.len(), 2);
        assert_eq!(worst[0].signature, "5-4-3-1");
        assert_eq!(worst[0].losses, 1);
        assert_eq!(worst[1].signature, "5-4-2-2");
        assert_eq!(worst[1].win_rate, 50.0);

        let played = agg.most_played();
        assert_eq!(played[0].signature, "4-3-3-3");
        assert_eq!(played[0].games, 3);
        assert_eq!(played.len(), 3);
    }
}
