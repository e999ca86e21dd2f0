//! The play session: one object owning everything that outlives a round.
//!
//! A [`Session`] holds the RNG, the adaptive timer, the score and the
//! statistics aggregator, and at most one live [`Round`]. Starting a round
//! supersedes the previous one. A round resolves exactly once, either through
//! [`Session::submit_answer`] or through the countdown reaching zero while the
//! host drives [`Session::tick`] / [`Session::advance`]; after that both are
//! no-ops until the next round starts.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drill_engine::{
    config::DrillConfig,
    models::{AnswerOption, Outcome, RoundType, Suit, SuitCounts},
    options::generate_options,
    round::{select_round_type, DealtHands, RoundSetup},
    stats::{StatsAggregator, StatsSummary},
    store::KeyValueStore,
    timer::{AdaptiveTimer, Countdown, TickOutcome, TimerState},
};

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_id: u64,
    pub outcome: Outcome,
    /// `None` on timeout.
    pub submitted: Option<u8>,
    pub correct_answer: u8,
    pub signature: String,
}

/// Live per-round state.
#[derive(Debug, Clone)]
pub struct Round {
    id: u64,
    setup: RoundSetup,
    options: [AnswerOption; 3],
    countdown: Countdown,
    result: Option<RoundResult>,
}

impl Round {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn setup(&self) -> &RoundSetup {
        &self.setup
    }

    pub fn round_type(&self) -> RoundType {
        self.setup.round_type()
    }

    pub fn hidden_suit(&self) -> Suit {
        self.setup.hidden_suit()
    }

    pub fn hands(&self) -> &DealtHands {
        self.setup.hands()
    }

    pub fn visible_counts(&self) -> Vec<SuitCounts> {
        self.setup.visible_counts()
    }

    pub fn options(&self) -> &[AnswerOption; 3] {
        &self.options
    }

    /// Whether `value` is one of the values on offer.
    pub fn is_offered(&self, value: u8) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn correct_answer(&self) -> u8 {
        self.setup.correct_answer()
    }

    /// The answer, once the round has resolved.
    pub fn revealed_answer(&self) -> Option<u8> {
        self.result.as_ref().map(|r| r.correct_answer)
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn remaining(&self) -> f64 {
        self.countdown.remaining()
    }

    pub fn is_active(&self) -> bool {
        self.result.is_none()
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }
}

pub struct Session<S: KeyValueStore> {
    config: DrillConfig,
    rng: StdRng,
    timer: AdaptiveTimer,
    stats: StatsAggregator<S>,
    score: u64,
    next_round_id: u64,
    round: Option<Round>,
}

impl<S: KeyValueStore> Session<S> {
    /// Session seeded from OS entropy.
    pub fn new(config: DrillConfig, store: S) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Deterministic session, reproducible for a given seed.
    pub fn with_seed(config: DrillConfig, store: S, seed: u64) -> Self {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: DrillConfig, store: S, rng: StdRng) -> Self {
        let timer = AdaptiveTimer::new(&config.timer);
        let stats = StatsAggregator::load(store, config.stats_key.clone());
        Session {
            config,
            rng,
            timer,
            stats,
            score: 0,
            next_round_id: 1,
            round: None,
        }
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    /// Start a round of weighted-random type.
    pub fn start_round(&mut self) -> &Round {
        let round_type = select_round_type(&mut self.rng, &self.config.rounds);
        self.start_round_of(round_type)
    }

    /// Start a round of a fixed type.
    pub fn start_round_of(&mut self, round_type: RoundType) -> &Round {
        let setup = RoundSetup::deal(&mut self.rng, round_type);
        self.start_prepared(setup)
    }

    /// Start a round over hands dealt elsewhere.
    pub fn start_prepared(&mut self, setup: RoundSetup) -> &Round {
        if let Some(previous) = self.round.as_mut() {
            previous.countdown.stop();
            if previous.result.is_none() {
                debug!(round = previous.id, "unresolved round superseded");
            }
        }

        let options = generate_options(&mut self.rng, setup.correct_answer(), setup.round_type());
        let id = self.next_round_id;
        self.next_round_id += 1;
        debug!(
            round = id,
            round_type = %setup.round_type(),
            hidden_suit = setup.hidden_suit().key(),
            base_time = self.timer.base_time(),
            "round started"
        );

        self.round.insert(Round {
            id,
            setup,
            options,
            countdown: self.timer.start_countdown(),
            result: None,
        })
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Resolve the live round with the player's answer. `None` when there is
    /// no round or it already resolved.
    pub fn submit_answer(&mut self, value: u8) -> Option<RoundResult> {
        let correct = self.round.as_ref()?.correct_answer();
        let outcome = if value == correct { Outcome::Correct } else { Outcome::Incorrect };
        self.resolve(outcome, Some(value))
    }

    /// One 0.1 s countdown step. Returns the timeout result on expiry.
    pub fn tick(&mut self) -> Option<RoundResult> {
        let expired = self.round.as_mut()?.countdown.tick() == TickOutcome::Expired;
        if expired {
            self.resolve(Outcome::Timeout, None)
        } else {
            None
        }
    }

    /// Feed wall-clock time to the countdown.
    pub fn advance(&mut self, elapsed: Duration) -> Option<RoundResult> {
        let expired = self.round.as_mut()?.countdown.advance(elapsed) == TickOutcome::Expired;
        if expired {
            self.resolve(Outcome::Timeout, None)
        } else {
            None
        }
    }

    fn resolve(&mut self, outcome: Outcome, submitted: Option<u8>) -> Option<RoundResult> {
        let round = self.round.as_mut()?;
        if round.result.is_some() {
            return None;
        }
        round.countdown.stop();

        let counts = round.setup.recorded_counts();
        let result = RoundResult {
            round_id: round.id,
            outcome,
            submitted,
            correct_answer: round.setup.correct_answer(),
            signature: counts.signature(),
        };
        round.result = Some(result.clone());

        self.timer.record(outcome);
        if outcome.is_win() {
            self.score += 1;
        }
        self.stats.record_game(&counts, outcome.is_win());

        debug!(
            round = result.round_id,
            %outcome,
            correct = result.correct_answer,
            base_time = self.timer.base_time(),
            "round resolved"
        );
        Some(result)
    }

    /// Rounds answered correctly this session.
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn stats(&self) -> &StatsAggregator<S> {
        &self.stats
    }

    pub fn get_stats(&self) -> StatsSummary {
        self.stats.get_stats()
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset_stats();
    }

    /// End the session and hand back the store.
    pub fn into_store(self) -> S {
        self.stats.into_store()
    }
}
