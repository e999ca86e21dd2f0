//! Simulated drill session.
//!
//! Run with: `cargo run --example session`
//! Verbose engine logs: `RUST_LOG=suit_count_drill=debug cargo run --example session`
//!
//! A scripted player answers twenty rounds: mostly correct and quick, now and
//! then wrong, and occasionally too slow so the countdown expires. The output
//! shows each round as a presentation layer would receive it, then the
//! adapted base time and the statistics, including the worst hand shapes.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use suit_count_drill::{
    to_client_state, DealtHands, DrillConfig, MemoryStore, RoundType, Session,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut session = Session::with_seed(DrillConfig::default(), MemoryStore::new(), 2024);
    let mut player = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let round = session.start_round();
        let correct = round.correct_answer();
        let suit = round.hidden_suit();

        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!(
            "  Round {}  [{}]  {:.1}s on the clock",
            round.id(),
            round.round_type(),
            round.remaining()
        );
        match round.hands() {
            DealtHands::Single { hand } => {
                let cards: Vec<String> = hand
                    .grouped_by_suit()
                    .into_iter()
                    .flat_map(|(_, group)| group)
                    .map(|c| c.to_string())
                    .collect();
                println!("  Hand: {}", cards.join(" "));
                println!("  How many {} {} are in this hand?", suit.symbol(), suit.name());
            }
            DealtHands::Pair { .. } => {
                let counts = round.visible_counts();
                println!("  N: {:?}", counts[0]);
                println!("  S: {:?}", counts[1]);
                println!("  How many {} {} are still out?", suit.symbol(), suit.name());
            }
        }
        let labels: Vec<String> = round.options().iter().map(|o| format!("[{o}]")).collect();
        println!("  Options: {}", labels.join("  "));

        // Think for a while, in 100 ms steps, then answer (or run out of time).
        let think_ms: u64 = player.gen_range(500..9_000);
        let mut result = session.advance(Duration::from_millis(think_ms));
        if result.is_none() {
            let pick = if player.gen_bool(0.8) {
                correct
            } else {
                let offered: Vec<u8> = session
                    .current_round()
                    .map(|r| r.options().iter().map(|o| o.value).collect())
                    .unwrap_or_default();
                offered.into_iter().find(|&v| v != correct).unwrap_or(correct)
            };
            result = session.submit_answer(pick);
        }

        if let Some(result) = result {
            println!(
                "  → {} after {:.1}s (answer was {})",
                result.outcome,
                think_ms as f64 / 1000.0,
                result.correct_answer
            );
        }
        if let Some(round) = session.current_round() {
            if round.round_type() == RoundType::Single {
                let state = to_client_state(round, session.score());
                println!("  Revealed counts: {}", state["hands"][0]["counts"]);
            }
        }
    }

    println!();
    println!("══ Session summary ══");
    let timer = session.timer_state();
    println!("  Score: {}", session.score());
    println!("  Base time now: {:.1}s (streak {})", timer.base_time, timer.consecutive_correct);

    let stats = session.get_stats();
    println!(
        "  Games: {}  Wins: {}  Losses: {}  Win rate: {}%",
        stats.total_games, stats.total_wins, stats.total_losses, stats.win_rate
    );
    println!("  Five weakest hand shapes:");
    for combo in session.stats().worst_combinations(5) {
        println!(
            "    {:<10} {:>5.1}%  ({} games, {} losses)",
            combo.signature, combo.win_rate, combo.games, combo.losses
        );
    }
}
