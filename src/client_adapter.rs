use serde_json::{json, Value};
use crate::drill_engine::models::{AnswerOption, Hand, OptionLabel, Suit, SuitCounts};
use crate::drill_engine::round::DealtHands;
use crate::drill_engine::session::Round;

/// Suit identity block shown next to the question.
fn suit_entry(suit: Suit) -> Value {
    json!({ "key": suit.key(), "name": suit.name(), "symbol": suit.symbol() })
}

/// Per-suit counts; `withheld` is rendered as `null`.
fn counts_entry(counts: &SuitCounts, withheld: Option<Suit>) -> Value {
    let mut map = serde_json::Map::new();
    for suit in Suit::ALL {
        let value = if withheld == Some(suit) {
            Value::Null
        } else {
            json!(counts.get(suit))
        };
        map.insert(suit.key().to_string(), value);
    }
    Value::Object(map)
}

/// Cards in display order: suits grouped, Ace first within each suit.
fn cards_entry(hand: &Hand) -> Value {
    let cards: Vec<Value> = hand
        .grouped_by_suit()
        .into_iter()
        .flat_map(|(_, group)| group)
        .map(|c| json!({ "rank": c.rank.symbol(), "suit": c.suit.key(), "label": c.to_string() }))
        .collect();
    Value::Array(cards)
}

fn option_entry(option: &AnswerOption) -> Value {
    let parts = match option.label {
        OptionLabel::Plain                 => Value::Null,
        OptionLabel::Sum { first, second } => json!([first, second]),
    };
    json!({ "value": option.value, "display": option.to_string(), "parts": parts })
}

/// Build the JSON state a presentation layer needs to draw `round`.
///
/// In single rounds the hidden suit's tally is withheld until the round
/// resolves; double and sum rounds show both hands' counts in full since the
/// answer lies in the undealt cards.
pub fn to_client_state(round: &Round, score: u64) -> Value {
    let resolved = !round.is_active();
    let hidden = round.hidden_suit();

    let hands: Vec<Value> = match round.hands() {
        DealtHands::Single { hand } => {
            let withheld = if resolved { None } else { Some(hidden) };
            vec![json!({
                "seat": "hand",
                "counts": counts_entry(&hand.suit_counts(), withheld),
                "cards": cards_entry(hand),
            })]
        }
        DealtHands::Pair { north, south } => vec![
            json!({ "seat": "N", "counts": counts_entry(&north.suit_counts(), None) }),
            json!({ "seat": "S", "counts": counts_entry(&south.suit_counts(), None) }),
        ],
    };

    let countdown = round.countdown();
    let result = match round.result() {
        Some(r) => json!({
            "outcome": r.outcome,
            "submitted": r.submitted,
            "correct_answer": r.correct_answer,
        }),
        None => Value::Null,
    };

    json!({
        "round_id": round.id(),
        "round_type": round.round_type(),
        "hidden_suit": suit_entry(hidden),
        "hands": hands,
        "options": round.options().iter().map(option_entry).collect::<Vec<_>>(),
        "timer": {
            "remaining": format!("{:.1}", countdown.remaining()),
            "urgent": countdown.is_urgent(),
            "running": countdown.is_running(),
        },
        "result": result,
        "score": score,
    })
}
