//! Change classification between two decklists.
//!
//! Every card that appears in either deck gets exactly one change record
//! per side it appears on. `diff` is always `new - old`, so the old-side
//! and new-side records for a shared card agree on both kind and diff.

use std::collections::HashMap;

use crate::deck::{Card, aggregate, identity_key, parse_deck};

/// How a card's quantity changed between the old and new deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "lowercase"))]
pub enum ChangeKind {
    Added,
    Removed,
    Unchanged,
    Increased,
    Decreased,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Unchanged => "unchanged",
            ChangeKind::Increased => "increased",
            ChangeKind::Decreased => "decreased",
        }
    }
}

/// One deck's view of a card in a comparison. `quantity` is the count on
/// the deck this record describes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct CardWithChange {
    pub name: String,
    pub quantity: u32,
    pub change: ChangeKind,
    pub diff: i32,
}

impl CardWithChange {
    pub fn identity_key(&self) -> String {
        identity_key(&self.name)
    }
}

/// Both sides of a comparison, in each deck's first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub old_changes: Vec<CardWithChange>,
    pub new_changes: Vec<CardWithChange>,
}

/// Parses, aggregates, and classifies two raw decklists. Empty input on
/// either side is ordinary and yields an empty side.
pub fn compare(old_text: &str, new_text: &str) -> Comparison {
    let old_cards = aggregate(&parse_deck(old_text).cards);
    let new_cards = aggregate(&parse_deck(new_text).cards);
    let (old_changes, new_changes) = classify(&old_cards, &new_cards);
    Comparison {
        old_changes,
        new_changes,
    }
}

/// Classifies two aggregated decks against each other. Expects unique
/// identities per side (the aggregator's output); a zero quantity in a map
/// is treated as absence.
pub fn classify(
    old_cards: &[Card],
    new_cards: &[Card],
) -> (Vec<CardWithChange>, Vec<CardWithChange>) {
    let old_map = quantity_map(old_cards);
    let new_map = quantity_map(new_cards);

    let old_changes = old_cards
        .iter()
        .map(|card| {
            let old_qty = card.quantity;
            let new_qty = new_map.get(&card.identity_key()).copied().unwrap_or(0);
            let (change, diff) = classify_old_side(old_qty, new_qty);
            CardWithChange {
                name: card.name.clone(),
                quantity: old_qty,
                change,
                diff,
            }
        })
        .collect();

    let new_changes = new_cards
        .iter()
        .map(|card| {
            let new_qty = card.quantity;
            let old_qty = old_map.get(&card.identity_key()).copied().unwrap_or(0);
            let (change, diff) = classify_new_side(old_qty, new_qty);
            CardWithChange {
                name: card.name.clone(),
                quantity: new_qty,
                change,
                diff,
            }
        })
        .collect();

    (old_changes, new_changes)
}

fn quantity_map(cards: &[Card]) -> HashMap<String, u32> {
    cards
        .iter()
        .map(|card| (card.identity_key(), card.quantity))
        .collect()
}

fn classify_old_side(old_qty: u32, new_qty: u32) -> (ChangeKind, i32) {
    if new_qty == 0 {
        (ChangeKind::Removed, 0)
    } else {
        shared_kind(old_qty, new_qty)
    }
}

fn classify_new_side(old_qty: u32, new_qty: u32) -> (ChangeKind, i32) {
    if old_qty == 0 {
        (ChangeKind::Added, new_qty as i32)
    } else {
        shared_kind(old_qty, new_qty)
    }
}

fn shared_kind(old_qty: u32, new_qty: u32) -> (ChangeKind, i32) {
    let diff = new_qty as i32 - old_qty as i32;
    match diff {
        0 => (ChangeKind::Unchanged, 0),
        d if d > 0 => (ChangeKind::Increased, d),
        d => (ChangeKind::Decreased, d),
    }
}
