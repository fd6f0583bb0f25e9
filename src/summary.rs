//! Sectioned diff summary: added / removed / unchanged.
//!
//! Unlike the per-side change records in [`crate::compare`], this view
//! splits a quantity change into its unchanged and moved parts: going from
//! 4 to 6 copies reports 4 unchanged and 2 added. Section entries carry
//! the lower-cased identity key as their name.

use std::collections::HashMap;

use crate::deck::{aggregate, parse_deck};
use crate::sort::compare_names;

/// A count of copies belonging to one summary section.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantityChange {
    pub name: String,
    pub quantity: u32,
}

/// The three summary sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "lowercase"))]
pub enum DiffSection {
    Added,
    Removed,
    Unchanged,
}

/// Added / removed / unchanged copies between two decklists, each section
/// sorted alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffSummary {
    pub added: Vec<QuantityChange>,
    pub removed: Vec<QuantityChange>,
    pub unchanged: Vec<QuantityChange>,
}

impl DiffSummary {
    pub fn section(&self, section: DiffSection) -> &[QuantityChange] {
        match section {
            DiffSection::Added => &self.added,
            DiffSection::Removed => &self.removed,
            DiffSection::Unchanged => &self.unchanged,
        }
    }

    /// Total copies in one section.
    pub fn total(&self, section: DiffSection) -> u32 {
        self.section(section).iter().map(|c| c.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.unchanged.is_empty()
    }
}

/// Builds the summary from two raw decklists.
pub fn summarize(old_text: &str, new_text: &str) -> DiffSummary {
    let old_map = identity_quantities(old_text);
    let new_map = identity_quantities(new_text);

    let mut keys: Vec<&String> = old_map.keys().collect();
    for key in new_map.keys() {
        if !old_map.contains_key(key) {
            keys.push(key);
        }
    }

    let mut summary = DiffSummary::default();
    for key in keys {
        let old_qty = old_map.get(key).copied().unwrap_or(0);
        let new_qty = new_map.get(key).copied().unwrap_or(0);
        let entry = |quantity| QuantityChange {
            name: key.clone(),
            quantity,
        };

        if old_qty == new_qty && old_qty > 0 {
            summary.unchanged.push(entry(old_qty));
        } else if old_qty < new_qty {
            if old_qty > 0 {
                summary.unchanged.push(entry(old_qty));
            }
            summary.added.push(entry(new_qty - old_qty));
        } else if old_qty > new_qty {
            if new_qty > 0 {
                summary.unchanged.push(entry(new_qty));
            }
            summary.removed.push(entry(old_qty - new_qty));
        }
    }

    for section in [
        &mut summary.added,
        &mut summary.removed,
        &mut summary.unchanged,
    ] {
        section.sort_by(|a, b| compare_names(&a.name, &b.name));
    }
    summary
}

fn identity_quantities(text: &str) -> HashMap<String, u32> {
    aggregate(&parse_deck(text).cards)
        .iter()
        .map(|card| (card.identity_key(), card.quantity))
        .collect()
}

/// Renders one section as copyable text:
///
/// ```text
///
/// ADDED
/// =====
/// +2x sol ring
/// ```
pub fn format_section(title: &str, cards: &[QuantityChange], section: DiffSection) -> String {
    if cards.is_empty() {
        return String::new();
    }
    let mut lines = vec![format!("\n{title}\n{}", "=".repeat(title.len()))];
    for card in cards {
        let line = match section {
            DiffSection::Added => format!("+{}x {}", card.quantity, card.name),
            DiffSection::Removed => format!("-{}x {}", card.quantity, card.name),
            DiffSection::Unchanged => format!("{}x {}", card.quantity, card.name),
        };
        lines.push(line);
    }
    lines.join("\n")
}
