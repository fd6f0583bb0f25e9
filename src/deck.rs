//! Decklist parsing and aggregation.
//!
//! A decklist is free text, one card per line. Accepted line shapes:
//!
//! - `4 Lightning Bolt`
//! - `4x Lightning Bolt`
//! - `Lightning Bolt` (quantity defaults to 1)
//!
//! A line may carry a `[SET:NUM]` printing annotation and a trailing
//! `(Custom Image)` marker; both are stripped before quantity/name
//! parsing, and the set/collector pair is kept on the parsed card.
//! Lines that yield no name are skipped, never an error.

use std::collections::HashMap;

/// One parsed decklist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub quantity: u32,
    pub name: String,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub requested_set: Option<String>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub requested_collector_number: Option<String>,
}

impl Card {
    pub fn new(quantity: u32, name: impl Into<String>) -> Self {
        Self {
            quantity,
            name: name.into(),
            requested_set: None,
            requested_collector_number: None,
        }
    }

    /// Lower-cased name, used to match this card across decks and lines.
    pub fn identity_key(&self) -> String {
        identity_key(&self.name)
    }
}

/// A parsed decklist with precomputed totals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    pub cards: Vec<Card>,
    /// Sum of all quantities.
    pub num_cards: u32,
    /// Number of parsed entries (duplicate lines count separately).
    pub num_unique_cards: usize,
}

/// Lower-cases a card name into its cross-deck identity key.
pub fn identity_key(name: &str) -> String {
    name.to_lowercase()
}

/// Parses a whole decklist. Total over all inputs; unparseable lines are
/// skipped.
pub fn parse_deck(text: &str) -> Deck {
    let cards: Vec<Card> = text.lines().filter_map(parse_line).collect();
    let num_cards = cards.iter().map(|c| c.quantity).sum();
    let num_unique_cards = cards.len();
    Deck {
        cards,
        num_cards,
        num_unique_cards,
    }
}

/// Parses a single decklist line. Returns `None` for blank lines and
/// lines with no name left after stripping annotations.
pub fn parse_line(line: &str) -> Option<Card> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let line = strip_custom_image_marker(line);
    let (requested_set, requested_collector_number) = match extract_set_annotation(line) {
        Some((set, num)) => (Some(set), Some(num)),
        None => (None, None),
    };
    let stripped = strip_bracket_groups(line);
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return None;
    }

    let (quantity, name) = split_quantity(stripped);
    Some(Card {
        quantity,
        name: name.trim().to_string(),
        requested_set,
        requested_collector_number,
    })
}

/// Collapses duplicate identities into one entry each, in first-occurrence
/// order, with the display casing of the first occurrence and the summed
/// quantity. Zero-quantity totals are dropped, so the output never carries
/// a card that is not actually in the deck.
pub fn aggregate(cards: &[Card]) -> Vec<Card> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Card> = Vec::new();
    for card in cards {
        match index.get(&card.identity_key()) {
            Some(&slot) => out[slot].quantity += card.quantity,
            None => {
                index.insert(card.identity_key(), out.len());
                out.push(card.clone());
            }
        }
    }
    out.retain(|c| c.quantity > 0);
    out
}

fn strip_custom_image_marker(line: &str) -> &str {
    const MARKER: &str = "(custom image)";
    let trimmed = line.trim_end();
    if trimmed.len() >= MARKER.len() {
        let tail_start = trimmed.len() - MARKER.len();
        if trimmed.is_char_boundary(tail_start)
            && trimmed[tail_start..].eq_ignore_ascii_case(MARKER)
        {
            return trimmed[..tail_start].trim_end();
        }
    }
    trimmed
}

/// Finds the first `[SET:NUM]` annotation, both sides trimmed.
fn extract_set_annotation(line: &str) -> Option<(String, String)> {
    for (open, _) in line.match_indices('[') {
        let rest = &line[open + 1..];
        let colon = rest.find(':')?;
        let set = &rest[..colon];
        let after = &rest[colon + 1..];
        let Some(close) = after.find(']') else {
            continue;
        };
        let num = &after[..close];
        if set.trim().is_empty() || num.trim().is_empty() {
            continue;
        }
        return Some((set.trim().to_string(), num.trim().to_string()));
    }
    None
}

/// Removes every `[...]` group (and the whitespace hugging it) so the
/// quantity/name split sees only the card text.
fn strip_bracket_groups(line: &str) -> String {
    let mut out = String::new();
    let mut rest = line;
    while let Some(open) = rest.find('[') {
        match rest[open + 1..].find(']') {
            Some(close) if close > 0 => {
                out.push_str(rest[..open].trim_end());
                out.push(' ');
                rest = rest[open + 1 + close + 1..].trim_start();
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Splits a leading `<digits>` or `<digits>x` quantity prefix off a line.
/// Absent or malformed prefixes fall back to quantity 1 and the whole
/// line as the name.
fn split_quantity(line: &str) -> (u32, &str) {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end > 0 {
        let mut rest = &line[digits_end..];
        if let Some(after_x) = rest.strip_prefix('x') {
            rest = after_x;
        }
        if rest.starts_with(char::is_whitespace) {
            let name = rest.trim_start();
            if !name.is_empty() {
                if let Ok(quantity) = line[..digits_end].parse::<u32>() {
                    return (quantity, name);
                }
            }
        }
    }
    (1, line)
}
