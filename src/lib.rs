//! Deck comparison and alignment engine for decklist tooling.
//!
//! Given two free-text decklists, this crate:
//! - parses and aggregates them ([`deck`])
//! - classifies every card's quantity change ([`compare`])
//! - orders change lists under user-selectable strategies ([`sort`])
//! - aligns both decks row-for-row with gap slots ([`align`])
//! - rewrites raw decklist text to match a computed order ([`reconcile`])
//!
//! [`engine::CompareSession`] ties those together the way the browser UI
//! consumes them; everything is a pure, synchronous function of the two
//! raw texts and the selected sort strategy.

pub mod align;
pub mod compare;
pub mod deck;
pub mod engine;
pub mod preview;
pub mod reconcile;
pub mod sort;
pub mod summary;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm_api;

pub use align::{AlignedDecks, AlignedSlot, align_changes};
pub use compare::{CardWithChange, ChangeKind, Comparison, classify, compare};
pub use deck::{Card, Deck, aggregate, identity_key, parse_deck, parse_line};
pub use engine::{CompareSession, LineBadge, Side, line_badges};
pub use preview::ImageCache;
pub use reconcile::{ReorderSpec, reconcile_lines};
pub use sort::{
    SortColumn, SortStrategy, UnknownStrategy, compare_changes, next_strategy, sort_changes,
};
pub use summary::{DiffSection, DiffSummary, QuantityChange, format_section, summarize};
