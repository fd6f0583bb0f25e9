//! WASM-facing API for browser integration.
//!
//! This module provides a small wrapper around [`CompareSession`] so
//! JavaScript can:
//! - set the two decklist texts and the shared sort strategy
//! - read change records, aligned rows, badges, and the diff summary
//! - ask for the rewritten textarea content on a strategy change

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::align::AlignedDecks;
use crate::compare::CardWithChange;
use crate::deck::parse_deck;
use crate::engine::{CompareSession, LineBadge, Side, line_badges};
use crate::sort::{SortColumn, SortStrategy};
use crate::summary::{DiffSummary, summarize};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

fn side(is_old: bool) -> Side {
    if is_old { Side::Old } else { Side::New }
}

fn encode<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("{what} encode failed: {e}")))
}

/// Everything one render of the comparison UI needs.
#[derive(Serialize)]
struct SessionSnapshot {
    strategy: &'static str,
    old_changes: Vec<CardWithChange>,
    new_changes: Vec<CardWithChange>,
    aligned: AlignedDecks,
    old_badges: Vec<LineBadge>,
    new_badges: Vec<LineBadge>,
    summary: DiffSummary,
}

#[wasm_bindgen]
pub struct WasmComparer {
    session: CompareSession,
}

impl Default for WasmComparer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmComparer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: CompareSession::new("", ""),
        }
    }

    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, is_old: bool, text: &str) {
        self.session.set_text(side(is_old), text);
    }

    #[wasm_bindgen(js_name = text)]
    pub fn text(&self, is_old: bool) -> String {
        self.session.text(side(is_old)).to_string()
    }

    /// Current strategy as its wire name (`input`, `changeType-asc`, ...).
    #[wasm_bindgen(js_name = strategy)]
    pub fn strategy(&self) -> String {
        self.session.strategy().to_string()
    }

    #[wasm_bindgen(js_name = setStrategy)]
    pub fn set_strategy(&mut self, name: &str) -> Result<(), JsValue> {
        let strategy: SortStrategy = name
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        self.session.set_strategy(strategy);
        Ok(())
    }

    /// One click on the status column header; returns the new strategy.
    #[wasm_bindgen(js_name = cycleStatus)]
    pub fn cycle_status(&mut self) -> String {
        self.session.cycle(SortColumn::Status).to_string()
    }

    /// One click on the name column header; returns the new strategy.
    #[wasm_bindgen(js_name = cycleName)]
    pub fn cycle_name(&mut self) -> String {
        self.session.cycle(SortColumn::Name).to_string()
    }

    /// One side's change records under the current sort strategy.
    #[wasm_bindgen(js_name = sortedChanges)]
    pub fn sorted_changes(&self, is_old: bool) -> Result<JsValue, JsValue> {
        encode(&self.session.sorted_changes(side(is_old)), "sortedChanges")
    }

    /// Both panes aligned row-for-row with gap slots.
    #[wasm_bindgen(js_name = aligned)]
    pub fn aligned(&self) -> Result<JsValue, JsValue> {
        encode(&self.session.aligned(), "aligned")
    }

    /// The rewritten textarea content for one pane after a strategy
    /// change, or undefined when the text should stay as typed.
    #[wasm_bindgen(js_name = reorderText)]
    pub fn reorder_text(&self, is_old: bool) -> Option<String> {
        self.session.reorder_text(side(is_old))
    }

    /// Per-line badge column for one pane.
    #[wasm_bindgen(js_name = lineBadges)]
    pub fn line_badges(&self, is_old: bool) -> Result<JsValue, JsValue> {
        let pane = side(is_old);
        let changes = self.session.changes(pane);
        encode(&line_badges(self.session.text(pane), &changes), "lineBadges")
    }

    /// Added/removed/unchanged sections for the summary view.
    #[wasm_bindgen(js_name = summary)]
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        let summary = summarize(self.session.text(Side::Old), self.session.text(Side::New));
        encode(&summary, "summary")
    }

    /// Full render snapshot in one call.
    #[wasm_bindgen(js_name = snapshot)]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let comparison = self.session.comparison();
        let snap = SessionSnapshot {
            strategy: self.session.strategy().as_str(),
            old_badges: line_badges(self.session.text(Side::Old), &comparison.old_changes),
            new_badges: line_badges(self.session.text(Side::New), &comparison.new_changes),
            old_changes: comparison.old_changes,
            new_changes: comparison.new_changes,
            aligned: self.session.aligned(),
            summary: summarize(self.session.text(Side::Old), self.session.text(Side::New)),
        };
        encode(&snap, "snapshot")
    }
}

/// Parses one decklist and returns `{ cards, num_cards, num_unique_cards }`.
#[wasm_bindgen(js_name = parseDeck)]
pub fn parse_deck_js(text: &str) -> Result<JsValue, JsValue> {
    encode(&parse_deck(text), "parseDeck")
}
