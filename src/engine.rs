//! The comparison session: two raw texts plus one shared sort strategy.
//!
//! Everything else is derived, wholesale, on demand. The session keeps no
//! derived state between recomputations; a text or strategy change simply
//! makes the next accessor call recompute from scratch. That mirrors the
//! reactive model of the browser UI and keeps every accessor a pure
//! function of the three inputs.

use std::collections::{HashMap, HashSet};

use crate::align::{AlignedDecks, align_changes};
use crate::compare::{CardWithChange, Comparison, compare};
use crate::deck::{identity_key, parse_line};
use crate::reconcile::{ReorderSpec, reconcile_lines};
use crate::sort::{SortColumn, SortStrategy, next_strategy, sort_changes};

/// Which pane of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "lowercase"))]
pub enum Side {
    Old,
    New,
}

/// A deck comparison in progress.
#[derive(Debug, Clone, Default)]
pub struct CompareSession {
    old_text: String,
    new_text: String,
    strategy: SortStrategy,
}

impl CompareSession {
    pub fn new(old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            old_text: old_text.into(),
            new_text: new_text.into(),
            strategy: SortStrategy::Input,
        }
    }

    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Old => &self.old_text,
            Side::New => &self.new_text,
        }
    }

    pub fn set_text(&mut self, side: Side, text: impl Into<String>) {
        match side {
            Side::Old => self.old_text = text.into(),
            Side::New => self.new_text = text.into(),
        }
    }

    pub fn strategy(&self) -> SortStrategy {
        self.strategy
    }

    /// Selecting a strategy in either pane updates both; there is only
    /// one strategy value.
    pub fn set_strategy(&mut self, strategy: SortStrategy) {
        self.strategy = strategy;
    }

    /// Applies one header click and returns the new strategy.
    pub fn cycle(&mut self, column: SortColumn) -> SortStrategy {
        self.strategy = next_strategy(column, self.strategy);
        self.strategy
    }

    /// Classifies both sides from the current texts.
    pub fn comparison(&self) -> Comparison {
        compare(&self.old_text, &self.new_text)
    }

    /// One side's change records, in that deck's first-occurrence order.
    pub fn changes(&self, side: Side) -> Vec<CardWithChange> {
        let comparison = self.comparison();
        match side {
            Side::Old => comparison.old_changes,
            Side::New => comparison.new_changes,
        }
    }

    /// One side's change records under the current flat sort strategy.
    pub fn sorted_changes(&self, side: Side) -> Vec<CardWithChange> {
        sort_changes(&self.changes(side), self.strategy)
    }

    /// Both sides aligned row-for-row; alphabetical row order when the
    /// current strategy is the alphabetical aligned one.
    pub fn aligned(&self) -> AlignedDecks {
        let comparison = self.comparison();
        align_changes(
            &comparison.old_changes,
            &comparison.new_changes,
            self.strategy == SortStrategy::AlphaAligned,
        )
    }

    /// The strategy-change trigger: the text one pane's textarea should be
    /// rewritten to. `None` when nothing should happen (input order, or an
    /// empty pane).
    pub fn reorder_text(&self, side: Side) -> Option<String> {
        if self.strategy == SortStrategy::Input || self.text(side).is_empty() {
            return None;
        }
        if self.strategy.is_aligned() {
            let aligned = self.aligned();
            let slots = match side {
                Side::Old => aligned.old,
                Side::New => aligned.new,
            };
            return Some(reconcile_lines(
                self.text(side),
                ReorderSpec::Aligned { slots: &slots },
            ));
        }
        let changes = self.changes(side);
        Some(reconcile_lines(
            self.text(side),
            ReorderSpec::Sorted {
                changes: &changes,
                strategy: self.strategy,
            },
        ))
    }
}

/// What the badge column shows next to one raw text line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(tag = "kind", rename_all = "lowercase"))]
pub enum LineBadge {
    /// First line for an identity: its aggregated change record.
    Card(CardWithChange),
    /// A later line for an identity already badged above.
    Duplicate,
    /// Blank, unparseable, or not part of the comparison.
    Empty,
}

/// Badges each raw line of one pane against that pane's aggregated
/// changes. The first line of an identity carries the aggregate; repeats
/// are marked as duplicates so the totals are not double-read.
pub fn line_badges(text: &str, changes: &[CardWithChange]) -> Vec<LineBadge> {
    let by_key: HashMap<String, &CardWithChange> =
        changes.iter().map(|c| (c.identity_key(), c)).collect();

    let mut seen: HashSet<String> = HashSet::new();
    text.lines()
        .map(|line| {
            let Some(card) = parse_line(line) else {
                return LineBadge::Empty;
            };
            let key = identity_key(&card.name);
            if !seen.insert(key.clone()) {
                return LineBadge::Duplicate;
            }
            match by_key.get(&key) {
                Some(change) => LineBadge::Card((*change).clone()),
                None => LineBadge::Empty,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ChangeKind;

    #[test]
    fn reorder_is_skipped_for_input_and_empty_panes() {
        let mut session = CompareSession::new("2 Opt", "");
        assert_eq!(session.reorder_text(Side::Old), None);
        session.set_strategy(SortStrategy::AlphaAsc);
        assert!(session.reorder_text(Side::Old).is_some());
        assert_eq!(session.reorder_text(Side::New), None);
    }

    #[test]
    fn aligned_strategy_rewrites_both_panes_coincidently() {
        let mut session = CompareSession::new("1 Black Lotus", "1 Sol Ring");
        session.set_strategy(SortStrategy::Alignment);
        let old = session.reorder_text(Side::Old).unwrap();
        let new = session.reorder_text(Side::New).unwrap();
        // removed before added under rank table A.
        assert_eq!(old, "1 Black Lotus\n");
        assert_eq!(new, "\n1 Sol Ring");
    }

    #[test]
    fn cycle_mutates_the_shared_strategy() {
        let mut session = CompareSession::new("", "");
        assert_eq!(session.cycle(SortColumn::Status), SortStrategy::ChangeAsc);
        assert_eq!(session.cycle(SortColumn::Name), SortStrategy::AlphaAsc);
        assert_eq!(session.strategy(), SortStrategy::AlphaAsc);
    }

    #[test]
    fn sorted_changes_follow_the_current_strategy() {
        let mut session = CompareSession::new("1 Zebra\n1 Aardvark", "1 Zebra\n1 Aardvark");
        session.set_strategy(SortStrategy::AlphaAsc);
        let names: Vec<String> = session
            .sorted_changes(Side::Old)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Aardvark", "Zebra"]);
    }

    #[test]
    fn badges_mark_first_occurrence_duplicates_and_blanks() {
        let text = "2 Island\nnot not a card? still a name\n\n2 Island";
        let session = CompareSession::new(text, "4 Island");
        let changes = session.changes(Side::Old);
        let badges = line_badges(text, &changes);
        assert_eq!(badges.len(), 4);
        match &badges[0] {
            LineBadge::Card(card) => {
                assert_eq!(card.quantity, 4);
                assert_eq!(card.change, ChangeKind::Unchanged);
            }
            other => panic!("expected aggregated card badge, got {other:?}"),
        }
        assert!(matches!(badges[1], LineBadge::Card(_)));
        assert_eq!(badges[2], LineBadge::Empty);
        assert_eq!(badges[3], LineBadge::Duplicate);
    }
}
