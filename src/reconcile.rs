//! Rewriting raw decklist text to match a computed order.
//!
//! Triggered when the sort strategy changes, never per keystroke. Sorted
//! mode reorders the user's own lines, so duplicates and `[SET:NUM]`
//! annotations survive verbatim; aligned mode rebuilds the text from the
//! slot sequence so both panes stay line-for-line coincident, with an
//! empty line per gap.

use std::cmp::Ordering;

use crate::align::AlignedSlot;
use crate::compare::{CardWithChange, ChangeKind};
use crate::deck::parse_line;
use crate::sort::{SortStrategy, change_rank_asc, change_rank_desc, compare_names};

/// The order a pane's text should be rewritten to.
#[derive(Debug, Clone, Copy)]
pub enum ReorderSpec<'a> {
    /// Reorder the raw lines under a flat sort strategy, looking each
    /// line's change up in this pane's aggregated change list.
    Sorted {
        changes: &'a [CardWithChange],
        strategy: SortStrategy,
    },
    /// Rebuild the text from this pane's aligned slots.
    Aligned { slots: &'a [AlignedSlot] },
}

/// Rewrites `raw_text` into the given order. `Input` and the aligned
/// strategies under `Sorted` leave the text untouched (reordering for
/// those goes through `Aligned`).
pub fn reconcile_lines(raw_text: &str, order: ReorderSpec<'_>) -> String {
    match order {
        ReorderSpec::Sorted { changes, strategy } => match strategy {
            SortStrategy::Input | SortStrategy::Alignment | SortStrategy::AlphaAligned => {
                raw_text.to_string()
            }
            _ => reorder_raw_lines(raw_text, changes, strategy),
        },
        ReorderSpec::Aligned { slots } => rebuild_from_slots(slots),
    }
}

struct ParsedLine<'a> {
    original: &'a str,
    name: String,
}

fn reorder_raw_lines(raw_text: &str, changes: &[CardWithChange], strategy: SortStrategy) -> String {
    // Unparseable and blank lines drop out of the reordered text; only
    // lines that resolve to a card participate.
    let mut lines: Vec<ParsedLine<'_>> = raw_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            parse_line(line).map(|card| ParsedLine {
                original: line,
                name: card.name,
            })
        })
        .collect();

    lines.sort_by(|a, b| compare_lines(a, b, changes, strategy));

    let originals: Vec<&str> = lines.iter().map(|l| l.original).collect();
    originals.join("\n")
}

fn compare_lines(
    a: &ParsedLine<'_>,
    b: &ParsedLine<'_>,
    changes: &[CardWithChange],
    strategy: SortStrategy,
) -> Ordering {
    match strategy {
        SortStrategy::AlphaAsc => compare_names(&a.name, &b.name),
        SortStrategy::AlphaDesc => compare_names(&b.name, &a.name),
        SortStrategy::ChangeAsc => change_rank_asc(line_kind(a, changes))
            .cmp(&change_rank_asc(line_kind(b, changes)))
            .then_with(|| compare_names(&a.name, &b.name)),
        SortStrategy::ChangeDesc => change_rank_desc(line_kind(a, changes))
            .cmp(&change_rank_desc(line_kind(b, changes)))
            .then_with(|| compare_names(&a.name, &b.name)),
        _ => Ordering::Equal,
    }
}

/// A line with no aggregated change record ranks as unchanged.
fn line_kind(line: &ParsedLine<'_>, changes: &[CardWithChange]) -> ChangeKind {
    let key = crate::deck::identity_key(&line.name);
    changes
        .iter()
        .find(|c| c.identity_key() == key)
        .map(|c| c.change)
        .unwrap_or(ChangeKind::Unchanged)
}

fn rebuild_from_slots(slots: &[AlignedSlot]) -> String {
    let lines: Vec<String> = slots
        .iter()
        .map(|slot| match slot {
            Some(card) => format!("{} {}", card.quantity, card.name),
            None => String::new(),
        })
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align_changes;
    use crate::compare::compare;

    #[test]
    fn alpha_sort_keeps_original_lines_verbatim() {
        let raw = "4 Lightning Bolt [2X2:117]\n2x Counterspell\n1 Black Lotus";
        let cmp = compare(raw, "");
        let out = reconcile_lines(
            raw,
            ReorderSpec::Sorted {
                changes: &cmp.old_changes,
                strategy: SortStrategy::AlphaAsc,
            },
        );
        assert_eq!(out, "1 Black Lotus\n2x Counterspell\n4 Lightning Bolt [2X2:117]");
    }

    #[test]
    fn duplicate_lines_sort_adjacently() {
        let raw = "2 Island\n1 Mountain\n2 Island";
        let cmp = compare(raw, raw);
        let out = reconcile_lines(
            raw,
            ReorderSpec::Sorted {
                changes: &cmp.old_changes,
                strategy: SortStrategy::AlphaAsc,
            },
        );
        assert_eq!(out, "2 Island\n2 Island\n1 Mountain");
    }

    #[test]
    fn change_sort_orders_lines_by_rank() {
        let old = "1 Stays\n1 Leaves\n3 Shrinks";
        let new = "1 Stays\n2 Shrinks\n1 Arrives";
        let cmp = compare(old, new);
        let out = reconcile_lines(
            old,
            ReorderSpec::Sorted {
                changes: &cmp.old_changes,
                strategy: SortStrategy::ChangeAsc,
            },
        );
        // removed, then decreased, then unchanged.
        assert_eq!(out, "1 Leaves\n3 Shrinks\n1 Stays");
    }

    #[test]
    fn input_strategy_leaves_text_alone() {
        let raw = "1 B\n\n1 A";
        let out = reconcile_lines(
            raw,
            ReorderSpec::Sorted {
                changes: &[],
                strategy: SortStrategy::Input,
            },
        );
        assert_eq!(out, raw);
    }

    #[test]
    fn blank_lines_drop_out_of_sorted_text() {
        let raw = "1 B\n\n1 A";
        let cmp = compare(raw, "");
        let out = reconcile_lines(
            raw,
            ReorderSpec::Sorted {
                changes: &cmp.old_changes,
                strategy: SortStrategy::AlphaAsc,
            },
        );
        assert_eq!(out, "1 A\n1 B");
    }

    #[test]
    fn aligned_rebuild_emits_empty_lines_for_gaps() {
        let cmp = compare("1 Ancestral Recall", "1 Brainstorm");
        let aligned = align_changes(&cmp.old_changes, &cmp.new_changes, true);
        let old_text = reconcile_lines("", ReorderSpec::Aligned { slots: &aligned.old });
        let new_text = reconcile_lines("", ReorderSpec::Aligned { slots: &aligned.new });
        assert_eq!(old_text, "1 Ancestral Recall\n");
        assert_eq!(new_text, "\n1 Brainstorm");
    }

    #[test]
    fn aligned_panes_stay_line_for_line_coincident() {
        let cmp = compare("4 Bolt\n1 Lotus", "3 Bolt\n1 Sol Ring");
        let aligned = align_changes(&cmp.old_changes, &cmp.new_changes, false);
        let old_text = reconcile_lines("", ReorderSpec::Aligned { slots: &aligned.old });
        let new_text = reconcile_lines("", ReorderSpec::Aligned { slots: &aligned.new });
        assert_eq!(old_text.split('\n').count(), new_text.split('\n').count());
    }
}
