//! Row alignment of two change lists.
//!
//! Produces two equal-length sequences where row *i* on both sides refers
//! to the same card identity, with a gap slot on whichever side does not
//! carry the card. A card present on both sides always shares one row.

use std::collections::HashMap;

use crate::compare::CardWithChange;
use crate::sort::{change_rank_asc, compare_names};

/// A row position on one side: the card, or a gap.
pub type AlignedSlot = Option<CardWithChange>;

/// The two aligned columns. Always equal length, never both `None` at the
/// same index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedDecks {
    pub old: Vec<AlignedSlot>,
    pub new: Vec<AlignedSlot>,
}

impl AlignedDecks {
    pub fn len(&self) -> usize {
        self.old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old.is_empty()
    }

    /// Iterator over paired rows.
    pub fn rows(&self) -> impl Iterator<Item = (&AlignedSlot, &AlignedSlot)> {
        self.old.iter().zip(self.new.iter())
    }
}

/// Aligns the two sides of a comparison. With `alphabetical` set, rows are
/// ordered purely by name; otherwise by ascending change-type rank with an
/// alphabetical tie-break. The change kind of a shared identity is read
/// from the old side.
pub fn align_changes(
    old_changes: &[CardWithChange],
    new_changes: &[CardWithChange],
    alphabetical: bool,
) -> AlignedDecks {
    let old_by_key: HashMap<String, &CardWithChange> = old_changes
        .iter()
        .map(|c| (c.identity_key(), c))
        .collect();
    let new_by_key: HashMap<String, &CardWithChange> = new_changes
        .iter()
        .map(|c| (c.identity_key(), c))
        .collect();

    // Union of identities, old side first so a shared key reads its kind
    // and display name from the old deck.
    let mut keys: Vec<String> = Vec::new();
    for change in old_changes {
        keys.push(change.identity_key());
    }
    for change in new_changes {
        let key = change.identity_key();
        if !old_by_key.contains_key(&key) {
            keys.push(key);
        }
    }

    keys.sort_by(|a, b| {
        let card_a = old_by_key.get(a).or_else(|| new_by_key.get(a));
        let card_b = old_by_key.get(b).or_else(|| new_by_key.get(b));
        let (Some(card_a), Some(card_b)) = (card_a, card_b) else {
            return compare_names(a, b);
        };
        if alphabetical {
            compare_names(&card_a.name, &card_b.name)
        } else {
            change_rank_asc(card_a.change)
                .cmp(&change_rank_asc(card_b.change))
                .then_with(|| compare_names(&card_a.name, &card_b.name))
        }
    });

    let mut aligned = AlignedDecks::default();
    for key in &keys {
        aligned.old.push(old_by_key.get(key).map(|c| (*c).clone()));
        aligned.new.push(new_by_key.get(key).map(|c| (*c).clone()));
    }
    aligned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;

    fn slot_name(slot: &AlignedSlot) -> Option<&str> {
        slot.as_ref().map(|c| c.name.as_str())
    }

    #[test]
    fn one_sided_cards_get_gap_rows() {
        let cmp = compare("1 Ancestral Recall", "1 Brainstorm");
        let aligned = align_changes(&cmp.old_changes, &cmp.new_changes, true);
        assert_eq!(aligned.len(), 2);
        assert_eq!(slot_name(&aligned.old[0]), Some("Ancestral Recall"));
        assert_eq!(slot_name(&aligned.new[0]), None);
        assert_eq!(slot_name(&aligned.old[1]), None);
        assert_eq!(slot_name(&aligned.new[1]), Some("Brainstorm"));
    }

    #[test]
    fn shared_identities_share_one_row() {
        let cmp = compare("2 Opt\n1 Ponder", "4 Opt\n1 Preordain");
        let aligned = align_changes(&cmp.old_changes, &cmp.new_changes, true);
        assert_eq!(aligned.len(), 3);
        let opt_row = aligned
            .rows()
            .find(|(old, _)| slot_name(old) == Some("Opt"))
            .unwrap();
        assert_eq!(slot_name(opt_row.1), Some("Opt"));
        assert_eq!(opt_row.0.as_ref().unwrap().quantity, 2);
        assert_eq!(opt_row.1.as_ref().unwrap().quantity, 4);
    }

    #[test]
    fn no_row_is_double_gap_and_lengths_match() {
        let cmp = compare(
            "4 Lightning Bolt\n2 Counterspell\n1 Black Lotus",
            "3 Lightning Bolt\n2 Counterspell\n1 Sol Ring",
        );
        for alphabetical in [false, true] {
            let aligned = align_changes(&cmp.old_changes, &cmp.new_changes, alphabetical);
            assert_eq!(aligned.old.len(), aligned.new.len());
            for (old, new) in aligned.rows() {
                assert!(old.is_some() || new.is_some());
            }
        }
    }

    #[test]
    fn row_count_is_the_identity_union() {
        let cmp = compare("4 Lightning Bolt\n1 Black Lotus", "3 lightning bolt\n1 Sol Ring");
        let aligned = align_changes(&cmp.old_changes, &cmp.new_changes, false);
        // bolt is shared (case-insensitively), lotus and ring are one-sided.
        assert_eq!(aligned.len(), 3);
    }

    #[test]
    fn change_mode_orders_by_rank_then_name() {
        let cmp = compare(
            "1 Unchanged Card\n2 Shrinking Card\n1 Leaving Card",
            "1 Unchanged Card\n1 Shrinking Card\n1 Arriving Card",
        );
        let aligned = align_changes(&cmp.old_changes, &cmp.new_changes, false);
        let row_names: Vec<&str> = aligned
            .rows()
            .map(|(old, new)| slot_name(old).or(slot_name(new)).unwrap())
            .collect();
        // removed=0, decreased=1, added=2, unchanged=4.
        assert_eq!(
            row_names,
            ["Leaving Card", "Shrinking Card", "Arriving Card", "Unchanged Card"]
        );
    }

    #[test]
    fn alphabetical_mode_orders_rows_by_name() {
        let cmp = compare("1 Zebra\n1 Mongoose", "1 Aardvark\n1 Mongoose");
        let aligned = align_changes(&cmp.old_changes, &cmp.new_changes, true);
        let row_names: Vec<&str> = aligned
            .rows()
            .map(|(old, new)| slot_name(old).or(slot_name(new)).unwrap())
            .collect();
        assert_eq!(row_names, ["Aardvark", "Mongoose", "Zebra"]);
    }
}
