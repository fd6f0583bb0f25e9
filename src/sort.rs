//! Sort strategies for change lists and the column-header cycling rules.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::compare::{CardWithChange, ChangeKind};

/// How a pane orders its rows. Both panes share one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum SortStrategy {
    #[default]
    #[cfg_attr(feature = "serialization", serde(rename = "input"))]
    Input,
    #[cfg_attr(feature = "serialization", serde(rename = "alphabetical-asc"))]
    AlphaAsc,
    #[cfg_attr(feature = "serialization", serde(rename = "alphabetical-desc"))]
    AlphaDesc,
    #[cfg_attr(feature = "serialization", serde(rename = "alphabetical-aligned"))]
    AlphaAligned,
    #[cfg_attr(feature = "serialization", serde(rename = "changeType-asc"))]
    ChangeAsc,
    #[cfg_attr(feature = "serialization", serde(rename = "changeType-desc"))]
    ChangeDesc,
    #[cfg_attr(feature = "serialization", serde(rename = "alignment"))]
    Alignment,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 7] = [
        SortStrategy::Input,
        SortStrategy::AlphaAsc,
        SortStrategy::AlphaDesc,
        SortStrategy::AlphaAligned,
        SortStrategy::ChangeAsc,
        SortStrategy::ChangeDesc,
        SortStrategy::Alignment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortStrategy::Input => "input",
            SortStrategy::AlphaAsc => "alphabetical-asc",
            SortStrategy::AlphaDesc => "alphabetical-desc",
            SortStrategy::AlphaAligned => "alphabetical-aligned",
            SortStrategy::ChangeAsc => "changeType-asc",
            SortStrategy::ChangeDesc => "changeType-desc",
            SortStrategy::Alignment => "alignment",
        }
    }

    /// True for the two strategies that keep both panes row-for-row
    /// coincident with gap slots.
    pub fn is_aligned(self) -> bool {
        matches!(self, SortStrategy::Alignment | SortStrategy::AlphaAligned)
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy name that is not one of the seven known ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort strategy: {}", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for SortStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Change-kind rank for ascending change-type order.
///
/// The two tables are written out side by side on purpose: `Added` ranks 2
/// in both directions, which is the shipped behavior of the comparison
/// tool, not a transcription slip.
pub fn change_rank_asc(kind: ChangeKind) -> u8 {
    match kind {
        ChangeKind::Removed => 0,
        ChangeKind::Decreased => 1,
        ChangeKind::Added => 2,
        ChangeKind::Increased => 3,
        ChangeKind::Unchanged => 4,
    }
}

/// Change-kind rank for descending change-type order.
pub fn change_rank_desc(kind: ChangeKind) -> u8 {
    match kind {
        ChangeKind::Removed => 4,
        ChangeKind::Decreased => 3,
        ChangeKind::Added => 2,
        ChangeKind::Increased => 1,
        ChangeKind::Unchanged => 0,
    }
}

/// Case-insensitive name ordering, the tie-break everywhere.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Returns the comparator ordering of two changes under a strategy.
/// `Input` and the aligned strategies impose no order of their own.
pub fn compare_changes(a: &CardWithChange, b: &CardWithChange, strategy: SortStrategy) -> Ordering {
    match strategy {
        SortStrategy::AlphaAsc => compare_names(&a.name, &b.name),
        SortStrategy::AlphaDesc => compare_names(&b.name, &a.name),
        SortStrategy::ChangeAsc => change_rank_asc(a.change)
            .cmp(&change_rank_asc(b.change))
            .then_with(|| compare_names(&a.name, &b.name)),
        SortStrategy::ChangeDesc => change_rank_desc(a.change)
            .cmp(&change_rank_desc(b.change))
            .then_with(|| compare_names(&a.name, &b.name)),
        SortStrategy::Input | SortStrategy::AlphaAligned | SortStrategy::Alignment => {
            Ordering::Equal
        }
    }
}

/// Stable sort of a change list under a strategy. Pass-through for `Input`
/// and the aligned strategies (alignment assigns rows itself).
pub fn sort_changes(changes: &[CardWithChange], strategy: SortStrategy) -> Vec<CardWithChange> {
    let mut sorted = changes.to_vec();
    sorted.sort_by(|a, b| compare_changes(a, b, strategy));
    sorted
}

/// The two clickable column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "lowercase"))]
pub enum SortColumn {
    /// The change-kind badge column.
    Status,
    /// The card name column.
    Name,
}

/// The header-click cycle, as an explicit transition table. Clicking a
/// header whose family is not currently active starts that family's cycle
/// from the top.
pub fn next_strategy(column: SortColumn, current: SortStrategy) -> SortStrategy {
    match (column, current) {
        (SortColumn::Status, SortStrategy::ChangeAsc) => SortStrategy::ChangeDesc,
        (SortColumn::Status, SortStrategy::ChangeDesc) => SortStrategy::Alignment,
        (SortColumn::Status, SortStrategy::Alignment) => SortStrategy::Input,
        (SortColumn::Status, _) => SortStrategy::ChangeAsc,
        (SortColumn::Name, SortStrategy::AlphaAsc) => SortStrategy::AlphaDesc,
        (SortColumn::Name, SortStrategy::AlphaDesc) => SortStrategy::AlphaAligned,
        (SortColumn::Name, SortStrategy::AlphaAligned) => SortStrategy::Input,
        (SortColumn::Name, _) => SortStrategy::AlphaAsc,
    }
}
