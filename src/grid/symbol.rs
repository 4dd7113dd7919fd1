use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The mark of one grid cell or column header.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Symbol {
    #[default]
    Unchanged,
    Inserted,
    Removed,
    Changed,
    ChangedLocal,
    ChangedRemote,
    Conflict,
}

/// Every symbol with its meaning, in display order.
pub const LEGEND: [(Symbol, &str); 7] = [
    (Symbol::Unchanged, "unchanged"),
    (Symbol::Inserted, "inserted"),
    (Symbol::Removed, "removed"),
    (Symbol::Changed, "changed"),
    (Symbol::ChangedLocal, "changed by the first descendant"),
    (Symbol::ChangedRemote, "changed by the second descendant"),
    (Symbol::Conflict, "conflict"),
];

impl Symbol {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Unchanged => ' ',
            Symbol::Inserted => '+',
            Symbol::Removed => '-',
            Symbol::Changed => '!',
            Symbol::ChangedLocal => '>',
            Symbol::ChangedRemote => '<',
            Symbol::Conflict => 'x',
        }
    }

    /// The mark of a cell touched by two changes.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (current, incoming) if current == incoming => current,
            (Symbol::Unchanged, marked) | (marked, Symbol::Unchanged) => marked,
            (Symbol::Conflict, _) | (_, Symbol::Conflict) => Symbol::Conflict,
            _ => Symbol::Changed,
        }
    }

    /// The symbol seen when comparing in the opposite direction.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Symbol::Inserted => Symbol::Removed,
            Symbol::Removed => Symbol::Inserted,
            Symbol::ChangedLocal => Symbol::ChangedRemote,
            Symbol::ChangedRemote => Symbol::ChangedLocal,
            other => other,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
