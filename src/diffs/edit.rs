use std::{fmt::Display, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Equal,
    Insert,
    Delete,
    Replace,

    /// Only produced when combining two edit scripts.
    Conflict,
}

impl EditKind {
    /// The kind of a change replacing `base_len` elements with `other_len`
    /// elements. Two empty spans classify as an insert of nothing.
    #[must_use]
    pub const fn classify(base_len: usize, other_len: usize) -> Self {
        match (base_len, other_len) {
            (0, _) => EditKind::Insert,
            (_, 0) => EditKind::Delete,
            _ => EditKind::Replace,
        }
    }

    /// Whether a span of this kind may cover `base_len` base and `other_len`
    /// other elements in a pairwise edit script.
    #[must_use]
    pub const fn fits(self, base_len: usize, other_len: usize) -> bool {
        match self {
            EditKind::Equal => base_len == other_len && base_len > 0,
            EditKind::Insert => base_len == 0 && other_len > 0,
            EditKind::Delete => base_len > 0 && other_len == 0,
            EditKind::Replace => base_len > 0 && other_len > 0,
            EditKind::Conflict => false,
        }
    }
}

impl Display for EditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditKind::Equal => write!(f, "equal"),
            EditKind::Insert => write!(f, "insert"),
            EditKind::Delete => write!(f, "delete"),
            EditKind::Replace => write!(f, "replace"),
            EditKind::Conflict => write!(f, "conflict"),
        }
    }
}

/// A tagged span of an edit script: `base[base_start..base_end]` becomes
/// `other[other_start..other_end]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edit {
    pub kind: EditKind,
    pub base_start: usize,
    pub base_end: usize,
    pub other_start: usize,
    pub other_end: usize,
}

impl Edit {
    #[must_use]
    pub fn new(kind: EditKind, base: Range<usize>, other: Range<usize>) -> Self {
        Self {
            kind,
            base_start: base.start,
            base_end: base.end,
            other_start: other.start,
            other_end: other.end,
        }
    }

    /// An edit whose kind is derived from the lengths of its ranges.
    #[must_use]
    pub fn classified(base: Range<usize>, other: Range<usize>) -> Self {
        let kind = EditKind::classify(base.end - base.start, other.end - other.start);
        Self::new(kind, base, other)
    }

    #[must_use]
    pub const fn base_range(&self) -> Range<usize> { self.base_start..self.base_end }

    #[must_use]
    pub const fn other_range(&self) -> Range<usize> { self.other_start..self.other_end }

    #[must_use]
    pub const fn base_len(&self) -> usize { self.base_end.saturating_sub(self.base_start) }

    #[must_use]
    pub const fn other_len(&self) -> usize { self.other_end.saturating_sub(self.other_start) }

    #[must_use]
    pub const fn is_equal(&self) -> bool { matches!(self.kind, EditKind::Equal) }
}

impl Display for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}..{} -> {}..{}",
            self.kind, self.base_start, self.base_end, self.other_start, self.other_end
        )
    }
}
