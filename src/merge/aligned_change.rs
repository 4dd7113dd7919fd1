use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Edit, EditKind, Side};

/// One entry of a three-way alignment: the change one or both descendants
/// made to the same region of the base.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignedChange {
    Local(Edit),
    Remote(Edit),
    Both { local: Edit, remote: Edit },
}

impl AlignedChange {
    #[must_use]
    pub const fn unilateral(side: Side, edit: Edit) -> Self {
        match side {
            Side::Local => AlignedChange::Local(edit),
            Side::Remote => AlignedChange::Remote(edit),
        }
    }

    #[must_use]
    pub const fn local(&self) -> Option<Edit> { self.side(Side::Local) }

    #[must_use]
    pub const fn remote(&self) -> Option<Edit> { self.side(Side::Remote) }

    /// The edit of `side`, if that side takes part in the change.
    #[must_use]
    pub const fn side(&self, side: Side) -> Option<Edit> {
        match (self, side) {
            (AlignedChange::Local(edit), Side::Local)
            | (AlignedChange::Remote(edit), Side::Remote)
            | (AlignedChange::Both { local: edit, .. }, Side::Local)
            | (AlignedChange::Both { remote: edit, .. }, Side::Remote) => Some(*edit),
            (AlignedChange::Local(_), Side::Remote) | (AlignedChange::Remote(_), Side::Local) => {
                None
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EditKind {
        match self {
            AlignedChange::Local(edit) | AlignedChange::Remote(edit) => edit.kind,
            AlignedChange::Both { local, remote } => {
                if matches!(local.kind, EditKind::Conflict) || matches!(remote.kind, EditKind::Conflict)
                {
                    EditKind::Conflict
                } else {
                    local.kind
                }
            }
        }
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool { matches!(self.kind(), EditKind::Conflict) }

    /// The base region touched by the change.
    #[must_use]
    pub fn base_range(&self) -> Range<usize> {
        match self {
            AlignedChange::Local(edit) | AlignedChange::Remote(edit) => edit.base_range(),
            AlignedChange::Both { local, remote } => {
                local.base_start.min(remote.base_start)..local.base_end.max(remote.base_end)
            }
        }
    }

    /// The side whose edit is carried into a merge: local when present,
    /// remote otherwise.
    #[must_use]
    pub const fn applied(&self) -> (Side, Edit) {
        match self {
            AlignedChange::Local(edit) | AlignedChange::Both { local: edit, .. } => {
                (Side::Local, *edit)
            }
            AlignedChange::Remote(edit) => (Side::Remote, *edit),
        }
    }
}
