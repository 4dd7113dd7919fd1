#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    AlignedChange, AlignmentError, Placeholder, Side, Versions, diff,
    merge::combiner::combine,
};

/// The complete alignment of a comparison: every change in base order, the
/// positions of the conflicting ones, and whether each side has changes that
/// could be merged without conflict.
///
/// A cache is computed wholesale and never edited afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeCache {
    changes: Vec<AlignedChange>,
    conflicts: Vec<usize>,
    mergeable: [bool; 2],
}

impl MergeCache {
    pub(crate) fn from_changes(changes: Vec<AlignedChange>) -> Self {
        let conflicts = changes
            .iter()
            .enumerate()
            .filter(|(_, change)| change.is_conflict())
            .map(|(index, _)| index)
            .collect();

        let mergeable = [Side::Local, Side::Remote].map(|side| {
            changes
                .iter()
                .any(|change| !change.is_conflict() && change.side(side).is_some())
        });

        Self {
            changes,
            conflicts,
            mergeable,
        }
    }

    /// Alignment of a single pairwise comparison: every change of `other`
    /// becomes a local-only change.
    #[must_use]
    pub fn two_way<T>(base: &[T], other: &[T]) -> Self
    where
        T: PartialEq,
    {
        Self::from_changes(
            diff(base, other)
                .into_iter()
                .filter(|edit| !edit.is_equal())
                .map(AlignedChange::Local)
                .collect(),
        )
    }

    /// Diff both descendants against the base and combine the scripts.
    ///
    /// # Errors
    ///
    /// Only fails if the differ produced a malformed script.
    pub fn three_way<T>(versions: Versions<'_, T>) -> Result<Self, AlignmentError>
    where
        T: PartialEq + Placeholder,
    {
        let local_diff = diff(versions.base, versions.local);
        let remote_diff = diff(versions.base, versions.remote);
        combine(versions, &local_diff, &remote_diff)
    }

    #[must_use]
    pub fn changes(&self) -> &[AlignedChange] { &self.changes }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &AlignedChange> { self.changes.iter() }

    #[must_use]
    pub fn len(&self) -> usize { self.changes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.changes.is_empty() }

    /// Indices into `changes()` of the conflicting changes.
    #[must_use]
    pub fn conflicts(&self) -> &[usize] { &self.conflicts }

    #[must_use]
    pub fn has_conflicts(&self) -> bool { !self.conflicts.is_empty() }

    /// Whether `side` contributes at least one change that is not part of a
    /// conflict.
    #[must_use]
    pub fn has_mergeable_changes(&self, side: Side) -> bool { self.mergeable[side.index()] }
}

impl<'a> IntoIterator for &'a MergeCache {
    type Item = &'a AlignedChange;
    type IntoIter = std::slice::Iter<'a, AlignedChange>;

    fn into_iter(self) -> Self::IntoIter { self.changes.iter() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Edit, EditKind};

    #[test]
    fn test_two_way_lifts_changes_to_local() {
        let cache = MergeCache::two_way(&["a", "b", "c"], &["a", "c", "d"]);

        assert_eq!(
            cache.changes(),
            &[
                AlignedChange::Local(Edit::new(EditKind::Delete, 1..2, 1..1)),
                AlignedChange::Local(Edit::new(EditKind::Insert, 3..3, 2..3)),
            ]
        );
        assert!(!cache.has_conflicts());
        assert!(cache.has_mergeable_changes(Side::Local));
        assert!(!cache.has_mergeable_changes(Side::Remote));
    }

    #[test]
    fn test_mergeable_flags_ignore_conflicts() {
        let cache = MergeCache::from_changes(vec![
            AlignedChange::Both {
                local: Edit::new(EditKind::Conflict, 0..1, 0..1),
                remote: Edit::new(EditKind::Conflict, 0..1, 0..2),
            },
            AlignedChange::Remote(Edit::new(EditKind::Delete, 2..3, 3..3)),
        ]);

        assert_eq!(cache.conflicts(), &[0]);
        assert!(!cache.has_mergeable_changes(Side::Local));
        assert!(cache.has_mergeable_changes(Side::Remote));
    }
}
