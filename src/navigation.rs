use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AlignedChange, MergeCache, Pane, Side};

/// The changes around one position of a sequence, as indices into
/// `MergeCache::changes()`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineChanges {
    /// The change covering the position.
    pub enclosing: Option<usize>,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

impl LineChanges {
    const fn new(enclosing: Option<usize>, previous: Option<usize>, next: Option<usize>) -> Self {
        Self {
            enclosing,
            previous,
            next,
        }
    }
}

/// Per-pane lookup table from a position to the surrounding changes, for
/// jumping between changes interactively.
///
/// Every pane has one entry per element plus one for the position after the
/// last element. An insertion covers no element of its own, so it claims the
/// position right after it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationIndex {
    panes: [Vec<LineChanges>; 3],
}

impl NavigationIndex {
    /// Index `cache` over sequences of the given lengths. Two-way
    /// comparisons pass no `remote_len` and get an empty remote pane.
    #[must_use]
    pub fn new(
        cache: &MergeCache,
        local_len: usize,
        base_len: usize,
        remote_len: Option<usize>,
    ) -> Self {
        let lens = [Some(local_len), Some(base_len), remote_len];
        let mut panes = lens.map(|len| vec![LineChanges::default(); len.map_or(0, |len| len + 1)]);

        let changes = cache.changes();
        let mut previous = [None; 3];
        let mut next = Pane::ALL.map(|pane| find_next(changes, pane, 0));
        let mut claimed = [0; 3];

        for (index, change) in changes.iter().enumerate() {
            for pane in Pane::ALL {
                let p = pane.index();
                let Some(range) = pane_range(change, pane) else {
                    continue;
                };

                if range.start > claimed[p] {
                    fill(
                        &mut panes[p],
                        claimed[p]..range.start,
                        LineChanges::new(None, previous[p], next[p]),
                    );
                }

                let end = if range.is_empty() {
                    range.end + 1
                } else {
                    range.end
                };

                next[p] = find_next(changes, pane, index + 1);
                fill(
                    &mut panes[p],
                    range.start..end,
                    LineChanges::new(Some(index), previous[p], next[p]),
                );
                previous[p] = Some(index);
                claimed[p] = end;
            }
        }

        for pane in Pane::ALL {
            let p = pane.index();
            let end = panes[p].len();
            fill(
                &mut panes[p],
                claimed[p]..end,
                LineChanges::new(None, previous[p], next[p]),
            );
        }

        Self { panes }
    }

    /// The changes around `line` of `pane`, `None` past the end.
    #[must_use]
    pub fn lookup(&self, pane: Pane, line: usize) -> Option<LineChanges> {
        self.panes[pane.index()].get(line).copied()
    }

    #[must_use]
    pub fn pane(&self, pane: Pane) -> &[LineChanges] { &self.panes[pane.index()] }
}

/// The range a change covers in `pane`. The base pane follows the local
/// edit, or the remote one for remote-only changes.
fn pane_range(change: &AlignedChange, pane: Pane) -> Option<Range<usize>> {
    match pane {
        Pane::Local => change.local().map(|edit| edit.other_range()),
        Pane::Base => change
            .local()
            .or_else(|| change.remote())
            .map(|edit| edit.base_range()),
        Pane::Remote => change.remote().map(|edit| edit.other_range()),
    }
}

/// The first change at or after `from` visible in `pane`. Every change
/// touches the base, the descendants only see their own.
fn find_next(changes: &[AlignedChange], pane: Pane, from: usize) -> Option<usize> {
    let side = match pane {
        Pane::Base => return (from < changes.len()).then_some(from),
        Pane::Local => Side::Local,
        Pane::Remote => Side::Remote,
    };

    changes
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, change)| change.side(side).is_some())
        .map(|(index, _)| index)
}

fn fill(lines: &mut [LineChanges], range: Range<usize>, value: LineChanges) {
    let end = range.end.min(lines.len());
    if let Some(lines) = lines.get_mut(range.start.min(end)..end) {
        lines.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Versions;

    fn entries(lines: &[(Option<usize>, Option<usize>, Option<usize>)]) -> Vec<LineChanges> {
        lines
            .iter()
            .map(|(enclosing, previous, next)| LineChanges::new(*enclosing, *previous, *next))
            .collect()
    }

    #[test]
    fn test_two_way() {
        let base = ["a", "b", "c", "d"];
        let other = ["a", "X", "c", "d", "e"];
        let cache = MergeCache::two_way(&base, &other);
        let index = NavigationIndex::new(&cache, other.len(), base.len(), None);

        assert_eq!(
            index.pane(Pane::Base),
            entries(&[
                (None, None, Some(0)),
                (Some(0), None, Some(1)),
                (None, Some(0), Some(1)),
                (None, Some(0), Some(1)),
                (Some(1), Some(0), None),
            ])
        );
        assert_eq!(
            index.pane(Pane::Local),
            entries(&[
                (None, None, Some(0)),
                (Some(0), None, Some(1)),
                (None, Some(0), Some(1)),
                (None, Some(0), Some(1)),
                (Some(1), Some(0), None),
                (None, Some(1), None),
            ])
        );
        assert!(index.pane(Pane::Remote).is_empty());
        assert_eq!(index.lookup(Pane::Local, 6), None);
    }

    #[test]
    fn test_three_way_side_panes_skip_other_side() {
        let base = ["a", "b", "c"];
        let local = ["a", "X", "c"];
        let remote = ["a", "b", "c", "Y"];
        let cache = MergeCache::three_way(Versions::new(&local, &base, &remote)).unwrap();
        let index = NavigationIndex::new(&cache, local.len(), base.len(), Some(remote.len()));

        assert_eq!(
            index.pane(Pane::Local),
            entries(&[
                (None, None, Some(0)),
                (Some(0), None, None),
                (None, Some(0), None),
                (None, Some(0), None),
            ])
        );
        assert_eq!(
            index.pane(Pane::Base),
            entries(&[
                (None, None, Some(0)),
                (Some(0), None, Some(1)),
                (None, Some(0), Some(1)),
                (Some(1), Some(0), None),
            ])
        );
        assert_eq!(
            index.pane(Pane::Remote),
            entries(&[
                (None, None, Some(1)),
                (None, None, Some(1)),
                (None, None, Some(1)),
                (Some(1), None, None),
                (None, Some(1), None),
            ])
        );
    }

    #[test]
    fn test_no_changes() {
        let index = NavigationIndex::new(&MergeCache::default(), 2, 2, Some(2));

        assert_eq!(index.lookup(Pane::Remote, 2), Some(LineChanges::default()));
    }
}
