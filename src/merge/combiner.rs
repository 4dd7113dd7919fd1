use std::{iter::Peekable, ops::Range, vec};

use log::debug;

use crate::{
    AlignedChange, AlignmentError, Edit, EditKind, MergeCache, Placeholder, Side, Versions,
    validate_script,
};

type Queue = Peekable<vec::IntoIter<Edit>>;

/// The region covered by a group of overlapping edits, in all three
/// sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MergeSpan {
    base: Range<usize>,
    local: Range<usize>,
    remote: Range<usize>,
}

impl MergeSpan {
    /// Extend both groups to the union of their base ranges. The parts of a
    /// side outside its own edits are unchanged, so its range shifts by the
    /// same amount as the base range.
    fn extrapolate(local: (Edit, Edit), remote: (Edit, Edit)) -> Self {
        let low = local.0.base_start.min(remote.0.base_start);
        let high = local.1.base_end.max(remote.1.base_end);

        let widen = |(first, last): (Edit, Edit)| {
            first.other_start.saturating_sub(first.base_start - low)
                ..last.other_end + (high - last.base_end)
        };

        Self {
            base: low..high,
            local: widen(local),
            remote: widen(remote),
        }
    }

    fn other(&self, side: Side) -> Range<usize> {
        match side {
            Side::Local => self.local.clone(),
            Side::Remote => self.remote.clone(),
        }
    }
}

/// Combine the edit scripts base→local and base→remote into one alignment.
///
/// Changes touching disjoint base regions are kept as they are. Overlapping
/// changes are grouped and resolved: identical edits and edits that only
/// compete with placeholder content merge cleanly, anything else becomes a
/// conflict.
///
/// # Errors
///
/// Returns an `AlignmentError` if either script is not an ordered, gap-free
/// edit script covering the base and its descendant.
pub fn combine<T>(
    versions: Versions<'_, T>,
    local_diff: &[Edit],
    remote_diff: &[Edit],
) -> Result<MergeCache, AlignmentError>
where
    T: PartialEq + Placeholder,
{
    validate_script(
        Side::Local,
        local_diff,
        versions.base.len(),
        versions.local.len(),
    )?;
    validate_script(
        Side::Remote,
        remote_diff,
        versions.base.len(),
        versions.remote.len(),
    )?;

    let mut queues = [pending(local_diff), pending(remote_diff)];
    let mut changes = Vec::new();

    while let Some(lead) = pick_lead(&mut queues) {
        let groups = group_overlapping(&mut queues, lead);

        let bounds = |group: &[Edit]| group.first().copied().zip(group.last().copied());
        match (
            bounds(&groups[Side::Local.index()]),
            bounds(&groups[Side::Remote.index()]),
        ) {
            (Some(local), Some(remote)) => {
                let span = MergeSpan::extrapolate(local, remote);
                changes.extend(auto_merge(versions, span));
            }
            _ => changes.extend(
                groups[lead.index()]
                    .iter()
                    .map(|edit| AlignedChange::unilateral(lead, *edit)),
            ),
        }
    }

    Ok(MergeCache::from_changes(changes))
}

fn pending(script: &[Edit]) -> Queue {
    script
        .iter()
        .filter(|edit| !edit.is_equal())
        .copied()
        .collect::<Vec<_>>()
        .into_iter()
        .peekable()
}

/// The side whose next edit starts earliest in the base. On a tie an insert
/// goes first, so that it lands before whatever the other side does at the
/// same position.
fn pick_lead(queues: &mut [Queue; 2]) -> Option<Side> {
    let [local, remote] = queues;
    match (local.peek(), remote.peek()) {
        (None, None) => None,
        (Some(_), None) => Some(Side::Local),
        (None, Some(_)) => Some(Side::Remote),
        (Some(local), Some(remote)) => {
            let lead = if local.base_start != remote.base_start {
                if local.base_start < remote.base_start {
                    Side::Local
                } else {
                    Side::Remote
                }
            } else if local.kind == EditKind::Insert || remote.kind != EditKind::Insert {
                Side::Local
            } else {
                Side::Remote
            };
            Some(lead)
        }
    }
}

/// Pop the lead edit and every edit of either side overlapping it,
/// transitively.
fn group_overlapping(queues: &mut [Queue; 2], lead: Side) -> [Vec<Edit>; 2] {
    let mut groups = [Vec::new(), Vec::new()];
    let Some(first) = queues[lead.index()].next() else {
        return groups;
    };
    groups[lead.index()].push(first);

    let mut reach = first.base_end;
    let mut absorbing = lead.other();

    while let Some(candidate) = queues[absorbing.index()].next_if(|candidate| {
        candidate.base_start < reach
            || (candidate.base_start == reach
                && first.kind == EditKind::Insert
                && candidate.kind == EditKind::Insert)
    }) {
        groups[absorbing.index()].push(candidate);

        if candidate.base_end > reach {
            reach = candidate.base_end;
            absorbing = absorbing.other();
        }
    }

    groups
}

fn auto_merge<T>(versions: Versions<'_, T>, span: MergeSpan) -> Vec<AlignedChange>
where
    T: PartialEq + Placeholder,
{
    let base = &versions.base[span.base.clone()];
    let local = &versions.local[span.local.clone()];
    let remote = &versions.remote[span.remote.clone()];

    if local == remote {
        debug!(
            "Both sides made the same change to base {:?}",
            span.base
        );
        return vec![AlignedChange::Both {
            local: Edit::classified(span.base.clone(), span.local),
            remote: Edit::classified(span.base, span.remote),
        }];
    }

    if base.iter().all(Placeholder::is_placeholder) {
        if is_padding(local) {
            return fill_placeholders(&span, Side::Remote);
        }
        if is_padding(remote) {
            return fill_placeholders(&span, Side::Local);
        }
    }

    debug!(
        "Conflict over base {:?}: local {:?}, remote {:?}",
        span.base, span.local, span.remote
    );
    vec![AlignedChange::Both {
        local: Edit::new(EditKind::Conflict, span.base.clone(), span.local),
        remote: Edit::new(EditKind::Conflict, span.base, span.remote),
    }]
}

/// Placeholders only, or nothing at all: deleting placeholders leaves the
/// region as empty as padding it does.
fn is_padding<T: Placeholder>(replacement: &[T]) -> bool {
    replacement.iter().all(Placeholder::is_placeholder)
}

/// Take the real content of `accepted` over the other side's placeholders.
/// Placeholders the accepted content does not cover are kept, inserted right
/// after the span.
fn fill_placeholders(span: &MergeSpan, accepted: Side) -> Vec<AlignedChange> {
    let padding_side = accepted.other();
    let content = span.other(accepted);
    let padding = span.other(padding_side);

    debug!(
        "{accepted} content {content:?} fills {padding_side} placeholders {padding:?} over base {:?}",
        span.base
    );

    let mut changes = vec![AlignedChange::unilateral(
        accepted,
        Edit::classified(span.base.clone(), content.clone()),
    )];

    if content.len() < padding.len() {
        changes.push(AlignedChange::unilateral(
            padding_side,
            Edit::new(
                EditKind::Insert,
                span.base.end..span.base.end,
                padding.start + content.len()..padding.end,
            ),
        ));
    }

    changes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diff;

    fn combined<'a>(
        local: &'a [&'a str],
        base: &'a [&'a str],
        remote: &'a [&'a str],
    ) -> MergeCache {
        let versions = Versions {
            local,
            base,
            remote,
        };
        combine(versions, &diff(base, local), &diff(base, remote)).unwrap()
    }

    #[test]
    fn test_disjoint_changes_stay_unilateral() {
        let cache = combined(&["a", "X", "c", "d"], &["a", "b", "c", "d"], &[
            "a", "b", "c", "Y", "d",
        ]);

        assert_eq!(
            cache.changes(),
            &[
                AlignedChange::Local(Edit::new(EditKind::Replace, 1..2, 1..2)),
                AlignedChange::Remote(Edit::new(EditKind::Insert, 3..3, 3..4)),
            ]
        );
    }

    #[test]
    fn test_tie_puts_insert_first() {
        let cache = combined(&["a", "b", "X", "c"], &["a", "b", "c"], &["a", "b"]);

        assert_eq!(
            cache.changes(),
            &[
                AlignedChange::Local(Edit::new(EditKind::Insert, 2..2, 2..3)),
                AlignedChange::Remote(Edit::new(EditKind::Delete, 2..3, 2..2)),
            ]
        );

        let cache = combined(&["a", "b"], &["a", "b", "c"], &["a", "b", "X", "c"]);

        assert_eq!(
            cache.changes(),
            &[
                AlignedChange::Remote(Edit::new(EditKind::Insert, 2..2, 2..3)),
                AlignedChange::Local(Edit::new(EditKind::Delete, 2..3, 2..2)),
            ]
        );
    }

    #[test]
    fn test_inserts_at_the_same_position_compete() {
        let cache = combined(&["a", "X", "b"], &["a", "b"], &["a", "Y", "b"]);

        assert_eq!(
            cache.changes(),
            &[AlignedChange::Both {
                local: Edit::new(EditKind::Conflict, 1..1, 1..2),
                remote: Edit::new(EditKind::Conflict, 1..1, 1..2),
            }]
        );
    }

    #[test]
    fn test_overlap_extends_transitively() {
        // Remote's edit of c..e overlaps both of local's edits.
        let cache = combined(
            &["a", "B", "C", "d", "E", "f"],
            &["a", "b", "c", "d", "e", "f"],
            &["a", "b", "Z", "Z", "Z", "f"],
        );

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.changes()[0],
            AlignedChange::Both {
                local: Edit::new(EditKind::Conflict, 1..5, 1..5),
                remote: Edit::new(EditKind::Conflict, 1..5, 1..5),
            }
        );
    }

    #[test]
    fn test_identical_edit_merges_once() {
        let cache = combined(&["a", "X", "c"], &["a", "b", "c"], &["a", "X", "c"]);

        assert_eq!(
            cache.changes(),
            &[AlignedChange::Both {
                local: Edit::new(EditKind::Replace, 1..2, 1..2),
                remote: Edit::new(EditKind::Replace, 1..2, 1..2),
            }]
        );
        assert!(!cache.has_conflicts());
    }

    #[test]
    fn test_identical_deletion() {
        let cache = combined(&["a", "c"], &["a", "b", "c"], &["a", "c"]);

        assert_eq!(cache.changes()[0].kind(), EditKind::Delete);
        assert!(!cache.has_conflicts());
    }

    #[test]
    fn test_placeholder_padding_accepts_remote_content() {
        let cache = combined(&["a", "__", "__", "b"], &["a", "_", "b"], &["a", "X", "b"]);

        assert_eq!(
            cache.changes(),
            &[
                AlignedChange::Remote(Edit::new(EditKind::Replace, 1..2, 1..2)),
                AlignedChange::Local(Edit::new(EditKind::Insert, 2..2, 2..3)),
            ]
        );
        assert!(!cache.has_conflicts());
    }

    #[test]
    fn test_placeholder_padding_accepts_local_content() {
        let cache = combined(&["a", "X", "Y", "b"], &["a", "_", "b"], &["a", "__", "b"]);

        assert_eq!(
            cache.changes(),
            &[AlignedChange::Local(Edit::new(EditKind::Replace, 1..2, 1..3))]
        );
    }

    #[test]
    fn test_deleted_placeholders_give_way_to_content() {
        let cache = combined(&["a", "b"], &["a", "_", "b"], &["a", "X", "b"]);
        assert_eq!(
            cache.changes(),
            &[AlignedChange::Remote(Edit::new(EditKind::Replace, 1..2, 1..2))]
        );
        assert!(!cache.has_conflicts());

        let cache = combined(&["a", "X", "Y", "b"], &["a", "_", "b"], &["a", "b"]);
        assert_eq!(
            cache.changes(),
            &[AlignedChange::Local(Edit::new(EditKind::Replace, 1..2, 1..3))]
        );
    }

    #[test]
    fn test_real_content_is_not_padding() {
        let cache = combined(&["a", "__", "b"], &["a", "c", "b"], &["a", "X", "b"]);

        assert!(cache.changes()[0].is_conflict());
    }

    #[test]
    fn test_rejects_malformed_scripts() {
        let base = ["a", "b"];
        let local = ["a"];
        let versions = Versions {
            local: &local,
            base: &base,
            remote: &base,
        };

        assert_eq!(
            combine(versions, &[Edit::new(EditKind::Equal, 0..1, 0..1)], &diff(&base, &base)),
            Err(AlignmentError::IncompleteBase {
                side: Side::Local,
                covered: 1,
                expected: 2
            })
        );

        assert_eq!(
            combine(versions, &diff(&base, &local), &[
                Edit::new(EditKind::Equal, 0..1, 0..1),
                Edit::new(EditKind::Conflict, 1..2, 1..2),
            ]),
            Err(AlignmentError::InconsistentKind {
                side: Side::Remote,
                index: 1,
                kind: EditKind::Conflict,
                base_len: 1,
                other_len: 1
            })
        );
    }

    #[test]
    fn test_extrapolate() {
        let local = Edit::new(EditKind::Replace, 2..4, 3..4);
        let remote_first = Edit::new(EditKind::Delete, 1..2, 1..1);
        let remote_last = Edit::new(EditKind::Insert, 3..3, 2..5);

        assert_eq!(
            MergeSpan::extrapolate((local, local), (remote_first, remote_last)),
            MergeSpan {
                base: 1..4,
                local: 2..4,
                remote: 1..6,
            }
        );
    }
}
