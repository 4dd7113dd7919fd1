use crate::{EditKind, MergeCache, Versions};

/// Apply an alignment to the base, producing the merged sequence.
///
/// Where both sides changed the same region the local edit is applied.
/// Conflicting regions are dropped: their base content is consumed and
/// neither side's content is emitted, so they only show up in the cache's
/// conflict index.
#[must_use]
pub fn apply<T>(cache: &MergeCache, versions: Versions<'_, T>) -> Vec<T>
where
    T: Clone,
{
    apply_keeping(cache, versions, |_| false)
}

/// Like [`apply`], but base elements matching `keep` survive inside
/// conflicting regions, in base order.
///
/// Keeping type markers this way leaves the merged token sequence with the
/// base's object structure, so fields and measures next to a conflict are
/// not attached to the wrong object.
#[must_use]
pub fn apply_keeping<T, F>(cache: &MergeCache, versions: Versions<'_, T>, keep: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    let mut merged = Vec::with_capacity(versions.base.len());
    let mut cursor = 0;

    for change in cache {
        let (side, edit) = change.applied();
        let low = change.base_range().start.max(cursor);

        merged.extend_from_slice(&versions.base[cursor..low]);
        cursor = low;

        match edit.kind {
            EditKind::Insert => merged.extend_from_slice(&versions.side(side)[edit.other_range()]),
            EditKind::Replace => {
                merged.extend_from_slice(&versions.side(side)[edit.other_range()]);
                cursor += edit.base_len();
            }
            EditKind::Conflict => {
                let dropped = &versions.base[cursor..cursor + edit.base_len()];
                merged.extend(dropped.iter().filter(|&element| keep(element)).cloned());
                cursor += edit.base_len();
            }
            EditKind::Delete => cursor += edit.base_len(),
            EditKind::Equal => {}
        }
    }

    merged.extend_from_slice(versions.base.get(cursor..).unwrap_or_default());
    merged
}
