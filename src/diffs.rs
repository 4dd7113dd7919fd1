mod edit;
mod edit_script;
mod myers;
mod raw_operation;

pub use edit::{Edit, EditKind};
use log::trace;

use crate::{AlignmentError, Side};

/// Compute the edit script turning `base` into `other`.
///
/// The script is ordered and gap-free and covers both sequences completely,
/// `Equal` spans included.
#[must_use]
pub fn diff<T>(base: &[T], other: &[T]) -> Vec<Edit>
where
    T: PartialEq,
{
    let script = edit_script::group_operations(myers::myers_diff(base, other));
    trace!(
        "Diffed {} against {} elements into {} spans",
        base.len(),
        other.len(),
        script.len()
    );
    script
}

/// Check that `script` is a well-formed edit script from a sequence of
/// `base_len` elements to one of `other_len` elements.
///
/// # Errors
///
/// Returns the first violation found: a reversed range, a gap or overlap on
/// either sequence, a kind that does not match the span lengths, or a script
/// that stops short of the end of either sequence.
pub fn validate_script(
    side: Side,
    script: &[Edit],
    base_len: usize,
    other_len: usize,
) -> Result<(), AlignmentError> {
    let mut base_cursor = 0;
    let mut other_cursor = 0;

    for (index, edit) in script.iter().enumerate() {
        if edit.base_start > edit.base_end || edit.other_start > edit.other_end {
            return Err(AlignmentError::ReversedRange { side, index });
        }
        if edit.base_start != base_cursor {
            return Err(AlignmentError::BaseGap {
                side,
                index,
                expected: base_cursor,
                found: edit.base_start,
            });
        }
        if edit.other_start != other_cursor {
            return Err(AlignmentError::OtherGap {
                side,
                index,
                expected: other_cursor,
                found: edit.other_start,
            });
        }
        if !edit.kind.fits(edit.base_len(), edit.other_len()) {
            return Err(AlignmentError::InconsistentKind {
                side,
                index,
                kind: edit.kind,
                base_len: edit.base_len(),
                other_len: edit.other_len(),
            });
        }

        base_cursor = edit.base_end;
        other_cursor = edit.other_end;
    }

    if base_cursor != base_len {
        return Err(AlignmentError::IncompleteBase {
            side,
            covered: base_cursor,
            expected: base_len,
        });
    }
    if other_cursor != other_len {
        return Err(AlignmentError::IncompleteOther {
            side,
            covered: other_cursor,
            expected: other_len,
        });
    }

    Ok(())
}
