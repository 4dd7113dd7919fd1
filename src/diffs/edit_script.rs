use crate::{Edit, EditKind, diffs::raw_operation::RawOperation};

/// Group single-element operations into an edit script.
///
/// Consecutive equal operations form one `Equal` span. Every maximal run of
/// deletions and insertions, interleaved in any order, becomes a single
/// `Insert`, `Delete` or `Replace` span.
pub fn group_operations<I>(raw_operations: I) -> Vec<Edit>
where
    I: IntoIterator<Item = RawOperation>,
{
    let mut script: Vec<Edit> = Vec::new();
    let mut base_cursor = 0;
    let mut other_cursor = 0;

    for operation in raw_operations {
        let (base_step, other_step) = match operation {
            RawOperation::Equal { old, new } => {
                debug_assert_eq!((old, new), (base_cursor, other_cursor));
                (1, 1)
            }
            RawOperation::Delete { old } => {
                debug_assert_eq!(old, base_cursor);
                (1, 0)
            }
            RawOperation::Insert { new } => {
                debug_assert_eq!(new, other_cursor);
                (0, 1)
            }
        };

        let joins_previous = script
            .last()
            .is_some_and(|previous| previous.is_equal() == operation.is_equal());

        match script.last_mut() {
            Some(previous) if joins_previous => {
                previous.base_end += base_step;
                previous.other_end += other_step;
                if !previous.is_equal() {
                    previous.kind = EditKind::classify(previous.base_len(), previous.other_len());
                }
            }
            _ => script.push(Edit::new(
                if operation.is_equal() {
                    EditKind::Equal
                } else {
                    EditKind::classify(base_step, other_step)
                },
                base_cursor..base_cursor + base_step,
                other_cursor..other_cursor + other_step,
            )),
        }

        base_cursor += base_step;
        other_cursor += other_step;
    }

    script
}
