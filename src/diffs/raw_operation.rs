/// A single-element step of a diff between an `old` and a `new` sequence,
/// addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawOperation {
    Equal { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

impl RawOperation {
    pub fn is_equal(self) -> bool { matches!(self, RawOperation::Equal { .. }) }
}
