use std::ops::Range;

/// Length of the common suffix of `old[old_range]` and `new[new_range]`.
/// Adapted from <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/utils.rs>
pub fn common_suffix_len<T>(
    old: &[T],
    old_range: Range<usize>,
    new: &[T],
    new_range: Range<usize>,
) -> usize
where
    T: PartialEq,
{
    old[old_range]
        .iter()
        .rev()
        .zip(new[new_range].iter().rev())
        .take_while(|(old, new)| old == new)
        .count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_common_suffix_len() {
        assert_eq!(common_suffix_len::<u8>(&[], 0..0, &[], 0..0), 0);
        assert_eq!(common_suffix_len(b"1234", 0..4, b"X0001234", 0..8), 4);
        assert_eq!(common_suffix_len(b"1234", 0..4, b"Xxxx", 0..4), 0);
        assert_eq!(common_suffix_len(b"1234", 2..4, b"01234", 2..5), 2);
    }
}
