//! Adapted from <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/myers.rs>
//!
//! Myers' diff algorithm.
//!
//! * time: `O((N+M)D)`
//! * space `O(N+M)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.
//!
//! # Heuristics
//!
//! This implementation does not implement any of the advanced heuristics for
//! pathological cases: two large and completely distinct sequences make it
//! spin without making reasonable progress.

use std::ops::{Index, IndexMut, Range};

use crate::{
    diffs::raw_operation::RawOperation,
    utils::{common_prefix_len::common_prefix_len, common_suffix_len::common_suffix_len},
};

/// Myers' diff algorithm over two whole sequences.
///
/// Returns one `RawOperation` per element, ordered by position in both
/// sequences.
pub fn myers_diff<T>(old: &[T], new: &[T]) -> Vec<RawOperation>
where
    T: PartialEq,
{
    let max_d = (old.len() + new.len()).div_ceil(2) + 1;
    let mut vb = V::new(max_d);
    let mut vf = V::new(max_d);
    let mut result = Vec::with_capacity(old.len().max(new.len()));

    conquer(
        old,
        0..old.len(),
        new,
        0..new.len(),
        &mut vf,
        &mut vb,
        &mut result,
    );

    result
}

// A D-path is a path which starts at (0,0) that has exactly D non-diagonal
// edges. All D-paths consist of a (D - 1)-path followed by a non-diagonal edge
// and then a possibly empty sequence of diagonal edges called a snake.

/// `V` contains the endpoints of the furthest reaching `D-paths`. For each
/// recorded endpoint `(x,y)` in diagonal `k`, we only need to retain `x`
/// because `y` can be computed from `x - k`.
///
/// `k` can be negative, so `V` wraps a Vec plus an `offset` mapping the
/// smallest `k` back to 0.
#[derive(Debug)]
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        let offset = isize::try_from(max_d).unwrap_or(isize::MAX);
        Self {
            offset,
            v: vec![0; 2 * max_d],
        }
    }

    fn len(&self) -> usize { self.v.len() }

    fn slot(&self, index: isize) -> usize {
        let idx = usize::try_from(index + self.offset).unwrap_or(usize::MAX);
        idx.min(self.v.len().saturating_sub(1))
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, index: isize) -> &Self::Output { &self.v[self.slot(index)] }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut Self::Output {
        let slot = self.slot(index);
        &mut self.v[slot]
    }
}

fn split_at(range: Range<usize>, at: usize) -> (Range<usize>, Range<usize>) {
    (range.start..at, at..range.end)
}

fn signed(value: usize) -> isize { isize::try_from(value).unwrap_or(isize::MAX) }

/// Find the start of the middle snake of an optimal D-path by running the
/// greedy search forwards and backwards until the two frontiers overlap.
fn find_middle_snake<T>(
    old: &[T],
    old_range: Range<usize>,
    new: &[T],
    new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)>
where
    T: PartialEq,
{
    let n = old_range.len();
    let m = new_range.len();

    // The optimal edit script length is odd or even as `delta` is.
    let delta = signed(n) - signed(m);
    let odd = delta & 1 == 1;

    // The initial point at (0, -1)
    vf[1] = 0;
    // The initial point at (N, M+1)
    vb[1] = 0;

    let d_max = (n + m).div_ceil(2) + 1;
    debug_assert!(vf.len() >= d_max);
    debug_assert!(vb.len() >= d_max);

    for d in 0..signed(d_max) {
        // Forward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = usize::try_from(signed(x) - k).unwrap_or(0);

            // The coordinate of the start of a snake
            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix_len(
                    old,
                    old_range.start + x..old_range.end,
                    new,
                    new_range.start + y..new_range.end,
                );
            }

            vf[k] = x;

            // Only check for connections from the forward search when N - M is
            // odd and when there is a reciprocal k line coming from the other
            // direction.
            if odd && (k - delta).abs() <= (d - 1) && vf[k] + vb[-(k - delta)] >= n {
                return Some((x0 + old_range.start, y0 + new_range.start));
            }
        }

        // Backward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = usize::try_from(signed(x) - k).unwrap_or(0);

            if x < n && y < m {
                let advance = common_suffix_len(
                    old,
                    old_range.start..old_range.start + n - x,
                    new,
                    new_range.start..new_range.start + m - y,
                );
                x += advance;
                y += advance;
            }

            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some((n - x + old_range.start, m - y + new_range.start));
            }
        }
    }

    None
}

fn conquer<T>(
    old: &[T],
    mut old_range: Range<usize>,
    new: &[T],
    mut new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    result: &mut Vec<RawOperation>,
) where
    T: PartialEq,
{
    let common_prefix_len = common_prefix_len(old, old_range.clone(), new, new_range.clone());
    result.extend((0..common_prefix_len).map(|i| RawOperation::Equal {
        old: old_range.start + i,
        new: new_range.start + i,
    }));
    old_range.start += common_prefix_len;
    new_range.start += common_prefix_len;

    let common_suffix_len = common_suffix_len(old, old_range.clone(), new, new_range.clone());
    let common_suffix = (
        old_range.end - common_suffix_len,
        new_range.end - common_suffix_len,
    );
    old_range.end -= common_suffix_len;
    new_range.end -= common_suffix_len;

    if old_range.is_empty() && new_range.is_empty() {
        // nothing left between the prefix and the suffix
    } else if new_range.is_empty() {
        result.extend(old_range.map(|old| RawOperation::Delete { old }));
    } else if old_range.is_empty() {
        result.extend(new_range.map(|new| RawOperation::Insert { new }));
    } else if let Some((x_start, y_start)) =
        find_middle_snake(old, old_range.clone(), new, new_range.clone(), vf, vb)
    {
        let (old_a, old_b) = split_at(old_range, x_start);
        let (new_a, new_b) = split_at(new_range, y_start);
        conquer(old, old_a, new, new_a, vf, vb, result);
        conquer(old, old_b, new, new_b, vf, vb, result);
    } else {
        result.extend(old_range.map(|old| RawOperation::Delete { old }));
        result.extend(new_range.map(|new| RawOperation::Insert { new }));
    }

    result.extend((0..common_suffix_len).map(|i| RawOperation::Equal {
        old: common_suffix.0 + i,
        new: common_suffix.1 + i,
    }));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Rebuild `new` from `old` following the operations.
    fn replay<'a>(old: &[&'a str], new: &[&'a str], operations: &[RawOperation]) -> Vec<&'a str> {
        operations
            .iter()
            .filter_map(|operation| match *operation {
                RawOperation::Equal { old: i, new: j } => {
                    assert_eq!(old[i], new[j]);
                    Some(old[i])
                }
                RawOperation::Delete { .. } => None,
                RawOperation::Insert { new: j } => Some(new[j]),
            })
            .collect()
    }

    #[test]
    fn test_empty_diff() {
        let old: Vec<&str> = vec![];
        assert_eq!(myers_diff(&old, &old), vec![]);
    }

    #[test]
    fn test_identical_content() {
        let content = ["a", "b", "c"];
        assert_eq!(
            myers_diff(&content, &content),
            vec![
                RawOperation::Equal { old: 0, new: 0 },
                RawOperation::Equal { old: 1, new: 1 },
                RawOperation::Equal { old: 2, new: 2 },
            ]
        );
    }

    #[test]
    fn test_insert_only() {
        assert_eq!(
            myers_diff(&[], &["a", "b"]),
            vec![
                RawOperation::Insert { new: 0 },
                RawOperation::Insert { new: 1 }
            ]
        );
    }

    #[test]
    fn test_delete_only() {
        assert_eq!(
            myers_diff(&["a", "b"], &[]),
            vec![
                RawOperation::Delete { old: 0 },
                RawOperation::Delete { old: 1 }
            ]
        );
    }

    #[test]
    fn test_prefix_and_suffix() {
        let old = ["a", "b", "c", "d"];
        let new = ["a", "x", "d"];
        let result = myers_diff(&old, &new);

        assert_eq!(result.first(), Some(&RawOperation::Equal { old: 0, new: 0 }));
        assert_eq!(result.last(), Some(&RawOperation::Equal { old: 3, new: 2 }));
        assert_eq!(replay(&old, &new, &result), new);
    }

    #[test]
    fn test_complex_diff() {
        let old = ["a", "b", "c", "d", "e", "f", "g"];
        let new = ["w", "a", "b", "x", "y", "z", "e", "f", "g", "h"];
        let result = myers_diff(&old, &new);

        // Longest common subsequence is a, b, e, f, g.
        assert_eq!(result.iter().filter(|op| op.is_equal()).count(), 5);
        assert_eq!(replay(&old, &new, &result), new);
    }
}
