//! Merge planning
//!
//! The ranges a recursive top-down merge sort merges depend only on the
//! length of the input, so the whole schedule is computed up front.

use std::collections::VecDeque;

/// One merge step over positions `[left, mid]` and `[mid + 1, right]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub left: usize,
    pub mid: usize,
    pub right: usize,
}

impl MergeRange {
    /// Number of positions covered by both runs
    pub fn len(&self) -> usize {
        self.right - self.left + 1
    }
}

/// Merge schedule for `n` elements, in depth-first post-order
/// (left half, right half, then the merge of both).
pub fn plan_merges(n: usize) -> VecDeque<MergeRange> {
    let mut plan = VecDeque::with_capacity(n.saturating_sub(1));
    if n >= 2 {
        push_merges(0, n - 1, &mut plan);
    }
    plan
}

fn push_merges(left: usize, right: usize, plan: &mut VecDeque<MergeRange>) {
    if left >= right {
        return;
    }
    let mid = left + (right - left) / 2;
    push_merges(left, mid, plan);
    push_merges(mid + 1, right, plan);
    plan.push_back(MergeRange { left, mid, right });
}

/// Rough comparison count shown by progress displays: `ceil(n * log2(n))`
pub fn estimated_comparisons(n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let n = n as f64;
    (n * n.log2()).ceil() as usize
}

/// Upper bound on comparisons for the schedule: each merge needs at most
/// `len - 1` decisions before one run is exhausted.
pub fn max_comparisons(n: usize) -> usize {
    plan_merges(n).iter().map(|r| r.len() - 1).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(left: usize, mid: usize, right: usize) -> MergeRange {
        MergeRange { left, mid, right }
    }

    #[test]
    fn test_plan_is_post_order() {
        let plan: Vec<_> = plan_merges(5).into_iter().collect();
        assert_eq!(
            plan,
            vec![
                range(0, 0, 1),
                range(0, 1, 2),
                range(3, 3, 4),
                range(0, 2, 4),
            ]
        );
    }

    #[test]
    fn test_trivial_inputs_have_no_merges() {
        assert!(plan_merges(0).is_empty());
        assert!(plan_merges(1).is_empty());
        assert_eq!(plan_merges(2).len(), 1);
    }

    #[test]
    fn test_every_position_merged_n_minus_one_times_total() {
        for n in 2..40 {
            assert_eq!(plan_merges(n).len(), n - 1, "n = {}", n);
        }
    }

    #[test]
    fn test_comparison_bounds() {
        assert_eq!(estimated_comparisons(1), 0);
        assert_eq!(estimated_comparisons(4), 8);
        assert_eq!(estimated_comparisons(16), 64);
        assert_eq!(estimated_comparisons(10), 34);
        // n*log2(n) - n + 1 for powers of two
        assert_eq!(max_comparisons(4), 5);
        assert_eq!(max_comparisons(16), 49);
        for n in 2..64 {
            assert!(max_comparisons(n) <= estimated_comparisons(n));
        }
    }
}
