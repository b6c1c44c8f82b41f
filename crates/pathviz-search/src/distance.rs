use pathviz_core::Pos;

/// Manhattan (L1) distance between two positions.
///
/// This is the heuristic for both greedy best-first search and A*. On a
/// 4-connected unit-cost board it never overestimates the remaining steps.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
