//! Auto-elimination of pairs ruled out by affirmed cells.
//!
//! If item A matches item B, A cannot match any other item of B's category,
//! and no other item of A's category can match B. [`recalculate`] keeps the
//! [`CellState::FalseAuto`] markers of a grid in line with that rule.
//!
//! Derived markers are always rebuilt from scratch rather than patched, so
//! retracting an affirmation never leaves a stale exclusion behind. The result
//! depends only on the set of [`CellState::True`] cells and manual
//! [`CellState::False`] cells, not on the order in which they were entered.

use crate::{CellState, PairGrid};

/// Rebuilds every [`CellState::FalseAuto`] marker of `grid`.
///
/// 1. Every existing `FalseAuto` cell is cleared.
/// 2. For every `True` cell, each empty cell on the same row or column of its
///    block becomes `FalseAuto`.
///
/// Manual `True` and `False` cells are never overwritten.
///
/// # Examples
///
/// ```
/// use logigrid_core::{CellState, PairGrid, deduction, encode};
///
/// let mut grid = PairGrid::new();
/// grid.set(encode(0, 0, 1, 0).pair(), CellState::True);
/// deduction::recalculate(&mut grid);
/// assert_eq!(grid.count(CellState::FalseAuto), 6);
///
/// // Retracting the affirmation drops its exclusions.
/// grid.clear(encode(0, 0, 1, 0).pair());
/// deduction::recalculate(&mut grid);
/// assert!(grid.is_empty());
/// ```
pub fn recalculate(grid: &mut PairGrid) {
    let stale: Vec<_> = grid.pairs_with(CellState::FalseAuto).collect();
    for pair in stale {
        grid.clear(pair);
    }

    let affirmed: Vec<_> = grid.pairs_with(CellState::True).collect();
    for pair in affirmed {
        for peer in pair.line_peers() {
            if grid.get(peer).is_empty() {
                grid.set(peer, CellState::FalseAuto);
            }
        }
    }
}
