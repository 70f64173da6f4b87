//! The pair grid.

use std::collections::BTreeMap;

use crate::{CellState, Pair, PairKey};

/// Cell states for every pair of a puzzle.
///
/// The grid is a fixed [`Pair::COUNT`]-slot array addressed by [`Pair`].
/// [`CellState::Empty`] is the absence of information, so setting a cell to
/// `Empty` and never touching it are indistinguishable.
///
/// # Examples
///
/// ```
/// use logigrid_core::{CellState, PairGrid, encode};
///
/// let mut grid = PairGrid::new();
/// let key = encode(0, 0, 2, 3);
/// grid.set(key.pair(), CellState::False);
///
/// assert_eq!(grid.get_key(&key), CellState::False);
/// assert_eq!(grid.to_keyed().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairGrid {
    cells: [CellState; Pair::COUNT],
}

impl Default for PairGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PairGrid {
    /// Creates a grid with every cell empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [CellState::Empty; Pair::COUNT],
        }
    }

    /// Returns the state of a cell.
    #[must_use]
    #[inline]
    pub fn get(&self, pair: Pair) -> CellState {
        self.cells[pair.slot()]
    }

    /// Returns the state of the cell identified by `key`.
    #[must_use]
    #[inline]
    pub fn get_key(&self, key: &PairKey) -> CellState {
        self.get(key.pair())
    }

    /// Sets the state of a cell.
    #[inline]
    pub fn set(&mut self, pair: Pair, state: CellState) {
        self.cells[pair.slot()] = state;
    }

    /// Resets a cell to [`CellState::Empty`].
    #[inline]
    pub fn clear(&mut self, pair: Pair) {
        self.set(pair, CellState::Empty);
    }

    /// Returns `true` if every cell is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|state| state.is_empty())
    }

    /// Iterates over the non-empty cells in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, CellState)> + '_ {
        Pair::all()
            .map(|pair| (pair, self.get(pair)))
            .filter(|(_, state)| !state.is_empty())
    }

    /// Iterates over the pairs whose cell holds `state`.
    pub fn pairs_with(&self, state: CellState) -> impl Iterator<Item = Pair> + '_ {
        Pair::all().filter(move |pair| self.get(*pair) == state)
    }

    /// Counts the cells holding `state`.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Returns the non-empty cells as a key-addressed map.
    #[must_use]
    pub fn to_keyed(&self) -> BTreeMap<PairKey, CellState> {
        self.iter().map(|(pair, state)| (pair.key(), state)).collect()
    }
}

impl FromIterator<(Pair, CellState)> for PairGrid {
    fn from_iter<I: IntoIterator<Item = (Pair, CellState)>>(iter: I) -> Self {
        let mut grid = Self::new();
        for (pair, state) in iter {
            grid.set(pair, state);
        }
        grid
    }
}

impl FromIterator<(PairKey, CellState)> for PairGrid {
    fn from_iter<I: IntoIterator<Item = (PairKey, CellState)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, state)| (key.pair(), state))
            .collect()
    }
}
