//! Core data structures for logic-grid puzzles.
//!
//! A logic-grid puzzle has three categories of four items each. The player
//! records which items belong together on a triangular grid of binary
//! relations, one block per pair of categories. This crate provides the
//! building blocks shared by the game and generator crates:
//!
//! 1. **Addressing** - where a relation lives on the grid
//!    - [`coord`]: [`Coordinate`], one item of one category
//!    - [`pair`]: [`Pair`] and its canonical string form [`PairKey`]
//!
//! 2. **Cell state** - what the player knows about a relation
//!    - [`cell_state`]: [`CellState`] and the manual transition table
//!    - [`grid`]: [`PairGrid`], a fixed-size map from pair to cell state
//!    - [`deduction`]: the auto-elimination pass run after every edit
//!
//! 3. **Puzzle content** - immutable input supplied by a generator
//!    - [`category`]: [`Category`]
//!    - [`solution`]: [`Solution`] and the normalized [`SolutionIndex`]
//!
//! # Examples
//!
//! ```
//! use logigrid_core::{CellAction, CellState, Coordinate, Pair, PairGrid, deduction};
//!
//! let mut grid = PairGrid::new();
//! let pair = Pair::new(Coordinate::new(0, 1), Coordinate::new(1, 2));
//!
//! let next = grid.get(pair).after(CellAction::Affirm).unwrap();
//! grid.set(pair, next);
//! deduction::recalculate(&mut grid);
//!
//! // Nothing else in item 1's row of the (0, 1) block can match any more.
//! let peer = Pair::new(Coordinate::new(0, 1), Coordinate::new(1, 0));
//! assert_eq!(grid.get(peer), CellState::FalseAuto);
//! ```

pub mod category;
pub mod cell_state;
pub mod coord;
pub mod deduction;
pub mod grid;
pub mod pair;
pub mod solution;

pub use self::{
    category::Category,
    cell_state::{CellAction, CellState},
    coord::{CATEGORY_COUNT, Coordinate, ITEM_COUNT},
    grid::PairGrid,
    pair::{CategoryPair, Pair, PairError, PairKey, PairKeyError, decode, encode},
    solution::{Solution, SolutionEntry, SolutionIndex, normalize_name},
};
