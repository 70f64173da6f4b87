use logigrid_core::{CellAction, CellState, Pair, PairGrid, SolutionIndex, deduction};
use logigrid_generator::GeneratedPuzzle;

use crate::grader::{self, Verdict};

/// One puzzle and the player's live grid.
///
/// `Game` knows nothing about tokens or clues; it applies manual marks, keeps
/// auto-exclusions up to date and grades the grid. The surrounding
/// [`Session`](crate::Session) decides when each of those is allowed.
///
/// # Example
///
/// ```
/// use logigrid_core::{CellAction, CellState, Coordinate, Pair};
/// use logigrid_game::Game;
/// use logigrid_generator::fallback;
///
/// let mut game = Game::new(fallback::midnight_express());
/// let pair = Pair::new(Coordinate::new(0, 2), Coordinate::new(1, 2));
///
/// assert_eq!(game.mark(pair, CellAction::Affirm), Some(CellState::True));
/// assert!(game.check().correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    puzzle: GeneratedPuzzle,
    index: SolutionIndex,
    grid: PairGrid,
}

impl Game {
    /// Starts a game with an empty grid.
    ///
    /// Items that the solution does not mention are logged; they can never
    /// be graded as correct.
    #[must_use]
    pub fn new(puzzle: GeneratedPuzzle) -> Self {
        let index = SolutionIndex::new(&puzzle.categories, &puzzle.solution);
        for coord in index.unresolved() {
            let name = puzzle.category(coord.category()).item(coord.item());
            log::warn!("solution has no entry for {name:?} ({coord})");
        }
        Self {
            puzzle,
            index,
            grid: PairGrid::new(),
        }
    }

    /// Returns the puzzle content.
    #[must_use]
    pub fn puzzle(&self) -> &GeneratedPuzzle {
        &self.puzzle
    }

    /// Returns the live grid.
    #[must_use]
    pub fn grid(&self) -> &PairGrid {
        &self.grid
    }

    /// Returns the state of one cell.
    #[must_use]
    pub fn cell(&self, pair: Pair) -> CellState {
        self.grid.get(pair)
    }

    /// Applies a manual action to a cell, then rebuilds auto-exclusions.
    ///
    /// Returns the new state of the cell, or `None` if the cell holds a
    /// comparison-only state and the action was ignored.
    pub fn mark(&mut self, pair: Pair, action: CellAction) -> Option<CellState> {
        let current = self.grid.get(pair);
        let next = current.after(action)?;
        log::debug!("{pair}: {current:?} -> {next:?} ({action:?})");
        self.grid.set(pair, next);
        deduction::recalculate(&mut self.grid);
        Some(self.grid.get(pair))
    }

    /// Grades the live grid.
    #[must_use]
    pub fn check(&self) -> Verdict {
        grader::check_solution(&self.index, &self.grid)
    }

    /// Returns `true` if the live grid is a win.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.check().is_win()
    }

    /// Returns the ground-truth grid.
    #[must_use]
    pub fn solution_grid(&self) -> PairGrid {
        grader::solution_grid(&self.index)
    }

    /// Returns `grid` annotated against the ground truth.
    #[must_use]
    pub fn reveal(&self, grid: &PairGrid) -> PairGrid {
        grader::reveal_solution(&self.index, grid)
    }
}

#[cfg(test)]
mod tests {
    use logigrid_core::{Coordinate, encode};
    use logigrid_generator::fallback;

    use super::*;

    fn pair(c1: u8, i1: u8, c2: u8, i2: u8) -> Pair {
        encode(c1, i1, c2, i2).pair()
    }

    #[test]
    fn test_new_game_has_empty_grid() {
        let game = Game::new(fallback::midnight_express());
        assert!(game.grid().is_empty());
        assert_eq!(game.puzzle().title, "The Midnight Express (Offline)");
        assert!(!game.is_solved());
    }

    #[test]
    fn test_affirm_then_retract_clears_exclusions() {
        let mut game = Game::new(fallback::midnight_express());
        let target = pair(0, 0, 1, 0);

        assert_eq!(game.mark(target, CellAction::Affirm), Some(CellState::True));
        assert_eq!(game.cell(pair(0, 0, 1, 3)), CellState::FalseAuto);
        assert_eq!(game.cell(pair(0, 2, 1, 0)), CellState::FalseAuto);

        assert_eq!(game.mark(target, CellAction::Exclude), Some(CellState::Empty));
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_affirm_cycles_through_states() {
        let mut game = Game::new(fallback::midnight_express());
        let target = pair(1, 2, 2, 3);
        assert_eq!(game.mark(target, CellAction::Affirm), Some(CellState::True));
        assert_eq!(game.mark(target, CellAction::Affirm), Some(CellState::False));
        assert_eq!(game.mark(target, CellAction::Affirm), Some(CellState::Empty));
    }

    #[test]
    fn test_affirming_auto_excluded_cell() {
        let mut game = Game::new(fallback::midnight_express());
        game.mark(pair(0, 0, 1, 0), CellAction::Affirm);
        let excluded = pair(0, 0, 1, 1);
        assert_eq!(game.cell(excluded), CellState::FalseAuto);

        // Overriding the deduction is allowed; the two affirmations then
        // exclude each other's lines but stay as they are.
        assert_eq!(game.mark(excluded, CellAction::Affirm), Some(CellState::True));
        assert_eq!(game.cell(pair(0, 0, 1, 0)), CellState::True);
        assert!(!game.check().correct);
    }

    #[test]
    fn test_comparison_cells_ignore_input() {
        let mut game = Game::new(fallback::midnight_express());
        let target = Pair::new(Coordinate::new(0, 0), Coordinate::new(2, 0));
        game.grid.set(target, CellState::Missed);
        assert_eq!(game.mark(target, CellAction::Affirm), None);
        assert_eq!(game.cell(target), CellState::Missed);
    }

    #[test]
    fn test_marking_the_solution_solves_the_game() {
        let mut game = Game::new(fallback::midnight_express());
        for (pair, _) in game.solution_grid().iter() {
            game.mark(pair, CellAction::Affirm);
        }
        assert!(game.is_solved());
        assert_eq!(game.grid().count(CellState::FalseAuto), 36);
    }
}
