//! Grading a player's grid against the ground truth.
//!
//! Both functions here are pure and work through a [`SolutionIndex`], so an
//! item the solution does not mention simply never matches. Grading cannot
//! fail.

use logigrid_core::{
    CATEGORY_COUNT, CategoryPair, CellState, Coordinate, ITEM_COUNT, Pair, PairGrid, SolutionIndex,
};

/// Number of affirmed cells in a finished grid: one per item in each of the
/// three blocks.
pub const COMPLETE_TRUE_CELLS: usize = (CATEGORY_COUNT * (CATEGORY_COUNT - 1) / 2) * ITEM_COUNT;

/// Result of checking a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Every affirmed cell is part of the solution.
    pub correct: bool,
    /// Number of affirmed cells.
    pub true_cells: usize,
}

impl Verdict {
    /// Returns `true` if every link has been affirmed.
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.true_cells == COMPLETE_TRUE_CELLS
    }

    /// Returns `true` if the grid is both correct and complete.
    #[must_use]
    pub fn is_win(self) -> bool {
        self.correct && self.is_complete()
    }
}

/// Checks every affirmed cell of `grid` against the solution.
///
/// A cell passes if the solution lists its second item among the matches of
/// its first item.
#[must_use]
pub fn check_solution(index: &SolutionIndex, grid: &PairGrid) -> Verdict {
    let mut verdict = Verdict {
        correct: true,
        true_cells: 0,
    };
    for pair in grid.pairs_with(CellState::True) {
        verdict.true_cells += 1;
        let (first, second) = pair.coordinates();
        if !index.is_match(first, second) {
            verdict.correct = false;
        }
    }
    verdict
}

/// Builds the ground-truth grid: one affirmed cell per item per block.
///
/// For each block, every item of the lower category is linked to the first
/// of its matches that names an item of the higher category. Items without
/// such a match leave their row empty.
#[must_use]
pub fn solution_grid(index: &SolutionIndex) -> PairGrid {
    let mut truth = PairGrid::new();
    for block in CategoryPair::ALL {
        let (from, to) = block.categories();
        for coord in Coordinate::items_of(from) {
            if let Some(target) = index.resolve(coord, to) {
                truth.set(Pair::new(coord, target), CellState::True);
            }
        }
    }
    truth
}

/// Annotates `grid` against the ground truth for the end-of-game display.
///
/// - an affirmed cell becomes [`CellState::TrueCorrect`] or
///   [`CellState::TrueIncorrect`]
/// - a ground-truth link the player did not affirm becomes
///   [`CellState::Missed`]
/// - every other cell keeps its state
#[must_use]
pub fn reveal_solution(index: &SolutionIndex, grid: &PairGrid) -> PairGrid {
    let truth = solution_grid(index);
    let mut reveal = grid.clone();
    for pair in Pair::all() {
        let expected = truth.get(pair).is_true();
        let state = match grid.get(pair) {
            CellState::True if expected => CellState::TrueCorrect,
            CellState::True => CellState::TrueIncorrect,
            _ if expected => CellState::Missed,
            _ => continue,
        };
        reveal.set(pair, state);
    }
    reveal
}

#[cfg(test)]
mod tests {
    use logigrid_core::encode;
    use logigrid_generator::fallback;
    use proptest::prelude::*;

    use super::*;

    fn fallback_index() -> SolutionIndex {
        let puzzle = fallback::midnight_express();
        SolutionIndex::new(&puzzle.categories, &puzzle.solution)
    }

    fn pair(c1: u8, i1: u8, c2: u8, i2: u8) -> Pair {
        encode(c1, i1, c2, i2).pair()
    }

    #[test]
    fn test_solution_grid_has_one_link_per_item_and_block() {
        let truth = solution_grid(&fallback_index());
        assert_eq!(truth.count(CellState::True), COMPLETE_TRUE_CELLS);
        // Col. Mustard - Martini - Dining Car.
        assert!(truth.get(pair(0, 0, 1, 0)).is_true());
        assert!(truth.get(pair(0, 0, 2, 0)).is_true());
        assert!(truth.get(pair(1, 0, 2, 0)).is_true());
        // Mrs. Peacock - Whisky - Observation.
        assert!(truth.get(pair(0, 3, 1, 1)).is_true());
        assert!(truth.get(pair(1, 1, 2, 3)).is_true());
    }

    #[test]
    fn test_exact_solution_wins() {
        let index = fallback_index();
        let verdict = check_solution(&index, &solution_grid(&index));
        assert_eq!(
            verdict,
            Verdict {
                correct: true,
                true_cells: 12
            }
        );
        assert!(verdict.is_win());
    }

    #[test]
    fn test_partial_correct_grid_is_incomplete() {
        let index = fallback_index();
        let grid: PairGrid = solution_grid(&index)
            .iter()
            .filter(|(pair, _)| pair.category_pair() == CategoryPair::ZeroOne)
            .collect();
        let verdict = check_solution(&index, &grid);
        assert!(verdict.correct);
        assert_eq!(verdict.true_cells, 4);
        assert!(!verdict.is_complete());
        assert!(!verdict.is_win());
    }

    #[test]
    fn test_wrong_link_is_incorrect() {
        let index = fallback_index();
        let mut grid = PairGrid::new();
        grid.set(pair(0, 0, 1, 1), CellState::True);
        assert!(!check_solution(&index, &grid).correct);
    }

    #[test]
    fn test_empty_grid_is_correct_but_incomplete() {
        let verdict = check_solution(&fallback_index(), &PairGrid::new());
        assert!(verdict.correct);
        assert!(!verdict.is_complete());
    }

    #[test]
    fn test_unresolved_items_grade_as_incorrect() {
        let mut puzzle = fallback::midnight_express();
        puzzle.solution = [("Colonel Mustard", vec!["Martini".to_owned()])]
            .into_iter()
            .collect();
        let index = SolutionIndex::new(&puzzle.categories, &puzzle.solution);

        let mut grid = PairGrid::new();
        grid.set(pair(0, 0, 1, 0), CellState::True);
        assert!(!check_solution(&index, &grid).correct);
        assert!(solution_grid(&index).is_empty());
    }

    #[test]
    fn test_reveal_annotates_cells() {
        let index = fallback_index();
        let mut grid = PairGrid::new();
        grid.set(pair(0, 0, 1, 0), CellState::True); // correct
        grid.set(pair(0, 1, 1, 1), CellState::True); // wrong
        grid.set(pair(0, 2, 2, 2), CellState::False); // wrong exclusion
        grid.set(pair(0, 3, 2, 0), CellState::False); // right exclusion
        grid.set(pair(1, 2, 2, 0), CellState::FalseAuto);

        let reveal = reveal_solution(&index, &grid);
        assert_eq!(reveal.get(pair(0, 0, 1, 0)), CellState::TrueCorrect);
        assert_eq!(reveal.get(pair(0, 1, 1, 1)), CellState::TrueIncorrect);
        assert_eq!(reveal.get(pair(0, 2, 2, 2)), CellState::Missed);
        assert_eq!(reveal.get(pair(0, 3, 2, 0)), CellState::False);
        assert_eq!(reveal.get(pair(1, 2, 2, 0)), CellState::FalseAuto);
        // Miss Scarlet - Lounge was never affirmed.
        assert_eq!(reveal.get(pair(0, 1, 2, 1)), CellState::Missed);
        assert_eq!(reveal.count(CellState::Missed), 11);
    }

    fn any_pair() -> impl Strategy<Value = Pair> {
        proptest::sample::select(Pair::all().collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn reveal_accounts_for_every_link(
            affirmed in prop::collection::hash_set(any_pair(), 0..20),
        ) {
            let index = fallback_index();
            let truth = solution_grid(&index);
            let grid: PairGrid = affirmed.iter().map(|pair| (*pair, CellState::True)).collect();
            let reveal = reveal_solution(&index, &grid);

            for pair in Pair::all() {
                let state = reveal.get(pair);
                match (grid.get(pair).is_true(), truth.get(pair).is_true()) {
                    (true, true) => prop_assert_eq!(state, CellState::TrueCorrect),
                    (true, false) => prop_assert_eq!(state, CellState::TrueIncorrect),
                    (false, true) => prop_assert_eq!(state, CellState::Missed),
                    (false, false) => prop_assert_eq!(state, CellState::Empty),
                }
            }
        }
    }
}
