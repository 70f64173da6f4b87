use logigrid_core::{CATEGORY_COUNT, Category, Solution};

use crate::VisualTheme;

/// A complete puzzle ready to play.
///
/// Content is immutable once loaded. The categories are guaranteed to hold
/// exactly four distinct, non-empty items each and there is at least one
/// clue; see [`PuzzleResponse`] for how raw generator output is checked.
///
/// [`PuzzleResponse`]: crate::PuzzleResponse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// Short catchy title.
    pub title: String,
    /// One or two sentences setting the scene.
    pub story: String,
    /// Visual theme for the presentation layer.
    pub theme: VisualTheme,
    /// The three categories, in index order.
    pub categories: [Category; CATEGORY_COUNT],
    /// Clues in reveal order.
    pub clues: Vec<String>,
    /// Ground-truth matches.
    pub solution: Solution,
}

impl GeneratedPuzzle {
    /// Returns the number of clues.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.clues.len()
    }

    /// Returns the category at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in 0-2.
    #[must_use]
    pub fn category(&self, index: u8) -> &Category {
        &self.categories[usize::from(index)]
    }
}
