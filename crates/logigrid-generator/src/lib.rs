//! Puzzle content for logic-grid games.
//!
//! The engine does not invent puzzles itself. Content comes from an external
//! text-generation service (reached through a program on the command line), a
//! saved JSON file, or the bundled offline puzzle. This crate defines:
//!
//! - [`GeneratedPuzzle`]: validated, immutable puzzle content
//! - [`PuzzleResponse`]: the JSON wire format and its validation
//! - [`build_prompt`]: the instructions sent to a generation service
//! - [`PuzzleProvider`] and its implementations, plus
//!   [`generate_or_fallback`], which always yields a playable puzzle
//!
//! # Examples
//!
//! ```
//! use logigrid_generator::{FallbackProvider, PuzzleRequest, generate_or_fallback};
//!
//! let loaded = generate_or_fallback(&FallbackProvider, &PuzzleRequest::new("Trains"));
//! assert_eq!(loaded.puzzle.categories.len(), 3);
//! assert_eq!(loaded.puzzle.clue_count(), 6);
//! ```

pub mod fallback;
mod prompt;
mod provider;
mod puzzle;
mod response;
mod theme;

pub use self::{
    prompt::{DEFAULT_THEME, Difficulty, ParseDifficultyError, PuzzleRequest, build_prompt},
    provider::{
        CommandProvider, ContentError, DEFAULT_COMMAND_TIMEOUT, FallbackProvider, FileProvider,
        LoadedPuzzle, PuzzleOrigin, PuzzleProvider, generate_or_fallback, parse_response,
    },
    puzzle::GeneratedPuzzle,
    response::{CategoryDto, PuzzleResponse, PuzzleValidationError, SolutionEntryDto},
    theme::{FontStyle, ThemeColors, VisualTheme},
};
