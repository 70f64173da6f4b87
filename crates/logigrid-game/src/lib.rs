//! Logic-grid game logic.
//!
//! - [`Game`]: one puzzle and the player's grid, with marking and grading
//! - [`grader`]: correctness checks and the end-of-game comparison grid
//! - [`Session`]: tokens, clues, win and loss around a sequence of games
//!
//! # Examples
//!
//! ```
//! use logigrid_game::{Session, SessionStatus};
//! use logigrid_generator::LoadedPuzzle;
//!
//! let mut session = Session::default();
//! let generation = session.begin_new_game();
//! session.finish_loading(generation, LoadedPuzzle::fallback()).unwrap();
//!
//! let solution = session.game().unwrap().solution_grid();
//! for (pair, _) in solution.iter() {
//!     let (a, b) = pair.coordinates();
//!     session
//!         .mark_cell(a.category(), a.item(), b.category(), b.item(), false)
//!         .unwrap();
//! }
//! session.check().unwrap();
//! assert_eq!(session.status(), SessionStatus::Won);
//! ```

pub use self::{
    game::Game,
    grader::{COMPLETE_TRUE_CELLS, Verdict},
    session::{
        CheckOutcome, Feedback, FeedbackKind, Generation, HintOutcome, RevealTicket, Session,
        SessionConfig, SessionError, SessionStatus,
    },
};

mod game;
pub mod grader;
mod session;
