//! The token-limited game session.
//!
//! A [`Session`] owns everything that changes during play: the current
//! [`Game`], the token budget, how many clues are visible and the last
//! feedback message. Its phase is a single tagged union, so combinations such
//! as "won and out of tokens" cannot be represented.
//!
//! ```text
//!            begin_new_game
//!   (any) ─────────────────▶ Loading ──finish_loading──▶ Playing
//!                                                         │  │  │
//!                               check: win ◀──────────────┘  │  │
//!                                   ▼                        │  │
//!                                  Won        check: last token │
//!                                                  ▼            │
//!                                                 Lost ◀── fire_reveal ── Closing
//!                                                            hint: last token ┘
//! ```
//!
//! Loading and the delayed reveal are asynchronous from the caller's point of
//! view. Both are tied to a [`Generation`]: starting a new game bumps it, and
//! anything carrying an older generation is rejected.

use std::{mem, time::Duration};

use logigrid_core::{CellAction, CellState, Pair, PairError, PairGrid};
use logigrid_generator::{GeneratedPuzzle, LoadedPuzzle};

use crate::Game;

/// Tunable starting values of a session.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use logigrid_game::SessionConfig;
///
/// let config = SessionConfig::default().with_reveal_delay(Duration::ZERO);
/// assert_eq!(config.initial_tokens(), 3);
/// assert_eq!(config.reveal_delay(), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    initial_tokens: u32,
    initial_revealed_clues: usize,
    reveal_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_tokens: 3,
            initial_revealed_clues: 4,
            reveal_delay: Duration::from_millis(1500),
        }
    }
}

impl SessionConfig {
    /// Sets the number of tokens a game starts with.
    #[must_use]
    pub fn with_initial_tokens(mut self, tokens: u32) -> Self {
        self.initial_tokens = tokens;
        self
    }

    /// Sets the number of clues visible when a game starts.
    #[must_use]
    pub fn with_initial_revealed_clues(mut self, clues: usize) -> Self {
        self.initial_revealed_clues = clues;
        self
    }

    /// Sets how long the solution stays hidden after a hint spends the last
    /// token.
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Returns the starting token count.
    #[must_use]
    pub fn initial_tokens(&self) -> u32 {
        self.initial_tokens
    }

    /// Returns the starting number of visible clues.
    #[must_use]
    pub fn initial_revealed_clues(&self) -> usize {
        self.initial_revealed_clues
    }

    /// Returns the delay before a hint-triggered reveal.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }
}

/// Identifies one game within a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct Generation(u64);

/// A pending reveal scheduled by a hint that spent the last token.
///
/// The caller waits for [`RevealTicket::delay`] and then hands the ticket to
/// [`Session::fire_reveal`]. Tickets from an earlier game are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTicket {
    generation: Generation,
    delay: Duration,
}

impl RevealTicket {
    /// Returns the game this ticket belongs to.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns how long to wait before firing.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Errors returned by session requests.
///
/// A rejected request leaves tokens, clues, phase and grid unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    /// No puzzle is loaded yet.
    #[display("puzzle is still loading")]
    NotReady,
    /// The game has ended.
    #[display("game is over")]
    GameOver,
    /// Every token has been spent.
    #[display("no tokens left")]
    NoTokens,
    /// Every clue is already visible.
    #[display("all clues are already revealed")]
    AllCluesRevealed,
    /// The cell coordinates are invalid.
    #[display("invalid cell: {_0}")]
    InvalidCell(#[from] PairError),
    /// The request belongs to an earlier game.
    #[display("request belongs to an earlier game")]
    StaleGeneration,
}

/// Tone of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum FeedbackKind {
    /// Something went wrong.
    Error,
    /// Something went right.
    Success,
    /// Neutral information.
    Info,
}

/// The last message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{message}")]
pub struct Feedback {
    /// Tone of the message.
    pub kind: FeedbackKind,
    /// Message text.
    pub message: String,
}

impl Feedback {
    fn new(kind: FeedbackKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_owned(),
        }
    }
}

/// Public view of the session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum SessionStatus {
    /// Waiting for puzzle content.
    Loading,
    /// Accepting marks, checks and hints.
    Playing,
    /// The last token was spent on a hint; the reveal is pending.
    Closing,
    /// The puzzle was solved.
    Won,
    /// Tokens ran out; the comparison grid is shown.
    Lost,
}

/// Outcome of a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CheckOutcome {
    /// The grid is correct and complete.
    Won,
    /// At least one affirmed cell is wrong.
    Incorrect,
    /// Every affirmed cell is right but some links are missing.
    Incomplete,
    /// The check spent the last token without winning.
    Lost,
}

/// Outcome of a successful hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintOutcome {
    /// Index of the clue that became visible.
    pub clue: usize,
    /// Set when the hint spent the last token.
    pub reveal: Option<RevealTicket>,
}

#[derive(Debug, Clone)]
enum Phase {
    Loading,
    Playing(Game),
    Closing { game: Game, snapshot: PairGrid },
    Won(Game),
    Lost { game: Game, reveal: PairGrid },
}

const MSG_FALLBACK: &str = "Could not generate a new puzzle. Playing the offline puzzle instead.";
const MSG_WON: &str = "Perfect! You solved the puzzle!";
const MSG_INCORRECT: &str = "Incorrect. Some checks are wrong.";
const MSG_INCOMPLETE: &str = "Correct so far, but incomplete.";
const MSG_OUT_OF_TOKENS: &str = "Out of tokens! Solution revealed.";
const MSG_NO_TOKENS: &str = "No tokens left!";
const MSG_ALL_CLUES: &str = "All clues are already revealed!";
const MSG_NEW_CLUE: &str = "New clue revealed!";

/// A game session.
///
/// # Example
///
/// ```
/// use logigrid_game::{CheckOutcome, Session, SessionStatus};
/// use logigrid_generator::LoadedPuzzle;
///
/// let mut session = Session::default();
/// let generation = session.begin_new_game();
/// session.finish_loading(generation, LoadedPuzzle::fallback()).unwrap();
///
/// // Prof. Plum drank Cognac.
/// session.mark_cell(0, 2, 1, 2, false).unwrap();
/// assert_eq!(session.check(), Ok(CheckOutcome::Incomplete));
/// assert_eq!(session.tokens(), 2);
/// assert_eq!(session.status(), SessionStatus::Playing);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    generation: Generation,
    tokens: u32,
    revealed_clues: usize,
    phase: Phase,
    feedback: Option<Feedback>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    /// Creates a session waiting for its first puzzle.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            generation: Generation::default(),
            tokens: config.initial_tokens,
            revealed_clues: config.initial_revealed_clues,
            phase: Phase::Loading,
            feedback: None,
        }
    }

    /// Returns the current game's generation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the remaining tokens.
    #[must_use]
    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    /// Returns how many clues are visible.
    #[must_use]
    pub fn revealed_clues(&self) -> usize {
        self.revealed_clues
    }

    /// Returns the number of clues in the puzzle, or zero while loading.
    #[must_use]
    pub fn total_clues(&self) -> usize {
        self.puzzle().map_or(0, GeneratedPuzzle::clue_count)
    }

    /// Returns the visible clues.
    #[must_use]
    pub fn visible_clues(&self) -> &[String] {
        match self.puzzle() {
            Some(puzzle) => &puzzle.clues[..self.revealed_clues.min(puzzle.clues.len())],
            None => &[],
        }
    }

    /// Returns the public phase.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match self.phase {
            Phase::Loading => SessionStatus::Loading,
            Phase::Playing(_) => SessionStatus::Playing,
            Phase::Closing { .. } => SessionStatus::Closing,
            Phase::Won(_) => SessionStatus::Won,
            Phase::Lost { .. } => SessionStatus::Lost,
        }
    }

    /// Returns `true` once the puzzle is solved.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status().is_won()
    }

    /// Returns `true` once the comparison grid is shown.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.status().is_lost()
    }

    /// Returns `true` if no further marks, checks or hints are accepted.
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(
            self.status(),
            SessionStatus::Closing | SessionStatus::Won | SessionStatus::Lost
        )
    }

    /// Returns the last feedback message.
    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Returns the current game, if a puzzle is loaded.
    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        match &self.phase {
            Phase::Loading => None,
            Phase::Playing(game)
            | Phase::Closing { game, .. }
            | Phase::Won(game)
            | Phase::Lost { game, .. } => Some(game),
        }
    }

    /// Returns the puzzle content, if loaded.
    #[must_use]
    pub fn puzzle(&self) -> Option<&GeneratedPuzzle> {
        self.game().map(Game::puzzle)
    }

    /// Returns the grid to display: the live grid during play, the
    /// comparison grid once lost.
    #[must_use]
    pub fn grid(&self) -> Option<&PairGrid> {
        match &self.phase {
            Phase::Loading => None,
            Phase::Lost { reveal, .. } => Some(reveal),
            Phase::Playing(game) | Phase::Closing { game, .. } | Phase::Won(game) => {
                Some(game.grid())
            }
        }
    }

    /// Returns `true` if a check would be accepted.
    #[must_use]
    pub fn can_check(&self) -> bool {
        self.status().is_playing() && self.tokens > 0
    }

    /// Returns `true` if a hint would be accepted.
    #[must_use]
    pub fn can_hint(&self) -> bool {
        self.can_check() && self.revealed_clues < self.total_clues()
    }

    /// Starts a new game and waits for its puzzle.
    ///
    /// Resets tokens, clues and feedback. Returns the generation the puzzle
    /// must be delivered with.
    pub fn begin_new_game(&mut self) -> Generation {
        self.generation = Generation(self.generation.0 + 1);
        self.tokens = self.config.initial_tokens;
        self.revealed_clues = self.config.initial_revealed_clues;
        self.phase = Phase::Loading;
        self.feedback = None;
        log::info!("starting game {}", self.generation);
        self.generation
    }

    /// Delivers the puzzle requested by [`Session::begin_new_game`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StaleGeneration`] if `generation` is not the
    /// current game or the current game already has its puzzle.
    pub fn finish_loading(
        &mut self,
        generation: Generation,
        loaded: LoadedPuzzle,
    ) -> Result<(), SessionError> {
        if generation != self.generation || !matches!(self.phase, Phase::Loading) {
            log::warn!(
                "dropping puzzle for game {generation}, current game is {}",
                self.generation
            );
            return Err(SessionError::StaleGeneration);
        }

        let LoadedPuzzle { puzzle, origin } = loaded;
        log::info!("game {generation}: loaded {:?} ({origin:?})", puzzle.title);
        self.revealed_clues = self.revealed_clues.min(puzzle.clue_count());
        self.feedback = origin
            .is_fallback()
            .then(|| Feedback::new(FeedbackKind::Error, MSG_FALLBACK));
        self.phase = Phase::Playing(Game::new(puzzle));
        Ok(())
    }

    /// Applies a manual mark to the cell between two items.
    ///
    /// `secondary` selects the exclude action instead of affirm. Returns the
    /// new state of the cell; auto-exclusions are already rebuilt.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotReady`] or [`SessionError::GameOver`]
    /// outside of play, and [`SessionError::InvalidCell`] for coordinates
    /// that do not name a pair.
    pub fn mark_cell(
        &mut self,
        category_a: u8,
        item_a: u8,
        category_b: u8,
        item_b: u8,
        secondary: bool,
    ) -> Result<CellState, SessionError> {
        let game = self.playing_game_mut()?;
        let pair = Pair::from_indices(category_a, item_a, category_b, item_b)?;
        game.mark(pair, CellAction::from_secondary(secondary))
            .ok_or(SessionError::GameOver)
    }

    /// Spends a token to grade the grid.
    ///
    /// Solving the puzzle ends the game as won. Otherwise, spending the last
    /// token ends it as lost and replaces the grid with the comparison grid.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoTokens`] when no token is left, besides the
    /// errors of [`Session::mark_cell`].
    pub fn check(&mut self) -> Result<CheckOutcome, SessionError> {
        let verdict = self.playing_game_mut()?.check();
        if self.tokens == 0 {
            self.feedback = Some(Feedback::new(FeedbackKind::Error, MSG_NO_TOKENS));
            return Err(SessionError::NoTokens);
        }

        self.tokens -= 1;
        log::debug!(
            "game {}: check {verdict:?}, {} tokens left",
            self.generation,
            self.tokens
        );
        let (outcome, feedback) = if verdict.is_win() {
            (CheckOutcome::Won, Feedback::new(FeedbackKind::Success, MSG_WON))
        } else if self.tokens == 0 {
            (
                CheckOutcome::Lost,
                Feedback::new(FeedbackKind::Error, MSG_OUT_OF_TOKENS),
            )
        } else if verdict.correct {
            (
                CheckOutcome::Incomplete,
                Feedback::new(FeedbackKind::Info, MSG_INCOMPLETE),
            )
        } else {
            (
                CheckOutcome::Incorrect,
                Feedback::new(FeedbackKind::Error, MSG_INCORRECT),
            )
        };

        self.phase = match mem::replace(&mut self.phase, Phase::Loading) {
            Phase::Playing(game) if outcome.is_won() => Phase::Won(game),
            Phase::Playing(game) if outcome.is_lost() => {
                let reveal = game.reveal(game.grid());
                Phase::Lost { game, reveal }
            }
            phase => phase,
        };
        if outcome.is_won() || outcome.is_lost() {
            log::info!("game {}: {outcome:?}", self.generation);
        }
        self.feedback = Some(feedback);
        Ok(outcome)
    }

    /// Spends a token to reveal one more clue.
    ///
    /// If this spends the last token, the session enters the closing phase
    /// and the returned ticket must later be passed to
    /// [`Session::fire_reveal`]. The comparison grid is then computed from
    /// the grid as it is now.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoTokens`] or
    /// [`SessionError::AllCluesRevealed`], besides the errors of
    /// [`Session::mark_cell`].
    pub fn hint(&mut self) -> Result<HintOutcome, SessionError> {
        self.playing_game_mut()?;
        if self.tokens == 0 {
            self.feedback = Some(Feedback::new(FeedbackKind::Error, MSG_NO_TOKENS));
            return Err(SessionError::NoTokens);
        }
        if self.revealed_clues >= self.total_clues() {
            self.feedback = Some(Feedback::new(FeedbackKind::Info, MSG_ALL_CLUES));
            return Err(SessionError::AllCluesRevealed);
        }

        self.tokens -= 1;
        let clue = self.revealed_clues;
        self.revealed_clues += 1;
        self.feedback = Some(Feedback::new(FeedbackKind::Success, MSG_NEW_CLUE));
        log::debug!(
            "game {}: revealed clue {clue}, {} tokens left",
            self.generation,
            self.tokens
        );
        if self.tokens > 0 {
            return Ok(HintOutcome { clue, reveal: None });
        }

        self.phase = match mem::replace(&mut self.phase, Phase::Loading) {
            Phase::Playing(game) => {
                let snapshot = game.grid().clone();
                Phase::Closing { game, snapshot }
            }
            phase => phase,
        };
        log::info!("game {}: out of tokens, reveal pending", self.generation);
        let ticket = RevealTicket {
            generation: self.generation,
            delay: self.config.reveal_delay,
        };
        Ok(HintOutcome {
            clue,
            reveal: Some(ticket),
        })
    }

    /// Completes a reveal scheduled by [`Session::hint`].
    ///
    /// Returns `false` and changes nothing if the ticket belongs to another
    /// game or the session is not waiting for a reveal.
    pub fn fire_reveal(&mut self, ticket: RevealTicket) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "ignoring reveal for game {}, current game is {}",
                ticket.generation,
                self.generation
            );
            return false;
        }

        let mut fired = false;
        self.phase = match mem::replace(&mut self.phase, Phase::Loading) {
            Phase::Closing { game, snapshot } => {
                fired = true;
                let reveal = game.reveal(&snapshot);
                Phase::Lost { game, reveal }
            }
            phase => phase,
        };
        if fired {
            self.feedback = Some(Feedback::new(FeedbackKind::Error, MSG_OUT_OF_TOKENS));
            log::info!("game {}: Lost", self.generation);
        }
        fired
    }

    fn playing_game_mut(&mut self) -> Result<&mut Game, SessionError> {
        match &mut self.phase {
            Phase::Playing(game) => Ok(game),
            Phase::Loading => Err(SessionError::NotReady),
            Phase::Closing { .. } | Phase::Won(_) | Phase::Lost { .. } => {
                Err(SessionError::GameOver)
            }
        }
    }
}
