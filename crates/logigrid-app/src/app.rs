//! The terminal game loop state.
//!
//! Each tick the binary calls [`App::poll`] to collect finished background
//! work and due reveals, then [`App::handle_all`] to apply every queued
//! action and print the result.

use std::{
    io::{self, Write},
    time::Instant,
};

use logigrid_game::{CheckOutcome, RevealTicket, Session, SessionConfig, SessionError};
use logigrid_generator::{LoadedPuzzle, PuzzleProvider, PuzzleRequest};

use crate::{
    action::{self, Action, ActionRequestQueue},
    config::Args,
    render,
    scheduler::DeferredQueue,
    worker::{WorkHandle, WorkRequest, WorkResponse, Worker},
};

/// Whether the main loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    session: Session,
    worker: Worker,
    pending: Option<WorkHandle>,
    reveals: DeferredQueue<RevealTicket>,
    request: PuzzleRequest,
}

impl App {
    #[must_use]
    pub fn new(args: &Args) -> Self {
        Self::with_provider(args.provider(), args.session_config(), args.puzzle_request())
    }

    #[must_use]
    pub fn with_provider(
        provider: Box<dyn PuzzleProvider + Send>,
        config: SessionConfig,
        request: PuzzleRequest,
    ) -> Self {
        Self {
            session: Session::new(config),
            worker: Worker::spawn(provider),
            pending: None,
            reveals: DeferredQueue::default(),
            request,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Queues finished puzzle generation and reveals that are due at `now`.
    pub fn poll(&mut self, now: Instant, queue: &mut ActionRequestQueue) {
        if let Some(handle) = &mut self.pending {
            match handle.poll() {
                Ok(Some(response)) => {
                    self.pending = None;
                    queue.request(Action::ApplyWorkResponse(response));
                }
                Ok(None) => {}
                Err(err) => {
                    log::error!("puzzle generation failed: {err}");
                    self.pending = None;
                    queue.request(Action::ApplyWorkResponse(WorkResponse::PuzzleReady {
                        generation: self.session.generation(),
                        loaded: LoadedPuzzle::fallback(),
                    }));
                }
            }
        }

        for ticket in self.reveals.take_due(now) {
            queue.request(Action::FireReveal(ticket));
        }
    }

    /// Applies every queued action, writing the player-facing output to `out`.
    ///
    /// Stops at the first [`Action::Quit`]; later actions are discarded.
    pub fn handle_all(
        &mut self,
        queue: &mut ActionRequestQueue,
        now: Instant,
        out: &mut impl Write,
    ) -> io::Result<Control> {
        for action in queue.take_all() {
            if self.handle(action, now, out)?.is_quit() {
                return Ok(Control::Quit);
            }
        }
        Ok(Control::Continue)
    }

    fn handle(&mut self, action: Action, now: Instant, out: &mut impl Write) -> io::Result<Control> {
        match action {
            Action::Mark {
                category_a,
                item_a,
                category_b,
                item_b,
                secondary,
            } => match self
                .session
                .mark_cell(category_a, item_a, category_b, item_b, secondary)
            {
                Ok(_) => self.write_grid(out)?,
                Err(err) => write_error(out, &self.session, &err)?,
            },
            Action::Check => match self.session.check() {
                Ok(outcome) => {
                    render::write_feedback(out, &self.session)?;
                    match outcome {
                        CheckOutcome::Won => {
                            if let Some(puzzle) = self.session.puzzle() {
                                render::write_celebration(out, puzzle)?;
                            }
                        }
                        CheckOutcome::Lost => render::write_screen(out, &self.session)?,
                        CheckOutcome::Incorrect | CheckOutcome::Incomplete => {
                            writeln!(out, "Tokens left: {}", self.session.tokens())?;
                        }
                    }
                }
                Err(err) => write_error(out, &self.session, &err)?,
            },
            Action::Hint => match self.session.hint() {
                Ok(outcome) => {
                    render::write_feedback(out, &self.session)?;
                    if let Some(clue) = self.session.visible_clues().get(outcome.clue) {
                        writeln!(out, "  {}. {clue}", outcome.clue + 1)?;
                    }
                    if let Some(ticket) = outcome.reveal {
                        self.reveals.schedule(now + ticket.delay(), ticket);
                        writeln!(out, "That was your last token. The case is closing...")?;
                    }
                }
                Err(err) => write_error(out, &self.session, &err)?,
            },
            Action::NewGame { theme } => self.start_new_game(theme, out)?,
            Action::Show => render::write_screen(out, &self.session)?,
            Action::Clues => render::write_clues(out, &self.session)?,
            Action::Help => writeln!(out, "{}", action::HELP)?,
            Action::Quit => return Ok(Control::Quit),
            Action::ApplyWorkResponse(WorkResponse::PuzzleReady { generation, loaded }) => {
                match self.session.finish_loading(generation, loaded) {
                    Ok(()) => render::write_screen(out, &self.session)?,
                    Err(err) => log::debug!("ignoring puzzle for game {generation}: {err}"),
                }
            }
            Action::FireReveal(ticket) => {
                if self.session.fire_reveal(ticket) {
                    render::write_screen(out, &self.session)?;
                }
            }
        }
        out.flush()?;
        Ok(Control::Continue)
    }

    fn start_new_game(&mut self, theme: Option<String>, out: &mut impl Write) -> io::Result<()> {
        if let Some(theme) = theme {
            self.request = PuzzleRequest::new(theme).with_difficulty(self.request.difficulty);
        }
        self.reveals.clear();
        let generation = self.session.begin_new_game();
        let request = WorkRequest::GeneratePuzzle {
            generation,
            request: self.request.clone(),
        };
        match self.worker.enqueue(request) {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => {
                log::error!("cannot reach the puzzle worker: {err}");
                self.pending = None;
                if let Err(err) = self
                    .session
                    .finish_loading(generation, LoadedPuzzle::fallback())
                {
                    log::error!("cannot load the offline puzzle: {err}");
                }
                return render::write_screen(out, &self.session);
            }
        }
        writeln!(out, "Constructing a {:?} mystery...", self.request.theme)
    }

    fn write_grid(&self, out: &mut impl Write) -> io::Result<()> {
        if let (Some(puzzle), Some(grid)) = (self.session.puzzle(), self.session.grid()) {
            render::write_grid(out, puzzle, grid)?;
        }
        Ok(())
    }
}

fn write_error(out: &mut impl Write, session: &Session, err: &SessionError) -> io::Result<()> {
    match err {
        SessionError::NoTokens | SessionError::AllCluesRevealed => {
            render::write_feedback(out, session)
        }
        _ => writeln!(out, "Cannot do that: {err}"),
    }
}
