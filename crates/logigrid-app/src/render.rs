//! Plain-text rendering of the session.
//!
//! The grid keeps the board's triangular layout: category 1 rows against
//! category 0 and category 2 columns, then category 2 rows against category 0
//! columns. Items are addressed as `c{category}i{item}`, the same numbers the
//! `mark` and `x` commands take.

use std::io::{self, Write};

use logigrid_core::{CellState, Coordinate, Pair, PairGrid};
use logigrid_game::{FeedbackKind, Session, SessionStatus};
use logigrid_generator::GeneratedPuzzle;

const LABEL_WIDTH: usize = 22;

/// Returns the character drawn for a cell.
#[must_use]
pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::False => 'x',
        CellState::True => 'o',
        CellState::FalseAuto => '-',
        CellState::TrueCorrect => 'O',
        CellState::TrueIncorrect => '!',
        CellState::Missed => '?',
    }
}

fn status_label(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Loading => "constructing mystery",
        SessionStatus::Playing => "investigating",
        SessionStatus::Closing => "case closing",
        SessionStatus::Won => "case solved",
        SessionStatus::Lost => "case closed",
    }
}

fn feedback_marker(kind: FeedbackKind) -> &'static str {
    match kind {
        FeedbackKind::Error => "!!",
        FeedbackKind::Success => "**",
        FeedbackKind::Info => "--",
    }
}

fn column_header(category: u8) -> String {
    let items: Vec<_> = Coordinate::items_of(category)
        .map(|coord| coord.item().to_string())
        .collect();
    format!("c{category}: {}", items.join(" "))
}

fn cells(grid: &PairGrid, row: Coordinate, column_category: u8) -> String {
    let glyphs: Vec<_> = Coordinate::items_of(column_category)
        .map(|column| glyph(grid.get(Pair::new(row, column))).to_string())
        .collect();
    format!("    {}", glyphs.join(" "))
}

fn row_label(puzzle: &GeneratedPuzzle, row: Coordinate) -> String {
    let name = puzzle.category(row.category()).item(row.item());
    format!("{row} {name}")
}

/// Writes every category with its numbered items.
pub fn write_legend(out: &mut impl Write, puzzle: &GeneratedPuzzle) -> io::Result<()> {
    for (category, content) in (0..).zip(&puzzle.categories) {
        let items: Vec<_> = Coordinate::items_of(category)
            .map(|coord| format!("{} {}", coord.item(), content.item(coord.item())))
            .collect();
        writeln!(out, "c{category} {}: {}", content.name, items.join(", "))?;
    }
    Ok(())
}

/// Writes the grid.
pub fn write_grid(out: &mut impl Write, puzzle: &GeneratedPuzzle, grid: &PairGrid) -> io::Result<()> {
    writeln!(
        out,
        "{:LABEL_WIDTH$}  {}  {}",
        "",
        column_header(0),
        column_header(2)
    )?;
    for row in Coordinate::items_of(1) {
        writeln!(
            out,
            "{:LABEL_WIDTH$}  {}  {}",
            row_label(puzzle, row),
            cells(grid, row, 0),
            cells(grid, row, 2)
        )?;
    }
    writeln!(out)?;
    for row in Coordinate::items_of(2) {
        writeln!(
            out,
            "{:LABEL_WIDTH$}  {}",
            row_label(puzzle, row),
            cells(grid, row, 0)
        )?;
    }
    Ok(())
}

/// Writes tokens, clue progress, phase, the commands that are still
/// accepted and the last feedback message.
pub fn write_status(out: &mut impl Write, session: &Session) -> io::Result<()> {
    writeln!(
        out,
        "Tokens: {}  Clues: {}/{}  Case: {}",
        session.tokens(),
        session.revealed_clues(),
        session.total_clues(),
        status_label(session.status())
    )?;
    if session.is_over() {
        writeln!(out, "Type `new` for another case.")?;
    } else if session.status().is_playing() {
        let mut actions = vec!["mark", "x"];
        if session.can_check() {
            actions.push("check");
        }
        if session.can_hint() {
            actions.push("hint");
        }
        writeln!(out, "Actions: {}", actions.join(", "))?;
    }
    write_feedback(out, session)
}

/// Writes the last feedback message, if any.
pub fn write_feedback(out: &mut impl Write, session: &Session) -> io::Result<()> {
    if let Some(feedback) = session.feedback() {
        writeln!(out, "{} {feedback}", feedback_marker(feedback.kind))?;
    }
    Ok(())
}

/// Writes the visible clues, numbered from 1.
pub fn write_clues(out: &mut impl Write, session: &Session) -> io::Result<()> {
    writeln!(out, "Case file:")?;
    for (number, clue) in (1..).zip(session.visible_clues()) {
        writeln!(out, "  {number}. {clue}")?;
    }
    let hidden = session.total_clues() - session.visible_clues().len();
    if hidden > 0 {
        writeln!(out, "  ({hidden} more hidden; `hint` spends a token to reveal one)")?;
    }
    Ok(())
}

/// Writes the banner shown when a puzzle is solved.
pub fn write_celebration(out: &mut impl Write, puzzle: &GeneratedPuzzle) -> io::Result<()> {
    let message = format!("CASE SOLVED: {}", puzzle.title);
    let border = "*".repeat(message.chars().count() + 6);
    writeln!(out, "{border}")?;
    writeln!(out, "*  {message}  *")?;
    writeln!(out, "{border}")?;
    Ok(())
}

/// Writes the whole screen: puzzle heading, grid, status and clues.
pub fn write_screen(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let (Some(puzzle), Some(grid)) = (session.puzzle(), session.grid()) else {
        writeln!(out, "Constructing mystery...")?;
        writeln!(out, "Interviewing witnesses, gathering evidence...")?;
        return Ok(());
    };

    writeln!(out, "{} {}", puzzle.theme.emoji, puzzle.title)?;
    if !puzzle.story.is_empty() {
        writeln!(out, "{}", puzzle.story)?;
    }
    writeln!(out)?;
    write_legend(out, puzzle)?;
    writeln!(out)?;
    write_grid(out, puzzle, grid)?;
    if session.is_lost() {
        writeln!(out)?;
        writeln!(out, "O correct  ! incorrect  ? missed")?;
        writeln!(
            out,
            "CASE CLOSED. You ran out of resources. The solution comparison is shown above."
        )?;
    }
    writeln!(out)?;
    write_status(out, session)?;
    writeln!(out)?;
    write_clues(out, session)
}

#[cfg(test)]
mod tests {
    use logigrid_core::{CellState, Coordinate, Pair, PairGrid};
    use logigrid_game::Session;
    use logigrid_generator::{LoadedPuzzle, fallback};

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn line_starting_with<'a>(text: &'a str, prefix: &str) -> &'a str {
        text.lines()
            .find(|line| line.starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {prefix:?} in\n{text}"))
    }

    #[test]
    fn glyphs_are_distinct() {
        let states = [
            CellState::Empty,
            CellState::False,
            CellState::True,
            CellState::FalseAuto,
            CellState::TrueCorrect,
            CellState::TrueIncorrect,
            CellState::Missed,
        ];
        let mut glyphs: Vec<_> = states.into_iter().map(glyph).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), states.len());
    }

    #[test]
    fn grid_places_cells_by_block() {
        let puzzle = fallback::midnight_express();
        let mut grid = PairGrid::new();
        grid.set(
            Pair::new(Coordinate::new(1, 0), Coordinate::new(0, 0)),
            CellState::True,
        );
        grid.set(
            Pair::new(Coordinate::new(1, 0), Coordinate::new(2, 3)),
            CellState::False,
        );
        grid.set(
            Pair::new(Coordinate::new(2, 1), Coordinate::new(0, 2)),
            CellState::FalseAuto,
        );
        let text = render(|out| write_grid(out, &puzzle, &grid));

        let header = text.lines().next().unwrap();
        assert!(header.ends_with("c0: 0 1 2 3  c2: 0 1 2 3"), "{header}");
        assert!(
            line_starting_with(&text, "c1i0 Martini").ends_with("o . . .      . . . x")
        );
        assert!(line_starting_with(&text, "c1i3 Sherry").ends_with(". . . .      . . . ."));
        assert!(line_starting_with(&text, "c2i1 Lounge").ends_with(". . - ."));
        assert_eq!(text.lines().count(), 1 + 4 + 1 + 4);
    }

    #[test]
    fn legend_numbers_items() {
        let puzzle = fallback::midnight_express();
        let text = render(|out| write_legend(out, &puzzle));
        assert_eq!(
            text.lines().next(),
            Some("c0 Passengers: 0 Col. Mustard, 1 Miss Scarlet, 2 Prof. Plum, 3 Mrs. Peacock")
        );
    }

    #[test]
    fn screen_while_loading() {
        let mut session = Session::default();
        session.begin_new_game();
        let text = render(|out| write_screen(out, &session));
        assert!(text.starts_with("Constructing mystery..."));
    }

    #[test]
    fn screen_lists_visible_clues_and_status() {
        let mut session = Session::default();
        let generation = session.begin_new_game();
        session
            .finish_loading(generation, LoadedPuzzle::fallback())
            .unwrap();
        let text = render(|out| write_screen(out, &session));

        assert!(text.starts_with("🚂 The Midnight Express (Offline)\n"));
        assert!(text.contains("Tokens: 3  Clues: 4/6  Case: investigating\n"));
        assert!(text.contains("Actions: mark, x, check, hint\n"));
        assert!(text.contains("!! Could not generate a new puzzle."));
        assert!(text.contains("  4. The Sherry was served in the Lounge.\n"));
        assert!(!text.contains("  5. "));
        assert!(text.contains("(2 more hidden;"));
    }

    fn playing_session() -> Session {
        let mut session = Session::default();
        let generation = session.begin_new_game();
        session
            .finish_loading(generation, LoadedPuzzle::fallback())
            .unwrap();
        session
    }

    #[test]
    fn status_drops_hint_once_every_clue_is_visible() {
        let mut session = playing_session();
        session.hint().unwrap();
        session.hint().unwrap();
        let text = render(|out| write_status(out, &session));
        assert!(text.contains("Tokens: 1  Clues: 6/6  Case: investigating\n"));
        assert!(text.contains("Actions: mark, x, check\n"));
    }

    #[test]
    fn status_after_loss_offers_new_game() {
        let mut session = playing_session();
        for _ in 0..3 {
            session.check().unwrap();
        }
        assert!(session.is_lost());
        let text = render(|out| write_status(out, &session));
        assert!(text.contains("Type `new` for another case.\n"));
        assert!(!text.contains("Actions:"));
    }

    #[test]
    fn celebration_banner_frames_title() {
        let puzzle = fallback::midnight_express();
        let text = render(|out| write_celebration(out, &puzzle));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "*  CASE SOLVED: The Midnight Express (Offline)  *");
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }
}
