use std::mem;

use logigrid_game::RevealTicket;

use crate::worker::WorkResponse;

#[derive(Debug, Clone)]
pub enum Action {
    Mark {
        category_a: u8,
        item_a: u8,
        category_b: u8,
        item_b: u8,
        secondary: bool,
    },
    Check,
    Hint,
    NewGame {
        theme: Option<String>,
    },
    Show,
    Clues,
    Help,
    Quit,
    ApplyWorkResponse(WorkResponse),
    FireReveal(RevealTicket),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseActionError {
    #[display("unknown command {command:?}; type `help` for a list")]
    UnknownCommand { command: String },
    #[display("`{command}` expects four numbers: category item category item")]
    CellArguments { command: String },
    #[display("`{command}` takes no arguments")]
    UnexpectedArguments { command: String },
}

pub const HELP: &str = "\
Commands:
  mark C I C I   affirm that two items belong together (again: exclude, again: clear)
  x C I C I      exclude a pairing (again: clear)
  check          spend a token to check your marks
  hint           spend a token to reveal another clue
  new [THEME]    start a new puzzle, optionally with a new theme
  show           show the grid and status
  clues          list the visible clues
  help           show this help
  quit           leave the game

C is a category number (0-2) and I an item number (0-3), as printed in the grid.";

impl Action {
    /// Parses one line of player input. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseActionError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };
        let command = command.to_ascii_lowercase();
        let rest: Vec<_> = words.collect();

        let action = match command.as_str() {
            "mark" | "m" => parse_cell(&command, &rest, false)?,
            "x" | "exclude" => parse_cell(&command, &rest, true)?,
            "new" | "n" => Self::NewGame {
                theme: (!rest.is_empty()).then(|| rest.join(" ")),
            },
            "check" | "c" => no_arguments(&command, &rest, Self::Check)?,
            "hint" | "h" => no_arguments(&command, &rest, Self::Hint)?,
            "show" | "s" => no_arguments(&command, &rest, Self::Show)?,
            "clues" => no_arguments(&command, &rest, Self::Clues)?,
            "help" | "?" => no_arguments(&command, &rest, Self::Help)?,
            "quit" | "q" | "exit" => no_arguments(&command, &rest, Self::Quit)?,
            _ => return Err(ParseActionError::UnknownCommand { command }),
        };
        Ok(Some(action))
    }
}

fn no_arguments(command: &str, rest: &[&str], action: Action) -> Result<Action, ParseActionError> {
    if rest.is_empty() {
        Ok(action)
    } else {
        Err(ParseActionError::UnexpectedArguments {
            command: command.to_owned(),
        })
    }
}

fn parse_cell(command: &str, rest: &[&str], secondary: bool) -> Result<Action, ParseActionError> {
    let error = || ParseActionError::CellArguments {
        command: command.to_owned(),
    };
    let numbers = rest
        .iter()
        .map(|word| word.parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| error())?;
    let [category_a, item_a, category_b, item_b] = numbers[..] else {
        return Err(error());
    };
    Ok(Action::Mark {
        category_a,
        item_a,
        category_b,
        item_b,
        secondary,
    })
}

#[derive(Debug, Default)]
pub struct ActionRequestQueue {
    actions: Vec<Action>,
}

impl ActionRequestQueue {
    pub fn request(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn take_all(&mut self) -> Vec<Action> {
        mem::take(&mut self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, ActionRequestQueue, ParseActionError};

    #[test]
    fn queued_commands_drain_in_order_once() {
        let mut queue = ActionRequestQueue::default();
        queue.request(Action::Check);
        queue.request(Action::Hint);

        let drained = queue.take_all();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], Action::Check));
        assert!(matches!(drained[1], Action::Hint));

        let drained_again = queue.take_all();
        assert!(drained_again.is_empty());
    }

    #[test]
    fn parse_mark_and_exclude() {
        assert!(matches!(
            Action::parse("mark 0 1 2 3"),
            Ok(Some(Action::Mark {
                category_a: 0,
                item_a: 1,
                category_b: 2,
                item_b: 3,
                secondary: false,
            }))
        ));
        assert!(matches!(
            Action::parse("  X 1 0 0 2 "),
            Ok(Some(Action::Mark {
                secondary: true,
                ..
            }))
        ));
    }

    #[test]
    fn parse_rejects_bad_cell_arguments() {
        for line in ["mark 0 1 2", "mark 0 1 2 3 4", "x a b c d", "mark 0 -1 2 3"] {
            assert!(
                matches!(
                    Action::parse(line),
                    Err(ParseActionError::CellArguments { .. })
                ),
                "{line}"
            );
        }
    }

    #[test]
    fn parse_new_game_theme() {
        assert!(matches!(
            Action::parse("new"),
            Ok(Some(Action::NewGame { theme: None }))
        ));
        match Action::parse("new  Space   Pirates") {
            Ok(Some(Action::NewGame { theme: Some(theme) })) => assert_eq!(theme, "Space Pirates"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parse_simple_commands() {
        assert!(matches!(Action::parse("check"), Ok(Some(Action::Check))));
        assert!(matches!(Action::parse("HINT"), Ok(Some(Action::Hint))));
        assert!(matches!(Action::parse("q"), Ok(Some(Action::Quit))));
        assert!(matches!(Action::parse("   "), Ok(None)));
        assert!(matches!(
            Action::parse("check now"),
            Err(ParseActionError::UnexpectedArguments { .. })
        ));
        assert_eq!(
            Action::parse("dance").unwrap_err(),
            ParseActionError::UnknownCommand {
                command: "dance".to_owned()
            }
        );
    }
}
