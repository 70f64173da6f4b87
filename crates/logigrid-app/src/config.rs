//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use logigrid_game::SessionConfig;
use logigrid_generator::{
    CommandProvider, DEFAULT_COMMAND_TIMEOUT, DEFAULT_THEME, Difficulty, FallbackProvider, FileProvider, PuzzleProvider,
    PuzzleRequest,
};

/// Play logic-grid puzzles in the terminal.
///
/// Puzzles come from an external generator command, a JSON file, or the
/// bundled offline puzzle.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Theme of the generated puzzles.
    #[arg(long, value_name = "THEME", default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Difficulty requested from the generator (easy, medium, hard).
    #[arg(long, value_name = "LEVEL")]
    pub difficulty: Option<Difficulty>,

    /// Program that reads a prompt on stdin and prints a puzzle as JSON.
    #[arg(long, value_name = "PROGRAM", conflicts_with_all = ["puzzle_file", "offline"])]
    pub generator_cmd: Option<String>,

    /// Argument passed to the generator program. Repeatable.
    #[arg(
        long = "generator-arg",
        value_name = "ARG",
        requires = "generator_cmd",
        allow_hyphen_values = true
    )]
    pub generator_args: Vec<String>,

    /// Seconds to wait for the generator before using the offline puzzle.
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_COMMAND_TIMEOUT.as_secs(),
        requires = "generator_cmd"
    )]
    pub generator_timeout_secs: u64,

    /// Load every puzzle from a JSON file.
    #[arg(long, value_name = "PATH", conflicts_with = "offline")]
    pub puzzle_file: Option<PathBuf>,

    /// Play the bundled offline puzzle only.
    #[arg(long)]
    pub offline: bool,

    /// Delay between spending the last token on a hint and the reveal.
    #[arg(long, value_name = "MILLIS", default_value_t = 1500)]
    pub reveal_delay_ms: u64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            difficulty: None,
            generator_cmd: None,
            generator_args: Vec::new(),
            generator_timeout_secs: DEFAULT_COMMAND_TIMEOUT.as_secs(),
            puzzle_file: None,
            offline: false,
            reveal_delay_ms: 1500,
        }
    }
}

impl Args {
    /// Builds the content provider selected on the command line.
    ///
    /// Without a generator command or puzzle file, the bundled puzzle is
    /// served.
    #[must_use]
    pub fn provider(&self) -> Box<dyn PuzzleProvider + Send> {
        if self.offline {
            return Box::new(FallbackProvider);
        }
        if let Some(command) = self.command_provider() {
            return Box::new(command);
        }
        if let Some(path) = &self.puzzle_file {
            return Box::new(FileProvider::new(path.clone()));
        }
        log::info!("no generator configured, using the offline puzzle");
        Box::new(FallbackProvider)
    }

    /// Builds the generator command provider, if a command was given.
    #[must_use]
    pub fn command_provider(&self) -> Option<CommandProvider> {
        let program = self.generator_cmd.as_ref()?;
        let provider = CommandProvider::new(program.clone(), self.generator_args.iter().cloned())
            .with_timeout(Duration::from_secs(self.generator_timeout_secs));
        Some(provider)
    }

    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default().with_reveal_delay(Duration::from_millis(self.reveal_delay_ms))
    }

    #[must_use]
    pub fn puzzle_request(&self) -> PuzzleRequest {
        PuzzleRequest::new(self.theme.clone()).with_difficulty(self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::{CommandFactory, Parser};
    use logigrid_generator::{CommandProvider, DEFAULT_COMMAND_TIMEOUT, DEFAULT_THEME, Difficulty};

    use super::Args;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["logigrid"]).unwrap();
        assert_eq!(args.theme, DEFAULT_THEME);
        assert_eq!(args.difficulty, None);
        assert!(!args.offline);
        assert_eq!(args.command_provider(), None);
        assert_eq!(args.generator_timeout_secs, Args::default().generator_timeout_secs);
        assert_eq!(
            args.session_config().reveal_delay(),
            Duration::from_millis(1500)
        );
        assert_eq!(args.puzzle_request(), Args::default().puzzle_request());
    }

    #[test]
    fn parses_generator_command_with_arguments() {
        let args = Args::try_parse_from([
            "logigrid",
            "--theme",
            "Space Pirates",
            "--difficulty",
            "Hard",
            "--generator-cmd",
            "llm",
            "--generator-arg",
            "--model",
            "--generator-arg",
            "fast",
            "--generator-timeout-secs",
            "30",
            "--reveal-delay-ms",
            "10",
        ])
        .unwrap();
        assert_eq!(args.generator_cmd.as_deref(), Some("llm"));
        assert_eq!(args.generator_args, ["--model", "fast"]);
        assert_eq!(
            args.command_provider(),
            Some(
                CommandProvider::new("llm", ["--model".to_owned(), "fast".to_owned()])
                    .with_timeout(Duration::from_secs(30))
            )
        );
        assert_eq!(args.difficulty, Some(Difficulty::Hard));
        assert_eq!(args.puzzle_request().theme, "Space Pirates");
        assert_eq!(
            args.session_config().reveal_delay(),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn generator_uses_default_timeout() {
        let args = Args::try_parse_from(["logigrid", "--generator-cmd", "llm"]).unwrap();
        let provider = args.command_provider().unwrap();
        assert_eq!(provider.timeout(), DEFAULT_COMMAND_TIMEOUT);
    }

    #[test]
    fn rejects_conflicting_sources() {
        assert!(
            Args::try_parse_from(["logigrid", "--offline", "--puzzle-file", "p.json"]).is_err()
        );
        assert!(Args::try_parse_from(["logigrid", "--offline", "--generator-cmd", "llm"]).is_err());
        assert!(Args::try_parse_from(["logigrid", "--generator-arg", "x"]).is_err());
        assert!(Args::try_parse_from(["logigrid", "--generator-timeout-secs", "5"]).is_err());
        assert!(Args::try_parse_from(["logigrid", "--difficulty", "brutal"]).is_err());
    }
}
