//! Sources of puzzle content.
//!
//! A [`PuzzleProvider`] turns a [`PuzzleRequest`] into a validated
//! [`GeneratedPuzzle`]. Providers may fail in many ways (a missing program, a
//! malformed answer, content that is not a 3×4 puzzle), and the game never
//! wants to see those failures: [`generate_or_fallback`] swaps in the bundled
//! puzzle and records that it did so.

use std::{
    fs,
    io::{self, Read, Write as _},
    path::PathBuf,
    process::{Child, Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    GeneratedPuzzle, PuzzleRequest, PuzzleResponse, PuzzleValidationError, build_prompt, fallback,
};

/// Errors produced while obtaining puzzle content.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ContentError {
    /// Reading a file or talking to a child process failed.
    #[display("I/O error: {_0}")]
    Io(#[from] io::Error),
    /// The generator answer is not a well-formed response document.
    #[display("malformed generator response: {_0}")]
    Json(#[from] serde_json::Error),
    /// The generator program exited unsuccessfully.
    #[display("generator {program:?} failed ({status}): {stderr}")]
    CommandFailed {
        /// Program that was run.
        program: String,
        /// Its exit status.
        status: ExitStatus,
        /// What it wrote to stderr, trimmed.
        stderr: String,
    },
    /// The generator program did not finish in time and was killed.
    #[display("generator {program:?} did not answer within {timeout:?}")]
    TimedOut {
        /// Program that was run.
        program: String,
        /// The time limit it exceeded.
        timeout: Duration,
    },
    /// The generator produced no output.
    #[display("generator returned an empty response")]
    EmptyResponse,
    /// The response parsed but does not describe a playable puzzle.
    #[display("invalid puzzle: {_0}")]
    Invalid(#[from] PuzzleValidationError),
}

/// A source of puzzle content.
pub trait PuzzleProvider {
    /// Produces a puzzle for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if no playable puzzle could be produced.
    fn generate(&self, request: &PuzzleRequest) -> Result<GeneratedPuzzle, ContentError>;
}

impl<P> PuzzleProvider for Box<P>
where
    P: PuzzleProvider + ?Sized,
{
    fn generate(&self, request: &PuzzleRequest) -> Result<GeneratedPuzzle, ContentError> {
        (**self).generate(request)
    }
}

/// Parses and validates generator output.
///
/// # Errors
///
/// Returns [`ContentError::EmptyResponse`] for blank text, otherwise the
/// parse or validation error.
pub fn parse_response(text: &str) -> Result<GeneratedPuzzle, ContentError> {
    if text.trim().is_empty() {
        return Err(ContentError::EmptyResponse);
    }
    let response = PuzzleResponse::from_json(text)?;
    Ok(GeneratedPuzzle::try_from(response)?)
}

/// How long [`CommandProvider`] waits for a generator by default.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs an external program as the generator.
///
/// The prompt from [`build_prompt`] is written to the program's stdin, and
/// its stdout must be a JSON response document. A program still running
/// after the timeout is killed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandProvider {
    /// Creates a provider running `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Sets how long to wait for the program to exit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns how long the program may run.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Waits for `child` until the timeout, killing it once the time is up.
    fn wait_with_deadline(&self, child: &mut Child) -> Result<ExitStatus, ContentError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                log::warn!(
                    "generator {:?} exceeded {:?}, killing it",
                    self.program,
                    self.timeout
                );
                // The child may exit between the last poll and the kill.
                let _ = child.kill();
                child.wait()?;
                return Err(ContentError::TimedOut {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Drains a child's output pipe on a helper thread so the child never blocks
/// on a full pipe while it is polled.
fn spawn_reader(pipe: Option<impl Read + Send + 'static>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_reader(reader: JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    reader
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("output reader panicked")))
}

impl PuzzleProvider for CommandProvider {
    fn generate(&self, request: &PuzzleRequest) -> Result<GeneratedPuzzle, ContentError> {
        log::debug!("running generator {:?} for theme {:?}", self.program, request.theme);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // Generators that answer without reading the prompt close the pipe early.
            match stdin.write_all(build_prompt(request).as_bytes()) {
                Err(err) if err.kind() != io::ErrorKind::BrokenPipe => return Err(err.into()),
                _ => {}
            }
        }
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = self.wait_with_deadline(&mut child)?;
        let stdout = join_reader(stdout)?;
        let stderr = join_reader(stderr)?;
        if !status.success() {
            return Err(ContentError::CommandFailed {
                program: self.program.clone(),
                status,
                stderr: String::from_utf8_lossy(&stderr).trim().to_owned(),
            });
        }

        parse_response(&String::from_utf8_lossy(&stdout))
    }
}

/// Reads a previously generated response from a JSON file.
///
/// The request is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    /// Creates a provider reading `path` on every request.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PuzzleProvider for FileProvider {
    fn generate(&self, _request: &PuzzleRequest) -> Result<GeneratedPuzzle, ContentError> {
        log::debug!("loading puzzle from {}", self.path.display());
        let text = fs::read_to_string(&self.path)?;
        parse_response(&text)
    }
}

/// Always returns the bundled offline puzzle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FallbackProvider;

impl PuzzleProvider for FallbackProvider {
    fn generate(&self, _request: &PuzzleRequest) -> Result<GeneratedPuzzle, ContentError> {
        Ok(fallback::midnight_express())
    }
}

/// Where a loaded puzzle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum PuzzleOrigin {
    /// The provider answered with a playable puzzle.
    Generated,
    /// The provider failed and the bundled puzzle was substituted.
    Fallback,
}

/// A puzzle together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPuzzle {
    /// The puzzle content.
    pub puzzle: GeneratedPuzzle,
    /// Whether the content is what was asked for.
    pub origin: PuzzleOrigin,
}

impl LoadedPuzzle {
    /// Wraps content that came from a provider.
    #[must_use]
    pub fn generated(puzzle: GeneratedPuzzle) -> Self {
        Self {
            puzzle,
            origin: PuzzleOrigin::Generated,
        }
    }

    /// Returns the bundled puzzle marked as a substitute.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            puzzle: fallback::midnight_express(),
            origin: PuzzleOrigin::Fallback,
        }
    }
}

/// Asks `provider` for a puzzle, substituting the bundled one on failure.
///
/// This never fails. The cause of a substitution is logged as a warning.
///
/// # Examples
///
/// ```
/// use logigrid_generator::{FileProvider, PuzzleRequest, generate_or_fallback};
///
/// let provider = FileProvider::new("/nonexistent/puzzle.json");
/// let loaded = generate_or_fallback(&provider, &PuzzleRequest::default());
/// assert!(loaded.origin.is_fallback());
/// assert_eq!(loaded.puzzle.title, "The Midnight Express (Offline)");
/// ```
pub fn generate_or_fallback<P>(provider: &P, request: &PuzzleRequest) -> LoadedPuzzle
where
    P: PuzzleProvider + ?Sized,
{
    match provider.generate(request) {
        Ok(puzzle) => {
            log::info!("generated puzzle {:?}", puzzle.title);
            LoadedPuzzle::generated(puzzle)
        }
        Err(err) => {
            log::warn!("puzzle generation failed, using offline puzzle: {err}");
            LoadedPuzzle::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    struct FailingProvider;

    impl PuzzleProvider for FailingProvider {
        fn generate(&self, _request: &PuzzleRequest) -> Result<GeneratedPuzzle, ContentError> {
            Err(ContentError::EmptyResponse)
        }
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("logigrid-{}-{name}", process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_failure_substitutes_bundled_puzzle() {
        let loaded = generate_or_fallback(&FailingProvider, &PuzzleRequest::default());
        assert_eq!(loaded, LoadedPuzzle::fallback());
    }

    #[test]
    fn test_fallback_provider_counts_as_generated() {
        let loaded = generate_or_fallback(&FallbackProvider, &PuzzleRequest::default());
        assert!(loaded.origin.is_generated());
        assert_eq!(loaded.puzzle, fallback::midnight_express());
    }

    #[test]
    fn test_boxed_provider() {
        let provider: Box<dyn PuzzleProvider> = Box::new(FailingProvider);
        assert!(generate_or_fallback(&provider, &PuzzleRequest::default()).origin.is_fallback());
    }

    #[test]
    fn test_file_provider_reads_response() {
        let puzzle = fallback::midnight_express();
        let json = PuzzleResponse::from(&puzzle).to_json().unwrap();
        let path = temp_file("valid.json", &json);

        let loaded = FileProvider::new(&path).generate(&PuzzleRequest::default());
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), puzzle);
    }

    #[test]
    fn test_file_provider_reports_invalid_content() {
        let path = temp_file(
            "invalid.json",
            r#"{"title": "x", "categories": [], "clues": ["c"], "solution": []}"#,
        );
        let result = FileProvider::new(&path).generate(&PuzzleRequest::default());
        fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(ContentError::Invalid(PuzzleValidationError::CategoryCount { count: 0 }))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result =
            FileProvider::new("/nonexistent/logigrid.json").generate(&PuzzleRequest::default());
        assert!(matches!(result, Err(ContentError::Io(_))));
    }

    #[test]
    fn test_parse_response_rejects_blank_text() {
        assert!(matches!(parse_response(" \n"), Err(ContentError::EmptyResponse)));
        assert!(matches!(parse_response("{"), Err(ContentError::Json(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_provider_reads_stdout() {
        let puzzle = fallback::midnight_express();
        let json = PuzzleResponse::from(&puzzle).to_json().unwrap();
        let path = temp_file("command.json", &json);

        // `cat <file>` ignores the prompt on stdin and prints the response.
        let provider = CommandProvider::new("cat", [path.display().to_string()]);
        let result = provider.generate(&PuzzleRequest::default());
        fs::remove_file(&path).unwrap();
        assert_eq!(result.unwrap(), puzzle);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_provider_reports_exit_status() {
        let provider = CommandProvider::new("false", Vec::new());
        let result = provider.generate(&PuzzleRequest::default());
        assert!(matches!(result, Err(ContentError::CommandFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_provider_kills_slow_generator() {
        let provider = CommandProvider::new("sleep", ["30".to_owned()])
            .with_timeout(Duration::from_millis(200));
        let started = Instant::now();
        let result = provider.generate(&PuzzleRequest::default());
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(matches!(
            result,
            Err(ContentError::TimedOut { timeout, .. }) if timeout == Duration::from_millis(200)
        ));

        let started = Instant::now();
        let loaded = generate_or_fallback(&provider, &PuzzleRequest::default());
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(loaded.origin.is_fallback());
    }

    #[test]
    fn test_command_provider_default_timeout() {
        let provider = CommandProvider::new("generator", Vec::new());
        assert_eq!(provider.timeout(), DEFAULT_COMMAND_TIMEOUT);
    }
}
