//! Generation requests and the prompt sent to a text-generation service.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Theme used when the player does not ask for one.
pub const DEFAULT_THEME: &str = "Classic Mystery";

/// Requested difficulty of a puzzle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Direct clues.
    #[display("easy")]
    Easy,
    /// A mix of direct and negative clues.
    #[display("medium")]
    Medium,
    /// Mostly indirect clues.
    #[display("hard")]
    Hard,
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty {name:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError {
    name: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError { name: s.to_owned() }),
        }
    }
}

/// What the player asked a generator for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRequest {
    /// Free-text theme, e.g. `"Sci-Fi"`.
    pub theme: String,
    /// Optional difficulty hint.
    pub difficulty: Option<Difficulty>,
}

impl Default for PuzzleRequest {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl PuzzleRequest {
    /// Creates a request for `theme` with no difficulty preference.
    ///
    /// A blank theme falls back to [`DEFAULT_THEME`].
    #[must_use]
    pub fn new(theme: impl Into<String>) -> Self {
        let theme = theme.into();
        let theme = if theme.trim().is_empty() {
            DEFAULT_THEME.to_owned()
        } else {
            theme.trim().to_owned()
        };
        Self {
            theme,
            difficulty: None,
        }
    }

    /// Sets the difficulty preference.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }
}

/// Builds the instruction text for a text-generation service.
///
/// The service is asked for a JSON document matching [`PuzzleResponse`]:
/// three categories of four items, exactly six clues that fully determine the
/// solution, and a visual theme matching the story.
///
/// [`PuzzleResponse`]: crate::PuzzleResponse
///
/// # Examples
///
/// ```
/// use logigrid_generator::{Difficulty, PuzzleRequest, build_prompt};
///
/// let request = PuzzleRequest::new("Noir").with_difficulty(Some(Difficulty::Hard));
/// let prompt = build_prompt(&request);
/// assert!(prompt.contains("'Noir' theme"));
/// assert!(prompt.contains("hard"));
/// ```
#[must_use]
pub fn build_prompt(request: &PuzzleRequest) -> String {
    let mut prompt = format!(
        "Create a logic grid puzzle with a '{}' theme.\n",
        request.theme
    );
    if let Some(difficulty) = request.difficulty {
        prompt.push_str(&format!("The puzzle should be {difficulty} to solve.\n"));
    }
    prompt.push_str(
        "
DESIGN INSTRUCTIONS:
You are also a UI designer. Produce a 'theme' object with colors, a font and
an emoji that match the puzzle's mood.
- Noir: grayscale, serif, dark backgrounds.
- Sci-Fi: dark blue or black, neon green or cyan accents, mono font.
- Fantasy: parchment and gold colors, serif font.
- Cyberpunk: pink and blue neon, black background, sans font.

LOGIC INSTRUCTIONS:
The puzzle MUST have exactly 3 categories.
Each category MUST have exactly 4 unique items.
Provide exactly 6 clues.
The puzzle MUST be 100% solvable using ONLY these 6 clues.

OUTPUT FORMAT:
Answer with a single JSON object and nothing else:
{
  \"title\": string,
  \"story\": string (at most 2 sentences),
  \"theme\": {
    \"colors\": {\"background\", \"surface\", \"border\", \"text\", \"accent\", \"primary\"},
    \"font\": \"serif\" | \"sans\" | \"mono\",
    \"emoji\": string
  },
  \"categories\": [{\"id\": string, \"name\": string, \"items\": [4 strings]}],
  \"clues\": [6 strings],
  \"solution\": [{\"item\": string, \"matches\": [strings]}]
}
List every item in \"solution\" with the items it matches in the other two categories.
",
    );
    prompt
}
