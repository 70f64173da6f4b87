//! Visual theme supplied alongside generated puzzle content.

use serde::{Deserialize, Serialize};

/// Color palette of a theme.
///
/// Values are CSS color strings (usually hex). They are passed through to the
/// presentation layer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Page background.
    pub background: String,
    /// Board and card background.
    pub surface: String,
    /// Grid lines and borders.
    pub border: String,
    /// Main text.
    pub text: String,
    /// Highlights and buttons.
    pub accent: String,
    /// Branding color.
    pub primary: String,
}

/// Font family matching a theme.
#[derive(
    Debug,
    Default,
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
pub enum FontStyle {
    /// Serif typeface.
    #[display("serif")]
    Serif,
    /// Sans-serif typeface.
    #[default]
    #[display("sans")]
    Sans,
    /// Monospace typeface.
    #[display("mono")]
    Mono,
}

/// Colors, font and emoji chosen to match a puzzle's story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualTheme {
    /// Color palette.
    pub colors: ThemeColors,
    /// Font family.
    pub font: FontStyle,
    /// A single emoji used as a decoration.
    pub emoji: String,
}

impl Default for VisualTheme {
    fn default() -> Self {
        Self {
            colors: ThemeColors {
                background: "#f8fafc".to_owned(),
                surface: "#ffffff".to_owned(),
                border: "#cbd5e1".to_owned(),
                text: "#0f172a".to_owned(),
                accent: "#2563eb".to_owned(),
                primary: "#1e293b".to_owned(),
            },
            font: FontStyle::Sans,
            emoji: "🔍".to_owned(),
        }
    }
}
