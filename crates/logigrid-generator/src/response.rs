//! Wire format of generator output.
//!
//! A generator answers with a JSON document shaped like [`PuzzleResponse`].
//! The document is untrusted: [`GeneratedPuzzle::try_from`] checks its shape
//! before it reaches the game.

use std::collections::HashSet;

use logigrid_core::{CATEGORY_COUNT, Category, ITEM_COUNT, Solution, normalize_name};
use serde::{Deserialize, Serialize};

use crate::{GeneratedPuzzle, VisualTheme};

/// Errors produced when generator output does not describe a playable puzzle.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleValidationError {
    /// The puzzle does not have exactly three categories.
    #[display("expected {CATEGORY_COUNT} categories, found {count}")]
    CategoryCount {
        /// Number of categories supplied.
        count: usize,
    },
    /// A category does not have exactly four items.
    #[display("category {category} has {count} items, expected {ITEM_COUNT}")]
    ItemCount {
        /// Index of the offending category.
        category: usize,
        /// Number of items supplied.
        count: usize,
    },
    /// A category contains a blank item name.
    #[display("category {category} has an empty item name")]
    EmptyItem {
        /// Index of the offending category.
        category: usize,
    },
    /// Two items of one category share a name.
    #[display("category {category} lists {item:?} more than once")]
    DuplicateItem {
        /// Index of the offending category.
        category: usize,
        /// The repeated name.
        item: String,
    },
    /// The puzzle has no clues.
    #[display("puzzle has no clues")]
    NoClues,
}

/// A category as sent by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    /// Identifier; blank identifiers are replaced by `cat_{index}`.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Item names.
    pub items: Vec<String>,
}

/// A solution entry as sent by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionEntryDto {
    /// Item name.
    pub item: String,
    /// Names of the items it matches.
    #[serde(default)]
    pub matches: Vec<String>,
}

/// Generator output before validation.
///
/// # Examples
///
/// ```
/// use logigrid_generator::{GeneratedPuzzle, PuzzleResponse};
///
/// let json = r#"{
///     "title": "Tiny",
///     "categories": [
///         {"name": "A", "items": ["a0", "a1", "a2", "a3"]},
///         {"name": "B", "items": ["b0", "b1", "b2", "b3"]},
///         {"name": "C", "items": ["c0", "c1", "c2", "c3"]}
///     ],
///     "clues": ["a0 is not b3."],
///     "solution": [{"item": "a0", "matches": ["b0", "c0"]}]
/// }"#;
/// let response = PuzzleResponse::from_json(json).unwrap();
/// let puzzle = GeneratedPuzzle::try_from(response).unwrap();
/// assert_eq!(puzzle.categories[2].id, "cat_2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleResponse {
    /// Puzzle title.
    pub title: String,
    /// Backstory.
    #[serde(default)]
    pub story: String,
    /// Visual theme; the default theme is used when absent.
    #[serde(default)]
    pub theme: Option<VisualTheme>,
    /// Categories.
    pub categories: Vec<CategoryDto>,
    /// Clues in reveal order.
    pub clues: Vec<String>,
    /// Ground-truth matches.
    pub solution: Vec<SolutionEntryDto>,
}

impl PuzzleResponse {
    /// Parses a response from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `text` is not a well-formed response.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serializes the response as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which does not happen for well-formed
    /// values.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&GeneratedPuzzle> for PuzzleResponse {
    fn from(puzzle: &GeneratedPuzzle) -> Self {
        Self {
            title: puzzle.title.clone(),
            story: puzzle.story.clone(),
            theme: Some(puzzle.theme.clone()),
            categories: puzzle
                .categories
                .iter()
                .map(|category| CategoryDto {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    items: category.items.to_vec(),
                })
                .collect(),
            clues: puzzle.clues.clone(),
            solution: puzzle
                .solution
                .entries()
                .iter()
                .map(|entry| SolutionEntryDto {
                    item: entry.item.clone(),
                    matches: entry.matches.clone(),
                })
                .collect(),
        }
    }
}

impl TryFrom<PuzzleResponse> for GeneratedPuzzle {
    type Error = PuzzleValidationError;

    fn try_from(response: PuzzleResponse) -> Result<Self, Self::Error> {
        let PuzzleResponse {
            title,
            story,
            theme,
            categories,
            clues,
            solution,
        } = response;

        let count = categories.len();
        if count != CATEGORY_COUNT {
            return Err(PuzzleValidationError::CategoryCount { count });
        }
        let categories: [Category; CATEGORY_COUNT] = categories
            .into_iter()
            .enumerate()
            .map(|(index, dto)| convert_category(index, dto))
            .collect::<Result<Vec<_>, _>>()?
            .try_into()
            .map_err(|_: Vec<_>| PuzzleValidationError::CategoryCount { count })?;

        if clues.is_empty() {
            return Err(PuzzleValidationError::NoClues);
        }

        let solution: Solution = solution
            .into_iter()
            .map(|entry| (entry.item, entry.matches))
            .collect();

        Ok(Self {
            title,
            story,
            theme: theme.unwrap_or_default(),
            categories,
            clues,
            solution,
        })
    }
}

fn convert_category(index: usize, dto: CategoryDto) -> Result<Category, PuzzleValidationError> {
    let CategoryDto { id, name, items } = dto;
    let items: [String; ITEM_COUNT] =
        items
            .try_into()
            .map_err(|items: Vec<_>| PuzzleValidationError::ItemCount {
                category: index,
                count: items.len(),
            })?;

    let mut seen = HashSet::new();
    for item in &items {
        let normalized = normalize_name(item);
        if normalized.is_empty() {
            return Err(PuzzleValidationError::EmptyItem { category: index });
        }
        if !seen.insert(normalized) {
            return Err(PuzzleValidationError::DuplicateItem {
                category: index,
                item: item.clone(),
            });
        }
    }

    let id = if id.trim().is_empty() {
        format!("cat_{index}")
    } else {
        id
    };
    Ok(Category { id, name, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, items: &[&str]) -> CategoryDto {
        CategoryDto {
            id: String::new(),
            name: name.to_owned(),
            items: items.iter().map(|item| (*item).to_owned()).collect(),
        }
    }

    fn response() -> PuzzleResponse {
        PuzzleResponse {
            title: "Garden Party".to_owned(),
            story: "Four guests, four hats, four flowers.".to_owned(),
            theme: None,
            categories: vec![
                category("Guests", &["Ada", "Ben", "Cleo", "Dev"]),
                category("Hats", &["Fedora", "Beret", "Bowler", "Cap"]),
                category("Flowers", &["Rose", "Lily", "Iris", "Tulip"]),
            ],
            clues: vec!["Ada wore the Beret.".to_owned()],
            solution: vec![SolutionEntryDto {
                item: "Ada".to_owned(),
                matches: vec!["Beret".to_owned(), "Iris".to_owned()],
            }],
        }
    }

    #[test]
    fn test_valid_response_is_accepted() {
        let puzzle = GeneratedPuzzle::try_from(response()).unwrap();
        assert_eq!(puzzle.title, "Garden Party");
        assert_eq!(puzzle.theme, VisualTheme::default());
        assert_eq!(
            puzzle.categories.each_ref().map(|c| c.id.as_str()),
            ["cat_0", "cat_1", "cat_2"]
        );
        assert_eq!(puzzle.category(1).item(1), "Beret");
        assert_eq!(puzzle.solution.lookup("ada"), Some(&["Beret".to_owned(), "Iris".to_owned()][..]));
    }

    #[test]
    fn test_supplied_ids_are_kept() {
        let mut response = response();
        response.categories[1].id = "hats".to_owned();
        let puzzle = GeneratedPuzzle::try_from(response).unwrap();
        assert_eq!(puzzle.categories[1].id, "hats");
    }

    #[test]
    fn test_wrong_category_count_is_rejected() {
        let mut response = response();
        response.categories.pop();
        assert_eq!(
            GeneratedPuzzle::try_from(response),
            Err(PuzzleValidationError::CategoryCount { count: 2 })
        );
    }

    #[test]
    fn test_wrong_item_count_is_rejected() {
        let mut response = response();
        response.categories[2].items.push("Daisy".to_owned());
        assert_eq!(
            GeneratedPuzzle::try_from(response),
            Err(PuzzleValidationError::ItemCount {
                category: 2,
                count: 5
            })
        );
    }

    #[test]
    fn test_duplicate_items_are_rejected() {
        let mut response = response();
        response.categories[0].items[3] = " ada ".to_owned();
        assert_eq!(
            GeneratedPuzzle::try_from(response),
            Err(PuzzleValidationError::DuplicateItem {
                category: 0,
                item: " ada ".to_owned()
            })
        );
    }

    #[test]
    fn test_blank_items_are_rejected() {
        let mut response = response();
        response.categories[1].items[0] = "  ".to_owned();
        assert_eq!(
            GeneratedPuzzle::try_from(response),
            Err(PuzzleValidationError::EmptyItem { category: 1 })
        );
    }

    #[test]
    fn test_missing_clues_are_rejected() {
        let mut response = response();
        response.clues.clear();
        assert_eq!(
            GeneratedPuzzle::try_from(response),
            Err(PuzzleValidationError::NoClues)
        );
    }

    #[test]
    fn test_json_round_trip_preserves_content() {
        let puzzle = GeneratedPuzzle::try_from(response()).unwrap();
        let json = PuzzleResponse::from(&puzzle).to_json().unwrap();
        let parsed = PuzzleResponse::from_json(&json).unwrap();
        assert_eq!(GeneratedPuzzle::try_from(parsed).unwrap(), puzzle);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(PuzzleResponse::from_json("{\"title\": 3}").is_err());
        assert!(PuzzleResponse::from_json("not json").is_err());
    }
}
