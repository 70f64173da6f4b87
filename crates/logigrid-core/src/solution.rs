//! Ground-truth solutions and name lookup.
//!
//! Generated puzzle content is free text, so item names in the solution may
//! not match the category items exactly. [`SolutionIndex`] resolves every
//! item of a puzzle once, trying an exact match first and then a match that
//! ignores case and surrounding whitespace. Both the grader and the reveal
//! grid go through the same index.

use std::array;

use crate::{CATEGORY_COUNT, Category, Coordinate, ITEM_COUNT};

/// Normalizes an item name for lookup: trims whitespace and lowercases.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One solution entry: an item and the items it is truly paired with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionEntry {
    /// Item name as supplied by the generator.
    pub item: String,
    /// Names of the matching items in the other two categories.
    pub matches: Vec<String>,
}

/// The ground-truth mapping from item name to its matches.
///
/// Entries keep their insertion order. Inserting an item name that already
/// exists replaces its matches in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    entries: Vec<SolutionEntry>,
}

impl Solution {
    /// Creates an empty solution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the matches of `item`.
    pub fn insert(&mut self, item: impl Into<String>, matches: Vec<String>) {
        let item = item.into();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.item == item) {
            entry.matches = matches;
        } else {
            self.entries.push(SolutionEntry { item, matches });
        }
    }

    /// Returns the matches of `item` by exact name.
    #[must_use]
    pub fn get(&self, item: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.item == item)
            .map(|entry| entry.matches.as_slice())
    }

    /// Returns the matches of `item`, falling back to a case- and
    /// whitespace-insensitive search when no exact entry exists.
    #[must_use]
    pub fn lookup(&self, item: &str) -> Option<&[String]> {
        self.get(item).or_else(|| {
            let item = normalize_name(item);
            self.entries
                .iter()
                .find(|entry| normalize_name(&entry.item) == item)
                .map(|entry| entry.matches.as_slice())
        })
    }

    /// Returns all entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[SolutionEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the solution has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> FromIterator<(S, Vec<String>)> for Solution
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, Vec<String>)>>(iter: I) -> Self {
        let mut solution = Self::new();
        for (item, matches) in iter {
            solution.insert(item, matches);
        }
        solution
    }
}

/// Per-puzzle lookup table from item coordinates to their true matches.
///
/// Built once when a puzzle is loaded. Items without a solution entry have no
/// matches, so every pair involving them grades as incorrect.
///
/// # Examples
///
/// ```
/// use logigrid_core::{Category, Coordinate, Solution, SolutionIndex};
///
/// let categories = [
///     Category::new("a", "A", ["a0", "a1", "a2", "a3"]),
///     Category::new("b", "B", ["b0", "b1", "b2", "b3"]),
///     Category::new("c", "C", ["c0", "c1", "c2", "c3"]),
/// ];
/// let solution: Solution = [("A0 ", vec!["B2".to_owned(), "c1".to_owned()])]
///     .into_iter()
///     .collect();
/// let index = SolutionIndex::new(&categories, &solution);
///
/// let a0 = Coordinate::new(0, 0);
/// assert!(index.is_match(a0, Coordinate::new(1, 2)));
/// assert_eq!(index.resolve(a0, 2), Some(Coordinate::new(2, 1)));
/// assert_eq!(index.resolve(Coordinate::new(0, 1), 2), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionIndex {
    names: [[String; ITEM_COUNT]; CATEGORY_COUNT],
    matches: [[Option<Vec<String>>; ITEM_COUNT]; CATEGORY_COUNT],
}

impl SolutionIndex {
    /// Resolves every item of `categories` against `solution`.
    #[must_use]
    pub fn new(categories: &[Category; CATEGORY_COUNT], solution: &Solution) -> Self {
        let names: [[String; ITEM_COUNT]; CATEGORY_COUNT] =
            array::from_fn(|c| array::from_fn(|i| normalize_name(&categories[c].items[i])));
        let matches: [[Option<Vec<String>>; ITEM_COUNT]; CATEGORY_COUNT] = array::from_fn(|c| {
            array::from_fn(|i| {
                solution
                    .lookup(&categories[c].items[i])
                    .map(|matches| matches.iter().map(|name| normalize_name(name)).collect())
            })
        });
        Self { names, matches }
    }

    /// Returns the normalized matches of an item, or `None` if the solution
    /// has no entry for it.
    #[must_use]
    pub fn matches_of(&self, coord: Coordinate) -> Option<&[String]> {
        self.matches[usize::from(coord.category())][usize::from(coord.item())].as_deref()
    }

    /// Returns `true` if the solution pairs `a` with `b`, looking `b` up among
    /// the matches of `a`.
    #[must_use]
    pub fn is_match(&self, a: Coordinate, b: Coordinate) -> bool {
        let name = self.name(b);
        self.matches_of(a)
            .is_some_and(|matches| matches.iter().any(|m| m == name))
    }

    /// Returns the item of `category` that the solution pairs with `coord`.
    ///
    /// The first match naming an item of `category` wins.
    #[must_use]
    pub fn resolve(&self, coord: Coordinate, category: u8) -> Option<Coordinate> {
        self.matches_of(coord)?.iter().find_map(|m| {
            Coordinate::items_of(category).find(|candidate| self.name(*candidate) == m)
        })
    }

    /// Iterates over the items that have no solution entry.
    pub fn unresolved(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::ALL
            .into_iter()
            .filter(|coord| self.matches_of(*coord).is_none())
    }

    fn name(&self, coord: Coordinate) -> &str {
        &self.names[usize::from(coord.category())][usize::from(coord.item())]
    }
}
