//! Puzzle categories.

use crate::{ITEM_COUNT, normalize_name};

/// A labeled group of four items.
///
/// The order of `items` defines the item indices used by [`Coordinate`].
///
/// [`Coordinate`]: crate::Coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Item names, in index order.
    pub items: [String; ITEM_COUNT],
}

impl Category {
    /// Creates a category.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, items: [&str; ITEM_COUNT]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: items.map(str::to_owned),
        }
    }

    /// Returns the name of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in 0-3.
    #[must_use]
    pub fn item(&self, index: u8) -> &str {
        &self.items[usize::from(index)]
    }

    /// Finds an item by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<u8> {
        let name = normalize_name(name);
        self.items
            .iter()
            .position(|item| normalize_name(item) == name)
            .and_then(|index| u8::try_from(index).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_case_and_space_insensitive() {
        let category = Category::new("drinks", "Drinks", ["Martini", "Whisky", "Cognac", "Sherry"]);
        assert_eq!(category.position("  cognac "), Some(2));
        assert_eq!(category.position("WHISKY"), Some(1));
        assert_eq!(category.position("Gin"), None);
        assert_eq!(category.item(3), "Sherry");
    }
}
