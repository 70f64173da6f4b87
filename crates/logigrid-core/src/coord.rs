//! Item coordinates.

use crate::PairError;

/// Number of categories in a puzzle.
pub const CATEGORY_COUNT: usize = 3;

/// Number of items in each category.
pub const ITEM_COUNT: usize = 4;

/// One item of one category, addressed by `(category, item)` indices.
///
/// The derived ordering compares the category first and the item second,
/// which is the same order as the `c{category}i{item}` text form.
///
/// # Examples
///
/// ```
/// use logigrid_core::Coordinate;
///
/// let coord = Coordinate::new(2, 3);
/// assert_eq!(coord.category(), 2);
/// assert_eq!(coord.item(), 3);
/// assert_eq!(coord.to_string(), "c2i3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("c{category}i{item}")]
pub struct Coordinate {
    category: u8,
    item: u8,
}

impl Coordinate {
    /// All twelve coordinates in category-major order.
    pub const ALL: [Self; CATEGORY_COUNT * ITEM_COUNT] = {
        let mut all = [Self {
            category: 0,
            item: 0,
        }; CATEGORY_COUNT * ITEM_COUNT];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < all.len() {
            all[i] = Self {
                category: (i / ITEM_COUNT) as u8,
                item: (i % ITEM_COUNT) as u8,
            };
            i += 1;
        }
        all
    };

    /// Creates a coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `category` is not in 0-2 or `item` is not in 0-3.
    #[must_use]
    pub const fn new(category: u8, item: u8) -> Self {
        assert!((category as usize) < CATEGORY_COUNT);
        assert!((item as usize) < ITEM_COUNT);
        Self { category, item }
    }

    /// Creates a coordinate from unchecked input.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::CategoryOutOfRange`] or [`PairError::ItemOutOfRange`]
    /// when an index is outside the puzzle.
    pub fn try_new(category: u8, item: u8) -> Result<Self, PairError> {
        if usize::from(category) >= CATEGORY_COUNT {
            return Err(PairError::CategoryOutOfRange { category });
        }
        if usize::from(item) >= ITEM_COUNT {
            return Err(PairError::ItemOutOfRange { item });
        }
        Ok(Self { category, item })
    }

    /// Returns the category index (0-2).
    #[must_use]
    #[inline]
    pub const fn category(self) -> u8 {
        self.category
    }

    /// Returns the item index within the category (0-3).
    #[must_use]
    #[inline]
    pub const fn item(self) -> u8 {
        self.item
    }

    /// Iterates over the coordinates of every item in `category`.
    ///
    /// # Panics
    ///
    /// Panics if `category` is not in 0-2.
    pub fn items_of(category: u8) -> impl Iterator<Item = Self> {
        assert!(usize::from(category) < CATEGORY_COUNT);
        #[expect(clippy::cast_possible_truncation)]
        let item_count = ITEM_COUNT as u8;
        (0..item_count).map(move |item| Self::new(category, item))
    }
}
