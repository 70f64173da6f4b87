//! Unordered item pairs and their canonical key form.
//!
//! A [`Pair`] is the unit tracked by the grid: two items from two different
//! categories. Pairs are stored in canonical order (lower coordinate first),
//! so building a pair from `(a, b)` or `(b, a)` yields the same value and the
//! same [`PairKey`].
//!
//! The key text is `c{category}i{item}|c{category}i{item}`, with the two parts
//! ordered lexicographically.
//!
//! # Examples
//!
//! ```
//! use logigrid_core::{Coordinate, decode, encode};
//!
//! let key = encode(1, 3, 0, 2);
//! assert_eq!(key.as_str(), "c0i2|c1i3");
//! assert_eq!(key, encode(0, 2, 1, 3));
//!
//! let (a, b) = decode(&key);
//! assert_eq!((a, b), (Coordinate::new(0, 2), Coordinate::new(1, 3)));
//! ```

use std::str::FromStr;

use crate::{Coordinate, ITEM_COUNT};

const SEPARATOR: char = '|';

/// Errors produced when building a pair from unchecked indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PairError {
    /// The category index is not in 0-2.
    #[display("category index {category} is out of range")]
    CategoryOutOfRange {
        /// The rejected index.
        category: u8,
    },
    /// The item index is not in 0-3.
    #[display("item index {item} is out of range")]
    ItemOutOfRange {
        /// The rejected index.
        item: u8,
    },
    /// Both coordinates belong to the same category.
    #[display("cannot pair two items of category {category}")]
    SameCategory {
        /// The shared category.
        category: u8,
    },
}

/// Errors produced when parsing a [`PairKey`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PairKeyError {
    /// The text has no `|` separator.
    #[display("pair key {key:?} has no separator")]
    MissingSeparator {
        /// The rejected text.
        key: String,
    },
    /// One side of the key is not of the form `c{category}i{item}`.
    #[display("invalid pair key part {part:?}")]
    InvalidPart {
        /// The rejected part.
        part: String,
    },
    /// The parts parse but do not form a valid pair.
    #[display("invalid pair: {_0}")]
    #[from]
    Pair(PairError),
}

/// One of the three blocks of the triangular grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryPair {
    /// Categories 0 and 1.
    ZeroOne,
    /// Categories 0 and 2.
    ZeroTwo,
    /// Categories 1 and 2.
    OneTwo,
}

impl CategoryPair {
    /// All blocks in grading order: (0,1), (0,2), (1,2).
    pub const ALL: [Self; 3] = [Self::ZeroOne, Self::ZeroTwo, Self::OneTwo];

    /// Returns the lower and higher category index of this block.
    #[must_use]
    #[inline]
    pub const fn categories(self) -> (u8, u8) {
        match self {
            Self::ZeroOne => (0, 1),
            Self::ZeroTwo => (0, 2),
            Self::OneTwo => (1, 2),
        }
    }

    /// Returns the block for two categories, in either order.
    ///
    /// Returns `None` when the categories are equal or out of range.
    #[must_use]
    pub const fn from_categories(a: u8, b: u8) -> Option<Self> {
        match (a, b) {
            (0, 1) | (1, 0) => Some(Self::ZeroOne),
            (0, 2) | (2, 0) => Some(Self::ZeroTwo),
            (1, 2) | (2, 1) => Some(Self::OneTwo),
            _ => None,
        }
    }

    /// Returns the position of this block in [`CategoryPair::ALL`].
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// An unordered pair of items from two different categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("{first}|{second}")]
pub struct Pair {
    first: Coordinate,
    second: Coordinate,
}

impl Pair {
    /// Number of distinct pairs in a puzzle (3 blocks of 4×4).
    pub const COUNT: usize = CategoryPair::ALL.len() * ITEM_COUNT * ITEM_COUNT;

    /// Creates a pair from two coordinates given in any order.
    ///
    /// # Panics
    ///
    /// Panics if both coordinates belong to the same category.
    #[must_use]
    pub fn new(a: Coordinate, b: Coordinate) -> Self {
        assert_ne!(a.category(), b.category(), "pair needs two categories");
        if a < b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Creates a pair from two coordinates, rejecting same-category input.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::SameCategory`] if both coordinates share a category.
    pub fn try_new(a: Coordinate, b: Coordinate) -> Result<Self, PairError> {
        if a.category() == b.category() {
            return Err(PairError::SameCategory {
                category: a.category(),
            });
        }
        Ok(Self::new(a, b))
    }

    /// Creates a pair from raw `(category, item)` indices.
    ///
    /// # Errors
    ///
    /// Returns a [`PairError`] if an index is out of range or both items
    /// belong to the same category.
    pub fn from_indices(c1: u8, i1: u8, c2: u8, i2: u8) -> Result<Self, PairError> {
        Self::try_new(Coordinate::try_new(c1, i1)?, Coordinate::try_new(c2, i2)?)
    }

    /// Returns the lower coordinate.
    #[must_use]
    #[inline]
    pub const fn first(self) -> Coordinate {
        self.first
    }

    /// Returns the higher coordinate.
    #[must_use]
    #[inline]
    pub const fn second(self) -> Coordinate {
        self.second
    }

    /// Returns both coordinates in canonical order.
    #[must_use]
    #[inline]
    pub const fn coordinates(self) -> (Coordinate, Coordinate) {
        (self.first, self.second)
    }

    /// Returns the grid block this pair belongs to.
    #[must_use]
    pub fn category_pair(self) -> CategoryPair {
        match (self.first.category(), self.second.category()) {
            (0, 1) => CategoryPair::ZeroOne,
            (0, 2) => CategoryPair::ZeroTwo,
            (1, 2) => CategoryPair::OneTwo,
            _ => unreachable!("pairs are canonical and span two categories"),
        }
    }

    /// Returns the canonical key for this pair.
    #[must_use]
    pub fn key(self) -> PairKey {
        PairKey {
            pair: self,
            text: self.to_string(),
        }
    }

    /// Iterates over the other pairs on the same row or column of this pair's
    /// block: every pair that keeps one of the two items and swaps the other.
    pub fn line_peers(self) -> impl Iterator<Item = Self> {
        let (first, second) = self.coordinates();
        let row = Coordinate::items_of(second.category())
            .filter(move |other| *other != second)
            .map(move |other| Self::new(first, other));
        let column = Coordinate::items_of(first.category())
            .filter(move |other| *other != first)
            .map(move |other| Self::new(other, second));
        row.chain(column)
    }

    /// Iterates over all pairs in slot order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_slot)
    }

    /// Returns the position of this pair in a [`Pair::COUNT`]-element array.
    #[must_use]
    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.category_pair().index() * ITEM_COUNT * ITEM_COUNT
            + usize::from(self.first.item()) * ITEM_COUNT
            + usize::from(self.second.item())
    }

    #[must_use]
    pub(crate) fn from_slot(slot: usize) -> Self {
        assert!(slot < Self::COUNT);
        let block = CategoryPair::ALL[slot / (ITEM_COUNT * ITEM_COUNT)];
        let rest = slot % (ITEM_COUNT * ITEM_COUNT);
        let (ca, cb) = block.categories();
        #[expect(clippy::cast_possible_truncation)]
        let (ia, ib) = ((rest / ITEM_COUNT) as u8, (rest % ITEM_COUNT) as u8);
        Self {
            first: Coordinate::new(ca, ia),
            second: Coordinate::new(cb, ib),
        }
    }
}

/// The canonical, order-independent string identifier of a [`Pair`].
///
/// Keys are only built from valid pairs, so [`PairKey::pair`] never fails.
/// Parsing accepts the two parts in either order and normalizes them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{text}")]
pub struct PairKey {
    pair: Pair,
    text: String,
}

impl PairKey {
    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the pair this key identifies.
    #[must_use]
    pub fn pair(&self) -> Pair {
        self.pair
    }
}

impl From<Pair> for PairKey {
    fn from(pair: Pair) -> Self {
        pair.key()
    }
}

impl FromStr for PairKey {
    type Err = PairKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| PairKeyError::MissingSeparator { key: s.to_owned() })?;
        let pair = Pair::try_new(parse_part(a)?, parse_part(b)?)?;
        Ok(pair.key())
    }
}

fn parse_part(part: &str) -> Result<Coordinate, PairKeyError> {
    let invalid = || PairKeyError::InvalidPart {
        part: part.to_owned(),
    };
    let (category, item) = part
        .strip_prefix('c')
        .and_then(|rest| rest.split_once('i'))
        .ok_or_else(invalid)?;
    let category = category.parse::<u8>().map_err(|_| invalid())?;
    let item = item.parse::<u8>().map_err(|_| invalid())?;
    Ok(Coordinate::try_new(category, item)?)
}

/// Encodes two `(category, item)` coordinates into their canonical key.
///
/// The result does not depend on argument order.
///
/// # Panics
///
/// Panics if an index is out of range or both coordinates share a category.
#[must_use]
pub fn encode(c1: u8, i1: u8, c2: u8, i2: u8) -> PairKey {
    Pair::new(Coordinate::new(c1, i1), Coordinate::new(c2, i2)).key()
}

/// Decodes a key back into its two coordinates, in canonical order.
#[must_use]
pub fn decode(key: &PairKey) -> (Coordinate, Coordinate) {
    key.pair().coordinates()
}
