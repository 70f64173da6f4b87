//! The bundled offline puzzle.

use logigrid_core::{Category, Solution};

use crate::{FontStyle, GeneratedPuzzle, ThemeColors, VisualTheme};

/// Returns the bundled "Midnight Express" puzzle.
///
/// Used whenever a generator is unavailable or returns unusable content, so a
/// game can always start. The solution lists every item with its two matches.
#[must_use]
pub fn midnight_express() -> GeneratedPuzzle {
    let solution: Solution = [
        ("Col. Mustard", ["Martini", "Dining Car"]),
        ("Miss Scarlet", ["Sherry", "Lounge"]),
        ("Prof. Plum", ["Cognac", "Sleeper"]),
        ("Mrs. Peacock", ["Whisky", "Observation"]),
        ("Martini", ["Col. Mustard", "Dining Car"]),
        ("Whisky", ["Mrs. Peacock", "Observation"]),
        ("Cognac", ["Prof. Plum", "Sleeper"]),
        ("Sherry", ["Miss Scarlet", "Lounge"]),
        ("Dining Car", ["Col. Mustard", "Martini"]),
        ("Lounge", ["Miss Scarlet", "Sherry"]),
        ("Sleeper", ["Prof. Plum", "Cognac"]),
        ("Observation", ["Mrs. Peacock", "Whisky"]),
    ]
    .into_iter()
    .map(|(item, matches)| (item, matches.map(str::to_owned).to_vec()))
    .collect();

    GeneratedPuzzle {
        title: "The Midnight Express (Offline)".to_owned(),
        story: "Three passengers ordered different drinks in different train cars. What a mystery!"
            .to_owned(),
        theme: VisualTheme {
            colors: ThemeColors {
                background: "#fdf6e3".to_owned(),
                surface: "#f3e9dc".to_owned(),
                border: "#d6cbb6".to_owned(),
                text: "#2b2d42".to_owned(),
                accent: "#d90429".to_owned(),
                primary: "#2b2d42".to_owned(),
            },
            font: FontStyle::Serif,
            emoji: "🚂".to_owned(),
        },
        categories: [
            Category::new(
                "passengers",
                "Passengers",
                ["Col. Mustard", "Miss Scarlet", "Prof. Plum", "Mrs. Peacock"],
            ),
            Category::new("drinks", "Drinks", ["Martini", "Whisky", "Cognac", "Sherry"]),
            Category::new(
                "cars",
                "Cars",
                ["Dining Car", "Lounge", "Sleeper", "Observation"],
            ),
        ],
        clues: [
            "Colonel Mustard was seen in the Dining Car.",
            "The Whisky drinker was not Miss Scarlet.",
            "Prof. Plum drank Cognac.",
            "The Sherry was served in the Lounge.",
            "Mrs. Peacock was not in the Sleeper.",
            "The person in the Observation car didn't drink Martini.",
        ]
        .map(str::to_owned)
        .to_vec(),
        solution,
    }
}
