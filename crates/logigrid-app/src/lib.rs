//! Terminal front end for logic-grid puzzles.
//!
//! - [`config`]: command-line arguments and the provider they select
//! - [`worker`]: background puzzle generation
//! - [`scheduler`]: deferred reveals
//! - [`action`]: player commands and the per-tick action queue
//! - [`render`]: plain-text output
//! - [`app`]: the loop state tying them to a [`logigrid_game::Session`]
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod action;
pub mod app;
pub mod config;
pub mod render;
pub mod scheduler;
pub mod worker;
