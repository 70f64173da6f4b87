use std::time::Instant;

use logigrid_generator::{LoadedPuzzle, PuzzleProvider, PuzzleRequest, generate_or_fallback};

/// Generates a puzzle, falling back to the bundled one on failure.
pub(super) fn generate_puzzle(
    provider: &dyn PuzzleProvider,
    request: &PuzzleRequest,
) -> LoadedPuzzle {
    let started = Instant::now();
    let loaded = generate_or_fallback(provider, request);
    log::debug!(
        "puzzle for {:?} ready in {:?}",
        request.theme,
        started.elapsed()
    );
    loaded
}
