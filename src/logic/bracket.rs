//! Seeded bracket positions for power-of-two draws.

use crate::models::TournamentError;

/// Slot order for a bracket of `size` entrants: slots `out[2i]` and `out[2i + 1]`
/// meet in round one.
///
/// Built recursively so the top and bottom seeds of every sub-bracket are kept
/// apart for as long as possible; seeds 1 and 2 can only meet in the final.
/// `size` must be a power of two and at least 2.
pub fn bracket_positions(size: usize) -> Result<Vec<usize>, TournamentError> {
    if size < 2 || !size.is_power_of_two() {
        return Err(TournamentError::InvalidSize(size));
    }
    Ok(positions(size))
}

fn positions(size: usize) -> Vec<usize> {
    if size == 2 {
        return vec![0, 1];
    }
    let half = size / 2;
    let left = positions(half);
    let right = positions(half);

    let mut out = vec![0; size];
    for i in 0..half {
        out[i * 2] = left[i];
        out[i * 2 + 1] = right[half - 1 - i] + half;
    }
    out
}
