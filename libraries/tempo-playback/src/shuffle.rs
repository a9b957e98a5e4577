//! Shuffle selection
//!
//! Shuffled traversal draws each index independently and uniformly, so the
//! same track may come up twice in a row.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the shuffle RNG, seeded when a seed is configured
pub fn shuffle_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Pick a uniformly random index in `[0, len)`
///
/// Returns `None` for an empty playlist.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}
