//! Shuffle algorithm for queue randomization
//!
//! Unbiased Fisher-Yates: every permutation is equally likely.

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle a slice in place
///
/// `SliceRandom::shuffle` walks from the last index down to 1 and swaps
/// each element with a uniformly chosen index in `0..=i`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Return a shuffled copy of a sequence
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, rng);
    out
}
