//! Randomized partial ordering of a population.
//!
//! [`partial_select`] moves the `k` fittest genomes to the front of a slice
//! without sorting the rest. It is a quickselect that partitions in
//! *descending* order, so the wanted elements collect on the left.
//!
//! # Complexity
//! Expected O(n); worst case O(n²) with vanishing probability thanks to the
//! random pivot. `k == 1` is a single linear scan.
//!
//! # References
//!
//! - Hoare (1961), "Algorithm 65: Find"
//! - Floyd & Rivest (1975), "Expected Time Bounds for Selection"

use super::types::Genome;
use rand::Rng;
use std::cmp::Ordering;

/// Rearranges `genomes` so the `k` fittest occupy `[0, k)` in no particular
/// order.
///
/// Ties are broken arbitrarily. `k == 0` and `k >= genomes.len()` leave the
/// slice untouched and draw nothing from `rng`.
///
/// # Examples
///
/// ```
/// use generic_ga::bitstring::BitString;
/// use generic_ga::ga::{partial_select, Genome};
/// use generic_ga::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let mut population = vec![
///     BitString::from_bits(vec![false, false]),
///     BitString::from_bits(vec![true, true]),
///     BitString::from_bits(vec![true, false]),
/// ];
/// partial_select(&mut population, 1, &mut rng);
/// assert_eq!(population[0].fitness(), 1.0);
/// ```
pub fn partial_select<G: Genome, R: Rng>(genomes: &mut [G], k: usize, rng: &mut R) {
    partial_select_by(genomes, k, rng, |a, b| a.compare(b));
}

/// [`partial_select`] with an explicit fitness comparator.
///
/// `compare(a, b)` returns `Greater` when `a` is fitter than `b`. Used by
/// selection methods that rank borrowed genomes rather than owned ones.
pub fn partial_select_by<T, R, F>(items: &mut [T], k: usize, rng: &mut R, mut compare: F)
where
    R: Rng,
    F: FnMut(&T, &T) -> Ordering,
{
    if k == 0 || k >= items.len() {
        return;
    }

    if k == 1 {
        let best = fittest_index_by(items, &mut compare);
        items.swap(0, best);
        return;
    }

    let mut left = 0;
    let mut right = items.len() - 1;

    // Invariant: left < k <= right + 1, so the window always holds the
    // boundary between the wanted and unwanted elements.
    while left != right {
        let pivot = rng.random_range(left..=right);
        items.swap(pivot, right);

        let mut boundary = left;
        for i in left..right {
            if compare(&items[i], &items[right]) != Ordering::Less {
                items.swap(boundary, i);
                boundary += 1;
            }
        }
        items.swap(boundary, right);

        if boundary + 1 < k {
            left = boundary + 1;
        } else if boundary > k {
            right = boundary - 1;
        } else {
            return;
        }
    }
}

/// Index of the first fittest element of a non-empty slice.
///
/// Returns 0 for an empty slice.
pub fn fittest_index<G: Genome>(genomes: &[G]) -> usize {
    fittest_index_by(genomes, |a, b| a.compare(b))
}

fn fittest_index_by<T, F>(items: &[T], mut compare: F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut best = 0;
    for i in 1..items.len() {
        if compare(&items[i], &items[best]) == Ordering::Greater {
            best = i;
        }
    }
    best
}
