use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

/// Seed derived from the system clock, used when no shuffle seed is configured.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Permutation of `0..n`; the same seed always yields the same order.
pub fn permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    // .collect() can use size_hint from std::ops::Range
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    indices
}

/// Reorders `samples` (rows of `sample_len`) and `labels` so that position `i`
/// holds what was previously at `perm[i]`.
pub fn apply_permutation(
    samples: &mut Vec<f32>,
    labels: &mut Vec<u8>,
    sample_len: usize,
    perm: &[usize],
) {
    debug_assert_eq!(labels.len(), perm.len());
    debug_assert_eq!(samples.len(), perm.len() * sample_len);

    if perm.is_empty() || sample_len == 0 {
        *labels = perm.iter().map(|&src| labels[src]).collect();
        return;
    }

    let source: &[f32] = samples;
    let mut shuffled = vec![0.0f32; source.len()];
    shuffled
        .par_chunks_mut(sample_len)
        .zip(perm.par_iter())
        .for_each(|(dst, &src)| {
            dst.copy_from_slice(&source[src * sample_len..(src + 1) * sample_len]);
        });

    *samples = shuffled;
    *labels = perm.iter().map(|&src| labels[src]).collect();
}
