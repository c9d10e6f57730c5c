use rayon::prelude::*;

// Inputs shorter than this are normalized on the calling thread
const PAR_THRESHOLD: usize = 1 << 16;

#[inline]
pub fn normalize(value: u8) -> f32 {
    value as f32 / 255.0
}

#[inline]
pub fn denormalize(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Appends the normalized form of every byte in `src` to `dst`.
pub fn normalize_into(src: &[u8], dst: &mut Vec<f32>) {
    if src.len() < PAR_THRESHOLD {
        dst.extend(src.iter().map(|&v| normalize(v)));
        return;
    }

    let start = dst.len();
    dst.resize(start + src.len(), 0.0);
    dst[start..]
        .par_iter_mut()
        .zip(src.par_iter())
        .for_each(|(out, &v)| *out = normalize(v));
}

pub fn normalize_all(src: &[u8]) -> Vec<f32> {
    let mut dst = Vec::with_capacity(src.len());
    normalize_into(src, &mut dst);
    dst
}
