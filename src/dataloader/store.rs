use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::batch::{Batch, Batches};
use super::config::{check_batch_size, DataLoaderConfig};
use super::error::DataLoaderError;
use super::normalize::normalize_into;
use super::shuffle::{apply_permutation, permutation, time_seed};

/// Owns the decoded samples and labels of one dataset.
///
/// Samples live in a single flat buffer of `len() * sample_len` floats so that a
/// batch is one contiguous slice. `labels[i]` always pairs with the `i`th row.
#[derive(Debug)]
pub struct SampleStore {
    samples: Vec<f32>,
    labels: Vec<u8>,
    sample_len: usize,
    batch_size: usize,
    batch_count: usize,
    rng: StdRng,
}

impl SampleStore {
    pub(crate) fn with_capacity(
        sample_len: usize,
        capacity: usize,
        config: &DataLoaderConfig,
    ) -> Result<Self, DataLoaderError> {
        check_batch_size(config.batch_size)?;

        let seed = config.shuffle_seed.unwrap_or_else(time_seed);

        Ok(SampleStore {
            samples: Vec::with_capacity(capacity * sample_len),
            labels: Vec::with_capacity(capacity),
            sample_len,
            batch_size: config.batch_size,
            batch_count: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Normalizes `pixels` (whole samples, back to back) and appends them with their labels.
    pub fn extend_from_raw(&mut self, pixels: &[u8], labels: &[u8]) {
        debug_assert_eq!(pixels.len(), labels.len() * self.sample_len);
        normalize_into(pixels, &mut self.samples);
        self.labels.extend_from_slice(labels);
        self.batch_count = self.labels.len().div_ceil(self.batch_size);
    }

    pub fn push_raw(&mut self, label: u8, pixels: &[u8]) {
        self.extend_from_raw(pixels, std::slice::from_ref(&label));
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn sample_len(&self) -> usize {
        self.sample_len
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn get_sample(&self, index: usize) -> Result<(&[f32], u8), DataLoaderError> {
        if index >= self.len() {
            return Err(DataLoaderError::OutOfRange {
                index,
                bound: self.len(),
            });
        }

        let start = index * self.sample_len;
        Ok((
            &self.samples[start..start + self.sample_len],
            self.labels[index],
        ))
    }

    pub fn get_batch(&self, batch_index: usize) -> Result<Batch<'_>, DataLoaderError> {
        if batch_index >= self.batch_count {
            return Err(DataLoaderError::OutOfRange {
                index: batch_index,
                bound: self.batch_count,
            });
        }

        let offset = batch_index * self.batch_size;
        let count = if batch_index == self.batch_count - 1 {
            self.len() - offset
        } else {
            self.batch_size
        };

        Ok(Batch::new(
            batch_index,
            offset,
            count,
            self.sample_len,
            &self.samples[offset * self.sample_len..(offset + count) * self.sample_len],
            &self.labels[offset..offset + count],
        ))
    }

    pub fn batches(&self) -> Batches<'_> {
        Batches::new(self)
    }

    /// Draws a fresh seed and reorders samples and labels with one shared permutation.
    pub fn shuffle(&mut self) {
        let seed: u64 = self.rng.gen();
        self.shuffle_with_seed(seed);
    }

    pub fn shuffle_with_seed(&mut self, seed: u64) {
        trace!(seed, samples = self.len(), "shuffling sample store");
        let perm = permutation(self.len(), seed);
        apply_permutation(&mut self.samples, &mut self.labels, self.sample_len, &perm);
    }
}
