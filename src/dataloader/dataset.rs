use super::batch::{Batch, Batches};
use super::error::DataLoaderError;
use super::store::SampleStore;

/// How the floats of one sample map onto image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    /// One channel, row-major.
    Gray { width: u32, height: u32 },
    /// Three full planes (red, green, blue), each row-major.
    PlanarRgb { width: u32, height: u32 },
}

impl ImageLayout {
    pub fn sample_len(&self) -> usize {
        match *self {
            ImageLayout::Gray { width, height } => width as usize * height as usize,
            ImageLayout::PlanarRgb { width, height } => 3 * width as usize * height as usize,
        }
    }
}

/// A fully decoded, in-memory labeled image dataset.
///
/// Implementors only expose their [`SampleStore`]; sampling, batching and
/// shuffling are shared. Views returned by [`get_sample`](Self::get_sample) and
/// [`get_batch`](Self::get_batch) borrow the dataset, so they cannot survive a
/// call to [`shuffle`](Self::shuffle).
pub trait LabeledImageDataset: Send + Sync {
    fn store(&self) -> &SampleStore;
    fn store_mut(&mut self) -> &mut SampleStore;
    fn layout(&self) -> ImageLayout;

    fn name(&self) -> &str {
        "dataset"
    }

    fn len(&self) -> usize {
        self.store().len()
    }

    fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    fn sample_len(&self) -> usize {
        self.store().sample_len()
    }

    fn batch_size(&self) -> usize {
        self.store().batch_size()
    }

    fn batch_count(&self) -> usize {
        self.store().batch_count()
    }

    fn get_sample(&self, index: usize) -> Result<(&[f32], u8), DataLoaderError> {
        self.store().get_sample(index)
    }

    fn get_batch(&self, batch_index: usize) -> Result<Batch<'_>, DataLoaderError> {
        self.store().get_batch(batch_index)
    }

    fn batches(&self) -> Batches<'_> {
        self.store().batches()
    }

    fn shuffle(&mut self) {
        self.store_mut().shuffle()
    }

    fn shuffle_with_seed(&mut self, seed: u64) {
        self.store_mut().shuffle_with_seed(seed)
    }
}
