use super::store::SampleStore;

/// Borrowed view of one batch: `count` consecutive samples starting at `offset`.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    index: usize,
    offset: usize,
    count: usize,
    sample_len: usize,
    samples: &'a [f32],
    labels: &'a [u8],
}

impl<'a> Batch<'a> {
    pub(crate) fn new(
        index: usize,
        offset: usize,
        count: usize,
        sample_len: usize,
        samples: &'a [f32],
        labels: &'a [u8],
    ) -> Self {
        debug_assert_eq!(labels.len(), count);
        debug_assert_eq!(samples.len(), count * sample_len);
        Batch {
            index,
            offset,
            count,
            sample_len,
            samples,
            labels,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// All samples of the batch, flattened back to back.
    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    pub fn labels(&self) -> &'a [u8] {
        self.labels
    }

    pub fn sample(&self, i: usize) -> Option<(&'a [f32], u8)> {
        let label = *self.labels.get(i)?;
        let start = i * self.sample_len;
        Some((&self.samples[start..start + self.sample_len], label))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a [f32], u8)> + 'a {
        let batch = *self;
        (0..batch.count).filter_map(move |i| batch.sample(i))
    }
}

pub struct Batches<'a> {
    store: &'a SampleStore,
    next_batch: usize,
}

impl<'a> Batches<'a> {
    pub(crate) fn new(store: &'a SampleStore) -> Self {
        Batches {
            store,
            next_batch: 0,
        }
    }
}

impl<'a> Iterator for Batches<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch = self.store.get_batch(self.next_batch).ok()?;
        self.next_batch += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.batch_count().saturating_sub(self.next_batch);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Batches<'_> {}
