// Labeled image dataset (CIFAR-10) stored as headerless binary shards.
// Each record is 1 label byte followed by 3 * 32 * 32 pixel bytes, channel planes
// in R, G, B order. Records are packed back to back; a trailing partial record is ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use super::config::DataLoaderConfig;
use super::dataset::{ImageLayout, LabeledImageDataset};
use super::error::DataLoaderError;
use super::store::SampleStore;

pub const IMAGE_WIDTH: u32 = 32;
pub const IMAGE_HEIGHT: u32 = 32;
pub const CHANNELS: usize = 3;
pub const PIXELS_PER_IMAGE: usize = CHANNELS * (IMAGE_WIDTH * IMAGE_HEIGHT) as usize;
pub const RECORD_LEN: usize = 1 + PIXELS_PER_IMAGE;

pub const TRAIN_SHARDS: [&str; 5] = [
    "data_batch_1.bin",
    "data_batch_2.bin",
    "data_batch_3.bin",
    "data_batch_4.bin",
    "data_batch_5.bin",
];
pub const TEST_SHARDS: [&str; 1] = ["test_batch.bin"];

pub const CLASS_NAMES: [&str; 10] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

pub fn class_name(label: u8) -> Option<&'static str> {
    CLASS_NAMES.get(label as usize).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardSplit {
    Train,
    Test,
}

impl ShardSplit {
    pub fn from_training_flag(is_training_split: bool) -> Self {
        if is_training_split {
            ShardSplit::Train
        } else {
            ShardSplit::Test
        }
    }

    /// Shard file names in the order their records are concatenated.
    pub fn shard_names(&self) -> &'static [&'static str] {
        match self {
            ShardSplit::Train => &TRAIN_SHARDS,
            ShardSplit::Test => &TEST_SHARDS,
        }
    }
}

#[derive(Debug)]
pub struct ShardDataset {
    store: SampleStore,
    split: ShardSplit,
}

impl ShardDataset {
    pub fn load(
        dir: impl AsRef<Path>,
        is_training_split: bool,
        batch_size: usize,
        shuffle: bool,
    ) -> Result<Self, DataLoaderError> {
        let config = DataLoaderConfig::with_batch_size(batch_size, shuffle)?;
        Self::load_with_config(dir, ShardSplit::from_training_flag(is_training_split), &config)
    }

    pub fn load_with_config(
        dir: impl AsRef<Path>,
        split: ShardSplit,
        config: &DataLoaderConfig,
    ) -> Result<Self, DataLoaderError> {
        let dir = dir.as_ref();

        // Every shard is opened before any is decoded
        let mut shards = Vec::with_capacity(split.shard_names().len());
        let mut capacity = 0;
        for name in split.shard_names() {
            let path = dir.join(name);
            let file = File::open(&path).map_err(|e| DataLoaderError::file_access(&path, e))?;
            let len = file
                .metadata()
                .map_err(|e| DataLoaderError::file_access(&path, e))?
                .len();
            capacity += len as usize / RECORD_LEN;
            shards.push((path, file));
        }

        let mut store = SampleStore::with_capacity(PIXELS_PER_IMAGE, capacity, config)?;
        for (path, file) in shards {
            read_shard(&path, BufReader::new(file), &mut store)?;
        }

        Self::finish(store, split, config)
    }

    /// Decodes a single shard stream held in memory or any other reader.
    pub fn from_reader(
        reader: impl Read,
        split: ShardSplit,
        config: &DataLoaderConfig,
    ) -> Result<Self, DataLoaderError> {
        let mut store = SampleStore::with_capacity(PIXELS_PER_IMAGE, 0, config)?;
        read_shard(Path::new("<reader>"), reader, &mut store)?;
        Self::finish(store, split, config)
    }

    pub fn split(&self) -> ShardSplit {
        self.split
    }

    fn finish(
        mut store: SampleStore,
        split: ShardSplit,
        config: &DataLoaderConfig,
    ) -> Result<Self, DataLoaderError> {
        if config.shuffle {
            store.shuffle();
        }

        info!(
            ?split,
            samples = store.len(),
            batch_size = store.batch_size(),
            batches = store.batch_count(),
            shuffled = config.shuffle,
            "loaded shard dataset"
        );

        Ok(ShardDataset { store, split })
    }
}

impl LabeledImageDataset for ShardDataset {
    fn store(&self) -> &SampleStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut SampleStore {
        &mut self.store
    }

    fn layout(&self) -> ImageLayout {
        ImageLayout::PlanarRgb {
            width: IMAGE_WIDTH,
            height: IMAGE_HEIGHT,
        }
    }

    fn name(&self) -> &str {
        "shards"
    }
}

fn read_shard(
    path: &Path,
    mut reader: impl Read,
    store: &mut SampleStore,
) -> Result<usize, DataLoaderError> {
    let mut record = Vec::with_capacity(RECORD_LEN);
    let mut records = 0;

    loop {
        record.clear();
        let filled = reader
            .by_ref()
            .take(RECORD_LEN as u64)
            .read_to_end(&mut record)
            .map_err(|e| DataLoaderError::file_access(path, e))?;

        if filled < RECORD_LEN {
            if filled > 0 {
                debug!(path = %path.display(), trailing_bytes = filled, "ignoring partial record");
            }
            break;
        }

        store.push_raw(record[0], &record[1..]);
        records += 1;
    }

    debug!(path = %path.display(), records, "read shard");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataloader::normalize::normalize;
    use std::io;

    fn config() -> DataLoaderConfig {
        DataLoaderConfig {
            batch_size: 4,
            shuffle: false,
            shuffle_seed: Some(5),
            validate_magic: false,
        }
    }

    fn record(label: u8) -> Vec<u8> {
        let mut bytes = vec![label];
        bytes.extend(std::iter::repeat(label.wrapping_mul(3)).take(PIXELS_PER_IMAGE));
        bytes
    }

    // Yields at most `chunk` bytes per read to exercise record reassembly
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn split_selects_fixed_shards() {
        assert_eq!(ShardSplit::from_training_flag(true).shard_names().len(), 5);
        assert_eq!(ShardSplit::from_training_flag(false).shard_names(), &["test_batch.bin"]);
    }

    #[test]
    fn class_names_cover_all_labels() {
        assert_eq!(class_name(0), Some("airplane"));
        assert_eq!(class_name(9), Some("truck"));
        assert_eq!(class_name(10), None);
    }

    #[test]
    fn reads_records_across_short_reads() {
        let data: Vec<u8> = (0..3).flat_map(record).collect();
        let reader = Trickle { data: &data, chunk: 1000 };
        let ds = ShardDataset::from_reader(reader, ShardSplit::Test, &config()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.store().labels(), &[0, 1, 2]);
        let (sample, label) = ds.get_sample(2).unwrap();
        assert_eq!(label, 2);
        assert_eq!(sample.len(), PIXELS_PER_IMAGE);
        assert!(sample.iter().all(|&px| px == normalize(6)));
    }

    #[test]
    fn trailing_partial_record_is_ignored() {
        let mut data: Vec<u8> = (0..2).flat_map(record).collect();
        data.extend_from_slice(&record(7)[..RECORD_LEN - 1]);

        let ds = ShardDataset::from_reader(&data[..], ShardSplit::Test, &config()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.batch_count(), 1);
    }

    #[test]
    fn empty_stream_gives_empty_dataset() {
        let ds = ShardDataset::from_reader(io::empty(), ShardSplit::Train, &config()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.batch_count(), 0);
        assert!(ds.get_batch(0).is_err());
    }
}
