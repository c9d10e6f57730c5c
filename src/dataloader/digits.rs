// Handwritten digit dataset (MNIST) in the IDX layout, all integers big-endian:
//   images: magic(2051) | count(u32) | [rows(u32) | cols(u32)] | pixels(u8...)
//   labels: magic(2049) | count(u32) | labels(u8...)
//
// The rows/cols fields are optional; compact files put pixels right after the count.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::config::DataLoaderConfig;
use super::dataset::{ImageLayout, LabeledImageDataset};
use super::error::DataLoaderError;
use super::header::{read_be_u32, IdxHeader, IDX_HEADER_LEN};
use super::store::SampleStore;

pub const IMAGE_ROWS: u32 = 28;
pub const IMAGE_COLS: u32 = 28;
pub const PIXELS_PER_IMAGE: usize = (IMAGE_ROWS * IMAGE_COLS) as usize;

pub const IMAGES_MAGIC: u32 = 2051;
pub const LABELS_MAGIC: u32 = 2049;

const DIMS_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitSplit {
    Train,
    Test,
}

impl DigitSplit {
    /// Standard `(images, labels)` file names for this split.
    pub fn file_names(&self) -> (&'static str, &'static str) {
        match self {
            DigitSplit::Train => ("train-images-idx3-ubyte", "train-labels-idx1-ubyte"),
            DigitSplit::Test => ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte"),
        }
    }
}

#[derive(Debug)]
pub struct DigitDataset {
    store: SampleStore,
    split: Option<DigitSplit>,
}

impl DigitDataset {
    pub fn load(
        images_path: impl AsRef<Path>,
        labels_path: impl AsRef<Path>,
        batch_size: usize,
        shuffle: bool,
    ) -> Result<Self, DataLoaderError> {
        let config = DataLoaderConfig::with_batch_size(batch_size, shuffle)?;
        Self::load_with_config(images_path, labels_path, &config)
    }

    pub fn load_with_config(
        images_path: impl AsRef<Path>,
        labels_path: impl AsRef<Path>,
        config: &DataLoaderConfig,
    ) -> Result<Self, DataLoaderError> {
        let images_path = images_path.as_ref();
        let labels_path = labels_path.as_ref();

        let image_bytes = read_file(images_path)?;
        let label_bytes = read_file(labels_path)?;

        Self::decode(&image_bytes, images_path, &label_bytes, labels_path, config)
    }

    /// Loads a split from `dir` using the standard file names.
    pub fn load_split(
        dir: impl AsRef<Path>,
        split: DigitSplit,
        config: &DataLoaderConfig,
    ) -> Result<Self, DataLoaderError> {
        let dir = dir.as_ref();
        let (images_name, labels_name) = split.file_names();

        let mut dataset =
            Self::load_with_config(dir.join(images_name), dir.join(labels_name), config)?;
        dataset.split = Some(split);
        Ok(dataset)
    }

    pub fn from_bytes(
        image_bytes: &[u8],
        label_bytes: &[u8],
        config: &DataLoaderConfig,
    ) -> Result<Self, DataLoaderError> {
        Self::decode(
            image_bytes,
            Path::new("<images>"),
            label_bytes,
            Path::new("<labels>"),
            config,
        )
    }

    pub fn split(&self) -> Option<DigitSplit> {
        self.split
    }

    fn decode(
        image_bytes: &[u8],
        images_path: &Path,
        label_bytes: &[u8],
        labels_path: &Path,
        config: &DataLoaderConfig,
    ) -> Result<Self, DataLoaderError> {
        let pixels = parse_images(image_bytes, images_path, config.validate_magic)?;
        let labels = parse_labels(label_bytes, labels_path, config.validate_magic)?;

        let images = pixels.len() / PIXELS_PER_IMAGE;
        if images != labels.len() {
            return Err(DataLoaderError::CountMismatch {
                images,
                labels: labels.len(),
            });
        }

        let mut store = SampleStore::with_capacity(PIXELS_PER_IMAGE, images, config)?;
        store.extend_from_raw(pixels, labels);

        if config.shuffle {
            store.shuffle();
        }

        info!(
            samples = store.len(),
            batch_size = store.batch_size(),
            batches = store.batch_count(),
            shuffled = config.shuffle,
            "loaded digit dataset"
        );

        Ok(DigitDataset { store, split: None })
    }
}

impl LabeledImageDataset for DigitDataset {
    fn store(&self) -> &SampleStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut SampleStore {
        &mut self.store
    }

    fn layout(&self) -> ImageLayout {
        ImageLayout::Gray {
            width: IMAGE_COLS,
            height: IMAGE_ROWS,
        }
    }

    fn name(&self) -> &str {
        "digits"
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, DataLoaderError> {
    fs::read(path).map_err(|e| DataLoaderError::file_access(path, e))
}

/// Returns exactly `count * PIXELS_PER_IMAGE` raw pixel bytes.
fn parse_images<'a>(
    bytes: &'a [u8],
    path: &Path,
    validate_magic: bool,
) -> Result<&'a [u8], DataLoaderError> {
    let header = IdxHeader::parse(bytes, path)?;
    if validate_magic {
        header.check_magic(IMAGES_MAGIC, path)?;
    }

    let count = header.count();
    // Computed in u64 so a huge declared count cannot wrap on 32-bit targets
    let expected = count as u64 * PIXELS_PER_IMAGE as u64;

    let mut payload = &bytes[IDX_HEADER_LEN..];
    if has_dimension_fields(&header, payload) {
        payload = &payload[DIMS_LEN..];
    }

    debug!(path = %path.display(), magic = header.magic, count, "read digit images header");

    if (payload.len() as u64) < expected {
        return Err(DataLoaderError::TruncatedPayload {
            path: path.to_owned(),
            expected,
            found: payload.len(),
        });
    }
    Ok(&payload[..expected as usize])
}

/// Rows/cols fields follow the count when the magic declares rank 3 and they read 28x28.
fn has_dimension_fields(header: &IdxHeader, payload: &[u8]) -> bool {
    header.rank() == 3
        && read_be_u32(payload, 0) == Some(IMAGE_ROWS)
        && read_be_u32(payload, 4) == Some(IMAGE_COLS)
}

fn parse_labels<'a>(
    bytes: &'a [u8],
    path: &Path,
    validate_magic: bool,
) -> Result<&'a [u8], DataLoaderError> {
    let header = IdxHeader::parse(bytes, path)?;
    if validate_magic {
        header.check_magic(LABELS_MAGIC, path)?;
    }

    let count = header.count();
    let payload = &bytes[IDX_HEADER_LEN..];

    debug!(path = %path.display(), magic = header.magic, count, "read digit labels header");

    if payload.len() < count {
        return Err(DataLoaderError::TruncatedPayload {
            path: path.to_owned(),
            expected: count as u64,
            found: payload.len(),
        });
    }
    Ok(&payload[..count])
}
