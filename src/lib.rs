pub mod dataloader;

pub use dataloader::batch::{Batch, Batches};
pub use dataloader::config::DataLoaderConfig;
pub use dataloader::dataset::LabeledImageDataset;
pub use dataloader::digits::{DigitDataset, DigitSplit};
pub use dataloader::error::{DataLoaderError, ErrorKind};
pub use dataloader::shards::{ShardDataset, ShardSplit};
