use super::error::DataLoaderError;

// TODO: Swap batch_size to NonZeroUsize once callers stop building configs with struct literals
#[derive(Debug, Clone)]
pub struct DataLoaderConfig {
    pub batch_size: usize,
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
    pub validate_magic: bool,
}

impl DataLoaderConfig {
    pub fn build(self) -> Result<Self, DataLoaderError> {
        check_batch_size(self.batch_size)?;

        Ok(self)
    }

    pub fn with_batch_size(batch_size: usize, shuffle: bool) -> Result<Self, DataLoaderError> {
        DataLoaderConfig {
            batch_size,
            shuffle,
            ..Default::default()
        }
        .build()
    }
}

impl Default for DataLoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            shuffle: true,
            shuffle_seed: None,
            validate_magic: false,
        }
    }
}

pub(crate) fn check_batch_size(batch_size: usize) -> Result<(), DataLoaderError> {
    if batch_size == 0 {
        return Err(DataLoaderError::InvalidBatchSize(batch_size));
    }
    Ok(())
}
