use std::fmt;

use super::dataset::{ImageLayout, LabeledImageDataset};

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    pub name: String,
    pub layout: ImageLayout,
    pub total_size: usize,
    pub sample_len: usize,
    pub batch_size: usize,
    pub batches: usize,
    pub last_batch_size: usize,
    /// Samples per label value, indexed by label.
    pub label_counts: Vec<usize>,
}

impl DatasetInfo {
    pub fn collect(ds: &dyn LabeledImageDataset) -> Self {
        let total_size = ds.len();
        let batch_size = ds.batch_size();
        let batches = ds.batch_count();

        let last_batch_size = match total_size % batch_size {
            0 if total_size > 0 => batch_size,
            remainder => remainder,
        };

        let mut label_counts = Vec::new();
        for &label in ds.store().labels() {
            let label = label as usize;
            if label >= label_counts.len() {
                label_counts.resize(label + 1, 0);
            }
            label_counts[label] += 1;
        }

        DatasetInfo {
            name: ds.name().to_string(),
            layout: ds.layout(),
            total_size,
            sample_len: ds.sample_len(),
            batch_size,
            batches,
            last_batch_size,
            label_counts,
        }
    }
}

impl fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image Information:")?;
        writeln!(f, "-------------------")?;
        writeln!(f, "Layout: {:?}", self.layout)?;
        writeln!(f, "Values per sample: {}", self.sample_len)?;
        writeln!(f)?;
        writeln!(f, "Dataset Information ({}):", self.name)?;
        writeln!(f, "-------------------")?;
        writeln!(f, "Total size: {}", self.total_size)?;
        writeln!(f, "Batch size: {}", self.batch_size)?;
        writeln!(f, "Batches: {}", self.batches)?;
        writeln!(f, "Last batch size: {}", self.last_batch_size)?;
        writeln!(f)?;
        writeln!(f, "Labels:")?;
        for (label, count) in self.label_counts.iter().enumerate() {
            writeln!(f, "  {}: {}", label, count)?;
        }
        Ok(())
    }
}

pub fn print_dataset_info(ds: &dyn LabeledImageDataset) {
    println!("{}", DatasetInfo::collect(ds));
}
