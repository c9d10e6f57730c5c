use std::path::Path;

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use super::dataset::{ImageLayout, LabeledImageDataset};
use super::error::DataLoaderError;
use super::normalize::denormalize;

/// Rebuilds an 8-bit image from one normalized sample.
pub fn sample_to_image(sample: &[f32], layout: ImageLayout) -> DynamicImage {
    debug_assert_eq!(sample.len(), layout.sample_len());

    match layout {
        ImageLayout::Gray { width, height } => {
            let img = GrayImage::from_fn(width, height, |x, y| {
                let i = (y * width + x) as usize;
                Luma([denormalize(sample[i])])
            });
            DynamicImage::ImageLuma8(img)
        }
        ImageLayout::PlanarRgb { width, height } => {
            let plane = (width * height) as usize;
            let img = RgbImage::from_fn(width, height, |x, y| {
                let i = (y * width + x) as usize;
                Rgb([
                    denormalize(sample[i]),
                    denormalize(sample[plane + i]),
                    denormalize(sample[2 * plane + i]),
                ])
            });
            DynamicImage::ImageRgb8(img)
        }
    }
}

pub fn preview_sample(ds: &dyn LabeledImageDataset, index: usize) -> Result<DynamicImage, DataLoaderError> {
    let (sample, _) = ds.get_sample(index)?;
    Ok(sample_to_image(sample, ds.layout()))
}

/// Writes sample `index` to `path`; the format follows the file extension.
pub fn save_sample(
    ds: &dyn LabeledImageDataset,
    index: usize,
    path: impl AsRef<Path>,
) -> Result<(), DataLoaderError> {
    preview_sample(ds, index)?.save(path)?;
    Ok(())
}
