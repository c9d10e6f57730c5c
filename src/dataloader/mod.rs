pub mod batch;
pub mod config;
pub mod dataset;
pub mod digits;
pub mod error;
pub mod header;
pub mod info;
pub mod normalize;
pub mod preview;
pub mod shards;
pub mod shuffle;
pub mod store;
