use std::path::Path;

use super::error::DataLoaderError;

/// Size in bytes of the `(magic, count)` prefix shared by both IDX files.
pub const IDX_HEADER_LEN: usize = 8;

/// Converts a big-endian 4-byte field into the host's native `u32`.
pub fn decode_be_u32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Reads the big-endian `u32` at `offset`, or `None` if fewer than 4 bytes remain.
pub fn read_be_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let field = bytes.get(offset..offset.checked_add(4)?)?;
    Some(decode_be_u32([field[0], field[1], field[2], field[3]]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdxHeader {
    pub magic: u32,
    pub count: u32,
}

impl IdxHeader {
    pub fn parse(bytes: &[u8], path: &Path) -> Result<Self, DataLoaderError> {
        match (read_be_u32(bytes, 0), read_be_u32(bytes, 4)) {
            (Some(magic), Some(count)) => Ok(IdxHeader { magic, count }),
            _ => Err(DataLoaderError::TruncatedHeader {
                path: path.to_owned(),
                expected: IDX_HEADER_LEN,
                found: bytes.len(),
            }),
        }
    }

    /// Number of dimensions encoded in the low byte of the magic number.
    pub fn rank(&self) -> u8 {
        (self.magic & 0xff) as u8
    }

    pub fn count(&self) -> usize {
        self.count as usize
    }

    pub fn check_magic(&self, expected: u32, path: &Path) -> Result<(), DataLoaderError> {
        if self.magic != expected {
            return Err(DataLoaderError::InvalidMagic {
                path: path.to_owned(),
                expected,
                got: self.magic,
            });
        }
        Ok(())
    }
}
