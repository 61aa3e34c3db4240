//! Zlib helpers shared by the container and the Screen Video codec.
//!
//! SWF uses plain zlib streams in two places: optional whole-file
//! compression of everything after the first 8 header bytes, and the
//! per-block pixel payloads of Screen Video frames. Both directions go
//! through flate2.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use log::trace;

use crate::swf::types::error::{Result, SwfError};

/// Decompresses a zlib stream of unknown decompressed size.
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    trace!("Inflating {} compressed bytes", data.len());
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| SwfError::Decompression(format!("zlib inflate failed: {}", e)))?;
    Ok(out)
}

/// Decompresses a zlib stream that must inflate to exactly `expected` bytes.
pub fn inflate_exact(data: &[u8], expected: usize, context: &'static str) -> Result<Vec<u8>> {
    let out = inflate(data)?;
    if out.len() != expected {
        return Err(SwfError::SizeMismatch {
            context,
            expected: expected as u64,
            found: out.len() as u64,
        });
    }
    Ok(out)
}

/// Compresses `data` as a zlib stream at the default level.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    trace!("Deflating {} bytes", data.len());
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| SwfError::Decompression(format!("zlib deflate failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| SwfError::Decompression(format!("zlib deflate failed: {}", e)))
}
