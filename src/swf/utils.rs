//! Low-level byte reading utilities

use std::io::Read;

use crate::swf::types::error::Result;

/// Reads exactly `length` bytes from `reader`.
///
/// A source with fewer bytes available fails with the I/O error kind
/// (`UnexpectedEof`), which callers rely on to tell truncation apart from
/// structural violations.
pub fn read_bytes(reader: &mut impl Read, length: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; length];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
