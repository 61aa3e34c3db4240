//! SWF file serialization.
//!
//! The body (frame header plus tags) is serialized to a buffer first; the
//! declared file length is always 8 plus that buffer's pre-compression size,
//! and the buffer is deflated afterwards when the header's signature asks for
//! the compressed variant. Caller-provided length fields are never trusted.
//!
//! The tag sequence is written exactly as given; a well-formed file ends
//! with [`Tag::End`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::swf::codec::compression;
use crate::swf::format::header::{FileHeader, Header};
use crate::swf::format::tags::Tag;
use crate::swf::types::error::{Result, SwfError};

/// Serializes a complete SWF file to `w`.
pub fn write_file<'a, W, I>(header: &Header, tags: I, w: &mut W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Tag>,
{
    if header.file.signature.is_compressed() && header.file.version < 6 {
        return Err(SwfError::CompressionUnsupported(header.file.version));
    }
    let mut body = Vec::new();
    header.frame.write_to(&mut body)?;
    for tag in tags {
        tag.write_to(&mut body)?;
    }
    let file_header = FileHeader {
        signature: header.file.signature,
        version: header.file.version,
        file_length: 8 + body.len() as u32,
    };
    if file_header.signature.is_compressed() {
        body = compression::deflate(&body)?;
    }
    file_header.write_to(w)?;
    w.write_all(&body)?;
    Ok(())
}

/// Serializes a complete SWF file to a new byte vector.
pub fn encode_file<'a, I>(header: &Header, tags: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Tag>,
{
    let mut out = Vec::new();
    write_file(header, tags, &mut out)?;
    Ok(out)
}

/// Writes a complete SWF file to disk, replacing any existing file.
pub fn save_file<'a, I>(header: &Header, tags: I, path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator<Item = &'a Tag>,
{
    let path = path.as_ref();
    info!("Saving SWF file: {}", path.display());
    let mut w = BufWriter::new(File::create(path)?);
    write_file(header, tags, &mut w)?;
    w.flush()?;
    Ok(())
}
