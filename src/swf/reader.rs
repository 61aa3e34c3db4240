//! High-level SWF file reader: header parsing, whole-stream inflation, and
//! access to the lazy tag stream.

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use log::{debug, info, warn};

use crate::swf::codec::compression;
use crate::swf::format::header::{FileHeader, FrameHeader, Header};
use crate::swf::iter::TagIterator;
use crate::swf::types::error::{Result, SwfError};

/// Knobs for strictness choices the format leaves open.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Check the declared file length against the actual byte count where
    /// that count is knowable (compressed or in-memory input). Off by
    /// default; in the wild the declared length is informational only.
    pub validate_file_length: bool,
}

/// Byte source for the container body, after any whole-stream inflation.
pub(crate) enum Body {
    /// Plain input, streamed as-is.
    Direct(Box<dyn Read>),
    /// Fully inflated input held in memory.
    Inflated(Cursor<Vec<u8>>),
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Body::Direct(r) => r.read(buf),
            Body::Inflated(r) => r.read(buf),
        }
    }
}

/// An SWF file with its headers parsed and its tag stream unread.
///
/// The headers are parsed eagerly; when the signature is the compressed
/// variant, the whole remainder of the source is inflated into memory first,
/// once. The tag stream itself is one forward-only session:
/// [`tags`](SwfFile::tags) borrows the file mutably and every yielded tag
/// advances shared cursor state irreversibly. Create one `SwfFile` per
/// concurrent consumer.
pub struct SwfFile {
    pub header: Header,
    pub(crate) body: Body,
}

impl std::fmt::Debug for SwfFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwfFile")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

impl SwfFile {
    /// Opens an SWF file from disk with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ParseOptions::default())
    }

    /// Opens an SWF file from disk.
    pub fn open_with(path: impl AsRef<Path>, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening SWF file: {}", path.display());
        Self::from_reader_with(BufReader::new(File::open(path)?), options)
    }

    /// Parses an SWF stream with default options.
    pub fn from_reader(reader: impl Read + 'static) -> Result<Self> {
        Self::from_reader_with(reader, ParseOptions::default())
    }

    /// Parses an SWF stream.
    pub fn from_reader_with(reader: impl Read + 'static, options: ParseOptions) -> Result<Self> {
        Self::parse(Box::new(reader), None, options)
    }

    /// Parses an in-memory SWF image with default options.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with(data, ParseOptions::default())
    }

    /// Parses an in-memory SWF image.
    pub fn from_bytes_with(data: Vec<u8>, options: ParseOptions) -> Result<Self> {
        let total = data.len() as u64;
        Self::parse(Box::new(Cursor::new(data)), Some(total), options)
    }

    fn parse(mut source: Box<dyn Read>, total_len: Option<u64>, options: ParseOptions) -> Result<Self> {
        let file_header = FileHeader::read_from(&mut source)?;
        let mut body = if file_header.signature.is_compressed() {
            if file_header.version < 6 {
                return Err(SwfError::CompressionUnsupported(file_header.version));
            }
            let mut compressed = Vec::new();
            source.read_to_end(&mut compressed)?;
            let inflated = compression::inflate(&compressed)?;
            info!(
                "Inflated body: {} -> {} bytes",
                compressed.len(),
                inflated.len()
            );
            check_declared_length(&file_header, 8 + inflated.len() as u64, options)?;
            Body::Inflated(Cursor::new(inflated))
        } else {
            if let Some(total) = total_len {
                check_declared_length(&file_header, total, options)?;
            }
            Body::Direct(source)
        };
        let frame_header = FrameHeader::read_from(&mut body)?;
        debug!(
            "Frame header: rate={} fps, {} frames",
            frame_header.frame_rate.to_f32(),
            frame_header.frame_count
        );
        Ok(Self {
            header: Header {
                file: file_header,
                frame: frame_header,
            },
            body,
        })
    }

    /// Returns the forward-only iterator over the remaining tag stream.
    pub fn tags(&mut self) -> TagIterator<'_> {
        TagIterator::new(&mut self.body)
    }
}

fn check_declared_length(header: &FileHeader, actual: u64, options: ParseOptions) -> Result<()> {
    if u64::from(header.file_length) == actual {
        return Ok(());
    }
    if options.validate_file_length {
        return Err(SwfError::SizeMismatch {
            context: "declared file length",
            expected: u64::from(header.file_length),
            found: actual,
        });
    }
    warn!(
        "Declared file length {} differs from actual {} bytes",
        header.file_length, actual
    );
    Ok(())
}
