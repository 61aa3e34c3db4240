//! SWF file and frame headers.
//!
//! The first 8 bytes of a file (signature, version, declared length) are
//! always stored plain; everything after them — starting with the frame
//! header — is subject to whole-file compression when the signature is the
//! compressed variant.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::swf::format::records::{Fixed8, Rect};
use crate::swf::types::error::{Result, SwfError};

/// The three-byte container signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// `FWS`: the body is stored as-is.
    Uncompressed,
    /// `CWS`: everything after the first 8 bytes is one zlib stream.
    Compressed,
}

impl Signature {
    pub fn as_bytes(self) -> [u8; 3] {
        match self {
            Signature::Uncompressed => *b"FWS",
            Signature::Compressed => *b"CWS",
        }
    }

    pub fn is_compressed(self) -> bool {
        matches!(self, Signature::Compressed)
    }
}

impl TryFrom<[u8; 3]> for Signature {
    type Error = SwfError;
    fn try_from(raw: [u8; 3]) -> Result<Self> {
        match &raw {
            b"FWS" => Ok(Signature::Uncompressed),
            b"CWS" => Ok(Signature::Compressed),
            _ => Err(SwfError::InvalidSignature(raw)),
        }
    }
}

/// The first 8 bytes of an SWF file.
///
/// `file_length` covers the whole uncompressed file including this header.
/// It is informational on read; writers always recompute it from the
/// serialized body instead of trusting this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: Signature,
    pub version: u8,
    pub file_length: u32,
}

impl FileHeader {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut raw = [0u8; 3];
        r.read_exact(&mut raw)?;
        let signature = Signature::try_from(raw)?;
        let version = r.read_u8()?;
        let file_length = r.read_u32::<LittleEndian>()?;
        debug!(
            "File header: signature={:?}, version={}, declared length={}",
            signature, version, file_length
        );
        Ok(Self {
            signature,
            version,
            file_length,
        })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self.signature.as_bytes())?;
        w.write_u8(self.version)?;
        w.write_u32::<LittleEndian>(self.file_length)?;
        Ok(())
    }
}

/// The movie-wide frame header following the (decompressed) file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Bounding box of the stage, in twips.
    pub frame_size: Rect,
    /// Frames per second, 8.8 fixed point.
    pub frame_rate: Fixed8,
    pub frame_count: u16,
}

impl FrameHeader {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let frame_size = Rect::read_from(r)?;
        let frame_rate = Fixed8::read_from(r)?;
        let frame_count = r.read_u16::<LittleEndian>()?;
        Ok(Self {
            frame_size,
            frame_rate,
            frame_count,
        })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        self.frame_size.write_to(w)?;
        self.frame_rate.write_to(w)?;
        w.write_u16::<LittleEndian>(self.frame_count)?;
        Ok(())
    }
}

/// File header and frame header together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub file: FileHeader,
    pub frame: FrameHeader,
}
