//! Screen Video codec: block-partitioned frames with per-block zlib
//! compression and zero-length markers for inter-frame reuse.
//!
//! Wire layout per frame: a 40-bit header (4-bit kind, 4-bit codec id, 4-bit
//! block-width code, 12-bit image width, 4-bit block-height code, 12-bit
//! image height), then one 16-bit byte count per block in row-major order
//! starting at the bottom-left block. A zero count marks the block absent;
//! any other count is followed by that many zlib bytes inflating to the
//! block's BGR pixels, rows stored bottom-to-top. Every present block is
//! compressed independently.

use std::io::{Read, Write};

use log::{debug, trace};

use crate::swf::bits::{BitReader, BitWriter};
use crate::swf::codec::compression;
use crate::swf::types::error::{Result, SwfError};
use crate::swf::types::models::{FrameKind, SCREEN_VIDEO_CODEC};
use crate::swf::utils;

/// One BGR pixel in wire order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BgrColor {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

/// One (possibly edge-clipped) tile of a frame.
///
/// `pixels` holds `width * height` entries, rows bottom-to-top and pixels
/// left-to-right within each row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoBlock {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<BgrColor>,
}

impl VideoBlock {
    /// Reads one block: a 16-bit byte count, zero meaning absent, else that
    /// many zlib bytes inflating to exactly `width * height` BGR triples.
    fn read_from<R: Read>(r: &mut R, width: u16, height: u16) -> Result<Option<Self>> {
        let size = {
            let mut bits = BitReader::new(&mut *r);
            bits.read_ub(16)?
        };
        if size == 0 {
            return Ok(None);
        }
        let compressed = utils::read_bytes(r, size as usize)?;
        let expected = usize::from(width) * usize::from(height) * 3;
        let raw = compression::inflate_exact(&compressed, expected, "video block pixels")?;
        let pixels = raw
            .chunks_exact(3)
            .map(|c| BgrColor {
                b: c[0],
                g: c[1],
                r: c[2],
            })
            .collect();
        Ok(Some(Self {
            width,
            height,
            pixels,
        }))
    }

    fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut raw = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            raw.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
        }
        let compressed = compression::deflate(&raw)?;
        {
            let mut bits = BitWriter::new(&mut *w);
            bits.write_ub(16, compressed.len() as u32)?;
            bits.flush()?;
        }
        w.write_all(&compressed)?;
        Ok(())
    }
}

/// A Screen Video frame: the decoded form of one video-tag payload.
///
/// An inter frame is only meaningful relative to the immediately preceding
/// frame of the same stream; that frame (or its composed image) is always
/// passed explicitly, never kept as hidden state, so several streams can be
/// processed side by side without cross-talk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenVideoFrame {
    pub kind: FrameKind,
    /// Block tile width, a multiple of 16 up to 256.
    pub block_width: u16,
    /// Block tile height, a multiple of 16 up to 256.
    pub block_height: u16,
    pub image_width: u16,
    pub image_height: u16,
    /// Row-major from the bottom-left block; `None` marks a block absent.
    pub blocks: Vec<Option<VideoBlock>>,
}

impl ScreenVideoFrame {
    /// Number of block columns.
    pub fn columns(&self) -> usize {
        usize::from(self.image_width).div_ceil(usize::from(self.block_width))
    }

    /// Number of block rows.
    pub fn rows(&self) -> usize {
        usize::from(self.image_height).div_ceil(usize::from(self.block_height))
    }

    /// Width and height of the block at `index`, clipped at the image edge.
    fn block_dimensions(&self, index: usize) -> (u16, u16) {
        let columns = self.columns();
        let row = index / columns;
        let col = index % columns;
        let width = if col < columns - 1 {
            self.block_width
        } else {
            self.image_width - col as u16 * self.block_width
        };
        let height = if row < self.rows() - 1 {
            self.block_height
        } else {
            self.image_height - row as u16 * self.block_height
        };
        (width, height)
    }

    /// Decodes a frame from the payload of a video tag.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut r = payload;
        let (kind, block_width, image_width, block_height, image_height) = {
            let mut bits = BitReader::new(&mut r);
            let kind = FrameKind::try_from(bits.read_ub(4)? as u8)?;
            let codec_id = bits.read_ub(4)? as u8;
            if codec_id != SCREEN_VIDEO_CODEC {
                return Err(SwfError::CodecMismatch {
                    expected: SCREEN_VIDEO_CODEC,
                    found: codec_id,
                });
            }
            let block_width = (bits.read_ub(4)? as u16 + 1) * 16;
            let image_width = bits.read_ub(12)? as u16;
            let block_height = (bits.read_ub(4)? as u16 + 1) * 16;
            let image_height = bits.read_ub(12)? as u16;
            (kind, block_width, image_width, block_height, image_height)
        };
        if image_width == 0 || image_height == 0 {
            return Err(SwfError::InvalidFormat(
                "zero image dimension in Screen Video frame".to_string(),
            ));
        }
        debug!(
            "Screen Video frame: {:?}, image {}x{}, block tile {}x{}",
            kind, image_width, image_height, block_width, block_height
        );
        let mut frame = Self {
            kind,
            block_width,
            block_height,
            image_width,
            image_height,
            blocks: Vec::new(),
        };
        let count = frame.columns() * frame.rows();
        frame.blocks.reserve(count);
        for index in 0..count {
            let (width, height) = frame.block_dimensions(index);
            frame.blocks.push(VideoBlock::read_from(&mut r, width, height)?);
        }
        trace!(
            "Decoded {} blocks, {} absent",
            count,
            frame.blocks.iter().filter(|b| b.is_none()).count()
        );
        Ok(frame)
    }

    /// Encodes this frame to a video-tag payload.
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.check_geometry()?;
        let mut out = Vec::new();
        {
            let mut bits = BitWriter::new(&mut out);
            bits.write_ub(4, self.kind as u32)?;
            bits.write_ub(4, u32::from(SCREEN_VIDEO_CODEC))?;
            bits.write_ub(4, u32::from(self.block_width / 16 - 1))?;
            bits.write_ub(12, u32::from(self.image_width))?;
            bits.write_ub(4, u32::from(self.block_height / 16 - 1))?;
            bits.write_ub(12, u32::from(self.image_height))?;
            bits.flush()?;
        }
        for block in &self.blocks {
            match block {
                Some(block) => block.write_to(&mut out)?,
                None => out.extend_from_slice(&[0, 0]),
            }
        }
        Ok(out)
    }

    /// Builds a key frame from a top-down BGR image buffer. Every block's
    /// payload is emitted unconditionally.
    pub fn key_frame(
        pixels: &[u8],
        width: u16,
        height: u16,
        block_width: u16,
        block_height: u16,
    ) -> Result<Self> {
        Self::from_pixels(FrameKind::Key, pixels, width, height, block_width, block_height)
    }

    /// Builds an inter frame against `previous`, marking blocks that are
    /// pixel-for-pixel identical to the previous frame's same-index block as
    /// absent. Block geometry is inherited from `previous`.
    ///
    /// This is the sole delta strategy: no motion search, no partial-block
    /// diff.
    pub fn inter_frame(
        pixels: &[u8],
        width: u16,
        height: u16,
        previous: &ScreenVideoFrame,
    ) -> Result<Self> {
        if previous.image_width != width || previous.image_height != height {
            return Err(SwfError::FrameSizeMismatch {
                expected: (previous.image_width, previous.image_height),
                found: (width, height),
            });
        }
        let mut frame = Self::from_pixels(
            FrameKind::Inter,
            pixels,
            width,
            height,
            previous.block_width,
            previous.block_height,
        )?;
        for (block, previous_block) in frame.blocks.iter_mut().zip(&previous.blocks) {
            if previous_block.is_some() && *previous_block == *block {
                *block = None;
            }
        }
        debug!(
            "Inter frame: {} of {} blocks unchanged",
            frame.blocks.iter().filter(|b| b.is_none()).count(),
            frame.blocks.len()
        );
        Ok(frame)
    }

    fn from_pixels(
        kind: FrameKind,
        pixels: &[u8],
        width: u16,
        height: u16,
        block_width: u16,
        block_height: u16,
    ) -> Result<Self> {
        let mut frame = Self {
            kind,
            block_width,
            block_height,
            image_width: width,
            image_height: height,
            blocks: Vec::new(),
        };
        frame.check_frame_geometry()?;
        let expected = usize::from(width) * usize::from(height) * 3;
        if pixels.len() != expected {
            return Err(SwfError::SizeMismatch {
                context: "image pixels",
                expected: expected as u64,
                found: pixels.len() as u64,
            });
        }
        let count = frame.columns() * frame.rows();
        let blocks = (0..count)
            .map(|index| Some(frame.extract_block(pixels, index)))
            .collect();
        frame.blocks = blocks;
        Ok(frame)
    }

    /// Copies one block's pixels out of a top-down BGR image buffer,
    /// reordering rows bottom-to-top.
    fn extract_block(&self, pixels: &[u8], index: usize) -> VideoBlock {
        let (width, height) = self.block_dimensions(index);
        let columns = self.columns();
        let row = index / columns;
        let col = index % columns;
        let start_x = col * usize::from(self.block_width);
        let bottom_y = usize::from(self.image_height) - 1 - row * usize::from(self.block_height);
        let stride = usize::from(self.image_width) * 3;
        let mut out = Vec::with_capacity(usize::from(width) * usize::from(height));
        for dy in 0..usize::from(height) {
            let y = bottom_y - dy;
            let line = &pixels[y * stride + start_x * 3..];
            for x in 0..usize::from(width) {
                out.push(BgrColor {
                    b: line[x * 3],
                    g: line[x * 3 + 1],
                    r: line[x * 3 + 2],
                });
            }
        }
        VideoBlock {
            width,
            height,
            pixels: out,
        }
    }

    /// Reconstructs the displayed image as a top-down BGR buffer.
    ///
    /// Inter frames need `previous`, the previously displayed image of the
    /// same stream: absent blocks keep their region from it. A key frame is
    /// self-contained; its absent blocks are holes left as zeros.
    pub fn compose(&self, previous: Option<&[u8]>) -> Result<Vec<u8>> {
        self.check_geometry()?;
        let stride = usize::from(self.image_width) * 3;
        let mut image = vec![0u8; stride * usize::from(self.image_height)];
        if self.kind != FrameKind::Key {
            match previous {
                Some(previous) => {
                    if previous.len() != image.len() {
                        return Err(SwfError::SizeMismatch {
                            context: "previous frame image",
                            expected: image.len() as u64,
                            found: previous.len() as u64,
                        });
                    }
                    image.copy_from_slice(previous);
                }
                None => {
                    if self.blocks.iter().any(|b| b.is_none()) {
                        return Err(SwfError::MissingPreviousFrame);
                    }
                }
            }
        }
        for (index, block) in self.blocks.iter().enumerate() {
            if let Some(block) = block {
                self.blit_block(&mut image, index, block);
            }
        }
        Ok(image)
    }

    fn blit_block(&self, image: &mut [u8], index: usize, block: &VideoBlock) {
        let columns = self.columns();
        let row = index / columns;
        let col = index % columns;
        let start_x = col * usize::from(self.block_width);
        let bottom_y = usize::from(self.image_height) - 1 - row * usize::from(self.block_height);
        let stride = usize::from(self.image_width) * 3;
        for dy in 0..usize::from(block.height) {
            let y = bottom_y - dy;
            let row_pixels =
                &block.pixels[dy * usize::from(block.width)..(dy + 1) * usize::from(block.width)];
            let line = &mut image[y * stride + start_x * 3..];
            for (x, pixel) in row_pixels.iter().enumerate() {
                line[x * 3] = pixel.b;
                line[x * 3 + 1] = pixel.g;
                line[x * 3 + 2] = pixel.r;
            }
        }
    }

    fn check_frame_geometry(&self) -> Result<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(SwfError::InvalidFormat(
                "zero image dimension in Screen Video frame".to_string(),
            ));
        }
        if self.image_width > 0xFFF || self.image_height > 0xFFF {
            return Err(SwfError::InvalidFormat(format!(
                "image {}x{} exceeds the 12-bit dimension limit",
                self.image_width, self.image_height
            )));
        }
        check_block_size(self.block_width)?;
        check_block_size(self.block_height)?;
        Ok(())
    }

    fn check_geometry(&self) -> Result<()> {
        self.check_frame_geometry()?;
        let expected = self.columns() * self.rows();
        if self.blocks.len() != expected {
            return Err(SwfError::SizeMismatch {
                context: "video block grid",
                expected: expected as u64,
                found: self.blocks.len() as u64,
            });
        }
        for (index, block) in self.blocks.iter().enumerate() {
            let Some(block) = block else { continue };
            let (width, height) = self.block_dimensions(index);
            if block.width != width
                || block.height != height
                || block.pixels.len() != usize::from(width) * usize::from(height)
            {
                return Err(SwfError::InvalidFormat(format!(
                    "block {} does not match the frame grid",
                    index
                )));
            }
        }
        Ok(())
    }
}

fn check_block_size(size: u16) -> Result<()> {
    if size == 0 || size % 16 != 0 || size > 256 {
        return Err(SwfError::InvalidFormat(format!(
            "block size {} must be a multiple of 16 up to 256",
            size
        )));
    }
    Ok(())
}
