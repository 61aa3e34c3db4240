//! # swf-codec
//!
//! A reader and writer for the SWF binary container format: bit-level
//! primitives, self-describing variable-width records, tag framing with a
//! pluggable decoder registry, optional whole-file compression, and the
//! block-based Screen Video codec.
//!
//! Headers are parsed eagerly; the tag stream is consumed lazily through a
//! forward-only iterator:
//!
//! ```no_run
//! # fn main() -> swf_codec::Result<()> {
//! let mut file = swf_codec::SwfFile::open("movie.swf")?;
//! for tag in file.tags() {
//!     let tag = tag?;
//!     // inspect or collect the tag
//! }
//! # Ok(())
//! # }
//! ```
pub mod swf;

// Re-export the main types for convenience
pub use swf::{
    codec::video::ScreenVideoFrame,
    format::{
        header::{FileHeader, FrameHeader, Header, Signature},
        tags::Tag,
    },
    reader::{ParseOptions, SwfFile},
    types::error::{Result, SwfError, SwfErrorKind},
};
