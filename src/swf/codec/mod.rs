//! Codec layer for compression and the Screen Video format.
//!
//! This module provides the pure data transformations under the container
//! parsing layer.
//!
//! # Submodules
//!
//! - [`compression`][]: zlib inflate/deflate helpers
//! - [`video`][]: the block-based Screen Video codec

pub mod compression;
pub mod video;
