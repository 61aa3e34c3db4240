//! Core constants and enumerations for SWF format components.

use super::error::{Result, SwfError};

/// End tag, terminating every tag stream.
pub const END: u16 = 0;
/// SetBackgroundColor tag.
pub const SET_BACKGROUND_COLOR: u16 = 9;
/// SoundStreamHead tag.
pub const SOUND_STREAM_HEAD: u16 = 18;
/// SoundStreamBlock tag.
pub const SOUND_STREAM_BLOCK: u16 = 19;
/// PlaceObject2 tag.
pub const PLACE_OBJECT_2: u16 = 26;
/// VideoFrame tag.
pub const VIDEO_FRAME: u16 = 61;

/// Codec id for Sorenson H.263 video payloads.
pub const SORENSON_H263_CODEC: u8 = 2;
/// Codec id for Screen Video payloads.
pub const SCREEN_VIDEO_CODEC: u8 = 3;

/// Mono stream sound type.
pub const SND_MONO: u8 = 0;
/// Stereo stream sound type.
pub const SND_STEREO: u8 = 1;

/// Kind of a Screen Video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Fully self-contained frame; every block's pixels are present.
    Key = 1,
    /// Frame diffed against the immediately preceding frame; absent blocks
    /// are unchanged.
    Inter = 2,
    /// Inter frame that may be dropped by players without corrupting the
    /// stream.
    DisposableInter = 3,
}

impl TryFrom<u8> for FrameKind {
    type Error = SwfError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Key),
            2 => Ok(Self::Inter),
            3 => Ok(Self::DisposableInter),
            _ => Err(SwfError::InvalidFormat(format!(
                "Unknown video frame kind: {}",
                value
            ))),
        }
    }
}

/// Compression of a streaming sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCompression {
    Adpcm = 1,
    Mp3 = 2,
}

impl TryFrom<u8> for SoundCompression {
    type Error = SwfError;
    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Adpcm),
            2 => Ok(Self::Mp3),
            _ => Err(SwfError::InvalidFormat(format!(
                "Unsupported stream sound compression: {}",
                value
            ))),
        }
    }
}
