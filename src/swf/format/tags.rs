//! Tag framing and the built-in tag bodies.
//!
//! Every tag is framed by a 16-bit little-endian word holding a 10-bit code
//! and a 6-bit length, with 63 as the sentinel for a following 32-bit
//! extended length. Decoding frames the payload to a byte slice first and
//! then dispatches it through a registry of per-code decode/encode pairs;
//! codes without an entry round-trip opaquely as [`UnknownTag`]. Encoding
//! serializes the payload first so the header can pick the short or extended
//! form from the real length.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use encoding_rs::UTF_8;
use log::{trace, warn};

use crate::swf::bits::{BitReader, BitWriter};
use crate::swf::format::records::{ColorTransformWithAlpha, Matrix, RgbColor, SwfString};
use crate::swf::types::error::{Result, SwfError};
use crate::swf::types::models::{self, SoundCompression};
use crate::swf::utils;

/// Extended-length sentinel in the 6-bit length field.
const LENGTH_SENTINEL: u32 = 63;

/// Framing header of a single tag.
///
/// `length` counts payload bytes only; the framing bytes themselves are
/// never part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub code: u16,
    pub length: u32,
}

impl TagHeader {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let word = r.read_u16::<LittleEndian>()?;
        let code = word >> 6;
        let mut length = u32::from(word & 0x3F);
        if length == LENGTH_SENTINEL {
            length = r.read_u32::<LittleEndian>()?;
        }
        Ok(Self { code, length })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        if self.code > 0x3FF {
            return Err(SwfError::InvalidFormat(format!(
                "tag code {} exceeds 10 bits",
                self.code
            )));
        }
        if self.length < LENGTH_SENTINEL {
            w.write_u16::<LittleEndian>(self.code << 6 | self.length as u16)?;
        } else {
            w.write_u16::<LittleEndian>(self.code << 6 | LENGTH_SENTINEL as u16)?;
            w.write_u32::<LittleEndian>(self.length)?;
        }
        Ok(())
    }
}

/// A decoded tag, or the opaque fallback for unregistered codes.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    SetBackgroundColor(SetBackgroundColorTag),
    PlaceObject2(PlaceObject2Tag),
    SoundStreamHead(SoundStreamHeadTag),
    SoundStreamBlock(SoundStreamBlockTag),
    VideoFrame(VideoFrameTag),
    /// Clean end of the enclosing tag stream (code 0, length 0).
    End,
    Unknown(UnknownTag),
}

impl Tag {
    /// Tag code used in the framing header.
    pub fn code(&self) -> u16 {
        match self {
            Tag::SetBackgroundColor(_) => models::SET_BACKGROUND_COLOR,
            Tag::PlaceObject2(_) => models::PLACE_OBJECT_2,
            Tag::SoundStreamHead(_) => models::SOUND_STREAM_HEAD,
            Tag::SoundStreamBlock(_) => models::SOUND_STREAM_BLOCK,
            Tag::VideoFrame(_) => models::VIDEO_FRAME,
            Tag::End => models::END,
            Tag::Unknown(tag) => tag.code,
        }
    }

    /// Reads one framed tag: header, exactly `length` payload bytes, then
    /// registry dispatch.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Tag> {
        let header = TagHeader::read_from(r)?;
        let payload = utils::read_bytes(r, header.length as usize)?;
        Self::decode(header, &payload)
    }

    /// Decodes an already-framed payload.
    pub fn decode(header: TagHeader, payload: &[u8]) -> Result<Tag> {
        trace!("Decoding tag: code={}, length={}", header.code, header.length);
        if header.code == models::END && header.length == 0 {
            return Ok(Tag::End);
        }
        match codec_for(header.code) {
            Some(codec) => (codec.decode)(payload),
            None => Ok(Tag::Unknown(UnknownTag {
                code: header.code,
                data: payload.to_vec(),
            })),
        }
    }

    /// Serializes the payload first, then emits the header in short or
    /// extended form depending on the resulting length.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut payload = Vec::new();
        self.write_payload(&mut payload)?;
        let header = TagHeader {
            code: self.code(),
            length: payload.len() as u32,
        };
        header.write_to(w)?;
        w.write_all(&payload)?;
        Ok(())
    }

    fn write_payload(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Tag::End => Ok(()),
            Tag::Unknown(tag) => {
                out.extend_from_slice(&tag.data);
                Ok(())
            }
            _ => match codec_for(self.code()) {
                Some(codec) => (codec.encode)(self, out),
                None => Err(SwfError::InvalidFormat(format!(
                    "no codec registered for tag code {}",
                    self.code()
                ))),
            },
        }
    }
}

/// One registry row: a tag code bound to its decode/encode pair.
struct TagCodec {
    code: u16,
    decode: fn(&[u8]) -> Result<Tag>,
    encode: fn(&Tag, &mut Vec<u8>) -> Result<()>,
}

/// Built-in codecs; codes not listed here fall back to [`UnknownTag`].
static REGISTRY: &[TagCodec] = &[
    TagCodec {
        code: models::SET_BACKGROUND_COLOR,
        decode: decode_set_background_color,
        encode: encode_set_background_color,
    },
    TagCodec {
        code: models::SOUND_STREAM_HEAD,
        decode: decode_sound_stream_head,
        encode: encode_sound_stream_head,
    },
    TagCodec {
        code: models::SOUND_STREAM_BLOCK,
        decode: decode_sound_stream_block,
        encode: encode_sound_stream_block,
    },
    TagCodec {
        code: models::PLACE_OBJECT_2,
        decode: decode_place_object2,
        encode: encode_place_object2,
    },
    TagCodec {
        code: models::VIDEO_FRAME,
        decode: decode_video_frame,
        encode: encode_video_frame,
    },
];

fn codec_for(code: u16) -> Option<&'static TagCodec> {
    REGISTRY.iter().find(|codec| codec.code == code)
}

fn wrong_variant(code: u16) -> SwfError {
    SwfError::InvalidFormat(format!("tag does not match the codec for code {}", code))
}

fn warn_trailing(name: &str, remaining: usize) {
    if remaining > 0 {
        warn!("{} tag payload has {} undecoded trailing bytes", name, remaining);
    }
}

fn decode_set_background_color(payload: &[u8]) -> Result<Tag> {
    let mut r = payload;
    let tag = SetBackgroundColorTag {
        background_color: RgbColor::read_from(&mut r)?,
    };
    warn_trailing("SetBackgroundColor", r.len());
    Ok(Tag::SetBackgroundColor(tag))
}

fn encode_set_background_color(tag: &Tag, out: &mut Vec<u8>) -> Result<()> {
    match tag {
        Tag::SetBackgroundColor(tag) => tag.background_color.write_to(out),
        _ => Err(wrong_variant(models::SET_BACKGROUND_COLOR)),
    }
}

fn decode_sound_stream_head(payload: &[u8]) -> Result<Tag> {
    let mut r = payload;
    let tag = SoundStreamHeadTag::read_payload(&mut r, payload.len())?;
    warn_trailing("SoundStreamHead", r.len());
    Ok(Tag::SoundStreamHead(tag))
}

fn encode_sound_stream_head(tag: &Tag, out: &mut Vec<u8>) -> Result<()> {
    match tag {
        Tag::SoundStreamHead(tag) => tag.write_payload(out),
        _ => Err(wrong_variant(models::SOUND_STREAM_HEAD)),
    }
}

fn decode_sound_stream_block(payload: &[u8]) -> Result<Tag> {
    Ok(Tag::SoundStreamBlock(SoundStreamBlockTag {
        sound_data: payload.to_vec(),
    }))
}

fn encode_sound_stream_block(tag: &Tag, out: &mut Vec<u8>) -> Result<()> {
    match tag {
        Tag::SoundStreamBlock(tag) => {
            out.extend_from_slice(&tag.sound_data);
            Ok(())
        }
        _ => Err(wrong_variant(models::SOUND_STREAM_BLOCK)),
    }
}

fn decode_place_object2(payload: &[u8]) -> Result<Tag> {
    let mut r = payload;
    let tag = PlaceObject2Tag::read_payload(&mut r)?;
    warn_trailing("PlaceObject2", r.len());
    Ok(Tag::PlaceObject2(tag))
}

fn encode_place_object2(tag: &Tag, out: &mut Vec<u8>) -> Result<()> {
    match tag {
        Tag::PlaceObject2(tag) => tag.write_payload(out),
        _ => Err(wrong_variant(models::PLACE_OBJECT_2)),
    }
}

fn decode_video_frame(payload: &[u8]) -> Result<Tag> {
    let mut r = payload;
    Ok(Tag::VideoFrame(VideoFrameTag::read_payload(&mut r)?))
}

fn encode_video_frame(tag: &Tag, out: &mut Vec<u8>) -> Result<()> {
    match tag {
        Tag::VideoFrame(tag) => tag.write_payload(out),
        _ => Err(wrong_variant(models::VIDEO_FRAME)),
    }
}

/// Opaque payload for tag codes without a registered codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    pub code: u16,
    pub data: Vec<u8>,
}

/// SetBackgroundColor tag (code 9).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetBackgroundColorTag {
    pub background_color: RgbColor,
}

/// CLIPEVENTFLAGS record: 32 bits of event flags with two reserved runs
/// that must be zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipEventFlags {
    pub key_up: bool,
    pub key_down: bool,
    pub mouse_up: bool,
    pub mouse_down: bool,
    pub mouse_move: bool,
    pub unload: bool,
    pub enter_frame: bool,
    pub load: bool,
    pub drag_over: bool,
    pub roll_out: bool,
    pub roll_over: bool,
    pub release_outside: bool,
    pub release: bool,
    pub press: bool,
    pub initialize: bool,
    pub data: bool,
    pub construct: bool,
    pub key_press: bool,
    pub drag_out: bool,
}

impl ClipEventFlags {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut bits = BitReader::new(r);
        let mut flags = Self::default();
        flags.key_up = bits.read_ub(1)? != 0;
        flags.key_down = bits.read_ub(1)? != 0;
        flags.mouse_up = bits.read_ub(1)? != 0;
        flags.mouse_down = bits.read_ub(1)? != 0;
        flags.mouse_move = bits.read_ub(1)? != 0;
        flags.unload = bits.read_ub(1)? != 0;
        flags.enter_frame = bits.read_ub(1)? != 0;
        flags.load = bits.read_ub(1)? != 0;
        flags.drag_over = bits.read_ub(1)? != 0;
        flags.roll_out = bits.read_ub(1)? != 0;
        flags.roll_over = bits.read_ub(1)? != 0;
        flags.release_outside = bits.read_ub(1)? != 0;
        flags.release = bits.read_ub(1)? != 0;
        flags.press = bits.read_ub(1)? != 0;
        flags.initialize = bits.read_ub(1)? != 0;
        flags.data = bits.read_ub(1)? != 0;
        if bits.read_ub(5)? != 0 {
            return Err(SwfError::ReservedNotZero("clip event flags"));
        }
        flags.construct = bits.read_ub(1)? != 0;
        flags.key_press = bits.read_ub(1)? != 0;
        flags.drag_out = bits.read_ub(1)? != 0;
        if bits.read_ub(8)? != 0 {
            return Err(SwfError::ReservedNotZero("clip event flags"));
        }
        Ok(flags)
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut bits = BitWriter::new(w);
        for flag in [
            self.key_up,
            self.key_down,
            self.mouse_up,
            self.mouse_down,
            self.mouse_move,
            self.unload,
            self.enter_frame,
            self.load,
            self.drag_over,
            self.roll_out,
            self.roll_over,
            self.release_outside,
            self.release,
            self.press,
            self.initialize,
            self.data,
        ] {
            bits.write_ub(1, flag as u32)?;
        }
        bits.write_ub(5, 0)?;
        bits.write_ub(1, self.construct as u32)?;
        bits.write_ub(1, self.key_press as u32)?;
        bits.write_ub(1, self.drag_out as u32)?;
        bits.write_ub(8, 0)?;
        bits.flush()
    }
}

/// A single action. Codes at or above 0x80 carry a length-prefixed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRecord {
    pub code: u8,
    pub data: Vec<u8>,
}

impl ActionRecord {
    /// Total serialized size in bytes, used for clip-action bookkeeping.
    fn byte_len(&self) -> u32 {
        if self.code >= 0x80 {
            3 + self.data.len() as u32
        } else {
            1
        }
    }

    pub fn read_from(r: &mut &[u8]) -> Result<Self> {
        let code = r.read_u8()?;
        let mut data = Vec::new();
        if code >= 0x80 {
            let length = r.read_u16::<LittleEndian>()? as usize;
            data = utils::read_bytes(r, length)?;
        }
        Ok(Self { code, data })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u8(self.code)?;
        if self.code >= 0x80 {
            out.write_u16::<LittleEndian>(self.data.len() as u16)?;
            out.extend_from_slice(&self.data);
        }
        Ok(())
    }
}

/// CLIPACTIONRECORD: one event handler with its declared byte size.
///
/// `key_code` is carried exactly when the `key_press` event flag is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipActionRecord {
    pub event_flags: ClipEventFlags,
    pub key_code: Option<u8>,
    pub actions: Vec<ActionRecord>,
}

impl ClipActionRecord {
    pub fn read_from(r: &mut &[u8]) -> Result<Self> {
        let event_flags = ClipEventFlags::read_from(r)?;
        let record_size = r.read_u32::<LittleEndian>()?;
        let mut consumed = 0u32;
        let key_code = if event_flags.key_press {
            consumed += 1;
            Some(r.read_u8()?)
        } else {
            None
        };
        let mut actions = Vec::new();
        while consumed < record_size {
            let action = ActionRecord::read_from(r)?;
            consumed += action.byte_len();
            actions.push(action);
        }
        if consumed != record_size {
            return Err(SwfError::SizeMismatch {
                context: "clip action record",
                expected: u64::from(record_size),
                found: u64::from(consumed),
            });
        }
        Ok(Self {
            event_flags,
            key_code,
            actions,
        })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        self.event_flags.write_to(out)?;
        let mut size: u32 = self.actions.iter().map(ActionRecord::byte_len).sum();
        if self.event_flags.key_press {
            size += 1;
        }
        out.write_u32::<LittleEndian>(size)?;
        if self.event_flags.key_press {
            out.write_u8(self.key_code.unwrap_or(0))?;
        }
        for action in &self.actions {
            action.write_to(out)?;
        }
        Ok(())
    }
}

/// CLIPACTIONS record: aggregate event flags plus per-event handlers,
/// closed by a four-byte zero terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipActions {
    pub event_flags: ClipEventFlags,
    pub records: Vec<ClipActionRecord>,
}

impl ClipActions {
    pub fn read_from(r: &mut &[u8]) -> Result<Self> {
        if r.read_u16::<LittleEndian>()? != 0 {
            return Err(SwfError::ReservedNotZero("clip actions"));
        }
        let event_flags = ClipEventFlags::read_from(r)?;
        let mut records = Vec::new();
        loop {
            if r.len() >= 4 && r[..4] == [0, 0, 0, 0] {
                *r = &r[4..];
                break;
            }
            records.push(ClipActionRecord::read_from(r)?);
        }
        Ok(Self {
            event_flags,
            records,
        })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u16::<LittleEndian>(0)?;
        self.event_flags.write_to(out)?;
        for record in &self.records {
            record.write_to(out)?;
        }
        out.extend_from_slice(&[0, 0, 0, 0]);
        Ok(())
    }
}

/// PlaceObject2 tag (code 26): places, moves, or replaces a character on the
/// display list. Optional fields are driven by the leading flag bits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceObject2Tag {
    pub depth: u16,
    pub move_character: bool,
    pub character_id: Option<u16>,
    pub matrix: Option<Matrix>,
    pub color_transform: Option<ColorTransformWithAlpha>,
    pub ratio: Option<u16>,
    pub name: Option<SwfString>,
    pub clip_depth: Option<u16>,
    pub clip_actions: Option<ClipActions>,
}

impl PlaceObject2Tag {
    fn read_payload(r: &mut &[u8]) -> Result<Self> {
        let mut bits = BitReader::new(&mut *r);
        let has_clip_actions = bits.read_ub(1)? != 0;
        let has_clip_depth = bits.read_ub(1)? != 0;
        let has_name = bits.read_ub(1)? != 0;
        let has_ratio = bits.read_ub(1)? != 0;
        let has_color_transform = bits.read_ub(1)? != 0;
        let has_matrix = bits.read_ub(1)? != 0;
        let has_character = bits.read_ub(1)? != 0;
        let move_character = bits.read_ub(1)? != 0;

        let depth = r.read_u16::<LittleEndian>()?;
        let character_id = if has_character {
            Some(r.read_u16::<LittleEndian>()?)
        } else {
            None
        };
        let matrix = if has_matrix {
            Some(Matrix::read_from(r)?)
        } else {
            None
        };
        let color_transform = if has_color_transform {
            Some(ColorTransformWithAlpha::read_from(r)?)
        } else {
            None
        };
        let ratio = if has_ratio {
            Some(r.read_u16::<LittleEndian>()?)
        } else {
            None
        };
        let name = if has_name {
            Some(SwfString::read_from(r, UTF_8)?)
        } else {
            None
        };
        let clip_depth = if has_clip_depth {
            Some(r.read_u16::<LittleEndian>()?)
        } else {
            None
        };
        let clip_actions = if has_clip_actions {
            Some(ClipActions::read_from(r)?)
        } else {
            None
        };
        Ok(Self {
            depth,
            move_character,
            character_id,
            matrix,
            color_transform,
            ratio,
            name,
            clip_depth,
            clip_actions,
        })
    }

    fn write_payload(&self, out: &mut Vec<u8>) -> Result<()> {
        {
            let mut bits = BitWriter::new(&mut *out);
            bits.write_ub(1, self.clip_actions.is_some() as u32)?;
            bits.write_ub(1, self.clip_depth.is_some() as u32)?;
            bits.write_ub(1, self.name.is_some() as u32)?;
            bits.write_ub(1, self.ratio.is_some() as u32)?;
            bits.write_ub(1, self.color_transform.is_some() as u32)?;
            bits.write_ub(1, self.matrix.is_some() as u32)?;
            bits.write_ub(1, self.character_id.is_some() as u32)?;
            bits.write_ub(1, self.move_character as u32)?;
            bits.flush()?;
        }
        out.write_u16::<LittleEndian>(self.depth)?;
        if let Some(id) = self.character_id {
            out.write_u16::<LittleEndian>(id)?;
        }
        if let Some(matrix) = &self.matrix {
            matrix.write_to(out)?;
        }
        if let Some(transform) = &self.color_transform {
            transform.write_to(out)?;
        }
        if let Some(ratio) = self.ratio {
            out.write_u16::<LittleEndian>(ratio)?;
        }
        if let Some(name) = &self.name {
            name.write_to(out, UTF_8)?;
        }
        if let Some(depth) = self.clip_depth {
            out.write_u16::<LittleEndian>(depth)?;
        }
        if let Some(actions) = &self.clip_actions {
            actions.write_to(out)?;
        }
        Ok(())
    }
}

/// SoundStreamHead tag (code 18).
///
/// Rates are coded 0..=3 for 5.5/11/22/44 kHz; sound types are 0 mono,
/// 1 stereo. Sample sizes are always 16 bit and therefore not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundStreamHeadTag {
    pub playback_sound_rate: u8,
    pub playback_sound_type: u8,
    pub stream_sound_compression: SoundCompression,
    pub stream_sound_rate: u8,
    pub stream_sound_type: u8,
    /// Average number of samples per SoundStreamBlock.
    pub stream_sound_sample_count: u16,
    /// Samples to skip at stream start; MP3 only.
    pub latency_seek: i16,
}

impl SoundStreamHeadTag {
    fn read_payload(r: &mut &[u8], payload_len: usize) -> Result<Self> {
        let mut bits = BitReader::new(&mut *r);
        bits.read_ub(4)?; // reserved, not enforced by deployed encoders
        let playback_sound_rate = bits.read_ub(2)? as u8;
        if bits.read_ub(1)? != 1 {
            return Err(SwfError::InvalidFormat(
                "playback sound size must be 16 bit".to_string(),
            ));
        }
        let playback_sound_type = bits.read_ub(1)? as u8;
        let stream_sound_compression = SoundCompression::try_from(bits.read_ub(4)? as u8)?;
        let stream_sound_rate = bits.read_ub(2)? as u8;
        if bits.read_ub(1)? != 1 {
            return Err(SwfError::InvalidFormat(
                "stream sound size must be 16 bit".to_string(),
            ));
        }
        let stream_sound_type = bits.read_ub(1)? as u8;
        let stream_sound_sample_count = r.read_u16::<LittleEndian>()?;
        let latency_seek = if stream_sound_compression == SoundCompression::Mp3 && payload_len > 4
        {
            r.read_i16::<LittleEndian>()?
        } else {
            0
        };
        Ok(Self {
            playback_sound_rate,
            playback_sound_type,
            stream_sound_compression,
            stream_sound_rate,
            stream_sound_type,
            stream_sound_sample_count,
            latency_seek,
        })
    }

    fn write_payload(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.playback_sound_rate > 3 || self.stream_sound_rate > 3 {
            return Err(SwfError::InvalidFormat(
                "sound rate must be coded 0..=3".to_string(),
            ));
        }
        if self.playback_sound_type > 1 || self.stream_sound_type > 1 {
            return Err(SwfError::InvalidFormat(
                "sound type must be 0 (mono) or 1 (stereo)".to_string(),
            ));
        }
        {
            let mut bits = BitWriter::new(&mut *out);
            bits.write_ub(4, 0)?;
            bits.write_ub(2, u32::from(self.playback_sound_rate))?;
            bits.write_ub(1, 1)?;
            bits.write_ub(1, u32::from(self.playback_sound_type))?;
            bits.write_ub(4, self.stream_sound_compression as u32)?;
            bits.write_ub(2, u32::from(self.stream_sound_rate))?;
            bits.write_ub(1, 1)?;
            bits.write_ub(1, u32::from(self.stream_sound_type))?;
            bits.flush()?;
        }
        out.write_u16::<LittleEndian>(self.stream_sound_sample_count)?;
        if self.stream_sound_compression == SoundCompression::Mp3 && self.latency_seek != 0 {
            out.write_i16::<LittleEndian>(self.latency_seek)?;
        }
        Ok(())
    }
}

/// SoundStreamBlock tag (code 19): one opaque chunk of the sound stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundStreamBlockTag {
    pub sound_data: Vec<u8>,
}

/// VideoFrame tag (code 61): one encoded video frame of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFrameTag {
    pub stream_id: u16,
    pub frame_num: u16,
    /// Codec payload, e.g. an encoded Screen Video frame. Opaque at the
    /// container level.
    pub video_data: Vec<u8>,
}

impl VideoFrameTag {
    fn read_payload(r: &mut &[u8]) -> Result<Self> {
        if r.len() < 4 {
            return Err(SwfError::InvalidFormat(format!(
                "VideoFrame tag payload is {} bytes, need at least 4",
                r.len()
            )));
        }
        let stream_id = r.read_u16::<LittleEndian>()?;
        let frame_num = r.read_u16::<LittleEndian>()?;
        let video_data = std::mem::take(r).to_vec();
        Ok(Self {
            stream_id,
            frame_num,
            video_data,
        })
    }

    fn write_payload(&self, out: &mut Vec<u8>) -> Result<()> {
        out.write_u16::<LittleEndian>(self.stream_id)?;
        out.write_u16::<LittleEndian>(self.frame_num)?;
        out.extend_from_slice(&self.video_data);
        Ok(())
    }
}
