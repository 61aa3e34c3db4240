//! Variable-width and byte-level SWF records.
//!
//! The bit-packed records (Rect, Matrix, the color transforms) open with a
//! self-describing width preamble: the encoder derives the width from exactly
//! the values it is about to emit, and the decoder reads the width first and
//! then exactly that many bits per field — widths are never inferred from
//! context. Byte-level records follow the container's little-endian scalar
//! rules.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use encoding_rs::Encoding;

use crate::swf::bits::{BitReader, BitWriter, required_bits};
use crate::swf::types::error::{Result, SwfError};

/// Width for a record's signed fields, checked against its preamble field.
fn field_width(values: &[i32], preamble_bits: u32) -> Result<u32> {
    let nbits = required_bits(values);
    if nbits >= 1 << preamble_bits {
        return Err(SwfError::ValueOverflow {
            width: preamble_bits,
            value: i64::from(nbits),
        });
    }
    Ok(nbits)
}

/// 8.8 fixed-point value, stored raw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fixed8(pub u16);

impl Fixed8 {
    pub fn from_f32(value: f32) -> Self {
        Self((value * 256.0) as u16)
    }

    pub fn to_f32(self) -> f32 {
        f32::from(self.0) / 256.0
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        Ok(Self(r.read_u16::<LittleEndian>()?))
    }

    pub fn write_to<W: Write>(self, w: &mut W) -> Result<()> {
        Ok(w.write_u16::<LittleEndian>(self.0)?)
    }
}

/// 16.16 fixed-point value, stored raw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fixed32(pub i32);

impl Fixed32 {
    pub fn from_f64(value: f64) -> Self {
        Self((value * 65536.0) as i32)
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 65536.0
    }

    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        Ok(Self(r.read_i32::<LittleEndian>()?))
    }

    pub fn write_to<W: Write>(self, w: &mut W) -> Result<()> {
        Ok(w.write_i32::<LittleEndian>(self.0)?)
    }
}

/// NUL-terminated string record.
///
/// SWF version 6 and later default to UTF-8; earlier files carry
/// locale-dependent encodings, hence the explicit [`Encoding`] parameter on
/// both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwfString {
    pub value: String,
}

impl SwfString {
    /// Builds a string record; anything from the first NUL on is dropped.
    pub fn new(value: &str) -> Self {
        let value = match value.find('\0') {
            Some(pos) => &value[..pos],
            None => value,
        };
        Self {
            value: value.to_owned(),
        }
    }

    /// Reads bytes up to the NUL terminator and decodes them.
    pub fn read_from<R: Read>(r: &mut R, encoding: &'static Encoding) -> Result<Self> {
        let mut raw = Vec::new();
        loop {
            let byte = r.read_u8()?;
            if byte == 0 {
                break;
            }
            raw.push(byte);
        }
        let (text, _, _) = encoding.decode(&raw);
        Ok(Self {
            value: text.into_owned(),
        })
    }

    /// Encodes the text and writes it with a NUL terminator.
    pub fn write_to<W: Write>(&self, w: &mut W, encoding: &'static Encoding) -> Result<()> {
        let (bytes, _, _) = encoding.encode(&self.value);
        w.write_all(&bytes)?;
        w.write_u8(0)?;
        Ok(())
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut c = [0u8; 3];
        r.read_exact(&mut c)?;
        Ok(Self {
            r: c[0],
            g: c[1],
            b: c[2],
        })
    }

    pub fn write_to<W: Write>(self, w: &mut W) -> Result<()> {
        Ok(w.write_all(&[self.r, self.g, self.b])?)
    }
}

/// 32-bit RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut c = [0u8; 4];
        r.read_exact(&mut c)?;
        Ok(Self {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        })
    }

    pub fn write_to<W: Write>(self, w: &mut W) -> Result<()> {
        Ok(w.write_all(&[self.r, self.g, self.b, self.a])?)
    }
}

/// RECT record: an axis-aligned bounding box in twips.
///
/// Wire form: a 5-bit field width, then the four signed coordinates at that
/// width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut bits = BitReader::new(r);
        let nbits = bits.read_ub(5)?;
        Ok(Self {
            x_min: bits.read_sb(nbits)?,
            x_max: bits.read_sb(nbits)?,
            y_min: bits.read_sb(nbits)?,
            y_max: bits.read_sb(nbits)?,
        })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let nbits = field_width(&[self.x_min, self.x_max, self.y_min, self.y_max], 5)?;
        let mut bits = BitWriter::new(w);
        bits.write_ub(5, nbits)?;
        bits.write_sb(nbits, self.x_min)?;
        bits.write_sb(nbits, self.x_max)?;
        bits.write_sb(nbits, self.y_min)?;
        bits.write_sb(nbits, self.y_max)?;
        bits.flush()
    }
}

/// MATRIX record: a 2x3 affine transform.
///
/// Scale and rotate components are raw 16.16 fixed-point integers so that
/// round-trips stay bit-exact; translate is in twips. Each optional pair is a
/// presence flag plus its own 5-bit width; the mandatory translate pair has a
/// width of its own, where width 0 means both components are zero and no
/// further bits are consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matrix {
    pub scale: Option<(i32, i32)>,
    pub rotate: Option<(i32, i32)>,
    pub translate: (i32, i32),
}

impl Matrix {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let mut bits = BitReader::new(r);
        let scale = if bits.read_ub(1)? != 0 {
            let nbits = bits.read_ub(5)?;
            Some((bits.read_sb(nbits)?, bits.read_sb(nbits)?))
        } else {
            None
        };
        let rotate = if bits.read_ub(1)? != 0 {
            let nbits = bits.read_ub(5)?;
            Some((bits.read_sb(nbits)?, bits.read_sb(nbits)?))
        } else {
            None
        };
        let translate_bits = bits.read_ub(5)?;
        let translate = if translate_bits > 0 {
            (bits.read_sb(translate_bits)?, bits.read_sb(translate_bits)?)
        } else {
            (0, 0)
        };
        Ok(Self {
            scale,
            rotate,
            translate,
        })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let pair_widths = [
            match self.scale {
                Some((a, b)) => Some(field_width(&[a, b], 5)?),
                None => None,
            },
            match self.rotate {
                Some((a, b)) => Some(field_width(&[a, b], 5)?),
                None => None,
            },
        ];
        let translate_bits = if self.translate == (0, 0) {
            0
        } else {
            field_width(&[self.translate.0, self.translate.1], 5)?
        };
        let mut bits = BitWriter::new(w);
        for (pair, nbits) in [self.scale, self.rotate].into_iter().zip(pair_widths) {
            match (pair, nbits) {
                (Some((a, b)), Some(nbits)) => {
                    bits.write_ub(1, 1)?;
                    bits.write_ub(5, nbits)?;
                    bits.write_sb(nbits, a)?;
                    bits.write_sb(nbits, b)?;
                }
                _ => bits.write_ub(1, 0)?,
            }
        }
        bits.write_ub(5, translate_bits)?;
        if translate_bits > 0 {
            bits.write_sb(translate_bits, self.translate.0)?;
            bits.write_sb(translate_bits, self.translate.1)?;
        }
        bits.flush()
    }
}

fn read_color_terms<const N: usize, R: Read>(
    r: &mut R,
) -> Result<(Option<[i32; N]>, Option<[i32; N]>)> {
    let mut bits = BitReader::new(r);
    let has_add = bits.read_ub(1)? != 0;
    let has_mult = bits.read_ub(1)? != 0;
    let nbits = bits.read_ub(4)?;
    let mut mult_term = None;
    if has_mult {
        let mut term = [0i32; N];
        for value in term.iter_mut() {
            *value = bits.read_sb(nbits)?;
        }
        mult_term = Some(term);
    }
    let mut add_term = None;
    if has_add {
        let mut term = [0i32; N];
        for value in term.iter_mut() {
            *value = bits.read_sb(nbits)?;
        }
        add_term = Some(term);
    }
    Ok((mult_term, add_term))
}

fn write_color_terms<const N: usize, W: Write>(
    w: &mut W,
    mult_term: Option<&[i32; N]>,
    add_term: Option<&[i32; N]>,
) -> Result<()> {
    let mut values: Vec<i32> = Vec::new();
    if let Some(term) = add_term {
        values.extend_from_slice(term);
    }
    if let Some(term) = mult_term {
        values.extend_from_slice(term);
    }
    let nbits = field_width(&values, 4)?;
    let mut bits = BitWriter::new(w);
    bits.write_ub(1, add_term.is_some() as u32)?;
    bits.write_ub(1, mult_term.is_some() as u32)?;
    bits.write_ub(4, nbits)?;
    if let Some(term) = mult_term {
        for &value in term {
            bits.write_sb(nbits, value)?;
        }
    }
    if let Some(term) = add_term {
        for &value in term {
            bits.write_sb(nbits, value)?;
        }
    }
    bits.flush()
}

/// CXFORM record: per-channel multiply and add terms sharing one 4-bit
/// width, multiply terms first on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorTransform {
    pub mult_term: Option<[i32; 3]>,
    pub add_term: Option<[i32; 3]>,
}

impl ColorTransform {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let (mult_term, add_term) = read_color_terms::<3, R>(r)?;
        Ok(Self {
            mult_term,
            add_term,
        })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        write_color_terms(w, self.mult_term.as_ref(), self.add_term.as_ref())
    }
}

/// CXFORMWITHALPHA record: like [`ColorTransform`] with an alpha channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorTransformWithAlpha {
    pub mult_term: Option<[i32; 4]>,
    pub add_term: Option<[i32; 4]>,
}

impl ColorTransformWithAlpha {
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let (mult_term, add_term) = read_color_terms::<4, R>(r)?;
        Ok(Self {
            mult_term,
            add_term,
        })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        write_color_terms(w, self.mult_term.as_ref(), self.add_term.as_ref())
    }
}
