use swf_codec::swf::bits::{BitReader, BitWriter, required_bits};
use swf_codec::swf::format::header::{FileHeader, FrameHeader, Header, Signature};
use swf_codec::swf::format::records::{
    ColorTransform, ColorTransformWithAlpha, Fixed8, Fixed32, Matrix, Rect, RgbColor, RgbaColor,
    SwfString,
};
use swf_codec::swf::format::tags::{
    ActionRecord, ClipActionRecord, ClipActions, ClipEventFlags, PlaceObject2Tag,
    SetBackgroundColorTag, SoundStreamBlockTag, SoundStreamHeadTag, Tag, UnknownTag, VideoFrameTag,
};
use swf_codec::swf::types::models::{SND_MONO, SND_STEREO, SoundCompression};
use swf_codec::swf::writer;
use swf_codec::{ParseOptions, SwfError, SwfErrorKind, SwfFile};

fn sample_header(signature: Signature, version: u8) -> Header {
    Header {
        file: FileHeader {
            signature,
            version,
            // informational; the writer derives the real value
            file_length: 0,
        },
        frame: FrameHeader {
            frame_size: Rect {
                x_min: 0,
                x_max: 11000,
                y_min: 0,
                y_max: 8000,
            },
            frame_rate: Fixed8::from_f32(12.0),
            frame_count: 3,
        },
    }
}

fn sample_tags() -> Vec<Tag> {
    let clip_actions = ClipActions {
        event_flags: ClipEventFlags {
            press: true,
            key_press: true,
            ..Default::default()
        },
        records: vec![ClipActionRecord {
            event_flags: ClipEventFlags {
                key_press: true,
                ..Default::default()
            },
            key_code: Some(13),
            actions: vec![
                ActionRecord {
                    code: 0x06,
                    data: Vec::new(),
                },
                ActionRecord {
                    code: 0x81,
                    data: vec![1, 2, 3],
                },
            ],
        }],
    };
    vec![
        Tag::SetBackgroundColor(SetBackgroundColorTag {
            background_color: RgbColor {
                r: 255,
                g: 128,
                b: 0,
            },
        }),
        Tag::PlaceObject2(PlaceObject2Tag {
            depth: 1,
            move_character: false,
            character_id: Some(7),
            matrix: Some(Matrix {
                scale: Some((65536, 32768)),
                rotate: None,
                translate: (200, -140),
            }),
            color_transform: Some(ColorTransformWithAlpha {
                mult_term: Some([256, 256, 200, 255]),
                add_term: Some([-10, 0, 10, 0]),
            }),
            ratio: Some(3),
            name: Some(SwfString::new("clip")),
            clip_depth: Some(4),
            clip_actions: Some(clip_actions),
        }),
        Tag::SoundStreamHead(SoundStreamHeadTag {
            playback_sound_rate: 3,
            playback_sound_type: SND_STEREO,
            stream_sound_compression: SoundCompression::Mp3,
            stream_sound_rate: 3,
            stream_sound_type: SND_STEREO,
            stream_sound_sample_count: 1152,
            latency_seek: 5,
        }),
        Tag::SoundStreamBlock(SoundStreamBlockTag {
            sound_data: vec![0xFF, 0xFB, 0x90, 0x00, 0x11, 0x22],
        }),
        Tag::VideoFrame(VideoFrameTag {
            stream_id: 1,
            frame_num: 0,
            video_data: vec![0xDE, 0xAD, 0xBE, 0xEF, 0x42],
        }),
        Tag::Unknown(UnknownTag {
            code: 83,
            data: vec![9, 8, 7, 6],
        }),
        Tag::End,
    ]
}

fn collect_tags(data: Vec<u8>) -> (Header, Vec<Tag>) {
    let mut file = SwfFile::from_bytes(data).expect("parse file");
    let tags: Vec<Tag> = file
        .tags()
        .map(|r| r.expect("tag ok"))
        .collect();
    (file.header, tags)
}

#[test]
fn bit_reader_unsigned_sequence() {
    // data = 0010 1000 1100 0001
    let mut src: &[u8] = &[0x28, 0xC1];
    let mut bits = BitReader::new(&mut src);
    assert_eq!(0, bits.read_ub(1).unwrap());
    assert_eq!(1, bits.read_ub(2).unwrap());
    assert_eq!(2, bits.read_ub(3).unwrap());
    assert_eq!(3, bits.read_ub(4).unwrap());
    assert_eq!(0, bits.read_ub(5).unwrap());
    assert_eq!(1, bits.read_ub(1).unwrap());
    let err = bits.read_ub(1).unwrap_err();
    assert_eq!(err.kind(), SwfErrorKind::Io);
}

#[test]
fn bit_reader_signed_values() {
    // data = 00 01 10 11
    let mut src: &[u8] = &[0x1B];
    let mut bits = BitReader::new(&mut src);
    assert!(matches!(
        bits.read_sb(0),
        Err(SwfError::InvalidSignedWidth(0))
    ));
    assert!(matches!(
        bits.read_sb(1),
        Err(SwfError::InvalidSignedWidth(1))
    ));
    assert_eq!(0, bits.read_sb(2).unwrap());
    assert_eq!(1, bits.read_sb(2).unwrap());
    assert_eq!(-2, bits.read_sb(2).unwrap());
    assert_eq!(-1, bits.read_sb(2).unwrap());
    assert_eq!(bits.read_sb(2).unwrap_err().kind(), SwfErrorKind::Io);
}

#[test]
fn bit_writer_unsigned_sequence() {
    let mut out = Vec::new();
    let mut bits = BitWriter::new(&mut out);
    bits.write_ub(1, 0).unwrap();
    bits.write_ub(2, 1).unwrap();
    bits.write_ub(3, 2).unwrap();
    bits.write_ub(4, 3).unwrap();
    bits.write_ub(5, 0).unwrap();
    bits.write_ub(1, 1).unwrap();
    bits.flush().unwrap();
    drop(bits);
    assert_eq!(out, vec![0x28, 0xC1]);
}

#[test]
fn bit_writer_signed_sequence() {
    let mut out = Vec::new();
    let mut bits = BitWriter::new(&mut out);
    bits.write_sb(2, 0).unwrap();
    bits.write_sb(2, 1).unwrap();
    bits.write_sb(2, -2).unwrap();
    bits.write_sb(2, -1).unwrap();
    bits.flush().unwrap();
    drop(bits);
    assert_eq!(out, vec![0x1B]);
}

#[test]
fn bit_writer_pads_with_zero_bits() {
    let mut out = Vec::new();
    let mut bits = BitWriter::new(&mut out);
    bits.write_ub(7, 1).unwrap();
    bits.flush().unwrap();
    // idempotent
    bits.flush().unwrap();
    drop(bits);
    assert_eq!(out, vec![0x02]);
}

#[test]
fn bit_writer_rejects_oversized_values() {
    let mut out = Vec::new();
    let mut bits = BitWriter::new(&mut out);
    let err = bits.write_ub(3, 8).unwrap_err();
    assert_eq!(err.kind(), SwfErrorKind::Format);
    assert!(matches!(
        bits.write_sb(3, 4),
        Err(SwfError::ValueOverflow { width: 3, value: 4 })
    ));
    assert!(matches!(
        bits.write_sb(3, -5),
        Err(SwfError::ValueOverflow { width: 3, value: -5 })
    ));
}

#[test]
fn required_bits_matches_reference_values() {
    assert_eq!(2, required_bits(&[1]));
    assert_eq!(2, required_bits(&[0]));
    assert_eq!(3, required_bits(&[2]));
    assert_eq!(2, required_bits(&[-1]));
    assert_eq!(2, required_bits(&[-2]));
    assert_eq!(3, required_bits(&[-3]));
    assert_eq!(3, required_bits(&[0, 1, 2, 3, -1, -2]));
    assert_eq!(3, required_bits(&[0, 1, 2, 3, -1, -2, -3, -4]));
    assert_eq!(4, required_bits(&[0, 1, 2, 3, 4, -1, -2, -3, -4, -5]));
}

#[test]
fn rect_roundtrips() {
    let rect = Rect {
        x_min: 0,
        x_max: 11000,
        y_min: -7,
        y_max: 8000,
    };
    let mut out = Vec::new();
    rect.write_to(&mut out).unwrap();
    // 5-bit preamble + 4 * 15-bit fields = 65 bits
    assert_eq!(out.len(), 9);
    let mut src = out.as_slice();
    assert_eq!(rect, Rect::read_from(&mut src).unwrap());
}

#[test]
fn matrix_roundtrips() {
    let identity = Matrix::default();
    let mut out = Vec::new();
    identity.write_to(&mut out).unwrap();
    // two absent pairs and a zero-width translate fit in a single byte
    assert_eq!(out.len(), 1);
    let mut src = out.as_slice();
    assert_eq!(identity, Matrix::read_from(&mut src).unwrap());

    let full = Matrix {
        scale: Some((65536, -32768)),
        rotate: Some((1024, -1024)),
        translate: (3000, -1),
    };
    let mut out = Vec::new();
    full.write_to(&mut out).unwrap();
    let mut src = out.as_slice();
    assert_eq!(full, Matrix::read_from(&mut src).unwrap());
}

#[test]
fn color_transform_roundtrips() {
    let cases = [
        ColorTransform {
            mult_term: Some([256, 128, -256]),
            add_term: Some([10, -20, 30]),
        },
        ColorTransform {
            mult_term: Some([100, 100, 100]),
            add_term: None,
        },
        ColorTransform {
            mult_term: None,
            add_term: None,
        },
    ];
    for case in cases {
        let mut out = Vec::new();
        case.write_to(&mut out).unwrap();
        let mut src = out.as_slice();
        assert_eq!(case, ColorTransform::read_from(&mut src).unwrap());
    }
    // no terms: two flags plus a zero 4-bit width, one padded byte
    let empty = ColorTransform::default();
    let mut out = Vec::new();
    empty.write_to(&mut out).unwrap();
    assert_eq!(out, vec![0x00]);

    let alpha = ColorTransformWithAlpha {
        mult_term: Some([256, 256, 256, 128]),
        add_term: Some([0, 0, 0, -64]),
    };
    let mut out = Vec::new();
    alpha.write_to(&mut out).unwrap();
    let mut src = out.as_slice();
    assert_eq!(alpha, ColorTransformWithAlpha::read_from(&mut src).unwrap());
}

#[test]
fn string_drops_interior_nul() {
    assert_eq!(SwfString::new("ab\0cd").value, "ab");
}

#[test]
fn fixed_point_and_color_records_roundtrip() {
    let rate = Fixed8::from_f32(12.5);
    assert_eq!(rate.to_f32(), 12.5);
    let mut out = Vec::new();
    rate.write_to(&mut out).unwrap();
    assert_eq!(out.len(), 2);
    let mut src = out.as_slice();
    assert_eq!(rate, Fixed8::read_from(&mut src).unwrap());

    let scale = Fixed32::from_f64(-1.5);
    assert_eq!(scale.to_f64(), -1.5);
    let mut out = Vec::new();
    scale.write_to(&mut out).unwrap();
    assert_eq!(out.len(), 4);
    let mut src = out.as_slice();
    assert_eq!(scale, Fixed32::read_from(&mut src).unwrap());

    let color = RgbaColor {
        r: 1,
        g: 2,
        b: 3,
        a: 4,
    };
    let mut out = Vec::new();
    color.write_to(&mut out).unwrap();
    assert_eq!(out, vec![1, 2, 3, 4]);
    let mut src = out.as_slice();
    assert_eq!(color, RgbaColor::read_from(&mut src).unwrap());
}

#[test]
fn tag_uses_short_form_up_to_62_bytes() {
    let tag = Tag::Unknown(UnknownTag {
        code: 77,
        data: vec![0xAB; 62],
    });
    let mut out = Vec::new();
    tag.write_to(&mut out).unwrap();
    assert_eq!(out.len(), 2 + 62);
    let word = u16::from_le_bytes([out[0], out[1]]);
    assert_eq!(word >> 6, 77);
    assert_eq!(word & 0x3F, 62);
    let mut src = out.as_slice();
    assert_eq!(tag, Tag::read_from(&mut src).unwrap());
}

#[test]
fn tag_uses_extended_form_from_63_bytes() {
    let tag = Tag::Unknown(UnknownTag {
        code: 77,
        data: vec![0xCD; 63],
    });
    let mut out = Vec::new();
    tag.write_to(&mut out).unwrap();
    assert_eq!(out.len(), 2 + 4 + 63);
    let word = u16::from_le_bytes([out[0], out[1]]);
    assert_eq!(word >> 6, 77);
    assert_eq!(word & 0x3F, 63);
    let extended = u32::from_le_bytes([out[2], out[3], out[4], out[5]]);
    assert_eq!(extended, 63);
    let mut src = out.as_slice();
    assert_eq!(tag, Tag::read_from(&mut src).unwrap());
}

#[test]
fn end_tag_is_two_zero_bytes() {
    let mut out = Vec::new();
    Tag::End.write_to(&mut out).unwrap();
    assert_eq!(out, vec![0, 0]);
}

#[test]
fn uncompressed_file_roundtrips_bit_for_bit() {
    let header = sample_header(Signature::Uncompressed, 7);
    let tags = sample_tags();
    let encoded = writer::encode_file(&header, &tags).unwrap();

    let (parsed_header, parsed_tags) = collect_tags(encoded.clone());
    assert_eq!(parsed_header.file.signature, Signature::Uncompressed);
    assert_eq!(parsed_header.file.version, 7);
    assert_eq!(parsed_header.file.file_length as usize, encoded.len());
    assert_eq!(parsed_header.frame, header.frame);
    assert_eq!(parsed_tags, tags);

    let reencoded = writer::encode_file(&parsed_header, &parsed_tags).unwrap();
    assert_eq!(reencoded, encoded, "encode(decode(encode(x))) != encode(x)");
}

#[test]
fn compressed_file_roundtrips() {
    let header = sample_header(Signature::Compressed, 7);
    let tags = sample_tags();
    let encoded = writer::encode_file(&header, &tags).unwrap();
    assert_eq!(&encoded[..3], &b"CWS"[..]);

    let (parsed_header, parsed_tags) = collect_tags(encoded.clone());
    assert_eq!(parsed_header.file.signature, Signature::Compressed);
    assert_eq!(parsed_tags, tags);
    // declared length counts the uncompressed body
    let plain = writer::encode_file(&sample_header(Signature::Uncompressed, 7), &tags).unwrap();
    assert_eq!(parsed_header.file.file_length as usize, plain.len());

    let reencoded = writer::encode_file(&parsed_header, &parsed_tags).unwrap();
    assert_eq!(reencoded, encoded, "encode(decode(encode(x))) != encode(x)");
}

#[test]
fn compressed_write_requires_version_6() {
    let header = sample_header(Signature::Compressed, 5);
    let err = writer::encode_file(&header, &sample_tags()).unwrap_err();
    assert!(matches!(err, SwfError::CompressionUnsupported(5)));
    assert_eq!(err.kind(), SwfErrorKind::Format);
}

#[test]
fn compressed_read_requires_version_6() {
    let mut encoded =
        writer::encode_file(&sample_header(Signature::Compressed, 7), &sample_tags()).unwrap();
    encoded[3] = 5;
    let err = SwfFile::from_bytes(encoded).unwrap_err();
    assert!(matches!(err, SwfError::CompressionUnsupported(5)));
}

#[test]
fn invalid_signature_is_rejected() {
    let mut encoded =
        writer::encode_file(&sample_header(Signature::Uncompressed, 7), &sample_tags()).unwrap();
    encoded[0] = b'X';
    let err = SwfFile::from_bytes(encoded).unwrap_err();
    assert!(matches!(err, SwfError::InvalidSignature(_)));
    assert_eq!(err.kind(), SwfErrorKind::Format);
}

#[test]
fn declared_length_is_informational_by_default() {
    let mut encoded =
        writer::encode_file(&sample_header(Signature::Uncompressed, 7), &sample_tags()).unwrap();
    // corrupt the declared length
    encoded[4..8].copy_from_slice(&12345u32.to_le_bytes());

    let (_, tags) = collect_tags(encoded.clone());
    assert_eq!(tags, sample_tags());

    let err = SwfFile::from_bytes_with(
        encoded,
        ParseOptions {
            validate_file_length: true,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SwfError::SizeMismatch {
            context: "declared file length",
            ..
        }
    ));
}

#[test]
fn stream_without_end_tag_is_corruption() {
    let tags = vec![
        Tag::SetBackgroundColor(SetBackgroundColorTag::default()),
        Tag::Unknown(UnknownTag {
            code: 83,
            data: vec![1, 2, 3],
        }),
    ];
    let encoded = writer::encode_file(&sample_header(Signature::Uncompressed, 7), &tags).unwrap();
    let mut file = SwfFile::from_bytes(encoded).unwrap();
    let results: Vec<_> = file.tags().collect();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap(), &tags[0]);
    assert_eq!(results[1].as_ref().unwrap(), &tags[1]);
    let err = results[2].as_ref().unwrap_err();
    assert!(matches!(*err, SwfError::UnterminatedTagStream));
    assert_eq!(err.kind(), SwfErrorKind::Format);
}

#[test]
fn truncated_payload_is_an_io_error() {
    let tags = vec![
        Tag::Unknown(UnknownTag {
            code: 100,
            data: vec![0x55; 200],
        }),
        Tag::End,
    ];
    let mut encoded =
        writer::encode_file(&sample_header(Signature::Uncompressed, 7), &tags).unwrap();
    encoded.truncate(encoded.len() - 50);
    let mut file = SwfFile::from_bytes(encoded).unwrap();
    let err = file.tags().next().unwrap().unwrap_err();
    assert_eq!(err.kind(), SwfErrorKind::Io);
}

#[test]
fn iteration_stops_cleanly_after_end_tag() {
    let tags = sample_tags();
    let encoded = writer::encode_file(&sample_header(Signature::Uncompressed, 7), &tags).unwrap();
    let mut file = SwfFile::from_bytes(encoded).unwrap();
    let mut iter = file.tags();
    let yielded: Vec<Tag> = iter.by_ref().map(|r| r.unwrap()).collect();
    assert_eq!(yielded.last(), Some(&Tag::End));
    assert!(iter.next().is_none());
}

#[test]
fn clip_event_flags_reject_reserved_bits() {
    let mut src: &[u8] = &[0x00, 0x00, 0x80, 0x00];
    let err = ClipEventFlags::read_from(&mut src).unwrap_err();
    assert!(matches!(err, SwfError::ReservedNotZero(_)));
    assert_eq!(err.kind(), SwfErrorKind::Format);

    let mut src: &[u8] = &[0x00, 0x00, 0x00, 0x01];
    assert!(matches!(
        ClipEventFlags::read_from(&mut src).unwrap_err(),
        SwfError::ReservedNotZero(_)
    ));

    let mut clean: &[u8] = &[0xFF, 0xFF, 0x07, 0x00];
    let flags = ClipEventFlags::read_from(&mut clean).unwrap();
    assert!(flags.key_up && flags.data && flags.construct && flags.drag_out);
}

#[test]
fn clip_actions_reject_reserved_word() {
    let mut src: &[u8] = &[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    assert!(matches!(
        ClipActions::read_from(&mut src).unwrap_err(),
        SwfError::ReservedNotZero(_)
    ));
}

#[test]
fn sound_stream_head_payload_sizes() {
    let mp3 = Tag::SoundStreamHead(SoundStreamHeadTag {
        playback_sound_rate: 3,
        playback_sound_type: SND_MONO,
        stream_sound_compression: SoundCompression::Mp3,
        stream_sound_rate: 3,
        stream_sound_type: SND_MONO,
        stream_sound_sample_count: 1152,
        latency_seek: -10,
    });
    let mut out = Vec::new();
    mp3.write_to(&mut out).unwrap();
    // 2 framing bytes + 4 body bytes + 2 latency bytes
    assert_eq!(out.len(), 8);
    let mut src = out.as_slice();
    assert_eq!(mp3, Tag::read_from(&mut src).unwrap());

    let adpcm = Tag::SoundStreamHead(SoundStreamHeadTag {
        playback_sound_rate: 2,
        playback_sound_type: SND_MONO,
        stream_sound_compression: SoundCompression::Adpcm,
        stream_sound_rate: 2,
        stream_sound_type: SND_MONO,
        stream_sound_sample_count: 500,
        latency_seek: 0,
    });
    let mut out = Vec::new();
    adpcm.write_to(&mut out).unwrap();
    assert_eq!(out.len(), 6);
    let mut src = out.as_slice();
    assert_eq!(adpcm, Tag::read_from(&mut src).unwrap());
}

#[test]
fn place_object2_minimal_flags_byte() {
    let tag = Tag::PlaceObject2(PlaceObject2Tag {
        depth: 9,
        move_character: true,
        ..Default::default()
    });
    let mut out = Vec::new();
    tag.write_to(&mut out).unwrap();
    // framing word, flags byte, depth word
    assert_eq!(out.len(), 5);
    assert_eq!(out[2], 0b0000_0001);
    let mut src = out.as_slice();
    assert_eq!(tag, Tag::read_from(&mut src).unwrap());
}
