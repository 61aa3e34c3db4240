//! Forward-only iteration over the tag stream.

use std::io::ErrorKind;

use log::trace;

use crate::swf::format::tags::{Tag, TagHeader};
use crate::swf::reader::Body;
use crate::swf::types::error::{Result, SwfError};
use crate::swf::utils;

/// Lazy iterator over the tags of one [`SwfFile`](crate::swf::reader::SwfFile)
/// session.
///
/// Yields every tag including the final [`Tag::End`], then stops. Running out
/// of header bytes right after an End tag is the clean termination of the
/// stream; running out of header bytes anywhere else yields
/// [`SwfError::UnterminatedTagStream`], and a payload cut short yields the
/// I/O kind. The iterator is fused: after the end or an error it keeps
/// returning `None`.
pub struct TagIterator<'a> {
    body: &'a mut Body,
    seen_end: bool,
    finished: bool,
}

impl<'a> TagIterator<'a> {
    pub(crate) fn new(body: &'a mut Body) -> Self {
        Self {
            body,
            seen_end: false,
            finished: false,
        }
    }

    fn read_tag(&mut self) -> Option<Result<Tag>> {
        let header = match TagHeader::read_from(&mut *self.body) {
            Ok(header) => header,
            Err(SwfError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => {
                return if self.seen_end {
                    None
                } else {
                    Some(Err(SwfError::UnterminatedTagStream))
                };
            }
            Err(e) => return Some(Err(e)),
        };
        let payload = match utils::read_bytes(&mut *self.body, header.length as usize) {
            Ok(payload) => payload,
            Err(e) => return Some(Err(e)),
        };
        Some(Tag::decode(header, &payload))
    }
}

impl Iterator for TagIterator<'_> {
    type Item = Result<Tag>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_tag() {
            None => {
                self.finished = true;
                None
            }
            Some(Ok(tag)) => {
                trace!("Tag: code={}", tag.code());
                self.seen_end = matches!(tag, Tag::End);
                Some(Ok(tag))
            }
            Some(Err(e)) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
