//! Built-in single-byte charsets
//!
//! US-ASCII and ISO-8859-1 map byte `b` to code point `U+00bb` up to a
//! ceiling (0x7F or 0xFF). `encoding_rs` treats the `iso-8859-1` and
//! `us-ascii` labels as windows-1252, which disagrees with the IANA charsets
//! in 0x80..=0x9F, so these two are handled here instead.
//!
//! The EBCDIC and DOS code pages and ISO-8859-9 go through a [`CodePage`]
//! table with a reverse lookup built per encoder.

use std::collections::HashMap;

use crate::TransformError;
use crate::codepage::CodePage;
use crate::transform::{Transform, TransformStatus, utf8_prefix, utf8_tail_status};

/// Byte to code point decoder for charsets whose bytes equal their code points
pub(crate) struct SingleByteDecoder {
    charset: &'static str,
    ceiling: u8,
    position: u64,
}

impl SingleByteDecoder {
    pub(crate) fn new(charset: &'static str, ceiling: u8) -> Self {
        Self {
            charset,
            ceiling,
            position: 0,
        }
    }
}

impl Transform for SingleByteDecoder {
    fn charset(&self) -> &'static str {
        self.charset
    }

    fn transform(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        _last: bool,
    ) -> (TransformStatus, usize, usize) {
        let mut written = 0;
        for (read, &byte) in src.iter().enumerate() {
            if byte > self.ceiling {
                self.position += read as u64;
                let error = TransformError::Malformed {
                    charset: self.charset,
                    offset: self.position,
                    length: 1,
                };
                self.position += 1;
                return (TransformStatus::Failed(error), read + 1, written);
            }
            let ch = char::from(byte);
            if written + ch.len_utf8() > dst.len() {
                self.position += read as u64;
                return (TransformStatus::OutputFull, read, written);
            }
            written += ch.encode_utf8(&mut dst[written..]).len();
        }
        self.position += src.len() as u64;
        (TransformStatus::InputEmpty, src.len(), written)
    }
}

/// Code point to byte encoder, the inverse of [`SingleByteDecoder`]
pub(crate) struct SingleByteEncoder {
    charset: &'static str,
    ceiling: u8,
    position: u64,
}

impl SingleByteEncoder {
    pub(crate) fn new(charset: &'static str, ceiling: u8) -> Self {
        Self {
            charset,
            ceiling,
            position: 0,
        }
    }
}

impl Transform for SingleByteEncoder {
    fn charset(&self) -> &'static str {
        self.charset
    }

    fn transform(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        last: bool,
    ) -> (TransformStatus, usize, usize) {
        let (text, invalid) = utf8_prefix(src);
        let mut read = 0;
        let mut written = 0;
        for ch in text.chars() {
            let byte = match u8::try_from(ch) {
                Ok(byte) if byte <= self.ceiling => byte,
                _ => {
                    read += ch.len_utf8();
                    self.position += read as u64;
                    let error = TransformError::Unmappable {
                        charset: self.charset,
                        character: ch,
                    };
                    return (TransformStatus::Failed(error), read, written);
                }
            };
            if written == dst.len() {
                self.position += read as u64;
                return (TransformStatus::OutputFull, read, written);
            }
            dst[written] = byte;
            written += 1;
            read += ch.len_utf8();
        }
        self.position += read as u64;

        (utf8_tail_status(invalid, last, self.position), read, written)
    }
}

/// Table-driven decoder; every byte maps to a character
pub(crate) struct TableDecoder {
    charset: &'static str,
    page: &'static CodePage,
}

impl TableDecoder {
    pub(crate) fn new(charset: &'static str, page: &'static CodePage) -> Self {
        Self { charset, page }
    }
}

impl Transform for TableDecoder {
    fn charset(&self) -> &'static str {
        self.charset
    }

    fn transform(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        _last: bool,
    ) -> (TransformStatus, usize, usize) {
        let mut written = 0;
        for (read, &byte) in src.iter().enumerate() {
            let ch = self.page.char(byte);
            if written + ch.len_utf8() > dst.len() {
                return (TransformStatus::OutputFull, read, written);
            }
            written += ch.encode_utf8(&mut dst[written..]).len();
        }
        (TransformStatus::InputEmpty, src.len(), written)
    }
}

/// Table-driven encoder over the inverse of a [`CodePage`]
pub(crate) struct TableEncoder {
    charset: &'static str,
    reverse: HashMap<char, u8>,
    position: u64,
}

impl TableEncoder {
    pub(crate) fn new(charset: &'static str, page: &'static CodePage) -> Self {
        let mut reverse = HashMap::with_capacity(256);
        for (byte, &ch) in (0..=u8::MAX).zip(page.chars().iter()) {
            reverse.entry(ch).or_insert(byte);
        }
        Self {
            charset,
            reverse,
            position: 0,
        }
    }
}

impl Transform for TableEncoder {
    fn charset(&self) -> &'static str {
        self.charset
    }

    fn transform(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        last: bool,
    ) -> (TransformStatus, usize, usize) {
        let (text, invalid) = utf8_prefix(src);
        let mut read = 0;
        let mut written = 0;
        for ch in text.chars() {
            let Some(&byte) = self.reverse.get(&ch) else {
                read += ch.len_utf8();
                self.position += read as u64;
                let error = TransformError::Unmappable {
                    charset: self.charset,
                    character: ch,
                };
                return (TransformStatus::Failed(error), read, written);
            };
            if written == dst.len() {
                self.position += read as u64;
                return (TransformStatus::OutputFull, read, written);
            }
            dst[written] = byte;
            written += 1;
            read += ch.len_utf8();
        }
        self.position += read as u64;

        (utf8_tail_status(invalid, last, self.position), read, written)
    }
}
