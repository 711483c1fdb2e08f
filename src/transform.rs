//! Streaming transforms between a charset and UTF-8
//!
//! A [`Transform`] converts one direction of one charset: a decoder turns
//! charset bytes into UTF-8, an encoder turns UTF-8 into charset bytes.
//! Transforms keep only the carry-over state of a split multi-byte
//! sequence, so a fresh one is created for every conversion.

use std::str::Utf8Error;

use encoding_rs::{Decoder, DecoderResult, Encoder, EncoderResult};

use crate::TransformError;

/// Outcome of a single [`Transform::transform`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformStatus {
    /// Input consumed as far as possible. Unread input is an incomplete
    /// sequence that needs more bytes. With `last` set, the transform is done.
    InputEmpty,
    /// Output buffer full; call again with the unread input.
    OutputFull,
    /// Conversion failed. Output written before the failure is valid.
    Failed(TransformError),
}

/// One direction of a charset codec
pub trait Transform: Send {
    /// Name of the charset this transform is bound to
    fn charset(&self) -> &'static str;

    /// Converts bytes from `src` into `dst`.
    ///
    /// Returns the status plus the number of bytes read from `src` and
    /// written to `dst`. `last` signals the end of the stream: the
    /// transform must then consume everything, flush any pending state and
    /// report an incomplete trailing sequence as a failure.
    fn transform(&mut self, src: &[u8], dst: &mut [u8], last: bool)
    -> (TransformStatus, usize, usize);
}

/// Decoder backed by an `encoding_rs` codec
pub(crate) struct LibraryDecoder {
    charset: &'static str,
    decoder: Decoder,
    position: u64,
}

impl LibraryDecoder {
    pub(crate) fn new(charset: &'static str, decoder: Decoder) -> Self {
        Self {
            charset,
            decoder,
            position: 0,
        }
    }

    /// Offsets in errors count from `position` instead of zero.
    pub(crate) fn starting_at(mut self, position: u64) -> Self {
        self.position = position;
        self
    }
}

impl Transform for LibraryDecoder {
    fn charset(&self) -> &'static str {
        self.charset
    }

    fn transform(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        last: bool,
    ) -> (TransformStatus, usize, usize) {
        let (result, read, written) = self
            .decoder
            .decode_to_utf8_without_replacement(src, dst, last);
        self.position += read as u64;

        let status = match result {
            DecoderResult::InputEmpty => TransformStatus::InputEmpty,
            DecoderResult::OutputFull => TransformStatus::OutputFull,
            DecoderResult::Malformed(length, consumed_after) => {
                // The malformed sequence ends `consumed_after` bytes before `read`
                let end = self.position.saturating_sub(u64::from(consumed_after));
                TransformStatus::Failed(TransformError::Malformed {
                    charset: self.charset,
                    offset: end.saturating_sub(u64::from(length)),
                    length: usize::from(length),
                })
            }
        };
        (status, read, written)
    }
}

/// Encoder backed by an `encoding_rs` codec
pub(crate) struct LibraryEncoder {
    charset: &'static str,
    encoder: Encoder,
    position: u64,
}

impl LibraryEncoder {
    pub(crate) fn new(charset: &'static str, encoder: Encoder) -> Self {
        Self {
            charset,
            encoder,
            position: 0,
        }
    }
}

impl Transform for LibraryEncoder {
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
        let (result, read, written) =
            self.encoder
                .encode_from_utf8_without_replacement(text, dst, last && invalid.is_none());
        self.position += read as u64;

        let status = match result {
            EncoderResult::OutputFull => TransformStatus::OutputFull,
            EncoderResult::Unmappable(character) => {
                TransformStatus::Failed(TransformError::Unmappable {
                    charset: self.charset,
                    character,
                })
            }
            EncoderResult::InputEmpty => utf8_tail_status(invalid, last, self.position),
        };
        (status, read, written)
    }
}

/// Splits off the longest valid UTF-8 prefix of `src`.
pub(crate) fn utf8_prefix(src: &[u8]) -> (&str, Option<Utf8Error>) {
    match std::str::from_utf8(src) {
        Ok(text) => (text, None),
        Err(err) => {
            let valid = &src[..err.valid_up_to()];
            (std::str::from_utf8(valid).unwrap_or_default(), Some(err))
        }
    }
}

/// Status after the valid prefix returned by [`utf8_prefix`] is fully consumed.
///
/// A sequence cut off by the end of the buffer waits for more input unless
/// the stream has ended.
pub(crate) fn utf8_tail_status(
    invalid: Option<Utf8Error>,
    last: bool,
    position: u64,
) -> TransformStatus {
    match invalid {
        None => TransformStatus::InputEmpty,
        Some(err) if err.error_len().is_none() && !last => TransformStatus::InputEmpty,
        Some(_) => TransformStatus::Failed(TransformError::InvalidUtf8 { offset: position }),
    }
}
