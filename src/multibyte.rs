//! Multi-byte transforms layered on `encoding_rs`
//!
//! `encoding_rs` decodes UTF-16 but only encodes to UTF-8, so the encode
//! direction for UTF-16, UTF-16BE and UTF-16LE is done here, as is the
//! byte order mark handling of `UTF-16` decoding. Its EUC-JP encoder stops
//! at JIS X 0208; [`EucJpEncoder`] falls back to the JIS X 0212 rows the
//! decoder already reads.

use std::collections::HashMap;
use std::sync::OnceLock;

use encoding_rs::{EUC_JP, Encoder, EncoderResult, UTF_16BE, UTF_16LE};

use crate::TransformError;
use crate::transform::{
    LibraryDecoder, Transform, TransformStatus, utf8_prefix, utf8_tail_status,
};

const BOM: u16 = 0xFEFF;

/// Lead byte of a three-byte JIS X 0212 sequence in EUC-JP
const SS3: u8 = 0x8F;

/// UTF-8 to UTF-16 encoder
pub(crate) struct Utf16Encoder {
    charset: &'static str,
    big_endian: bool,
    bom_pending: bool,
    position: u64,
}

impl Utf16Encoder {
    /// `with_bom` writes a byte order mark before the first code unit.
    pub(crate) fn new(charset: &'static str, big_endian: bool, with_bom: bool) -> Self {
        Self {
            charset,
            big_endian,
            bom_pending: with_bom,
            position: 0,
        }
    }

    fn unit_bytes(&self, unit: u16) -> [u8; 2] {
        if self.big_endian {
            unit.to_be_bytes()
        } else {
            unit.to_le_bytes()
        }
    }
}

impl Transform for Utf16Encoder {
    fn charset(&self) -> &'static str {
        self.charset
    }

    fn transform(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        last: bool,
    ) -> (TransformStatus, usize, usize) {
        let mut written = 0;
        if self.bom_pending {
            if dst.len() < 2 {
                return (TransformStatus::OutputFull, 0, 0);
            }
            dst[..2].copy_from_slice(&self.unit_bytes(BOM));
            written = 2;
            self.bom_pending = false;
        }

        let (text, invalid) = utf8_prefix(src);
        let mut read = 0;
        let mut units = [0u16; 2];
        for ch in text.chars() {
            let encoded = ch.encode_utf16(&mut units);
            if written + encoded.len() * 2 > dst.len() {
                self.position += read as u64;
                return (TransformStatus::OutputFull, read, written);
            }
            for &unit in encoded.iter() {
                dst[written..written + 2].copy_from_slice(&self.unit_bytes(unit));
                written += 2;
            }
            read += ch.len_utf8();
        }
        self.position += read as u64;

        (utf8_tail_status(invalid, last, self.position), read, written)
    }
}

/// UTF-16 decoder that picks the byte order from a leading mark
///
/// `FF FE` selects little-endian and `FE FF` big-endian; either is
/// consumed. Anything else is decoded as big-endian from the first byte.
pub(crate) struct Utf16BomDecoder {
    charset: &'static str,
    inner: Option<LibraryDecoder>,
}

impl Utf16BomDecoder {
    pub(crate) fn new(charset: &'static str) -> Self {
        Self {
            charset,
            inner: None,
        }
    }
}

impl Transform for Utf16BomDecoder {
    fn charset(&self) -> &'static str {
        self.charset
    }

    fn transform(
        &mut self,
        src: &[u8],
        dst: &mut [u8],
        last: bool,
    ) -> (TransformStatus, usize, usize) {
        let mut skipped = 0;
        if self.inner.is_none() {
            if src.len() < 2 && !last {
                return (TransformStatus::InputEmpty, 0, 0);
            }
            let (encoding, mark) = match src {
                [0xFF, 0xFE, ..] => (UTF_16LE, 2),
                [0xFE, 0xFF, ..] => (UTF_16BE, 2),
                _ => (UTF_16BE, 0),
            };
            let decoder = LibraryDecoder::new(
                self.charset,
                encoding.new_decoder_without_bom_handling(),
            );
            self.inner = Some(decoder.starting_at(mark as u64));
            skipped = mark;
        }

        match self.inner.as_mut() {
            Some(inner) => {
                let (status, read, written) = inner.transform(&src[skipped..], dst, last);
                (status, read + skipped, written)
            }
            None => (TransformStatus::InputEmpty, skipped, 0),
        }
    }
}

/// UTF-8 to EUC-JP encoder covering JIS X 0208 and JIS X 0212
pub(crate) struct EucJpEncoder {
    charset: &'static str,
    encoder: Encoder,
    position: u64,
}

impl EucJpEncoder {
    pub(crate) fn new(charset: &'static str) -> Self {
        Self {
            charset,
            encoder: EUC_JP.new_encoder(),
            position: 0,
        }
    }
}

/// Row and cell bytes of `ch` in JIS X 0212, as EUC-JP writes them after `0x8F`.
fn jis0212(ch: char) -> Option<[u8; 2]> {
    static TABLE: OnceLock<HashMap<char, [u8; 2]>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            let mut table = HashMap::new();
            for row in 0xA1..=0xFE {
                for cell in 0xA1..=0xFE {
                    let sequence = [SS3, row, cell];
                    let Some(text) =
                        EUC_JP.decode_without_bom_handling_and_without_replacement(&sequence)
                    else {
                        continue;
                    };
                    let mut chars = text.chars();
                    if let (Some(ch), None) = (chars.next(), chars.next()) {
                        table.entry(ch).or_insert([row, cell]);
                    }
                }
            }
            table
        })
        .get(&ch)
        .copied()
}

impl Transform for EucJpEncoder {
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
        let flush = last && invalid.is_none();
        let mut read = 0;
        let mut written = 0;
        loop {
            let (result, r, w) = self.encoder.encode_from_utf8_without_replacement(
                &text[read..],
                &mut dst[written..],
                flush,
            );
            read += r;
            written += w;

            match result {
                EncoderResult::InputEmpty => {
                    self.position += read as u64;
                    return (utf8_tail_status(invalid, last, self.position), read, written);
                }
                EncoderResult::OutputFull => {
                    self.position += read as u64;
                    return (TransformStatus::OutputFull, read, written);
                }
                EncoderResult::Unmappable(ch) => match jis0212(ch) {
                    Some([row, cell]) if dst.len() - written >= 3 => {
                        dst[written..written + 3].copy_from_slice(&[SS3, row, cell]);
                        written += 3;
                    }
                    Some(_) => {
                        // Hand the character back; it is retried with a fresh buffer
                        read -= ch.len_utf8();
                        self.position += read as u64;
                        return (TransformStatus::OutputFull, read, written);
                    }
                    None => {
                        self.position += read as u64;
                        let error = TransformError::Unmappable {
                            charset: self.charset,
                            character: ch,
                        };
                        return (TransformStatus::Failed(error), read, written);
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_all(encoder: &mut Utf16Encoder, input: &str) -> Vec<u8> {
        let mut dst = [0u8; 128];
        let (status, read, written) = encoder.transform(input.as_bytes(), &mut dst, true);
        assert_eq!(status, TransformStatus::InputEmpty);
        assert_eq!(read, input.len());
        dst[..written].to_vec()
    }

    #[test]
    fn test_utf16_endianness() {
        let mut le = Utf16Encoder::new("UTF-16LE", false, false);
        assert_eq!(encode_all(&mut le, "Hi"), [0x48, 0x00, 0x69, 0x00]);

        let mut be = Utf16Encoder::new("UTF-16BE", true, false);
        assert_eq!(encode_all(&mut be, "Hi"), [0x00, 0x48, 0x00, 0x69]);
    }

    #[test]
    fn test_utf16_bom_written_once() {
        let mut encoder = Utf16Encoder::new("UTF-16", true, true);
        let mut dst = [0u8; 16];

        let (_, _, written) = encoder.transform(b"A", &mut dst, false);
        assert_eq!(&dst[..written], &[0xFE, 0xFF, 0x00, 0x41]);

        let (_, _, written) = encoder.transform(b"B", &mut dst, true);
        assert_eq!(&dst[..written], &[0x00, 0x42]);
    }

    #[test]
    fn test_utf16_surrogate_pair() {
        let mut encoder = Utf16Encoder::new("UTF-16LE", false, false);
        // U+1F30D as D83C DF0D
        assert_eq!(encode_all(&mut encoder, "🌍"), [0x3C, 0xD8, 0x0D, 0xDF]);
    }

    #[test]
    fn test_utf16_output_full_keeps_pairs_whole() {
        let mut encoder = Utf16Encoder::new("UTF-16BE", true, false);
        let mut dst = [0u8; 3];

        let (status, read, written) = encoder.transform("a🌍".as_bytes(), &mut dst, true);
        assert_eq!(status, TransformStatus::OutputFull);
        assert_eq!((read, written), (1, 2));
    }

    #[test]
    fn test_utf16_rejects_invalid_utf8() {
        let mut encoder = Utf16Encoder::new("UTF-16LE", false, false);
        let mut dst = [0u8; 16];

        let (status, read, written) = encoder.transform(b"a\xC0b", &mut dst, true);
        assert_eq!((read, written), (1, 2));
        assert_eq!(
            status,
            TransformStatus::Failed(TransformError::InvalidUtf8 { offset: 1 })
        );
    }

    fn decode_utf16(input: &[u8]) -> (TransformStatus, String) {
        let mut decoder = Utf16BomDecoder::new("UTF-16");
        let mut dst = [0u8; 64];
        let (status, read, written) = decoder.transform(input, &mut dst, true);
        assert_eq!(read, input.len());
        let text = String::from_utf8(dst[..written].to_vec()).unwrap();
        (status, text)
    }

    #[test]
    fn test_utf16_decode_byte_order_marks() {
        assert_eq!(decode_utf16(&[0xFE, 0xFF, 0x00, 0x41]).1, "A");
        assert_eq!(decode_utf16(&[0xFF, 0xFE, 0x41, 0x00]).1, "A");
        assert_eq!(decode_utf16(&[0x00, 0x41]).1, "A");
    }

    #[test]
    fn test_utf16_decode_ignores_utf8_bom() {
        let (status, text) = decode_utf16(&[0xEF, 0xBB, 0xBF, 0x41]);
        assert_eq!(status, TransformStatus::InputEmpty);
        assert_eq!(text, "\u{EFBB}\u{BF41}");
    }

    #[test]
    fn test_utf16_decode_mark_split_across_calls() {
        let mut decoder = Utf16BomDecoder::new("UTF-16");
        let mut dst = [0u8; 16];

        let (status, read, written) = decoder.transform(&[0xFF], &mut dst, false);
        assert_eq!(status, TransformStatus::InputEmpty);
        assert_eq!((read, written), (0, 0));

        let (status, read, written) = decoder.transform(&[0xFF, 0xFE, 0x42, 0x00], &mut dst, true);
        assert_eq!(status, TransformStatus::InputEmpty);
        assert_eq!(read, 4);
        assert_eq!(&dst[..written], b"B");
    }

    #[test]
    fn test_utf16_decode_offsets_count_the_mark() {
        // Lone low surrogate right after the mark
        let (status, _) = decode_utf16(&[0xFE, 0xFF, 0xDC, 0x00]);
        assert_eq!(
            status,
            TransformStatus::Failed(TransformError::Malformed {
                charset: "UTF-16",
                offset: 2,
                length: 2,
            })
        );
    }

    #[test]
    fn test_euc_jp_falls_back_to_jis_x_0212() {
        let mut encoder = EucJpEncoder::new("EUC-JP");
        let mut dst = [0u8; 16];

        // 你 is only in JIS X 0212, 好 is in JIS X 0208
        let (status, read, written) = encoder.transform("a你好".as_bytes(), &mut dst, true);
        assert_eq!(status, TransformStatus::InputEmpty);
        assert_eq!(read, "a你好".len());
        assert_eq!(&dst[..written], &[0x61, 0x8F, 0xB0, 0xDF, 0xB9, 0xA5]);
    }

    #[test]
    fn test_euc_jp_fallback_needs_three_bytes() {
        let mut encoder = EucJpEncoder::new("EUC-JP");
        let mut dst = [0u8; 3];

        let (status, read, written) = encoder.transform("a你".as_bytes(), &mut dst, true);
        assert_eq!(status, TransformStatus::OutputFull);
        assert_eq!((read, written), (1, 1));

        let (status, read, written) = encoder.transform("你".as_bytes(), &mut dst, true);
        assert_eq!(status, TransformStatus::InputEmpty);
        assert_eq!(read, 3);
        assert_eq!(&dst[..written], &[0x8F, 0xB0, 0xDF]);
    }

    #[test]
    fn test_euc_jp_unmappable_outside_both_sets() {
        let mut encoder = EucJpEncoder::new("EUC-JP");
        let mut dst = [0u8; 16];

        let (status, _, written) = encoder.transform("a🌍".as_bytes(), &mut dst, true);
        assert_eq!(&dst[..written], b"a");
        assert_eq!(
            status,
            TransformStatus::Failed(TransformError::Unmappable {
                charset: "EUC-JP",
                character: '🌍',
            })
        );
    }
}
