//! Decode, encode and convert entry points
//!
//! Three shapes of the same three operations:
//!
//! - codec level: [`decode`], [`encode`], [`convert`] take resolved
//!   [`Codec`]s and stream from a reader into a writer;
//! - name level: [`decode_with`], [`encode_with`], [`convert_with`] resolve
//!   charset names through a [`CharsetRegistry`] first;
//! - in memory: [`decode_to_string`], [`encode_string`], [`convert_to`]
//!   work on byte slices and strings, without staging.
//!
//! Name resolution happens before the source is touched, so an unknown
//! charset never consumes input.

use std::io::{Read, Write};

use tracing::debug;

use crate::codec::{Codec, resolve_codec};
use crate::pipeline::{TransformReader, apply_transform, relay};
use crate::{CharsetRegistry, Result, TransformError};

/// Decodes `src` from `codec` into UTF-8 written to `dst`.
///
/// Returns the number of bytes written to `dst`.
pub fn decode<R, W>(src: R, dst: &mut W, codec: &Codec, use_staging: bool) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    debug!(charset = codec.name(), staging = use_staging, "decode");
    apply_transform(src, codec.decoder(), dst, use_staging)
}

/// Encodes UTF-8 from `src` into `codec`, written to `dst`.
///
/// Returns the number of bytes written to `dst`.
pub fn encode<R, W>(src: R, dst: &mut W, codec: &Codec, use_staging: bool) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    debug!(charset = codec.name(), staging = use_staging, "encode");
    apply_transform(src, codec.encoder(), dst, use_staging)
}

/// Converts `src` from `src_codec` to `dst_codec`, written to `dst`.
///
/// Equal codecs copy the bytes through untouched. When either side is
/// UTF-8 a single encode or decode stage runs; otherwise the bytes are
/// decoded to UTF-8 and encoded again in one streaming pass.
pub fn convert<R, W>(
    src: R,
    src_codec: &Codec,
    dst: &mut W,
    dst_codec: &Codec,
    use_staging: bool,
) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    if src_codec == dst_codec {
        debug!(charset = src_codec.name(), "same charset, copying raw bytes");
        return relay(src, dst, use_staging);
    }
    if src_codec.is_canonical() {
        return encode(src, dst, dst_codec, use_staging);
    }
    if dst_codec.is_canonical() {
        return decode(src, dst, src_codec, use_staging);
    }

    debug!(
        from = src_codec.name(),
        to = dst_codec.name(),
        staging = use_staging,
        "convert"
    );
    let decoded = TransformReader::new(src, src_codec.decoder());
    let encoded = TransformReader::new(decoded, dst_codec.encoder());
    relay(encoded, dst, use_staging)
}

/// Decodes `src` from the charset named `charset` into UTF-8.
pub fn decode_with<R, W>(
    registry: &CharsetRegistry,
    src: R,
    dst: &mut W,
    charset: impl AsRef<str>,
    use_staging: bool,
) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    let codec = resolve_codec(registry, charset.as_ref())?;
    decode(src, dst, &codec, use_staging)
}

/// Encodes UTF-8 from `src` into the charset named `charset`.
pub fn encode_with<R, W>(
    registry: &CharsetRegistry,
    src: R,
    dst: &mut W,
    charset: impl AsRef<str>,
    use_staging: bool,
) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    let codec = resolve_codec(registry, charset.as_ref())?;
    encode(src, dst, &codec, use_staging)
}

/// Converts `src` between two charsets given by name or alias.
///
/// Names that are equal ignoring ASCII case copy the bytes through without
/// being resolved at all. Otherwise both names are resolved before `src`
/// is read.
pub fn convert_with<R, W>(
    registry: &CharsetRegistry,
    src: R,
    src_charset: impl AsRef<str>,
    dst: &mut W,
    dst_charset: impl AsRef<str>,
    use_staging: bool,
) -> Result<u64>
where
    R: Read,
    W: Write + ?Sized,
{
    let (from, to) = (src_charset.as_ref(), dst_charset.as_ref());
    if from.eq_ignore_ascii_case(to) {
        debug!(charset = from, "same charset name, copying raw bytes");
        return relay(src, dst, use_staging);
    }

    let src_codec = resolve_codec(registry, from)?;
    let dst_codec = resolve_codec(registry, to)?;
    convert(src, &src_codec, dst, &dst_codec, use_staging)
}

/// Decodes `data` from `charset` into a `String`.
pub fn decode_to_string(
    registry: &CharsetRegistry,
    data: &[u8],
    charset: impl AsRef<str>,
) -> Result<String> {
    let mut out = Vec::with_capacity(data.len());
    decode_with(registry, data, &mut out, charset, false)?;
    String::from_utf8(out).map_err(|err| {
        TransformError::InvalidUtf8 {
            offset: err.utf8_error().valid_up_to() as u64,
        }
        .into()
    })
}

/// Encodes `text` into `charset`.
pub fn encode_string(
    registry: &CharsetRegistry,
    text: &str,
    charset: impl AsRef<str>,
) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    encode_with(registry, text.as_bytes(), &mut out, charset, false)?;
    Ok(out)
}

/// Converts `data` from `src_charset` to `dst_charset`.
pub fn convert_to(
    registry: &CharsetRegistry,
    data: &[u8],
    src_charset: impl AsRef<str>,
    dst_charset: impl AsRef<str>,
) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len());
    convert_with(registry, data, src_charset, &mut out, dst_charset, false)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io;

    use proptest::prelude::*;

    use super::*;
    use crate::{Charset, Error};

    const TEXT: &str = "abcde12345|你好，世界！";

    const TEXT_UTF8: &[u8] = &[
        97, 98, 99, 100, 101, 49, 50, 51, 52, 53, 124, 228, 189, 160, 229, 165, 189, 239, 188,
        140, 228, 184, 150, 231, 149, 140, 239, 188, 129,
    ];
    const TEXT_GBK: &[u8] = &[
        97, 98, 99, 100, 101, 49, 50, 51, 52, 53, 124, 196, 227, 186, 195, 163, 172, 202, 192,
        189, 231, 163, 161,
    ];
    const TEXT_BIG5: &[u8] = &[
        97, 98, 99, 100, 101, 49, 50, 51, 52, 53, 124, 167, 65, 166, 110, 161, 65, 165, 64, 172,
        201, 161, 73,
    ];
    const TEXT_EUC_JP: &[u8] = &[
        97, 98, 99, 100, 101, 49, 50, 51, 52, 53, 124, 143, 176, 223, 185, 165, 161, 164, 192,
        164, 179, 166, 161, 170,
    ];

    /// Source that must never be read
    struct Untouched;

    impl Read for Untouched {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            panic!("source read before charsets were resolved");
        }
    }

    #[test]
    fn test_encode_gbk() {
        let registry = CharsetRegistry::new();
        assert_eq!(encode_string(&registry, TEXT, "GBK").unwrap(), TEXT_GBK);
        assert_eq!(encode_string(&registry, TEXT, Charset::GB18030).unwrap(), TEXT_GBK);
    }

    #[test]
    fn test_decode_gbk() {
        let registry = CharsetRegistry::new();
        assert_eq!(decode_to_string(&registry, TEXT_GBK, "gbk").unwrap(), TEXT);
    }

    #[test]
    fn test_encode_utf8() {
        let registry = CharsetRegistry::new();
        assert_eq!(encode_string(&registry, TEXT, Charset::UTF_8).unwrap(), TEXT_UTF8);
    }

    #[test]
    fn test_decode_euc_jp() {
        let registry = CharsetRegistry::new();
        assert_eq!(decode_to_string(&registry, TEXT_EUC_JP, "EUC-JP").unwrap(), TEXT);
    }

    #[test]
    fn test_encode_euc_jp() {
        let registry = CharsetRegistry::new();
        // 你 is only in JIS X 0212
        assert_eq!(encode_string(&registry, TEXT, "EUC-JP").unwrap(), TEXT_EUC_JP);
        assert_eq!(encode_string(&registry, TEXT, Charset::EUC_JP).unwrap(), TEXT_EUC_JP);
    }

    #[test]
    fn test_transit_matches_direct_conversion() {
        let registry = CharsetRegistry::new();
        let via_gb18030 = convert_to(&registry, TEXT_GBK, "GB18030", "EUC-JP").unwrap();
        let via_utf8 = convert_to(&registry, TEXT_UTF8, "UTF-8", "EUC-JP").unwrap();
        assert_eq!(via_gb18030, TEXT_EUC_JP);
        assert_eq!(via_utf8, TEXT_EUC_JP);

        assert_eq!(convert_to(&registry, TEXT_EUC_JP, "EUC-JP", "Big5").unwrap(), TEXT_BIG5);
        assert_eq!(convert_to(&registry, TEXT_GBK, "GB18030", "Big5").unwrap(), TEXT_BIG5);
    }

    #[test]
    fn test_wrong_source_charset_fails_to_encode() {
        let registry = CharsetRegistry::new();
        let err = convert_to(&registry, TEXT_GBK, "windows-1258", "EUC-JP").unwrap_err();
        assert!(err.is_transform(), "{err}");
    }

    #[test]
    fn test_ebcdic_and_dos_code_pages() {
        let registry = CharsetRegistry::new();
        assert_eq!(encode_string(&registry, "HELLO", "IBM037").unwrap(), [0xC8, 0xC5, 0xD3, 0xD3, 0xD6]);
        assert_eq!(decode_to_string(&registry, &[0xC8, 0xC5, 0xD3, 0xD3, 0xD6], "cp037").unwrap(), "HELLO");

        // EBCDIC to DOS without passing through the caller
        let dos = convert_to(&registry, &[0xC1, 0x40, 0x4A], "IBM037", "IBM437").unwrap();
        assert_eq!(dos, [0x41, 0x20, 0x9B]);

        assert_eq!(encode_string(&registry, "€", "IBM01140").unwrap(), [0x9F]);
        assert!(encode_string(&registry, "€", "IBM037").unwrap_err().is_transform());
        assert_eq!(decode_to_string(&registry, &[0xD0, 0xFD], "ISO-8859-9").unwrap(), "Ğı");
    }

    #[test]
    fn test_same_charset_copies_raw_bytes() {
        let registry = CharsetRegistry::new();
        let garbage = b"\xFF\xFE\x80 not gbk at all \xFF";
        assert_eq!(convert_to(&registry, garbage, "GBK", "gbk").unwrap(), garbage);
        assert_eq!(convert_to(&registry, garbage, "no-such", "NO-SUCH").unwrap(), garbage);

        let gbk = resolve_codec(&registry, "GBK").unwrap();
        let cp936 = resolve_codec(&registry, "CP936").unwrap();
        let mut out = Vec::new();
        convert(&garbage[..], &gbk, &mut out, &cp936, false).unwrap();
        assert_eq!(out, garbage);
    }

    #[test]
    fn test_unknown_charset_rejected_before_reading() {
        let registry = CharsetRegistry::new();
        let mut sink = Vec::new();
        for name in ["GB2312", "HZ-GB-2312", "foo", "ANSI"] {
            let err = convert_with(&registry, Untouched, name, &mut sink, "UTF-8", true).unwrap_err();
            assert!(err.is_unknown_charset(), "{name}: {err}");

            let err = convert_with(&registry, Untouched, "UTF-8", &mut sink, name, false).unwrap_err();
            assert_eq!(err.to_string(), format!("unknown charset: {name}"));

            assert!(decode_with(&registry, Untouched, &mut sink, name, false).is_err());
            assert!(encode_with(&registry, Untouched, &mut sink, name, false).is_err());
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_staging_controls_partial_output() {
        let registry = CharsetRegistry::new();

        let mut sink = Vec::new();
        let err = encode_with(&registry, TEXT.as_bytes(), &mut sink, "windows-1252", false)
            .unwrap_err();
        assert!(err.is_transform());
        assert_eq!(sink, b"abcde12345|");

        let mut sink = Vec::new();
        let err = encode_with(&registry, TEXT.as_bytes(), &mut sink, "windows-1252", true)
            .unwrap_err();
        assert!(err.is_transform());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_staged_conversion_success() {
        let registry = CharsetRegistry::new();
        let mut sink = Vec::new();
        let written = convert_with(&registry, TEXT_GBK, "GB18030", &mut sink, "Big5", true).unwrap();
        assert_eq!(written, TEXT_BIG5.len() as u64);
        assert_eq!(sink, TEXT_BIG5);
    }

    #[test]
    fn test_malformed_input_reports_offset() {
        let registry = CharsetRegistry::new();
        let mut data = TEXT_GBK.to_vec();
        data.push(0xFF);
        match decode_to_string(&registry, &data, "GBK") {
            Err(Error::Transform(TransformError::Malformed { charset, offset, .. })) => {
                assert_eq!(charset, "GBK");
                assert_eq!(offset, TEXT_GBK.len() as u64);
            }
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let registry = CharsetRegistry::new();
        assert!(encode_string(&registry, "", "EUC-JP").unwrap().is_empty());
        assert_eq!(decode_to_string(&registry, b"", "Big5").unwrap(), "");
        assert!(convert_to(&registry, b"", "GBK", "Shift_JIS").unwrap().is_empty());
    }

    #[test]
    fn test_aliases() {
        let mut registry = CharsetRegistry::new();
        registry.add_alias(Charset::GBK, "chinese");
        assert_eq!(encode_string(&registry, "你好", "Chinese").unwrap(), [0xC4, 0xE3, 0xBA, 0xC3]);

        registry.remove_alias("chinese");
        assert!(encode_string(&registry, "你好", "chinese").unwrap_err().is_unknown_charset());
    }

    #[test]
    fn test_latin1_and_ascii() {
        let registry = CharsetRegistry::new();
        assert_eq!(convert_to(&registry, b"caf\xE9", "latin1", "UTF-8").unwrap(), "café".as_bytes());
        assert!(encode_string(&registry, "café", "US-ASCII").unwrap_err().is_transform());
    }

    #[test]
    fn test_utf16_with_bom() {
        let registry = CharsetRegistry::new();
        let bytes = encode_string(&registry, "Hi", Charset::UTF_16).unwrap();
        assert_eq!(bytes, [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]);
        assert_eq!(decode_to_string(&registry, &bytes, "UTF-16").unwrap(), "Hi");

        // A little-endian mark switches byte order
        let le = [0xFF, 0xFE, 0x48, 0x00, 0x69, 0x00];
        assert_eq!(decode_to_string(&registry, &le, "UTF-16").unwrap(), "Hi");

        // A UTF-8 mark is not a UTF-16 mark
        let utf8_bom = [0xEF, 0xBB, 0xBF, 0x41];
        assert_eq!(decode_to_string(&registry, &utf8_bom, "UTF-16").unwrap(), "\u{EFBB}\u{BF41}");
    }

    #[test]
    fn test_codec_level_calls() {
        let sjis = Codec::from(encoding_rs::SHIFT_JIS);
        let mut out = Vec::new();
        encode("テスト".as_bytes(), &mut out, &sjis, false).unwrap();
        assert_eq!(out, [0x83, 0x65, 0x83, 0x58, 0x83, 0x67]);

        let mut text = Vec::new();
        decode(out.as_slice(), &mut text, &sjis, true).unwrap();
        assert_eq!(text, "テスト".as_bytes());
    }

    #[test]
    fn test_large_input_streams_across_buffers() {
        let registry = CharsetRegistry::new();
        let text = TEXT.repeat(2_000);
        let gbk = encode_string(&registry, &text, "GBK").unwrap();
        assert_eq!(gbk.len(), TEXT_GBK.len() * 2_000);

        let big5 = convert_to(&registry, &gbk, "GBK", "Big5").unwrap();
        assert_eq!(decode_to_string(&registry, &big5, "Big5").unwrap(), text);
    }

    proptest! {
        #[test]
        fn prop_utf16_roundtrip(text in any::<String>()) {
            let registry = CharsetRegistry::new();
            for charset in [Charset::UTF_16BE, Charset::UTF_16LE] {
                let bytes = encode_string(&registry, &text, &charset).unwrap();
                prop_assert_eq!(bytes.len() % 2, 0);
                prop_assert_eq!(decode_to_string(&registry, &bytes, &charset).unwrap(), text.as_str());
            }
        }

        #[test]
        fn prop_chinese_roundtrip(text in "[a-zA-Z0-9 \u{4e00}-\u{9fa5}]{0,64}") {
            let registry = CharsetRegistry::new();
            for charset in [Charset::GBK, Charset::GB18030] {
                let bytes = encode_string(&registry, &text, &charset).unwrap();
                prop_assert_eq!(decode_to_string(&registry, &bytes, &charset).unwrap(), text.as_str());
            }
        }

        #[test]
        fn prop_same_charset_is_identity(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let registry = CharsetRegistry::new();
            prop_assert_eq!(convert_to(&registry, &data, "EUC-JP", "euc-jp").unwrap(), data);
        }
    }
}
