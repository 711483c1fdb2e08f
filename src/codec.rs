//! Codecs and charset-name resolution
//!
//! [`resolve_codec`] turns a charset name or alias into a [`Codec`]: the
//! alias registry is consulted first, then the codec provider. The default
//! provider, [`IanaIndex`], knows IANA names and aliases backed by
//! `encoding_rs` plus built-in codecs for the charsets it lacks.

use std::fmt;

use encoding_rs::Encoding;
use tracing::trace;

use crate::codepage::CodePage;
use crate::multibyte::{EucJpEncoder, Utf16BomDecoder, Utf16Encoder};
use crate::singlebyte::{SingleByteDecoder, SingleByteEncoder, TableDecoder, TableEncoder};
use crate::tables;
use crate::transform::{LibraryDecoder, LibraryEncoder, Transform};
use crate::{Charset, CharsetRegistry, Error, Result};

/// Factory producing a fresh transform
pub type TransformFactory = fn() -> Box<dyn Transform>;

/// Paired decode/encode capability bound to one charset
///
/// A codec is cheap to copy; every call to [`decoder`](Self::decoder) or
/// [`encoder`](Self::encoder) creates a new, independent transform.
#[derive(Clone, Copy)]
pub struct Codec {
    name: &'static str,
    kind: CodecKind,
}

#[derive(Clone, Copy)]
pub(crate) enum CodecKind {
    /// Codec implemented by `encoding_rs`
    Library(&'static Encoding),
    /// UTF-16; decoding goes through `encoding_rs`, encoding is built in
    Utf16 { big_endian: bool, bom: bool },
    /// Bytes equal code points up to `ceiling`
    SingleByte { ceiling: u8 },
    /// Single-byte code page table
    Table(&'static CodePage),
    /// Caller-supplied transforms
    Custom {
        decoder: TransformFactory,
        encoder: TransformFactory,
    },
}

impl Codec {
    pub(crate) const fn new(name: &'static str, kind: CodecKind) -> Self {
        Self { name, kind }
    }

    /// Creates a codec from caller-supplied transform factories.
    pub fn custom(name: &'static str, decoder: TransformFactory, encoder: TransformFactory) -> Self {
        Self::new(name, CodecKind::Custom { decoder, encoder })
    }

    /// Canonical name of the charset
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The charset this codec is bound to
    pub fn charset(&self) -> Charset {
        Charset::from_static(self.name)
    }

    /// Returns true for UTF-8, the canonical pivot form.
    pub fn is_canonical(&self) -> bool {
        Charset::UTF_8.matches(self.name)
    }

    /// Check if ASCII bytes keep their meaning in this charset
    pub fn is_ascii_compatible(&self) -> bool {
        match self.kind {
            CodecKind::Library(encoding) => encoding.is_ascii_compatible(),
            CodecKind::Utf16 { .. } => false,
            CodecKind::SingleByte { .. } => true,
            CodecKind::Table(page) => page.is_ascii_compatible(),
            CodecKind::Custom { .. } => false,
        }
    }

    /// Check if every character is a single byte
    pub fn is_single_byte(&self) -> bool {
        match self.kind {
            CodecKind::Library(encoding) => encoding.is_single_byte(),
            CodecKind::Utf16 { .. } => false,
            CodecKind::SingleByte { .. } | CodecKind::Table(_) => true,
            CodecKind::Custom { .. } => false,
        }
    }

    /// Returns true when the codec is provided by `encoding_rs`.
    pub fn is_library_backed(&self) -> bool {
        matches!(self.kind, CodecKind::Library(_))
    }

    /// New transform from this charset into UTF-8
    pub fn decoder(&self) -> Box<dyn Transform> {
        match self.kind {
            CodecKind::Library(encoding) => Box::new(LibraryDecoder::new(
                self.name,
                encoding.new_decoder_without_bom_handling(),
            )),
            CodecKind::Utf16 { bom: true, .. } => Box::new(Utf16BomDecoder::new(self.name)),
            CodecKind::Utf16 { big_endian, .. } => {
                let encoding = if big_endian {
                    encoding_rs::UTF_16BE
                } else {
                    encoding_rs::UTF_16LE
                };
                Box::new(LibraryDecoder::new(
                    self.name,
                    encoding.new_decoder_without_bom_handling(),
                ))
            }
            CodecKind::SingleByte { ceiling } => {
                Box::new(SingleByteDecoder::new(self.name, ceiling))
            }
            CodecKind::Table(page) => Box::new(TableDecoder::new(self.name, page)),
            CodecKind::Custom { decoder, .. } => decoder(),
        }
    }

    /// New transform from UTF-8 into this charset
    pub fn encoder(&self) -> Box<dyn Transform> {
        match self.kind {
            CodecKind::Library(encoding) if encoding == encoding_rs::EUC_JP => {
                Box::new(EucJpEncoder::new(self.name))
            }
            CodecKind::Library(encoding) => {
                Box::new(LibraryEncoder::new(self.name, encoding.new_encoder()))
            }
            CodecKind::Utf16 { big_endian, bom } => {
                Box::new(Utf16Encoder::new(self.name, big_endian, bom))
            }
            CodecKind::SingleByte { ceiling } => {
                Box::new(SingleByteEncoder::new(self.name, ceiling))
            }
            CodecKind::Table(page) => Box::new(TableEncoder::new(self.name, page)),
            CodecKind::Custom { encoder, .. } => encoder(),
        }
    }
}

/// Codecs compare by charset name, case-insensitively.
impl PartialEq for Codec {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(other.name)
    }
}

impl Eq for Codec {}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            CodecKind::Library(_) => "library",
            CodecKind::Utf16 { .. } => "utf-16",
            CodecKind::SingleByte { .. } => "single-byte",
            CodecKind::Table(_) => "code-page",
            CodecKind::Custom { .. } => "custom",
        };
        f.debug_struct("Codec")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

/// Wraps an `encoding_rs` encoding directly, bypassing the name index.
///
/// UTF-16 encodings get the built-in encoder, since `encoding_rs` would
/// encode them as UTF-8. EUC-JP gets the JIS X 0212 fallback.
impl From<&'static Encoding> for Codec {
    fn from(encoding: &'static Encoding) -> Self {
        let kind = if encoding == encoding_rs::UTF_16BE {
            CodecKind::Utf16 {
                big_endian: true,
                bom: false,
            }
        } else if encoding == encoding_rs::UTF_16LE {
            CodecKind::Utf16 {
                big_endian: false,
                bom: false,
            }
        } else {
            CodecKind::Library(encoding)
        };
        Codec::new(encoding.name(), kind)
    }
}

/// Source of codecs for canonical charset names
pub trait CodecProvider {
    /// Finds the codec for `charset`, or `None` when unsupported.
    fn codec(&self, charset: &str) -> Option<Codec>;
}

/// IANA-style charset index
///
/// Matches IANA preferred MIME names and registered aliases,
/// case-insensitively. This is deliberately not the WHATWG label table:
/// `GB2312`, `HZ-GB-2312` and `ISO-8859-11` are unsupported rather than
/// silently mapped onto a superset, and `ISO-8859-9` is Latin-5 rather
/// than windows-1254.
#[derive(Debug, Default, Clone, Copy)]
pub struct IanaIndex;

impl IanaIndex {
    /// Canonical names of all supported charsets with their category
    pub fn charsets() -> &'static [(&'static str, &'static str)] {
        tables::CHARSETS
    }
}

impl CodecProvider for IanaIndex {
    fn codec(&self, charset: &str) -> Option<Codec> {
        tables::lookup(charset)
    }
}

/// Resolves charset names through an alias registry and a codec provider
#[derive(Debug)]
pub struct Resolver<'r, P = IanaIndex> {
    registry: &'r CharsetRegistry,
    provider: P,
}

impl<'r> Resolver<'r> {
    /// Resolver over the default [`IanaIndex`]
    pub fn new(registry: &'r CharsetRegistry) -> Self {
        Self::with_provider(registry, IanaIndex)
    }
}

impl<'r, P: CodecProvider> Resolver<'r, P> {
    /// Resolver over a custom provider
    pub fn with_provider(registry: &'r CharsetRegistry, provider: P) -> Self {
        Self { registry, provider }
    }

    /// Resolves `name` into a codec.
    ///
    /// A registered alias is replaced by its canonical charset; any other
    /// name is looked up as is. Fails with [`Error::UnknownCharset`]
    /// carrying `name` when the provider has no codec.
    pub fn resolve(&self, name: &str) -> Result<Codec> {
        let charset = self
            .registry
            .resolve_alias(name)
            .map_or(name, Charset::as_str);
        let codec = self
            .provider
            .codec(charset)
            .ok_or_else(|| Error::UnknownCharset(name.to_owned()))?;
        trace!(charset = name, codec = codec.name(), "resolved charset");
        Ok(codec)
    }
}

/// Resolves `name` through `registry` and the [`IanaIndex`].
pub fn resolve_codec(registry: &CharsetRegistry, name: &str) -> Result<Codec> {
    Resolver::new(registry).resolve(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_names() {
        let registry = CharsetRegistry::new();
        for name in ["UTF-8", "GBK", "GB18030", "Big5", "EUC-JP", "Shift_JIS", "EUC-KR"] {
            let codec = resolve_codec(&registry, name).unwrap();
            assert_eq!(codec.name(), name);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = CharsetRegistry::new();
        assert_eq!(resolve_codec(&registry, "gbk").unwrap().name(), "GBK");
        assert_eq!(resolve_codec(&registry, "euc-jp").unwrap().name(), "EUC-JP");
        assert_eq!(
            resolve_codec(&registry, "WINDOWS-1252").unwrap().name(),
            "windows-1252"
        );
    }

    #[test]
    fn test_resolve_iana_aliases() {
        let registry = CharsetRegistry::new();
        assert_eq!(resolve_codec(&registry, "CP936").unwrap(), resolve_codec(&registry, "GBK").unwrap());
        assert_eq!(resolve_codec(&registry, "latin1").unwrap().name(), "ISO-8859-1");
        assert_eq!(resolve_codec(&registry, "csShiftJIS").unwrap().name(), "Shift_JIS");
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = CharsetRegistry::new();
        for name in ["foo", "ANSI", "GB2312", "HZ-GB-2312", ""] {
            match resolve_codec(&registry, name) {
                Err(Error::UnknownCharset(reported)) => assert_eq!(reported, name),
                other => panic!("{name}: expected UnknownCharset, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_resolve_through_alias() {
        let mut registry = CharsetRegistry::new();
        registry.add_alias(Charset::GB18030, "chinese");
        assert_eq!(resolve_codec(&registry, "Chinese").unwrap().name(), "GB18030");

        registry.remove_alias("chinese");
        assert!(resolve_codec(&registry, "chinese").unwrap_err().is_unknown_charset());
    }

    #[test]
    fn test_alias_to_unknown_charset_reports_alias() {
        let mut registry = CharsetRegistry::new();
        registry.add_alias("GB2312", "simplified");

        match resolve_codec(&registry, "simplified") {
            Err(Error::UnknownCharset(name)) => assert_eq!(name, "simplified"),
            other => panic!("expected UnknownCharset, got {other:?}"),
        }
    }

    #[test]
    fn test_latin1_is_not_windows_1252() {
        let registry = CharsetRegistry::new();
        let latin1 = resolve_codec(&registry, "ISO-8859-1").unwrap();
        assert!(!latin1.is_library_backed());
        assert_ne!(latin1, resolve_codec(&registry, "windows-1252").unwrap());
    }

    #[test]
    fn test_codec_properties() {
        let registry = CharsetRegistry::new();
        let utf8 = resolve_codec(&registry, "utf-8").unwrap();
        assert!(utf8.is_canonical());
        assert!(utf8.is_ascii_compatible());

        let gbk = resolve_codec(&registry, "GBK").unwrap();
        assert!(!gbk.is_canonical());
        assert!(!gbk.is_single_byte());

        let utf16 = resolve_codec(&registry, "UTF-16LE").unwrap();
        assert!(!utf16.is_ascii_compatible());
        assert!(resolve_codec(&registry, "KOI8-R").unwrap().is_single_byte());
    }

    #[test]
    fn test_codec_from_encoding() {
        let codec = Codec::from(encoding_rs::SHIFT_JIS);
        assert_eq!(codec.name(), "Shift_JIS");
        assert!(codec.is_library_backed());

        let utf16 = Codec::from(encoding_rs::UTF_16BE);
        assert!(!utf16.is_library_backed());
    }

    struct OnlyGbk;

    impl CodecProvider for OnlyGbk {
        fn codec(&self, charset: &str) -> Option<Codec> {
            charset
                .eq_ignore_ascii_case("GBK")
                .then(|| Codec::from(encoding_rs::GBK))
        }
    }

    #[test]
    fn test_custom_provider() {
        let registry = CharsetRegistry::new();
        let resolver = Resolver::with_provider(&registry, OnlyGbk);
        assert_eq!(resolver.resolve("gbk").unwrap().name(), "GBK");
        assert!(resolver.resolve("UTF-8").unwrap_err().is_unknown_charset());
    }

    #[test]
    fn test_code_page_codecs() {
        let registry = CharsetRegistry::new();
        let ebcdic = resolve_codec(&registry, "cp037").unwrap();
        assert_eq!(ebcdic.name(), "IBM037");
        assert!(ebcdic.is_single_byte());
        assert!(!ebcdic.is_ascii_compatible());
        assert!(!ebcdic.is_library_backed());

        let dos = resolve_codec(&registry, "437").unwrap();
        assert_eq!(dos.name(), "IBM437");
        assert!(dos.is_ascii_compatible());

        let latin5 = resolve_codec(&registry, "latin5").unwrap();
        assert_ne!(latin5, resolve_codec(&registry, "windows-1254").unwrap());
    }

    #[test]
    fn test_euc_jp_from_encoding_uses_fallback() {
        let codec = Codec::from(encoding_rs::EUC_JP);
        let mut encoder = codec.encoder();
        let mut dst = [0u8; 8];
        let (status, _, written) = encoder.transform("你".as_bytes(), &mut dst, true);
        assert_eq!(status, crate::TransformStatus::InputEmpty);
        assert_eq!(&dst[..written], &[0x8F, 0xB0, 0xDF]);
    }
}
