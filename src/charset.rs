//! Charset identifiers and the alias registry
//!
//! A [`Charset`] is only a name. Names compare case-insensitively, so
//! `"gbk"`, `"GBK"` and [`Charset::GBK`] are the same charset. Encoding
//! tables live behind [`crate::Codec`], never in a `Charset`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{Error, Result};

/// Case-insensitive charset identifier
#[derive(Debug, Clone)]
pub struct Charset(Cow<'static, str>);

impl Charset {
    /// UTF-8, the canonical pivot form
    pub const UTF_8: Charset = Charset::from_static("UTF-8");
    /// UTF-16 with byte order mark handling (big endian when no BOM)
    pub const UTF_16: Charset = Charset::from_static("UTF-16");
    /// UTF-16 big endian
    pub const UTF_16BE: Charset = Charset::from_static("UTF-16BE");
    /// UTF-16 little endian
    pub const UTF_16LE: Charset = Charset::from_static("UTF-16LE");
    /// US-ASCII (7-bit)
    pub const US_ASCII: Charset = Charset::from_static("US-ASCII");

    /// GBK (Simplified Chinese)
    pub const GBK: Charset = Charset::from_static("GBK");
    /// GB18030 (Simplified Chinese, full Unicode coverage)
    pub const GB18030: Charset = Charset::from_static("GB18030");
    /// Big5 (Traditional Chinese)
    pub const BIG5: Charset = Charset::from_static("Big5");

    /// EUC-JP (Japanese)
    pub const EUC_JP: Charset = Charset::from_static("EUC-JP");
    /// ISO-2022-JP (Japanese, stateful)
    pub const ISO_2022_JP: Charset = Charset::from_static("ISO-2022-JP");
    /// Shift_JIS (Japanese)
    pub const SHIFT_JIS: Charset = Charset::from_static("Shift_JIS");
    /// EUC-KR (Korean)
    pub const EUC_KR: Charset = Charset::from_static("EUC-KR");

    /// Classic Macintosh Roman
    pub const MACINTOSH: Charset = Charset::from_static("macintosh");
    /// IBM code page 866 (Cyrillic OEM)
    pub const IBM866: Charset = Charset::from_static("IBM866");
    /// KOI8-R (Russian)
    pub const KOI8_R: Charset = Charset::from_static("KOI8-R");
    /// KOI8-U (Ukrainian)
    pub const KOI8_U: Charset = Charset::from_static("KOI8-U");

    /// ISO-8859-1 (Latin-1)
    pub const ISO_8859_1: Charset = Charset::from_static("ISO-8859-1");
    /// ISO-8859-2 (Latin-2)
    pub const ISO_8859_2: Charset = Charset::from_static("ISO-8859-2");
    /// ISO-8859-3 (Latin-3)
    pub const ISO_8859_3: Charset = Charset::from_static("ISO-8859-3");
    /// ISO-8859-4 (Latin-4)
    pub const ISO_8859_4: Charset = Charset::from_static("ISO-8859-4");
    /// ISO-8859-5 (Cyrillic)
    pub const ISO_8859_5: Charset = Charset::from_static("ISO-8859-5");
    /// ISO-8859-6 (Arabic)
    pub const ISO_8859_6: Charset = Charset::from_static("ISO-8859-6");
    /// ISO-8859-7 (Greek)
    pub const ISO_8859_7: Charset = Charset::from_static("ISO-8859-7");
    /// ISO-8859-8 (Hebrew, visual order)
    pub const ISO_8859_8: Charset = Charset::from_static("ISO-8859-8");
    /// ISO-8859-8-I (Hebrew, logical order)
    pub const ISO_8859_8_I: Charset = Charset::from_static("ISO-8859-8-I");
    /// ISO-8859-9 (Latin-5, Turkish)
    pub const ISO_8859_9: Charset = Charset::from_static("ISO-8859-9");
    /// ISO-8859-10 (Latin-6)
    pub const ISO_8859_10: Charset = Charset::from_static("ISO-8859-10");
    /// ISO-8859-13 (Latin-7)
    pub const ISO_8859_13: Charset = Charset::from_static("ISO-8859-13");
    /// ISO-8859-14 (Latin-8)
    pub const ISO_8859_14: Charset = Charset::from_static("ISO-8859-14");
    /// ISO-8859-15 (Latin-9)
    pub const ISO_8859_15: Charset = Charset::from_static("ISO-8859-15");
    /// ISO-8859-16 (Latin-10)
    pub const ISO_8859_16: Charset = Charset::from_static("ISO-8859-16");

    /// IBM EBCDIC Code Page 037 (US/Canada)
    pub const IBM037: Charset = Charset::from_static("IBM037");
    /// IBM EBCDIC Code Page 1047 (Latin-1)
    pub const IBM1047: Charset = Charset::from_static("IBM1047");
    /// IBM EBCDIC Code Page 1140 (037 with euro)
    pub const IBM01140: Charset = Charset::from_static("IBM01140");
    /// DOS Code Page 437 (US)
    pub const IBM437: Charset = Charset::from_static("IBM437");
    /// DOS Code Page 850 (Western European)
    pub const IBM850: Charset = Charset::from_static("IBM850");
    /// DOS Code Page 852 (Central European)
    pub const IBM852: Charset = Charset::from_static("IBM852");
    /// DOS Code Page 855 (Cyrillic)
    pub const IBM855: Charset = Charset::from_static("IBM855");
    /// DOS Code Page 858 (850 with euro)
    pub const IBM00858: Charset = Charset::from_static("IBM00858");
    /// DOS Code Page 860 (Portuguese)
    pub const IBM860: Charset = Charset::from_static("IBM860");
    /// DOS Code Page 862 (Hebrew)
    pub const IBM862: Charset = Charset::from_static("IBM862");
    /// DOS Code Page 863 (Canadian French)
    pub const IBM863: Charset = Charset::from_static("IBM863");
    /// DOS Code Page 865 (Nordic)
    pub const IBM865: Charset = Charset::from_static("IBM865");

    /// Windows-874 (Thai)
    pub const WINDOWS_874: Charset = Charset::from_static("windows-874");
    /// Windows-1250 (Central European)
    pub const WINDOWS_1250: Charset = Charset::from_static("windows-1250");
    /// Windows-1251 (Cyrillic)
    pub const WINDOWS_1251: Charset = Charset::from_static("windows-1251");
    /// Windows-1252 (Western European)
    pub const WINDOWS_1252: Charset = Charset::from_static("windows-1252");
    /// Windows-1253 (Greek)
    pub const WINDOWS_1253: Charset = Charset::from_static("windows-1253");
    /// Windows-1254 (Turkish)
    pub const WINDOWS_1254: Charset = Charset::from_static("windows-1254");
    /// Windows-1255 (Hebrew)
    pub const WINDOWS_1255: Charset = Charset::from_static("windows-1255");
    /// Windows-1256 (Arabic)
    pub const WINDOWS_1256: Charset = Charset::from_static("windows-1256");
    /// Windows-1257 (Baltic)
    pub const WINDOWS_1257: Charset = Charset::from_static("windows-1257");
    /// Windows-1258 (Vietnamese)
    pub const WINDOWS_1258: Charset = Charset::from_static("windows-1258");

    /// Creates a charset from a static name
    pub const fn from_static(name: &'static str) -> Self {
        Charset(Cow::Borrowed(name))
    }

    /// The name as it was given
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a plain name
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other.as_str())
    }
}

impl Eq for Charset {}

impl Hash for Charset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xFF);
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Charset {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Charset {
    fn from(name: &str) -> Self {
        Charset(Cow::Owned(name.to_owned()))
    }
}

impl From<String> for Charset {
    fn from(name: String) -> Self {
        Charset(Cow::Owned(name))
    }
}

/// Alias table mapping alternative names onto canonical charsets
///
/// The registry is a plain value: construct it once, then pass it by
/// reference to the resolver and conversion calls. Mutation needs
/// `&mut self`, so sharing one registry between threads that also mutate
/// it requires the caller's own `RwLock` or `Mutex`. No lock is taken
/// internally.
///
/// Alias keys match case-insensitively. The canonical target is stored as
/// given and not validated against the codec index.
#[derive(Debug, Clone, Default)]
pub struct CharsetRegistry {
    aliases: HashMap<String, Charset>,
}

impl CharsetRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `alias` for `canonical`, replacing any earlier mapping of `alias`.
    pub fn add_alias(&mut self, canonical: impl Into<Charset>, alias: &str) {
        self.aliases.insert(alias_key(alias), canonical.into());
    }

    /// Removes `alias`. Does nothing when it is not registered.
    pub fn remove_alias(&mut self, alias: &str) {
        self.aliases.remove(&alias_key(alias));
    }

    /// Looks up the canonical charset registered for `alias`.
    pub fn resolve_alias(&self, alias: &str) -> Option<&Charset> {
        self.aliases.get(&alias_key(alias))
    }

    /// Like [`resolve_alias`](Self::resolve_alias), failing with
    /// [`Error::UnknownCharset`] when `alias` is not registered.
    pub fn charset_by_alias(&self, alias: &str) -> Result<Charset> {
        self.resolve_alias(alias)
            .cloned()
            .ok_or_else(|| Error::UnknownCharset(alias.to_owned()))
    }

    /// Number of registered aliases
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true when no alias is registered
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterates over `(alias, canonical)` pairs in no particular order.
    ///
    /// Aliases are reported in lower case.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Charset)> {
        self.aliases
            .iter()
            .map(|(alias, charset)| (alias.as_str(), charset))
    }
}

fn alias_key(alias: &str) -> String {
    alias.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_charset_case_insensitive() {
        assert_eq!(Charset::from("gbk"), Charset::GBK);
        assert_eq!(Charset::from("SHIFT_JIS"), Charset::SHIFT_JIS);
        assert_ne!(Charset::GBK, Charset::GB18030);
        assert!(Charset::UTF_8.matches("utf-8"));

        let mut seen = HashSet::new();
        seen.insert(Charset::from("Windows-1252"));
        assert!(seen.contains(&Charset::WINDOWS_1252));
    }

    #[test]
    fn test_charset_keeps_spelling() {
        let charset = Charset::from("Big5");
        assert_eq!(charset.as_str(), "Big5");
        assert_eq!(charset.to_string(), "Big5");
    }

    #[test]
    fn test_alias_add_resolve_remove() {
        let mut registry = CharsetRegistry::new();
        registry.add_alias(Charset::GBK, "gbk");

        assert_eq!(registry.resolve_alias("gbk"), Some(&Charset::GBK));
        assert_eq!(registry.charset_by_alias("gbk").unwrap().as_str(), "GBK");

        registry.remove_alias("gbk");
        assert_eq!(registry.resolve_alias("gbk"), None);
        assert!(registry.charset_by_alias("gbk").unwrap_err().is_unknown_charset());
    }

    #[test]
    fn test_alias_last_write_wins() {
        let mut registry = CharsetRegistry::new();
        registry.add_alias(Charset::GBK, "chinese");
        registry.add_alias(Charset::GB18030, "chinese");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve_alias("chinese"), Some(&Charset::GB18030));
    }

    #[test]
    fn test_alias_lookup_ignores_case() {
        let mut registry = CharsetRegistry::new();
        registry.add_alias("EUC-JP", "Japanese");

        assert_eq!(registry.resolve_alias("JAPANESE"), Some(&Charset::EUC_JP));
        registry.remove_alias("japanese");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_missing_alias_is_noop() {
        let mut registry = CharsetRegistry::new();
        registry.add_alias(Charset::BIG5, "tw");
        registry.remove_alias("missing");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.aliases().next(), Some(("tw", &Charset::BIG5)));
    }
}
