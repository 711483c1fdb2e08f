//! IANA charset name index
//!
//! Names are the IANA preferred MIME names; aliases are the ones registered
//! with IANA for the same charset. Lookup upper-cases the name and matches
//! it against both.

use encoding_rs as enc;

use crate::codec::{Codec, CodecKind};
use crate::codepage;

/// Canonical names with their category, in display order
pub(crate) static CHARSETS: &[(&str, &str)] = &[
    ("UTF-8", "unicode"),
    ("UTF-16", "unicode"),
    ("UTF-16BE", "unicode"),
    ("UTF-16LE", "unicode"),
    ("US-ASCII", "ascii"),
    ("ISO-8859-1", "iso"),
    ("ISO-8859-2", "iso"),
    ("ISO-8859-3", "iso"),
    ("ISO-8859-4", "iso"),
    ("ISO-8859-5", "iso"),
    ("ISO-8859-6", "iso"),
    ("ISO-8859-6-E", "iso"),
    ("ISO-8859-6-I", "iso"),
    ("ISO-8859-7", "iso"),
    ("ISO-8859-8", "iso"),
    ("ISO-8859-8-E", "iso"),
    ("ISO-8859-8-I", "iso"),
    ("ISO-8859-9", "iso"),
    ("ISO-8859-10", "iso"),
    ("ISO-8859-13", "iso"),
    ("ISO-8859-14", "iso"),
    ("ISO-8859-15", "iso"),
    ("ISO-8859-16", "iso"),
    ("windows-874", "windows"),
    ("windows-1250", "windows"),
    ("windows-1251", "windows"),
    ("windows-1252", "windows"),
    ("windows-1253", "windows"),
    ("windows-1254", "windows"),
    ("windows-1255", "windows"),
    ("windows-1256", "windows"),
    ("windows-1257", "windows"),
    ("windows-1258", "windows"),
    ("KOI8-R", "cyrillic"),
    ("KOI8-U", "cyrillic"),
    ("IBM866", "cyrillic"),
    ("macintosh", "mac"),
    ("x-mac-cyrillic", "mac"),
    ("IBM037", "ebcdic"),
    ("IBM1047", "ebcdic"),
    ("IBM01140", "ebcdic"),
    ("IBM437", "dos"),
    ("IBM850", "dos"),
    ("IBM852", "dos"),
    ("IBM855", "dos"),
    ("IBM00858", "dos"),
    ("IBM860", "dos"),
    ("IBM862", "dos"),
    ("IBM863", "dos"),
    ("IBM865", "dos"),
    ("GBK", "chinese"),
    ("GB18030", "chinese"),
    ("Big5", "chinese"),
    ("EUC-JP", "japanese"),
    ("ISO-2022-JP", "japanese"),
    ("Shift_JIS", "japanese"),
    ("Windows-31J", "japanese"),
    ("EUC-KR", "korean"),
];

/// Finds the codec registered under `name` or one of its IANA aliases.
pub(crate) fn lookup(name: &str) -> Option<Codec> {
    let (canonical, kind) = match name.to_ascii_uppercase().as_str() {
        // Unicode
        "UTF-8" | "CSUTF8" => ("UTF-8", CodecKind::Library(enc::UTF_8)),
        "UTF-16" | "CSUTF16" => (
            "UTF-16",
            CodecKind::Utf16 {
                big_endian: true,
                bom: true,
            },
        ),
        "UTF-16BE" | "CSUTF16BE" => (
            "UTF-16BE",
            CodecKind::Utf16 {
                big_endian: true,
                bom: false,
            },
        ),
        "UTF-16LE" | "CSUTF16LE" => (
            "UTF-16LE",
            CodecKind::Utf16 {
                big_endian: false,
                bom: false,
            },
        ),

        // ASCII and Latin-1 are built in
        "US-ASCII" | "ISO-IR-6" | "ANSI_X3.4-1968" | "ANSI_X3.4-1986" | "ISO_646.IRV:1991"
        | "ISO646-US" | "US" | "IBM367" | "CP367" | "CSASCII" => {
            ("US-ASCII", CodecKind::SingleByte { ceiling: 0x7F })
        }
        "ISO-8859-1" | "ISO_8859-1:1987" | "ISO-IR-100" | "ISO_8859-1" | "LATIN1" | "L1"
        | "IBM819" | "CP819" | "CSISOLATIN1" => {
            ("ISO-8859-1", CodecKind::SingleByte { ceiling: 0xFF })
        }

        // ISO-8859 series
        "ISO-8859-2" | "ISO_8859-2:1987" | "ISO-IR-101" | "ISO_8859-2" | "LATIN2" | "L2"
        | "CSISOLATIN2" => ("ISO-8859-2", CodecKind::Library(enc::ISO_8859_2)),
        "ISO-8859-3" | "ISO_8859-3:1988" | "ISO-IR-109" | "ISO_8859-3" | "LATIN3" | "L3"
        | "CSISOLATIN3" => ("ISO-8859-3", CodecKind::Library(enc::ISO_8859_3)),
        "ISO-8859-4" | "ISO_8859-4:1988" | "ISO-IR-110" | "ISO_8859-4" | "LATIN4" | "L4"
        | "CSISOLATIN4" => ("ISO-8859-4", CodecKind::Library(enc::ISO_8859_4)),
        "ISO-8859-5" | "ISO_8859-5:1988" | "ISO-IR-144" | "ISO_8859-5" | "CYRILLIC"
        | "CSISOLATINCYRILLIC" => ("ISO-8859-5", CodecKind::Library(enc::ISO_8859_5)),
        "ISO-8859-6" | "ISO_8859-6:1987" | "ISO-IR-127" | "ISO_8859-6" | "ECMA-114"
        | "ASMO-708" | "ARABIC" | "CSISOLATINARABIC" => {
            ("ISO-8859-6", CodecKind::Library(enc::ISO_8859_6))
        }
        "ISO-8859-6-E" | "ISO_8859-6-E" | "CSISO88596E" => {
            ("ISO-8859-6-E", CodecKind::Library(enc::ISO_8859_6))
        }
        "ISO-8859-6-I" | "ISO_8859-6-I" | "CSISO88596I" => {
            ("ISO-8859-6-I", CodecKind::Library(enc::ISO_8859_6))
        }
        "ISO-8859-7" | "ISO_8859-7:1987" | "ISO-IR-126" | "ISO_8859-7" | "ELOT_928"
        | "ECMA-118" | "GREEK" | "GREEK8" | "CSISOLATINGREEK" => {
            ("ISO-8859-7", CodecKind::Library(enc::ISO_8859_7))
        }
        "ISO-8859-8" | "ISO_8859-8:1988" | "ISO-IR-138" | "ISO_8859-8" | "HEBREW"
        | "CSISOLATINHEBREW" => ("ISO-8859-8", CodecKind::Library(enc::ISO_8859_8)),
        "ISO-8859-8-E" | "ISO_8859-8-E" | "CSISO88598E" => {
            ("ISO-8859-8-E", CodecKind::Library(enc::ISO_8859_8))
        }
        "ISO-8859-8-I" | "ISO_8859-8-I" | "CSISO88598I" => {
            ("ISO-8859-8-I", CodecKind::Library(enc::ISO_8859_8_I))
        }
        "ISO-8859-9" | "ISO_8859-9:1989" | "ISO-IR-148" | "ISO_8859-9" | "LATIN5" | "L5"
        | "CSISOLATIN5" => ("ISO-8859-9", CodecKind::Table(&codepage::ISO_8859_9)),
        "ISO-8859-10" | "ISO-IR-157" | "L6" | "ISO_8859-10:1992" | "CSISOLATIN6" | "LATIN6" => {
            ("ISO-8859-10", CodecKind::Library(enc::ISO_8859_10))
        }
        "ISO-8859-13" | "CSISO885913" => ("ISO-8859-13", CodecKind::Library(enc::ISO_8859_13)),
        "ISO-8859-14" | "ISO-IR-199" | "ISO_8859-14:1998" | "ISO_8859-14" | "LATIN8"
        | "ISO-CELTIC" | "L8" | "CSISO885914" => {
            ("ISO-8859-14", CodecKind::Library(enc::ISO_8859_14))
        }
        "ISO-8859-15" | "ISO_8859-15" | "LATIN-9" | "CSISO885915" => {
            ("ISO-8859-15", CodecKind::Library(enc::ISO_8859_15))
        }
        "ISO-8859-16" | "ISO-IR-226" | "ISO_8859-16:2001" | "ISO_8859-16" | "LATIN10" | "L10"
        | "CSISO885916" => ("ISO-8859-16", CodecKind::Library(enc::ISO_8859_16)),

        // Windows code pages
        "WINDOWS-874" | "CSWINDOWS874" => ("windows-874", CodecKind::Library(enc::WINDOWS_874)),
        "WINDOWS-1250" | "CSWINDOWS1250" => {
            ("windows-1250", CodecKind::Library(enc::WINDOWS_1250))
        }
        "WINDOWS-1251" | "CSWINDOWS1251" => {
            ("windows-1251", CodecKind::Library(enc::WINDOWS_1251))
        }
        "WINDOWS-1252" | "CSWINDOWS1252" => {
            ("windows-1252", CodecKind::Library(enc::WINDOWS_1252))
        }
        "WINDOWS-1253" | "CSWINDOWS1253" => {
            ("windows-1253", CodecKind::Library(enc::WINDOWS_1253))
        }
        "WINDOWS-1254" | "CSWINDOWS1254" => {
            ("windows-1254", CodecKind::Library(enc::WINDOWS_1254))
        }
        "WINDOWS-1255" | "CSWINDOWS1255" => {
            ("windows-1255", CodecKind::Library(enc::WINDOWS_1255))
        }
        "WINDOWS-1256" | "CSWINDOWS1256" => {
            ("windows-1256", CodecKind::Library(enc::WINDOWS_1256))
        }
        "WINDOWS-1257" | "CSWINDOWS1257" => {
            ("windows-1257", CodecKind::Library(enc::WINDOWS_1257))
        }
        "WINDOWS-1258" | "CSWINDOWS1258" => {
            ("windows-1258", CodecKind::Library(enc::WINDOWS_1258))
        }

        // Cyrillic
        "KOI8-R" | "CSKOI8R" => ("KOI8-R", CodecKind::Library(enc::KOI8_R)),
        "KOI8-U" | "CSKOI8U" => ("KOI8-U", CodecKind::Library(enc::KOI8_U)),
        "IBM866" | "CP866" | "866" | "CSIBM866" => ("IBM866", CodecKind::Library(enc::IBM866)),

        // Mac
        "MACINTOSH" | "MAC" | "CSMACINTOSH" => ("macintosh", CodecKind::Library(enc::MACINTOSH)),
        "X-MAC-CYRILLIC" => ("x-mac-cyrillic", CodecKind::Library(enc::X_MAC_CYRILLIC)),

        // EBCDIC
        "IBM037" | "CP037" | "EBCDIC-CP-US" | "EBCDIC-CP-CA" | "EBCDIC-CP-WT" | "EBCDIC-CP-NL"
        | "CSIBM037" => ("IBM037", CodecKind::Table(&codepage::IBM037)),
        "IBM1047" | "IBM-1047" | "CP1047" | "CSIBM1047" => {
            ("IBM1047", CodecKind::Table(&codepage::IBM1047))
        }
        "IBM01140" | "CCSID01140" | "CP01140" | "EBCDIC-US-37+EURO" | "CSIBM01140" => {
            ("IBM01140", CodecKind::Table(&codepage::IBM01140))
        }

        // DOS
        "IBM437" | "CP437" | "437" | "CSPC8CODEPAGE437" => {
            ("IBM437", CodecKind::Table(&codepage::IBM437))
        }
        "IBM850" | "CP850" | "850" | "CSPC850MULTILINGUAL" => {
            ("IBM850", CodecKind::Table(&codepage::IBM850))
        }
        "IBM852" | "CP852" | "852" | "CSPCP852" => ("IBM852", CodecKind::Table(&codepage::IBM852)),
        "IBM855" | "CP855" | "855" | "CSIBM855" => ("IBM855", CodecKind::Table(&codepage::IBM855)),
        "IBM00858" | "CCSID00858" | "CP00858" | "PC-MULTILINGUAL-850+EURO" | "CSIBM00858" => {
            ("IBM00858", CodecKind::Table(&codepage::IBM00858))
        }
        "IBM860" | "CP860" | "860" | "CSIBM860" => ("IBM860", CodecKind::Table(&codepage::IBM860)),
        "IBM862" | "CP862" | "862" | "CSPC862LATINHEBREW" => {
            ("IBM862", CodecKind::Table(&codepage::IBM862))
        }
        "IBM863" | "CP863" | "863" | "CSIBM863" => ("IBM863", CodecKind::Table(&codepage::IBM863)),
        "IBM865" | "CP865" | "865" | "CSIBM865" => ("IBM865", CodecKind::Table(&codepage::IBM865)),

        // Chinese
        "GBK" | "CP936" | "MS936" | "WINDOWS-936" | "CSGBK" => {
            ("GBK", CodecKind::Library(enc::GBK))
        }
        "GB18030" | "CSGB18030" => ("GB18030", CodecKind::Library(enc::GB18030)),
        "BIG5" | "CSBIG5" => ("Big5", CodecKind::Library(enc::BIG5)),

        // Japanese
        "EUC-JP" | "EXTENDED_UNIX_CODE_PACKED_FORMAT_FOR_JAPANESE" | "CSEUCPKDFMTJAPANESE" => {
            ("EUC-JP", CodecKind::Library(enc::EUC_JP))
        }
        "ISO-2022-JP" | "CSISO2022JP" => ("ISO-2022-JP", CodecKind::Library(enc::ISO_2022_JP)),
        "SHIFT_JIS" | "MS_KANJI" | "CSSHIFTJIS" => {
            ("Shift_JIS", CodecKind::Library(enc::SHIFT_JIS))
        }
        "WINDOWS-31J" | "CSWINDOWS31J" => ("Windows-31J", CodecKind::Library(enc::SHIFT_JIS)),

        // Korean
        "EUC-KR" | "CSEUCKR" => ("EUC-KR", CodecKind::Library(enc::EUC_KR)),

        _ => return None,
    };

    Some(Codec::new(canonical, kind))
}
