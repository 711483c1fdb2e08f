//! Byte-to-character tables for IBM EBCDIC and DOS code pages and Latin-5
//!
//! Every table maps all 256 byte values. DOS pages and ISO-8859-9 keep
//! ASCII in the low half and only list 0x80..=0xFF; EBCDIC pages list the
//! full range. Variants are derived from their base page by overriding the
//! bytes that differ.

/// Full byte to character mapping of a single-byte charset
pub(crate) struct CodePage {
    chars: [char; 256],
}

impl CodePage {
    /// Character for `byte`
    pub(crate) fn char(&self, byte: u8) -> char {
        self.chars[usize::from(byte)]
    }

    /// All 256 mappings in byte order
    pub(crate) fn chars(&self) -> &[char; 256] {
        &self.chars
    }

    /// Check if bytes 0x00..=0x7F are ASCII
    pub(crate) fn is_ascii_compatible(&self) -> bool {
        self.chars[..0x80]
            .iter()
            .enumerate()
            .all(|(byte, &ch)| ch as usize == byte)
    }
}

const fn to_char(unit: u16) -> char {
    match char::from_u32(unit as u32) {
        Some(ch) => ch,
        None => panic!("code page entry is a surrogate"),
    }
}

/// Builds a page from a full 256-entry table.
const fn full(units: [u16; 256]) -> CodePage {
    let mut chars = ['\0'; 256];
    let mut i = 0;
    while i < 256 {
        chars[i] = to_char(units[i]);
        i += 1;
    }
    CodePage { chars }
}

/// Builds a page with ASCII below 0x80 and `high` above.
const fn ascii_with(high: [u16; 128]) -> CodePage {
    let mut chars = ['\0'; 256];
    let mut i = 0;
    while i < 128 {
        chars[i] = to_char(i as u16);
        chars[i + 128] = to_char(high[i]);
        i += 1;
    }
    CodePage { chars }
}

const fn patch<const N: usize>(
    mut units: [u16; N],
    offset: usize,
    changes: &[(usize, u16)],
) -> [u16; N] {
    let mut i = 0;
    while i < changes.len() {
        let (byte, unit) = changes[i];
        units[byte - offset] = unit;
        i += 1;
    }
    units
}

const CP037: [u16; 256] = [
    0x0000, 0x0001, 0x0002, 0x0003, 0x009C, 0x0009, 0x0086, 0x007F, // 0x00
    0x0097, 0x008D, 0x008E, 0x000B, 0x000C, 0x000D, 0x000E, 0x000F,
    0x0010, 0x0011, 0x0012, 0x0013, 0x009D, 0x0085, 0x0008, 0x0087, // 0x10
    0x0018, 0x0019, 0x0092, 0x008F, 0x001C, 0x001D, 0x001E, 0x001F,
    0x0080, 0x0081, 0x0082, 0x0083, 0x0084, 0x000A, 0x0017, 0x001B, // 0x20
    0x0088, 0x0089, 0x008A, 0x008B, 0x008C, 0x0005, 0x0006, 0x0007,
    0x0090, 0x0091, 0x0016, 0x0093, 0x0094, 0x0095, 0x0096, 0x0004, // 0x30
    0x0098, 0x0099, 0x009A, 0x009B, 0x0014, 0x0015, 0x009E, 0x001A,
    0x0020, 0x00A0, 0x00E2, 0x00E4, 0x00E0, 0x00E1, 0x00E3, 0x00E5, // 0x40
    0x00E7, 0x00F1, 0x00A2, 0x002E, 0x003C, 0x0028, 0x002B, 0x007C,
    0x0026, 0x00E9, 0x00EA, 0x00EB, 0x00E8, 0x00ED, 0x00EE, 0x00EF, // 0x50
    0x00EC, 0x00DF, 0x0021, 0x0024, 0x002A, 0x0029, 0x003B, 0x00AC,
    0x002D, 0x002F, 0x00C2, 0x00C4, 0x00C0, 0x00C1, 0x00C3, 0x00C5, // 0x60
    0x00C7, 0x00D1, 0x00A6, 0x002C, 0x0025, 0x005F, 0x003E, 0x003F,
    0x00F8, 0x00C9, 0x00CA, 0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, // 0x70
    0x00CC, 0x0060, 0x003A, 0x0023, 0x0040, 0x0027, 0x003D, 0x0022,
    0x00D8, 0x0061, 0x0062, 0x0063, 0x0064, 0x0065, 0x0066, 0x0067, // 0x80
    0x0068, 0x0069, 0x00AB, 0x00BB, 0x00F0, 0x00FD, 0x00FE, 0x00B1,
    0x00B0, 0x006A, 0x006B, 0x006C, 0x006D, 0x006E, 0x006F, 0x0070, // 0x90
    0x0071, 0x0072, 0x00AA, 0x00BA, 0x00E6, 0x00B8, 0x00C6, 0x00A4,
    0x00B5, 0x007E, 0x0073, 0x0074, 0x0075, 0x0076, 0x0077, 0x0078, // 0xA0
    0x0079, 0x007A, 0x00A1, 0x00BF, 0x00D0, 0x00DD, 0x00DE, 0x00AE,
    0x005E, 0x00A3, 0x00A5, 0x00B7, 0x00A9, 0x00A7, 0x00B6, 0x00BC, // 0xB0
    0x00BD, 0x00BE, 0x005B, 0x005D, 0x00AF, 0x00A8, 0x00B4, 0x00D7,
    0x007B, 0x0041, 0x0042, 0x0043, 0x0044, 0x0045, 0x0046, 0x0047, // 0xC0
    0x0048, 0x0049, 0x00AD, 0x00F4, 0x00F6, 0x00F2, 0x00F3, 0x00F5,
    0x007D, 0x004A, 0x004B, 0x004C, 0x004D, 0x004E, 0x004F, 0x0050, // 0xD0
    0x0051, 0x0052, 0x00B9, 0x00FB, 0x00FC, 0x00F9, 0x00FA, 0x00FF,
    0x005C, 0x00F7, 0x0053, 0x0054, 0x0055, 0x0056, 0x0057, 0x0058, // 0xE0
    0x0059, 0x005A, 0x00B2, 0x00D4, 0x00D6, 0x00D2, 0x00D3, 0x00D5,
    0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037, // 0xF0
    0x0038, 0x0039, 0x00B3, 0x00DB, 0x00DC, 0x00D9, 0x00DA, 0x009F,
];

const CP437_HIGH: [u16; 128] = [
    0x00C7, 0x00FC, 0x00E9, 0x00E2, 0x00E4, 0x00E0, 0x00E5, 0x00E7, // 0x80
    0x00EA, 0x00EB, 0x00E8, 0x00EF, 0x00EE, 0x00EC, 0x00C4, 0x00C5,
    0x00C9, 0x00E6, 0x00C6, 0x00F4, 0x00F6, 0x00F2, 0x00FB, 0x00F9, // 0x90
    0x00FF, 0x00D6, 0x00DC, 0x00A2, 0x00A3, 0x00A5, 0x20A7, 0x0192,
    0x00E1, 0x00ED, 0x00F3, 0x00FA, 0x00F1, 0x00D1, 0x00AA, 0x00BA, // 0xA0
    0x00BF, 0x2310, 0x00AC, 0x00BD, 0x00BC, 0x00A1, 0x00AB, 0x00BB,
    0x2591, 0x2592, 0x2593, 0x2502, 0x2524, 0x2561, 0x2562, 0x2556, // 0xB0
    0x2555, 0x2563, 0x2551, 0x2557, 0x255D, 0x255C, 0x255B, 0x2510,
    0x2514, 0x2534, 0x252C, 0x251C, 0x2500, 0x253C, 0x255E, 0x255F, // 0xC0
    0x255A, 0x2554, 0x2569, 0x2566, 0x2560, 0x2550, 0x256C, 0x2567,
    0x2568, 0x2564, 0x2565, 0x2559, 0x2558, 0x2552, 0x2553, 0x256B, // 0xD0
    0x256A, 0x2518, 0x250C, 0x2588, 0x2584, 0x258C, 0x2590, 0x2580,
    0x03B1, 0x00DF, 0x0393, 0x03C0, 0x03A3, 0x03C3, 0x00B5, 0x03C4, // 0xE0
    0x03A6, 0x0398, 0x03A9, 0x03B4, 0x221E, 0x03C6, 0x03B5, 0x2229,
    0x2261, 0x00B1, 0x2265, 0x2264, 0x2320, 0x2321, 0x00F7, 0x2248, // 0xF0
    0x00B0, 0x2219, 0x00B7, 0x221A, 0x207F, 0x00B2, 0x25A0, 0x00A0,
];

const CP850_HIGH: [u16; 128] = [
    0x00C7, 0x00FC, 0x00E9, 0x00E2, 0x00E4, 0x00E0, 0x00E5, 0x00E7, // 0x80
    0x00EA, 0x00EB, 0x00E8, 0x00EF, 0x00EE, 0x00EC, 0x00C4, 0x00C5,
    0x00C9, 0x00E6, 0x00C6, 0x00F4, 0x00F6, 0x00F2, 0x00FB, 0x00F9, // 0x90
    0x00FF, 0x00D6, 0x00DC, 0x00F8, 0x00A3, 0x00D8, 0x00D7, 0x0192,
    0x00E1, 0x00ED, 0x00F3, 0x00FA, 0x00F1, 0x00D1, 0x00AA, 0x00BA, // 0xA0
    0x00BF, 0x00AE, 0x00AC, 0x00BD, 0x00BC, 0x00A1, 0x00AB, 0x00BB,
    0x2591, 0x2592, 0x2593, 0x2502, 0x2524, 0x00C1, 0x00C2, 0x00C0, // 0xB0
    0x00A9, 0x2563, 0x2551, 0x2557, 0x255D, 0x00A2, 0x00A5, 0x2510,
    0x2514, 0x2534, 0x252C, 0x251C, 0x2500, 0x253C, 0x00E3, 0x00C3, // 0xC0
    0x255A, 0x2554, 0x2569, 0x2566, 0x2560, 0x2550, 0x256C, 0x00A4,
    0x00F0, 0x00D0, 0x00CA, 0x00CB, 0x00C8, 0x0131, 0x00CD, 0x00CE, // 0xD0
    0x00CF, 0x2518, 0x250C, 0x2588, 0x2584, 0x00A6, 0x00CC, 0x2580,
    0x00D3, 0x00DF, 0x00D4, 0x00D2, 0x00F5, 0x00D5, 0x00B5, 0x00FE, // 0xE0
    0x00DE, 0x00DA, 0x00DB, 0x00D9, 0x00FD, 0x00DD, 0x00AF, 0x00B4,
    0x00AD, 0x00B1, 0x2017, 0x00BE, 0x00B6, 0x00A7, 0x00F7, 0x00B8, // 0xF0
    0x00B0, 0x00A8, 0x00B7, 0x00B9, 0x00B3, 0x00B2, 0x25A0, 0x00A0,
];

const CP852_HIGH: [u16; 128] = [
    0x00C7, 0x00FC, 0x00E9, 0x00E2, 0x00E4, 0x016F, 0x0107, 0x00E7, // 0x80
    0x0142, 0x00EB, 0x0150, 0x0151, 0x00EE, 0x0179, 0x00C4, 0x0106,
    0x00C9, 0x0139, 0x013A, 0x00F4, 0x00F6, 0x013D, 0x013E, 0x015A, // 0x90
    0x015B, 0x00D6, 0x00DC, 0x0164, 0x0165, 0x0141, 0x00D7, 0x010D,
    0x00E1, 0x00ED, 0x00F3, 0x00FA, 0x0104, 0x0105, 0x017D, 0x017E, // 0xA0
    0x0118, 0x0119, 0x00AC, 0x017A, 0x010C, 0x015F, 0x00AB, 0x00BB,
    0x2591, 0x2592, 0x2593, 0x2502, 0x2524, 0x00C1, 0x00C2, 0x011A, // 0xB0
    0x015E, 0x2563, 0x2551, 0x2557, 0x255D, 0x017B, 0x017C, 0x2510,
    0x2514, 0x2534, 0x252C, 0x251C, 0x2500, 0x253C, 0x0102, 0x0103, // 0xC0
    0x255A, 0x2554, 0x2569, 0x2566, 0x2560, 0x2550, 0x256C, 0x00A4,
    0x0111, 0x0110, 0x010E, 0x00CB, 0x010F, 0x0147, 0x00CD, 0x00CE, // 0xD0
    0x011B, 0x2518, 0x250C, 0x2588, 0x2584, 0x0162, 0x016E, 0x2580,
    0x00D3, 0x00DF, 0x00D4, 0x0143, 0x0144, 0x0148, 0x0160, 0x0161, // 0xE0
    0x0154, 0x00DA, 0x0155, 0x0170, 0x00FD, 0x00DD, 0x0163, 0x00B4,
    0x00AD, 0x02DD, 0x02DB, 0x02C7, 0x02D8, 0x00A7, 0x00F7, 0x00B8, // 0xF0
    0x00B0, 0x00A8, 0x02D9, 0x0171, 0x0158, 0x0159, 0x25A0, 0x00A0,
];

const CP855_HIGH: [u16; 128] = [
    0x0452, 0x0402, 0x0453, 0x0403, 0x0451, 0x0401, 0x0454, 0x0404, // 0x80
    0x0455, 0x0405, 0x0456, 0x0406, 0x0457, 0x0407, 0x0458, 0x0408,
    0x0459, 0x0409, 0x045A, 0x040A, 0x045B, 0x040B, 0x045C, 0x040C, // 0x90
    0x045E, 0x040E, 0x045F, 0x040F, 0x044E, 0x042E, 0x044A, 0x042A,
    0x0430, 0x0410, 0x0431, 0x0411, 0x0446, 0x0426, 0x0434, 0x0414, // 0xA0
    0x0435, 0x0415, 0x0444, 0x0424, 0x0433, 0x0413, 0x00AB, 0x00BB,
    0x2591, 0x2592, 0x2593, 0x2502, 0x2524, 0x0445, 0x0425, 0x0438, // 0xB0
    0x0418, 0x2563, 0x2551, 0x2557, 0x255D, 0x0439, 0x0419, 0x2510,
    0x2514, 0x2534, 0x252C, 0x251C, 0x2500, 0x253C, 0x043A, 0x041A, // 0xC0
    0x255A, 0x2554, 0x2569, 0x2566, 0x2560, 0x2550, 0x256C, 0x00A4,
    0x043B, 0x041B, 0x043C, 0x041C, 0x043D, 0x041D, 0x043E, 0x041E, // 0xD0
    0x043F, 0x2518, 0x250C, 0x2588, 0x2584, 0x041F, 0x044F, 0x2580,
    0x042F, 0x0440, 0x0420, 0x0441, 0x0421, 0x0442, 0x0422, 0x0443, // 0xE0
    0x0423, 0x0436, 0x0416, 0x0432, 0x0412, 0x044C, 0x042C, 0x2116,
    0x00AD, 0x044B, 0x042B, 0x0437, 0x0417, 0x0448, 0x0428, 0x044D, // 0xF0
    0x042D, 0x0449, 0x0429, 0x0447, 0x0427, 0x00A7, 0x25A0, 0x00A0,
];

const LATIN1_HIGH: [u16; 128] = {
    let mut units = [0u16; 128];
    let mut i = 0;
    while i < 128 {
        units[i] = 0x80 + i as u16;
        i += 1;
    }
    units
};

/// EBCDIC US/Canada
pub(crate) static IBM037: CodePage = full(CP037);

/// EBCDIC Latin-1 open systems; moves `[ ] ^ ¬ Ý ¨` relative to 037
pub(crate) static IBM1047: CodePage = full(patch(
    CP037,
    0,
    &[
        (0x5F, 0x005E),
        (0xAD, 0x005B),
        (0xB0, 0x00AC),
        (0xBA, 0x00DD),
        (0xBB, 0x00A8),
        (0xBD, 0x005D),
    ],
));

/// EBCDIC US/Canada with the euro sign in place of ¤
pub(crate) static IBM01140: CodePage = full(patch(CP037, 0, &[(0x9F, 0x20AC)]));

/// DOS US
pub(crate) static IBM437: CodePage = ascii_with(CP437_HIGH);

/// DOS Western Europe
pub(crate) static IBM850: CodePage = ascii_with(CP850_HIGH);

/// DOS Central Europe
pub(crate) static IBM852: CodePage = ascii_with(CP852_HIGH);

/// DOS Cyrillic
pub(crate) static IBM855: CodePage = ascii_with(CP855_HIGH);

/// DOS Western Europe with the euro sign in place of dotless i
pub(crate) static IBM00858: CodePage = ascii_with(patch(CP850_HIGH, 0x80, &[(0xD5, 0x20AC)]));

/// DOS Portuguese
pub(crate) static IBM860: CodePage = ascii_with(patch(
    CP437_HIGH,
    0x80,
    &[
        (0x84, 0x00E3),
        (0x86, 0x00C1),
        (0x89, 0x00CA),
        (0x8B, 0x00CD),
        (0x8C, 0x00D4),
        (0x8E, 0x00C3),
        (0x8F, 0x00C2),
        (0x91, 0x00C0),
        (0x92, 0x00C8),
        (0x94, 0x00F5),
        (0x96, 0x00DA),
        (0x98, 0x00CC),
        (0x99, 0x00D5),
        (0x9D, 0x00D9),
        (0x9F, 0x00D3),
        (0xA9, 0x00D2),
    ],
));

/// DOS Hebrew; the 27 letters replace 0x80..=0x9A
pub(crate) static IBM862: CodePage = ascii_with({
    let mut units = CP437_HIGH;
    let mut i = 0;
    while i < 27 {
        units[i] = 0x05D0 + i as u16;
        i += 1;
    }
    units
});

/// DOS Canadian French
pub(crate) static IBM863: CodePage = ascii_with(patch(
    CP437_HIGH,
    0x80,
    &[
        (0x84, 0x00C2),
        (0x86, 0x00B6),
        (0x8D, 0x2017),
        (0x8E, 0x00C0),
        (0x8F, 0x00A7),
        (0x91, 0x00C8),
        (0x92, 0x00CA),
        (0x94, 0x00CB),
        (0x95, 0x00CF),
        (0x98, 0x00A4),
        (0x99, 0x00D4),
        (0x9D, 0x00D9),
        (0x9E, 0x00DB),
        (0xA0, 0x00A6),
        (0xA1, 0x00B4),
        (0xA4, 0x00A8),
        (0xA5, 0x00B8),
        (0xA6, 0x00B3),
        (0xA7, 0x00AF),
        (0xA8, 0x00CE),
        (0xAD, 0x00BE),
    ],
));

/// DOS Nordic
pub(crate) static IBM865: CodePage = ascii_with(patch(
    CP437_HIGH,
    0x80,
    &[(0x9B, 0x00F8), (0x9D, 0x00D8), (0xAF, 0x00A4)],
));

/// Latin-5 (Turkish): Latin-1 with six Turkish letters
pub(crate) static ISO_8859_9: CodePage = ascii_with(patch(
    LATIN1_HIGH,
    0x80,
    &[
        (0xD0, 0x011E),
        (0xDD, 0x0130),
        (0xDE, 0x015E),
        (0xF0, 0x011F),
        (0xFD, 0x0131),
        (0xFE, 0x015F),
    ],
));
