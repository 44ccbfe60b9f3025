//! Character classification for identifiers, whitespace, and line terminators.
//!
//! Basic Multilingual Plane characters are classified through the standard
//! library's Unicode properties plus the ECMAScript-specific carve-outs
//! (Other_ID_Start, Other_ID_Continue, Pattern_Syntax exclusions).
//! Supplementary-plane ("astral") code points are classified against
//! run-length range tables, since `char::is_alphabetic` does not track the
//! ID_Start/ID_Continue properties there.

/// Supplementary-plane ID_Start ranges as (first, last) code point pairs,
/// sorted by first code point.
const ASTRAL_ID_START: &[(u32, u32)] = &[
    (0x10000, 0x1000B), // Linear B syllabary
    (0x1000D, 0x10026),
    (0x10028, 0x1003A),
    (0x1003C, 0x1003D),
    (0x1003F, 0x1004D),
    (0x10050, 0x1005D),
    (0x10080, 0x100FA), // Linear B ideograms
    (0x10280, 0x1029C), // Lycian
    (0x102A0, 0x102D0), // Carian
    (0x10300, 0x1031F), // Old Italic
    (0x10330, 0x10340), // Gothic
    (0x10342, 0x10349),
    (0x10350, 0x10375), // Old Permic
    (0x10380, 0x1039D), // Ugaritic
    (0x103A0, 0x103C3), // Old Persian
    (0x103C8, 0x103CF),
    (0x10400, 0x1049D), // Deseret, Shavian, Osmanya
    (0x104B0, 0x104D3), // Osage
    (0x104D8, 0x104FB),
    (0x10500, 0x10527), // Elbasan
    (0x10530, 0x10563), // Caucasian Albanian
    (0x10600, 0x10736), // Linear A
    (0x10740, 0x10755),
    (0x10760, 0x10767),
    (0x10800, 0x10805), // Cypriot
    (0x1080A, 0x10835),
    (0x10837, 0x10838),
    (0x1083F, 0x10855), // Imperial Aramaic
    (0x10860, 0x10876), // Palmyrene
    (0x10880, 0x1089E), // Nabataean
    (0x108E0, 0x108F2), // Hatran
    (0x10900, 0x10915), // Phoenician
    (0x10920, 0x10939), // Lydian
    (0x10980, 0x109B7), // Meroitic
    (0x109BE, 0x109BF),
    (0x10A00, 0x10A00), // Kharoshthi
    (0x10A10, 0x10A13),
    (0x10A15, 0x10A17),
    (0x10A19, 0x10A35),
    (0x10A60, 0x10A7C), // Old South Arabian
    (0x10A80, 0x10A9C), // Old North Arabian
    (0x10AC0, 0x10AC7), // Manichaean
    (0x10AC9, 0x10AE4),
    (0x10B00, 0x10B35), // Avestan
    (0x10B40, 0x10B55), // Inscriptional Parthian
    (0x10B60, 0x10B72), // Inscriptional Pahlavi
    (0x10B80, 0x10B91), // Psalter Pahlavi
    (0x10C00, 0x10C48), // Old Turkic
    (0x10C80, 0x10CB2), // Old Hungarian
    (0x10CC0, 0x10CF2),
    (0x10D00, 0x10D23), // Hanifi Rohingya
    (0x10F00, 0x10F1C), // Old Sogdian
    (0x10F27, 0x10F27),
    (0x10F30, 0x10F45), // Sogdian
    (0x11003, 0x11037), // Brahmi
    (0x11083, 0x110AF), // Kaithi
    (0x110D0, 0x110E8), // Sora Sompeng
    (0x11103, 0x11126), // Chakma
    (0x11150, 0x11172), // Mahajani
    (0x11183, 0x111B2), // Sharada
    (0x11200, 0x11211), // Khojki
    (0x11213, 0x1122B),
    (0x11280, 0x11286), // Multani
    (0x112B0, 0x112DE), // Khudawadi
    (0x11305, 0x1130C), // Grantha
    (0x11400, 0x11434), // Newa
    (0x11480, 0x114AF), // Tirhuta
    (0x11580, 0x115AE), // Siddham
    (0x11600, 0x1162F), // Modi
    (0x11680, 0x116AA), // Takri
    (0x11700, 0x1171A), // Ahom
    (0x11800, 0x1182B), // Dogra
    (0x118A0, 0x118DF), // Warang Citi
    (0x11A00, 0x11A00), // Zanabazar Square
    (0x11A0B, 0x11A32),
    (0x11A3A, 0x11A3A),
    (0x11A50, 0x11A50), // Soyombo
    (0x11A5C, 0x11A89),
    (0x11AC0, 0x11AF8), // Pau Cin Hau
    (0x11C00, 0x11C08), // Bhaiksuki
    (0x11C0A, 0x11C2E),
    (0x11C72, 0x11C8F), // Marchen
    (0x11D00, 0x11D06), // Masaram Gondi
    (0x11D08, 0x11D09),
    (0x11D0B, 0x11D30),
    (0x11D60, 0x11D65), // Gunjala Gondi
    (0x11D67, 0x11D68),
    (0x11D6A, 0x11D89),
    (0x11EE0, 0x11EF2), // Makasar
    (0x12000, 0x12399), // Cuneiform
    (0x12480, 0x12543), // Early Dynastic Cuneiform
    (0x13000, 0x1342E), // Egyptian hieroglyphs
    (0x14400, 0x14646), // Anatolian hieroglyphs
    (0x16800, 0x16A38), // Bamum supplement
    (0x16A40, 0x16A5E), // Mro
    (0x16AD0, 0x16AED), // Bassa Vah
    (0x16B00, 0x16B2F), // Pahawh Hmong
    (0x16B40, 0x16B43),
    (0x16B63, 0x16B77),
    (0x16B7D, 0x16B8F),
    (0x16E40, 0x16E7F), // Medefaidrin
    (0x16F00, 0x16F44), // Miao
    (0x16F50, 0x16F50),
    (0x16F93, 0x16F9F),
    (0x16FE0, 0x16FE1),
    (0x17000, 0x187F1), // Tangut
    (0x18800, 0x18AF2), // Tangut components
    (0x1B000, 0x1B11E), // Kana supplement
    (0x1B170, 0x1B2FB), // Nushu
    (0x1BC00, 0x1BC6A), // Duployan
    (0x1BC70, 0x1BC7C),
    (0x1BC80, 0x1BC88),
    (0x1BC90, 0x1BC99),
    (0x1D400, 0x1D454), // Mathematical alphanumeric symbols
    (0x1D456, 0x1D49C),
    (0x1D49E, 0x1D49F),
    (0x1D4A2, 0x1D4A2),
    (0x1D4A5, 0x1D4A6),
    (0x1D4A9, 0x1D4AC),
    (0x1D4AE, 0x1D4B9),
    (0x1D4BB, 0x1D4BB),
    (0x1D4BD, 0x1D4C3),
    (0x1D4C5, 0x1D505),
    (0x1D507, 0x1D50A),
    (0x1D50D, 0x1D514),
    (0x1D516, 0x1D51C),
    (0x1D51E, 0x1D539),
    (0x1D53B, 0x1D53E),
    (0x1D540, 0x1D544),
    (0x1D546, 0x1D546),
    (0x1D54A, 0x1D550),
    (0x1D552, 0x1D6A5),
    (0x1D6A8, 0x1D6C0),
    (0x1D6C2, 0x1D6DA),
    (0x1D6DC, 0x1D6FA),
    (0x1D6FC, 0x1D714),
    (0x1D716, 0x1D734),
    (0x1D736, 0x1D74E),
    (0x1D750, 0x1D76E),
    (0x1D770, 0x1D788),
    (0x1D78A, 0x1D7A8),
    (0x1D7AA, 0x1D7C2),
    (0x1D7C4, 0x1D7CB),
    (0x1E800, 0x1E8C4), // Mende Kikakui
    (0x1E900, 0x1E943), // Adlam
    (0x1EE00, 0x1EE03), // Arabic mathematical alphabetic symbols
    (0x1EE05, 0x1EE1F),
    (0x1EE21, 0x1EE22),
    (0x20000, 0x2A6DF), // CJK unified ideographs extension B
    (0x2A700, 0x2B738), // CJK extension C
    (0x2B740, 0x2B81D), // CJK extension D
    (0x2B820, 0x2CEA1), // CJK extension E
    (0x2CEB0, 0x2EBE0), // CJK extension F
    (0x2F800, 0x2FA1D), // CJK compatibility ideographs supplement
    (0x30000, 0x3134A), // CJK extension G
];

/// Additional supplementary-plane ID_Continue ranges (marks and digits);
/// ID_Continue is the union of these with [`ASTRAL_ID_START`].
const ASTRAL_ID_CONTINUE_EXTRA: &[(u32, u32)] = &[
    (0x101FD, 0x101FD), // Phaistos disc combining stroke
    (0x102E0, 0x102E0), // Coptic epact thousands mark
    (0x10376, 0x1037A), // Old Permic combining letters
    (0x104A0, 0x104A9), // Osmanya digits
    (0x10A01, 0x10A03), // Kharoshthi vowels
    (0x10A05, 0x10A06),
    (0x10A0C, 0x10A0F),
    (0x10A38, 0x10A3A),
    (0x10A3F, 0x10A3F),
    (0x10AE5, 0x10AE6), // Manichaean abbreviation marks
    (0x10D24, 0x10D27), // Hanifi Rohingya marks
    (0x10D30, 0x10D39), // Hanifi Rohingya digits
    (0x10F46, 0x10F50), // Sogdian combining signs
    (0x11000, 0x11002), // Brahmi signs
    (0x11038, 0x11046),
    (0x11066, 0x1106F), // Brahmi digits
    (0x11073, 0x11074),
    (0x1107F, 0x11082),
    (0x110B0, 0x110BA), // Kaithi signs
    (0x110F0, 0x110F9), // Sora Sompeng digits
    (0x11100, 0x11102), // Chakma signs
    (0x11127, 0x11134),
    (0x11136, 0x1113F), // Chakma digits
    (0x11145, 0x11146),
    (0x11173, 0x11173),
    (0x11180, 0x11182), // Sharada signs
    (0x111B3, 0x111C0),
    (0x111C9, 0x111CC),
    (0x111D0, 0x111D9), // Sharada digits
    (0x11212, 0x11212),
    (0x1122C, 0x11237), // Khojki signs
    (0x1123E, 0x1123E),
    (0x112DF, 0x112EA), // Khudawadi signs
    (0x112F0, 0x112F9), // Khudawadi digits
    (0x11300, 0x11303), // Grantha signs
    (0x1133B, 0x1133C),
    (0x11435, 0x11446), // Newa signs
    (0x11450, 0x11459), // Newa digits
    (0x114B0, 0x114C3), // Tirhuta signs
    (0x114D0, 0x114D9), // Tirhuta digits
    (0x115AF, 0x115B5), // Siddham signs
    (0x115B8, 0x115C0),
    (0x115DC, 0x115DD),
    (0x11630, 0x11640), // Modi signs
    (0x11650, 0x11659), // Modi digits
    (0x116AB, 0x116B7), // Takri signs
    (0x116C0, 0x116C9), // Takri digits
    (0x1171D, 0x1172B), // Ahom signs
    (0x11730, 0x11739), // Ahom digits
    (0x1182C, 0x1183A), // Dogra signs
    (0x118E0, 0x118E9), // Warang Citi digits
    (0x11A01, 0x11A0A), // Zanabazar Square vowels
    (0x11A33, 0x11A39),
    (0x11A3B, 0x11A3E),
    (0x11A47, 0x11A47),
    (0x11A51, 0x11A5B), // Soyombo vowels
    (0x11A8A, 0x11A99),
    (0x11C09, 0x11C09),
    (0x11C2F, 0x11C36), // Bhaiksuki signs
    (0x11C38, 0x11C40),
    (0x11C50, 0x11C59), // Bhaiksuki digits
    (0x11C92, 0x11CA7), // Marchen subjoined letters
    (0x11CA9, 0x11CB6),
    (0x11D07, 0x11D07),
    (0x11D0A, 0x11D0A),
    (0x11D31, 0x11D36), // Masaram Gondi signs
    (0x11D3A, 0x11D3A),
    (0x11D3C, 0x11D3D),
    (0x11D3F, 0x11D45),
    (0x11D47, 0x11D47),
    (0x11D50, 0x11D59), // Masaram Gondi digits
    (0x11D8A, 0x11D8E), // Gunjala Gondi signs
    (0x11D90, 0x11D91),
    (0x11D93, 0x11D97),
    (0x11DA0, 0x11DA9), // Gunjala Gondi digits
    (0x11EF3, 0x11EF6), // Makasar vowels
    (0x16A60, 0x16A69), // Mro digits
    (0x16AF0, 0x16AF4), // Bassa Vah tones
    (0x16B30, 0x16B36), // Pahawh Hmong marks
    (0x16B50, 0x16B59), // Pahawh Hmong digits
    (0x16F51, 0x16F87), // Miao vowels
    (0x16F8F, 0x16F92), // Miao tones
    (0x1BC9D, 0x1BC9E), // Duployan marks
    (0x1D165, 0x1D169), // Musical combining marks
    (0x1D16D, 0x1D172),
    (0x1D17B, 0x1D182),
    (0x1D185, 0x1D18B),
    (0x1D1AA, 0x1D1AD),
    (0x1D242, 0x1D244),
    (0x1D7CE, 0x1D7FF), // Mathematical digits
    (0x1DA00, 0x1DA36), // SignWriting marks
    (0x1DA3B, 0x1DA6C),
    (0x1DA75, 0x1DA75),
    (0x1DA84, 0x1DA84),
    (0x1DA9B, 0x1DA9F),
    (0x1DAA1, 0x1DAAF),
    (0x1E000, 0x1E006), // Glagolitic supplement
    (0x1E008, 0x1E018),
    (0x1E01B, 0x1E021),
    (0x1E023, 0x1E024),
    (0x1E026, 0x1E02A),
    (0x1E8D0, 0x1E8D6), // Mende Kikakui digits and marks
    (0x1E944, 0x1E94A), // Adlam marks
    (0x1E950, 0x1E959), // Adlam digits
    (0xE0100, 0xE01EF), // Variation selectors supplement
];

fn in_astral_set(code: u32, set: &[(u32, u32)]) -> bool {
    set.binary_search_by(|&(first, last)| {
        if last < code {
            std::cmp::Ordering::Less
        } else if first > code {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    })
    .is_ok()
}

/// Check if a character may start an identifier.
///
/// Covers `$`, `_`, Unicode ID_Start and the Other_ID_Start exceptions,
/// excluding Pattern_Syntax characters.
pub fn is_id_start(ch: char) -> bool {
    if ch.is_ascii() {
        return ch == '$' || ch == '_' || ch.is_ascii_alphabetic();
    }
    let code = ch as u32;
    if code >= 0x10000 {
        return in_astral_set(code, ASTRAL_ID_START);
    }
    if is_pattern_syntax(ch) {
        return false;
    }
    ch.is_alphabetic() || is_other_id_start(ch)
}

/// Check if a character may continue an identifier.
///
/// ID_Continue adds marks, digits, connector punctuation, ZWJ, and ZWNJ on
/// top of ID_Start.
pub fn is_id_continue(ch: char) -> bool {
    if ch.is_ascii() {
        return ch == '$' || ch == '_' || ch.is_ascii_alphanumeric();
    }
    let code = ch as u32;
    if code >= 0x10000 {
        return in_astral_set(code, ASTRAL_ID_START)
            || in_astral_set(code, ASTRAL_ID_CONTINUE_EXTRA);
    }
    if is_pattern_syntax(ch) {
        return false;
    }
    ch.is_alphanumeric()
        || is_other_id_start(ch)
        || is_other_id_continue(ch)
        || is_bmp_mark_or_connector(ch)
        || ch == '\u{200C}'
        || ch == '\u{200D}'
}

/// Characters with the Other_ID_Start property.
fn is_other_id_start(ch: char) -> bool {
    matches!(ch, '\u{2118}' | '\u{212E}' | '\u{309B}' | '\u{309C}')
}

/// Characters with the Other_ID_Continue property.
fn is_other_id_continue(ch: char) -> bool {
    matches!(ch,
        '\u{00B7}'
        | '\u{0387}'
        | '\u{1369}'..='\u{1371}'
        | '\u{19DA}')
}

/// Combining marks and connector punctuation in the BMP that are valid
/// identifier continuations but are not alphanumeric.
fn is_bmp_mark_or_connector(ch: char) -> bool {
    let code = ch as u32;
    matches!(code,
        0x0300..=0x036F   // combining diacritical marks
        | 0x0483..=0x0489 // Cyrillic marks
        | 0x0591..=0x05BD // Hebrew points
        | 0x05BF
        | 0x05C1..=0x05C2
        | 0x05C4..=0x05C5
        | 0x05C7
        | 0x0610..=0x061A // Arabic marks
        | 0x064B..=0x065F
        | 0x0670
        | 0x06D6..=0x06DC
        | 0x06DF..=0x06E4
        | 0x06E7..=0x06E8
        | 0x06EA..=0x06ED
        | 0x0711
        | 0x0730..=0x074A // Syriac marks
        | 0x07A6..=0x07B0 // Thaana marks
        | 0x07EB..=0x07F3 // NKo marks
        | 0x0816..=0x0819 // Samaritan marks
        | 0x081B..=0x0823
        | 0x0825..=0x0827
        | 0x0829..=0x082D
        | 0x0859..=0x085B // Mandaic marks
        | 0x08D4..=0x08E1 // Arabic extended marks
        | 0x08E3..=0x0903
        | 0x093A..=0x093C // Devanagari marks
        | 0x093E..=0x094F
        | 0x0951..=0x0957
        | 0x0962..=0x0963
        | 0x0981..=0x0983 // Bengali marks
        | 0x09BC
        | 0x09BE..=0x09C4
        | 0x09C7..=0x09C8
        | 0x09CB..=0x09CD
        | 0x09D7
        | 0x09E2..=0x09E3
        | 0x0A01..=0x0A03 // Gurmukhi marks
        | 0x0A3C
        | 0x0A3E..=0x0A42
        | 0x0A47..=0x0A48
        | 0x0A4B..=0x0A4D
        | 0x0A51
        | 0x0A70..=0x0A71
        | 0x0A75
        | 0x0A81..=0x0A83 // Gujarati marks
        | 0x0ABC
        | 0x0ABE..=0x0AC5
        | 0x0AC7..=0x0AC9
        | 0x0ACB..=0x0ACD
        | 0x0AE2..=0x0AE3
        | 0x0B01..=0x0B03 // Oriya marks
        | 0x0B3C
        | 0x0B3E..=0x0B44
        | 0x0B47..=0x0B48
        | 0x0B4B..=0x0B4D
        | 0x0B56..=0x0B57
        | 0x0B62..=0x0B63
        | 0x0B82         // Tamil marks
        | 0x0BBE..=0x0BC2
        | 0x0BC6..=0x0BC8
        | 0x0BCA..=0x0BCD
        | 0x0BD7
        | 0x0C00..=0x0C03 // Telugu marks
        | 0x0C3E..=0x0C44
        | 0x0C46..=0x0C48
        | 0x0C4A..=0x0C4D
        | 0x0C55..=0x0C56
        | 0x0C62..=0x0C63
        | 0x0C81..=0x0C83 // Kannada marks
        | 0x0CBC
        | 0x0CBE..=0x0CC4
        | 0x0CC6..=0x0CC8
        | 0x0CCA..=0x0CCD
        | 0x0CD5..=0x0CD6
        | 0x0CE2..=0x0CE3
        | 0x0D00..=0x0D03 // Malayalam marks
        | 0x0D3B..=0x0D3C
        | 0x0D3E..=0x0D44
        | 0x0D46..=0x0D48
        | 0x0D4A..=0x0D4D
        | 0x0D57
        | 0x0D62..=0x0D63
        | 0x0D82..=0x0D83 // Sinhala marks
        | 0x0DCA
        | 0x0DCF..=0x0DD4
        | 0x0DD6
        | 0x0DD8..=0x0DDF
        | 0x0DF2..=0x0DF3
        | 0x0E31         // Thai marks
        | 0x0E34..=0x0E3A
        | 0x0E47..=0x0E4E
        | 0x0EB1         // Lao marks
        | 0x0EB4..=0x0EBC
        | 0x0EC8..=0x0ECD
        | 0x0F18..=0x0F19 // Tibetan marks
        | 0x0F35
        | 0x0F37
        | 0x0F39
        | 0x0F3E..=0x0F3F
        | 0x0F71..=0x0F84
        | 0x0F86..=0x0F87
        | 0x0F8D..=0x0F97
        | 0x0F99..=0x0FBC
        | 0x0FC6
        | 0x102B..=0x103E // Myanmar marks
        | 0x1056..=0x1059
        | 0x105E..=0x1060
        | 0x1062..=0x1064
        | 0x1067..=0x106D
        | 0x1071..=0x1074
        | 0x1082..=0x108D
        | 0x108F
        | 0x109A..=0x109D
        | 0x135D..=0x135F // Ethiopic marks
        | 0x1712..=0x1714 // Tagalog marks
        | 0x1732..=0x1734
        | 0x1752..=0x1753
        | 0x1772..=0x1773
        | 0x17B4..=0x17D3 // Khmer marks
        | 0x17DD
        | 0x180B..=0x180D // Mongolian variation selectors
        | 0x1885..=0x1886
        | 0x18A9
        | 0x1920..=0x192B // Limbu marks
        | 0x1930..=0x193B
        | 0x1A17..=0x1A1B // Buginese marks
        | 0x1A55..=0x1A5E // Tai Tham marks
        | 0x1A60..=0x1A7C
        | 0x1A7F
        | 0x1AB0..=0x1ABD // combining diacritical marks extended
        | 0x1B00..=0x1B04 // Balinese marks
        | 0x1B34..=0x1B44
        | 0x1B6B..=0x1B73
        | 0x1B80..=0x1B82 // Sundanese marks
        | 0x1BA1..=0x1BAD
        | 0x1BE6..=0x1BF3 // Batak marks
        | 0x1C24..=0x1C37 // Lepcha marks
        | 0x1CD0..=0x1CD2 // Vedic marks
        | 0x1CD4..=0x1CE8
        | 0x1CED
        | 0x1CF2..=0x1CF4
        | 0x1CF7..=0x1CF9
        | 0x1DC0..=0x1DF9 // combining diacritical marks supplement
        | 0x1DFB..=0x1DFF
        | 0x203F..=0x2040 // undertie, character tie
        | 0x2054          // inverted undertie
        | 0x20D0..=0x20DC // combining marks for symbols
        | 0x20E1
        | 0x20E5..=0x20F0
        | 0x2CEF..=0x2CF1 // Coptic marks
        | 0x2D7F          // Tifinagh consonant joiner
        | 0x2DE0..=0x2DFF // Cyrillic extended marks
        | 0x302A..=0x302F // ideographic tone marks
        | 0x3099..=0x309A // kana voicing marks
        | 0xA66F          // Cyrillic vzmet
        | 0xA674..=0xA67D
        | 0xA69E..=0xA69F
        | 0xA6F0..=0xA6F1 // Bamum marks
        | 0xA802          // Syloti Nagri marks
        | 0xA806
        | 0xA80B
        | 0xA823..=0xA827
        | 0xA880..=0xA881 // Saurashtra marks
        | 0xA8B4..=0xA8C5
        | 0xA8E0..=0xA8F1 // Devanagari extended marks
        | 0xA926..=0xA92D // Kayah Li marks
        | 0xA947..=0xA953 // Rejang marks
        | 0xA980..=0xA983 // Javanese marks
        | 0xA9B3..=0xA9C0
        | 0xA9E5          // Myanmar extended mark
        | 0xAA29..=0xAA36 // Cham marks
        | 0xAA43
        | 0xAA4C..=0xAA4D
        | 0xAA7B..=0xAA7D // Myanmar tone marks
        | 0xAAB0
        | 0xAAB2..=0xAAB4
        | 0xAAB7..=0xAAB8
        | 0xAABE..=0xAABF
        | 0xAAC1
        | 0xAAEB..=0xAAEF // Meetei Mayek marks
        | 0xAAF5..=0xAAF6
        | 0xABE3..=0xABEA
        | 0xABEC..=0xABED
        | 0xFB1E          // Hebrew point judeo-spanish varika
        | 0xFE00..=0xFE0F // variation selectors
        | 0xFE20..=0xFE2F // combining half marks
        | 0xFE33..=0xFE34 // vertical low lines
        | 0xFE4D..=0xFE4F // dashed/centreline/wavy low line
        | 0xFF3F)         // fullwidth low line
}

/// Pattern_Syntax characters can never appear in identifiers even when
/// other classifications would admit them.
fn is_pattern_syntax(ch: char) -> bool {
    let code = ch as u32;
    matches!(code,
        0x00A1..=0x00A7
        | 0x00A9
        | 0x00AB..=0x00AC
        | 0x00AE
        | 0x00B0..=0x00B1
        | 0x00B6
        | 0x00BB
        | 0x00BF
        | 0x00D7
        | 0x00F7
        | 0x2010..=0x2027
        | 0x2030..=0x203E
        | 0x2041..=0x2053
        | 0x2055..=0x205E
        | 0x2190..=0x245F
        | 0x2500..=0x2775
        | 0x2794..=0x2BFF
        | 0x2E00..=0x2E7F
        | 0x3001..=0x3003
        | 0x3008..=0x3020
        | 0x3030
        | 0xFD3E..=0xFD3F
        | 0xFE45..=0xFE46)
}

/// Line terminators per the ECMAScript lexical grammar.
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace (excluding line terminators) per the lexical grammar:
/// tab, VT, FF, space, NBSP, ZWNBSP, and Unicode space separators.
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch,
        '\u{0009}' | '\u{000B}' | '\u{000C}' | ' ' | '\u{00A0}' | '\u{FEFF}'
        | '\u{1680}'
        | '\u{2000}'..='\u{200A}'
        | '\u{202F}'
        | '\u{205F}'
        | '\u{3000}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_id_start() {
        assert!(is_id_start('a'));
        assert!(is_id_start('Z'));
        assert!(is_id_start('$'));
        assert!(is_id_start('_'));
        assert!(!is_id_start('1'));
        assert!(!is_id_start('-'));
    }

    #[test]
    fn test_ascii_id_continue() {
        assert!(is_id_continue('a'));
        assert!(is_id_continue('9'));
        assert!(is_id_continue('$'));
        assert!(!is_id_continue('-'));
        assert!(!is_id_continue(' '));
    }

    #[test]
    fn test_bmp_letters() {
        assert!(is_id_start('é'));
        assert!(is_id_start('Ω'));
        assert!(is_id_start('中'));
        assert!(is_id_continue('é'));
    }

    #[test]
    fn test_combining_marks_continue_only() {
        let mark = '\u{0301}'; // combining acute accent
        assert!(!is_id_start(mark));
        assert!(is_id_continue(mark));
    }

    #[test]
    fn test_zwj_zwnj_continue_only() {
        assert!(is_id_continue('\u{200C}'));
        assert!(is_id_continue('\u{200D}'));
        assert!(!is_id_start('\u{200C}'));
    }

    #[test]
    fn test_astral_id_start() {
        // Deseret capital long I
        assert!(is_id_start('\u{10400}'));
        // CJK extension B
        assert!(is_id_start('\u{20000}'));
        // Mathematical digits continue but do not start
        assert!(!is_id_start('\u{1D7CE}'));
        assert!(is_id_continue('\u{1D7CE}'));
    }

    #[test]
    fn test_other_id_start_exceptions() {
        assert!(is_id_start('\u{2118}'));
        assert!(is_id_start('\u{212E}'));
    }

    #[test]
    fn test_line_terminators() {
        assert!(is_line_terminator('\n'));
        assert!(is_line_terminator('\r'));
        assert!(is_line_terminator('\u{2028}'));
        assert!(is_line_terminator('\u{2029}'));
        assert!(!is_line_terminator(' '));
    }

    #[test]
    fn test_whitespace() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\t'));
        assert!(is_whitespace('\u{00A0}'));
        assert!(is_whitespace('\u{FEFF}'));
        assert!(!is_whitespace('\n'));
    }
}
