//! WinAnsi (Windows-1252) encoding, the single-byte encoding every face
//! in the library is measured and written in.

/// Code points for 0x80..=0x9F; `None` marks the five unassigned slots.
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Byte for `ch`, or `?` when WinAnsi has no slot for it.
pub fn encode_char(ch: char) -> u8 {
    match ch {
        '\t' | '\n' | '\r' => b' ',
        ' '..='~' => ch as u8,
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|slot| *slot == Some(ch))
            .map(|offset| 0x80 + offset as u8)
            .unwrap_or(b'?'),
    }
}

/// The character a WinAnsi byte stands for, for the printable range.
pub fn decode_win_ansi(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E => Some(code as char),
        0x80..=0x9F => HIGH_CONTROL_RANGE[(code - 0x80) as usize],
        0xA0..=0xFF => char::from_u32(code as u32),
        _ => None,
    }
}

pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}
