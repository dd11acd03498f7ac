//! Windows-1252 (WinAnsi) coverage of the standard PDF fonts.
//!
//! The standard fonts can only show characters of this code page; anything
//! else must be replaced before the text reaches the composition library,
//! which refuses to print it.

use std::borrow::Cow;

/// Characters of the 0x80-0x9F range; `None` marks the five unassigned codes
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('\u{20ac}'), // 0x80 €
    None,
    Some('\u{201a}'), // ‚
    Some('\u{0192}'), // ƒ
    Some('\u{201e}'), // „
    Some('\u{2026}'), // …
    Some('\u{2020}'), // †
    Some('\u{2021}'), // ‡
    Some('\u{02c6}'), // ˆ
    Some('\u{2030}'), // ‰
    Some('\u{0160}'), // Š
    Some('\u{2039}'), // ‹
    Some('\u{0152}'), // Œ
    None,
    Some('\u{017d}'), // Ž
    None,
    None, // 0x90
    Some('\u{2018}'), // ‘
    Some('\u{2019}'), // ’
    Some('\u{201c}'), // “
    Some('\u{201d}'), // ”
    Some('\u{2022}'), // •
    Some('\u{2013}'), // –
    Some('\u{2014}'), // em dash
    Some('\u{02dc}'), // ˜
    Some('\u{2122}'), // ™
    Some('\u{0161}'), // š
    Some('\u{203a}'), // ›
    Some('\u{0153}'), // œ
    None,
    Some('\u{017e}'), // ž
    Some('\u{0178}'), // Ÿ
];

/// Code of `ch` in Windows-1252, if it has one
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    match ch as u32 {
        code @ (0x20..=0x7e | 0xa0..=0xff) => Some(code as u8),
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|candidate| *candidate == Some(ch))
            .map(|index| 0x80 + index as u8),
    }
}

/// Close WinAnsi stand-in for common characters outside the code page
fn substitute(ch: char) -> char {
    match ch {
        '\u{2010}' | '\u{2011}' | '\u{2212}' => '-',
        '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{200a}' | '\t' | '\n' | '\r' => ' ',
        '\u{202f}' => '\u{a0}',
        '\u{2032}' => '\'',
        '\u{2033}' => '"',
        _ => '?',
    }
}

/// `text` with every character the standard fonts cannot show replaced
pub fn to_win_ansi(text: &str) -> Cow<'_, str> {
    if text.chars().all(|ch| win_ansi_byte(ch).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|ch| match win_ansi_byte(ch) {
                Some(_) => ch,
                None => substitute(ch),
            })
            .collect(),
    )
}
