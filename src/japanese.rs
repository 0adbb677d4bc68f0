//! Kana classification and script shifting.
//!
//! Hiragana and katakana letters live in two blocks that mirror each other:
//! a katakana letter is always the hiragana letter plus 0x60. Only codepoints
//! that have a counterpart on the other side are shifted, so symbols such as
//! `ー`, `・`, `ゟ` or `ヷ` are left alone.

use std::borrow::Cow;

const KANA_OFFSET: u32 = 0x60;

/// Which side of the kana mirror a codepoint is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KanaScript {
    Hiragana,
    Katakana,
    Other,
}

impl KanaScript {
    pub fn of(ch: char) -> Self {
        match ch {
            // ぁ..ゖ and the iteration marks ゝゞ
            '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309E}' => Self::Hiragana,
            // ァ..ヶ and the iteration marks ヽヾ
            '\u{30A1}'..='\u{30F6}' | '\u{30FD}'..='\u{30FE}' => Self::Katakana,
            _ => Self::Other,
        }
    }
}

#[inline]
pub fn is_hiragana(ch: char) -> bool {
    KanaScript::of(ch) == KanaScript::Hiragana
}

#[inline]
pub fn is_katakana(ch: char) -> bool {
    KanaScript::of(ch) == KanaScript::Katakana
}

#[inline]
fn shift(ch: char, up: bool) -> char {
    let code = ch as u32;
    let shifted = if up {
        code + KANA_OFFSET
    } else {
        code - KANA_OFFSET
    };
    char::from_u32(shifted).unwrap_or(ch)
}

/// Converts every hiragana letter into its katakana counterpart.
pub fn to_katakana(s: &str) -> String {
    s.chars()
        .map(|ch| if is_hiragana(ch) { shift(ch, true) } else { ch })
        .collect()
}

/// Converts every katakana letter into its hiragana counterpart.
pub fn to_hiragana(s: &str) -> String {
    s.chars()
        .map(|ch| if is_katakana(ch) { shift(ch, false) } else { ch })
        .collect()
}

#[inline]
fn is_halfwidth_kana(c: char) -> bool {
    ('\u{FF65}'..='\u{FF9F}').contains(&c)
}

/// Full width forms of U+FF65..=U+FF9D in codepoint order.
const HALFWIDTH_KANA: [char; 57] = [
    '・', 'ヲ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ッ', 'ー', 'ア', 'イ', 'ウ',
    'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ', 'チ', 'ツ',
    'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ', 'ム',
    'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ン',
];

/// Returns the katakana with a dakuten applied, if such a letter exists.
fn voiced(ch: char) -> Option<char> {
    let code = ch as u32;
    let composed = match ch {
        'ウ' => 'ヴ',
        'ワ' => 'ヷ',
        'ヲ' => 'ヺ',
        // カ..チ alternate plain/voiced
        'カ'..='チ' if (code - 0x30AB) % 2 == 0 => return char::from_u32(code + 1),
        'ツ' | 'テ' | 'ト' => return char::from_u32(code + 1),
        // ハ..ホ come in plain/voiced/semi-voiced triples
        'ハ'..='ホ' if (code - 0x30CF) % 3 == 0 => return char::from_u32(code + 1),
        _ => return None,
    };
    Some(composed)
}

/// Returns the katakana with a handakuten applied, if such a letter exists.
fn semi_voiced(ch: char) -> Option<char> {
    let code = ch as u32;
    match ch {
        'ハ'..='ホ' if (code - 0x30CF) % 3 == 0 => char::from_u32(code + 2),
        _ => None,
    }
}

/// Folds half-width katakana into full-width katakana.
///
/// A half-width (semi-)voiced mark is merged into the preceding kana when a
/// composed letter exists, otherwise it becomes the standalone `゛` or `゜`.
/// The input is borrowed back when there is nothing to fold.
pub fn fold_halfwidth_kana(input: &str) -> Cow<'_, str> {
    let Some(index) = input.find(is_halfwidth_kana) else {
        return Cow::Borrowed(input);
    };
    let mut output = String::from(&input[..index]);
    output.reserve(input.len() - index);
    for ch in input[index..].chars() {
        match ch {
            'ﾞ' | 'ﾟ' => {
                let standalone = if ch == 'ﾞ' { '゛' } else { '゜' };
                match output.pop() {
                    Some(prev) => {
                        let composed = if ch == 'ﾞ' {
                            voiced(prev)
                        } else {
                            semi_voiced(prev)
                        };
                        match composed {
                            Some(composed) => output.push(composed),
                            None => {
                                output.push(prev);
                                output.push(standalone);
                            }
                        }
                    }
                    None => output.push(standalone),
                }
            }
            '\u{FF65}'..='\u{FF9D}' => {
                output.push(HALFWIDTH_KANA[(ch as u32 - 0xFF65) as usize]);
            }
            _ => output.push(ch),
        }
    }
    Cow::Owned(output)
}
