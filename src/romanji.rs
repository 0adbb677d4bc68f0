//! Hiragana to romanji transliteration.
//!
//! The table is keyed on one or two hiragana codepoints. Two codepoint
//! entries (long vowels and yōon digraphs) share their first codepoint with a
//! single entry, so they are kept in a separate map and always tried first.
//!
//! `っ` and `ー` take their romanji from their neighbours: `っ` doubles the
//! consonant that follows it (`t` before `ch`) and `ー` repeats the vowel
//! written before it.

use std::collections::HashMap;
use std::sync::OnceLock;

const SOKUON: char = 'っ';
const CHOONPU: char = 'ー';

#[rustfmt::skip]
const SINGLE_ENTRIES: &[(&str, &str)] = &[
    ("あ", "a"), ("い", "i"), ("う", "u"), ("え", "e"), ("お", "o"),
    ("か", "ka"), ("き", "ki"), ("く", "ku"), ("け", "ke"), ("こ", "ko"),
    ("さ", "sa"), ("し", "shi"), ("す", "su"), ("せ", "se"), ("そ", "so"),
    ("た", "ta"), ("ち", "chi"), ("つ", "tsu"), ("て", "te"), ("と", "to"),
    ("な", "na"), ("に", "ni"), ("ぬ", "nu"), ("ね", "ne"), ("の", "no"),
    ("は", "ha"), ("ひ", "hi"), ("ふ", "fu"), ("へ", "he"), ("ほ", "ho"),
    ("ま", "ma"), ("み", "mi"), ("む", "mu"), ("め", "me"), ("も", "mo"),
    ("や", "ya"), ("ゆ", "yu"), ("よ", "yo"),
    ("ら", "ra"), ("り", "ri"), ("る", "ru"), ("れ", "re"), ("ろ", "ro"),
    ("わ", "wa"), ("ゐ", "wi"), ("ゑ", "we"), ("を", "wo"),
    ("ん", "n"),
    ("が", "ga"), ("ぎ", "gi"), ("ぐ", "gu"), ("げ", "ge"), ("ご", "go"),
    ("ざ", "za"), ("じ", "ji"), ("ず", "zu"), ("ぜ", "ze"), ("ぞ", "zo"),
    ("だ", "da"), ("ぢ", "ji"), ("づ", "zu"), ("で", "de"), ("ど", "do"),
    ("ば", "ba"), ("び", "bi"), ("ぶ", "bu"), ("べ", "be"), ("ぼ", "bo"),
    ("ぱ", "pa"), ("ぴ", "pi"), ("ぷ", "pu"), ("ぺ", "pe"), ("ぽ", "po"),
    ("ゔ", "vu"),
    // small kana on their own
    ("ぁ", "a"), ("ぃ", "i"), ("ぅ", "u"), ("ぇ", "e"), ("ぉ", "o"),
    ("ゃ", "ya"), ("ゅ", "yu"), ("ょ", "yo"), ("ゎ", "wa"),
    ("ゕ", "ka"), ("ゖ", "ke"),
];

#[rustfmt::skip]
const PAIR_ENTRIES: &[(&str, &str)] = &[
    // long vowels
    ("ああ", "aa"), ("いい", "ii"), ("うう", "uu"), ("ええ", "ee"), ("おお", "oo"),
    ("かあ", "kaa"), ("きい", "kii"), ("くう", "kuu"), ("けえ", "kee"), ("こお", "koo"),
    ("さあ", "saa"), ("しい", "shii"), ("すう", "suu"), ("せえ", "see"), ("そお", "soo"),
    ("たあ", "taa"), ("ちい", "chii"), ("つう", "tsuu"), ("てえ", "tee"), ("とお", "too"),
    ("なあ", "naa"), ("にい", "nii"), ("ぬう", "nuu"), ("ねえ", "nee"), ("のお", "noo"),
    ("はあ", "haa"), ("ひい", "hii"), ("ふう", "fuu"), ("へえ", "hee"), ("ほお", "hoo"),
    ("まあ", "maa"), ("みい", "mii"), ("むう", "muu"), ("めえ", "mee"), ("もお", "moo"),
    ("やあ", "yaa"), ("ゆう", "yuu"), ("よお", "yoo"),
    ("らあ", "raa"), ("りい", "rii"), ("るう", "ruu"), ("れえ", "ree"), ("ろお", "roo"),
    ("わあ", "waa"), ("をお", "woo"),
    ("があ", "gaa"), ("ぎい", "gii"), ("ぐう", "guu"), ("げえ", "gee"), ("ごお", "goo"),
    ("ざあ", "zaa"), ("じい", "jii"), ("ずう", "zuu"), ("ぜえ", "zee"), ("ぞお", "zoo"),
    ("だあ", "daa"), ("ぢい", "jii"), ("づう", "zuu"), ("でえ", "dee"), ("どお", "doo"),
    ("ばあ", "baa"), ("びい", "bii"), ("ぶう", "buu"), ("べえ", "bee"), ("ぼお", "boo"),
    ("ぱあ", "paa"), ("ぴい", "pii"), ("ぷう", "puu"), ("ぺえ", "pee"), ("ぽお", "poo"),
    // yōon
    ("きゃ", "kya"), ("きゅ", "kyu"), ("きょ", "kyo"),
    ("しゃ", "sha"), ("しゅ", "shu"), ("しょ", "sho"),
    ("ちゃ", "cha"), ("ちゅ", "chu"), ("ちょ", "cho"),
    ("にゃ", "nya"), ("にゅ", "nyu"), ("にょ", "nyo"),
    ("ひゃ", "hya"), ("ひゅ", "hyu"), ("ひょ", "hyo"),
    ("みゃ", "mya"), ("みゅ", "myu"), ("みょ", "myo"),
    ("りゃ", "rya"), ("りゅ", "ryu"), ("りょ", "ryo"),
    ("ぎゃ", "gya"), ("ぎゅ", "gyu"), ("ぎょ", "gyo"),
    ("じゃ", "ja"), ("じゅ", "ju"), ("じょ", "jo"),
    ("ぢゃ", "ja"), ("ぢゅ", "ju"), ("ぢょ", "jo"),
    ("びゃ", "bya"), ("びゅ", "byu"), ("びょ", "byo"),
    ("ぴゃ", "pya"), ("ぴゅ", "pyu"), ("ぴょ", "pyo"),
];

/// A transliteration table split by key length.
#[derive(Debug, Clone, Default)]
pub struct RomanjiTable {
    pairs: HashMap<(char, char), &'static str>,
    singles: HashMap<char, &'static str>,
}

impl RomanjiTable {
    /// Builds a table from `(kana, romanji)` entries.
    ///
    /// Keys that are not one or two codepoints long are ignored.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        let mut table = Self::default();
        for (kana, romanji) in entries {
            let mut chars = kana.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(first), None, None) => {
                    table.singles.insert(first, romanji);
                }
                (Some(first), Some(second), None) => {
                    table.pairs.insert((first, second), romanji);
                }
                _ => {}
            }
        }
        table
    }

    /// The process-wide standard table.
    pub fn standard() -> &'static RomanjiTable {
        static TABLE: OnceLock<RomanjiTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            Self::from_entries(SINGLE_ENTRIES.iter().chain(PAIR_ENTRIES).copied())
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len() + self.singles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.singles.is_empty()
    }

    /// Looks up the entry starting at `index`, returning its romanji and the
    /// number of codepoints it covers.
    fn lookup(&self, chars: &[char], index: usize) -> Option<(&'static str, usize)> {
        let &ch = chars.get(index)?;
        chars
            .get(index + 1)
            .and_then(|next| self.pairs.get(&(ch, *next)))
            .map(|romanji| (*romanji, 2))
            .or_else(|| self.singles.get(&ch).map(|romanji| (*romanji, 1)))
    }

    /// Transliterates `hiragana`, longest match first.
    ///
    /// A `っ` with no consonant after it and a `ー` with no vowel before it
    /// are copied through, as is anything else without an entry such as
    /// kanji, katakana or punctuation.
    pub fn transliterate(&self, hiragana: &str) -> String {
        let chars: Vec<char> = hiragana.chars().collect();
        let mut output = String::with_capacity(hiragana.len());
        let mut index = 0;
        while let Some(&ch) = chars.get(index) {
            if let Some((romanji, width)) = self.lookup(&chars, index) {
                output.push_str(romanji);
                index += width;
                continue;
            }
            let replacement = match ch {
                SOKUON => self
                    .lookup(&chars, index + 1)
                    .and_then(|(romanji, _)| geminate(romanji)),
                CHOONPU => output.chars().last().filter(|c| is_vowel(*c)),
                _ => None,
            };
            output.push(replacement.unwrap_or(ch));
            index += 1;
        }
        output
    }
}

#[inline]
fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// The consonant a preceding `っ` doubles, if `romanji` starts with one.
fn geminate(romanji: &str) -> Option<char> {
    if romanji.starts_with("ch") {
        return Some('t');
    }
    romanji
        .chars()
        .next()
        .filter(|c| c.is_ascii_lowercase() && !is_vowel(*c))
}

/// Transliterates `hiragana` using the standard table.
pub fn to_romanji(hiragana: &str) -> String {
    RomanjiTable::standard().transliterate(hiragana)
}
