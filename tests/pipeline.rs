//! End to end conversion through the public API with an in-memory analyzer.

use std::collections::HashMap;
use std::sync::Arc;

use kana_tools::{
    analyzer::UnavailableAnalyzer, to_hiragana, to_katakana, to_romanji, Analyzer, AnalyzerError,
    ConversionResult, ConvertError, Converter, ReadingConfig, ReadingResolver, SegmentMode, Token,
};

/// Splits on spaces and looks every word up in a tiny IPADIC-like lexicon.
struct Lexicon(HashMap<&'static str, &'static str>);

impl Lexicon {
    fn new() -> Self {
        Self(HashMap::from([
            ("学校", "名詞,一般,*,*,*,*,学校,ガッコウ,ガッコー"),
            ("に", "助詞,格助詞,一般,*,*,*,に,ニ,ニ"),
            ("行く", "動詞,自立,*,*,五段・カ行促音便,基本形,行く,イク,イク"),
            ("東京", "名詞,固有名詞,地域,一般,*,*,東京,*,トーキョー"),
            ("コーヒー", "名詞,一般,*,*,*,*,コーヒー,コーヒー,コーヒー"),
        ]))
    }
}

impl Analyzer for Lexicon {
    fn segment(&self, text: &str, _mode: SegmentMode) -> Result<Vec<Token>, AnalyzerError> {
        let mut tokens = vec![Token::boundary()];
        for word in text.split(' ').filter(|w| !w.is_empty()) {
            tokens.push(match self.0.get(word) {
                Some(csv) => Token::from_feature_csv(word, csv),
                None => Token::from_feature_csv(word, "名詞,一般,*,*,*,*,*"),
            });
        }
        tokens.push(Token::boundary());
        Ok(tokens)
    }
}

fn converter() -> Converter {
    Converter::new(ReadingResolver::new(
        Arc::new(Lexicon::new()),
        ReadingConfig::default(),
    ))
}

#[test]
fn test_kana_input() {
    let result = converter().convert("かな").unwrap();
    assert_eq!(
        result,
        ConversionResult {
            hiragana: "かな".into(),
            katakana: "カナ".into(),
            romanji: "kana".into(),
        }
    );
}

#[test]
fn test_sentence() {
    let result = converter().convert("学校 に 行く").unwrap();
    assert_eq!(result.hiragana, "がっこうにいく");
    assert_eq!(result.katakana, "ガッコウニイク");
    assert_eq!(result.romanji, "gakkouniiku");
}

#[test]
fn test_fallbacks() {
    let result = converter().convert("東京 ABC").unwrap();
    assert_eq!(result.hiragana, "とーきょーABC");
    assert_eq!(result.katakana, "トーキョーABC");
    assert_eq!(result.romanji, "tookyooABC");
}

#[test]
fn test_katakana_readings_are_folded() {
    let result = converter().convert("コーヒー").unwrap();
    assert_eq!(result.hiragana, "こーひー");
    assert_eq!(result.katakana, "コーヒー");
    assert_eq!(result.romanji, "koohii");

    let keeping = Converter::new(ReadingResolver::new(
        Arc::new(Lexicon::new()),
        ReadingConfig {
            fold_katakana: false,
            ..ReadingConfig::default()
        },
    ));
    let result = keeping.convert("学校").unwrap();
    assert_eq!(result.hiragana, "ガッコウ");
    assert_eq!(result.katakana, "ガッコウ");
}

#[test]
fn test_empty_input() {
    let broken = Converter::new(ReadingResolver::new(
        Arc::new(UnavailableAnalyzer::new("no dictionary")),
        ReadingConfig::default(),
    ));
    assert_eq!(broken.convert("").unwrap(), ConversionResult::default());
    assert!(matches!(
        broken.convert("学校"),
        Err(ConvertError::AnalyzerUnavailable(_))
    ));
}

#[test]
fn test_shift_properties() {
    for s in ["学校へ行く", "ガッコウ", "がっこう", "mixed テキスト と かな", ""] {
        let katakana = to_katakana(s);
        assert_eq!(to_katakana(&to_hiragana(&katakana)), katakana);
    }
    assert_eq!(to_hiragana("ascii only"), "ascii only");
    assert_eq!(to_katakana("カタカナ"), "カタカナ");
    assert_eq!(to_romanji("しい"), "shii");
}
