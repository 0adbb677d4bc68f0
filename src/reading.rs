//! Resolving the phonetic reading of a whole text.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analyzer::{Analyzer, AnalyzerError, SegmentMode, Token};
use crate::japanese::to_hiragana;

/// Which feature slots hold a token's reading.
///
/// The defaults follow the IPADIC layout where index 7 is the reading and
/// index 8 the pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub mode: SegmentMode,
    pub reading_field: usize,
    pub fallback_reading_field: Option<usize>,
    /// The value a dictionary uses for "no data".
    pub placeholder: String,
    /// Fold katakana in dictionary readings to hiragana.
    ///
    /// IPADIC stores readings in katakana, so this is on by default. Surface
    /// text that is used as a fallback is never folded.
    pub fold_katakana: bool,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            mode: SegmentMode::Search,
            reading_field: 7,
            fallback_reading_field: Some(8),
            placeholder: String::from("*"),
            fold_katakana: true,
        }
    }
}

/// Where a token's reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingSource {
    Primary,
    Secondary,
    Surface,
}

impl ReadingSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReadingSource::Primary => "reading",
            ReadingSource::Secondary => "fallback",
            ReadingSource::Surface => "surface",
        }
    }
}

/// The resolved reading of a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub surface: String,
    pub text: String,
    pub source: ReadingSource,
}

pub struct ReadingResolver {
    analyzer: Arc<dyn Analyzer>,
    config: ReadingConfig,
}

impl ReadingResolver {
    pub fn new(analyzer: Arc<dyn Analyzer>, config: ReadingConfig) -> Self {
        Self { analyzer, config }
    }

    pub fn config(&self) -> &ReadingConfig {
        &self.config
    }

    fn usable_feature<'a>(&self, token: &'a Token, index: usize) -> Option<&'a str> {
        token
            .feature(index)
            .filter(|s| !s.is_empty() && *s != self.config.placeholder)
    }

    fn resolve_token(&self, token: Token) -> Reading {
        let found = self
            .usable_feature(&token, self.config.reading_field)
            .map(|s| (s, ReadingSource::Primary))
            .or_else(|| {
                self.config
                    .fallback_reading_field
                    .and_then(|index| self.usable_feature(&token, index))
                    .map(|s| (s, ReadingSource::Secondary))
            });

        match found {
            Some((text, source)) => {
                let text = if self.config.fold_katakana {
                    to_hiragana(text)
                } else {
                    text.to_owned()
                };
                Reading {
                    surface: token.surface,
                    text,
                    source,
                }
            }
            None => Reading {
                text: token.surface.clone(),
                surface: token.surface,
                source: ReadingSource::Surface,
            },
        }
    }

    /// Resolves the reading of each token in `text`, in order.
    ///
    /// Sentence boundary tokens are dropped. Empty text never reaches the
    /// analyzer.
    pub fn readings(&self, text: &str) -> Result<Vec<Reading>, AnalyzerError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let tokens = self.analyzer.segment(text, self.config.mode)?;
        Ok(tokens
            .into_iter()
            .filter(|t| !t.is_boundary())
            .map(|t| self.resolve_token(t))
            .collect())
    }

    /// Resolves the reading of the whole text as one string.
    pub fn resolve(&self, text: &str) -> Result<String, AnalyzerError> {
        Ok(self
            .readings(text)?
            .into_iter()
            .map(|r| r.text)
            .collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::UnavailableAnalyzer;
    use crate::testutil::{ipadic, ScriptedAnalyzer};

    fn resolver(analyzer: ScriptedAnalyzer) -> (Arc<ScriptedAnalyzer>, ReadingResolver) {
        let analyzer = Arc::new(analyzer);
        let resolver = ReadingResolver::new(analyzer.clone(), ReadingConfig::default());
        (analyzer, resolver)
    }

    #[test]
    fn test_empty_input_skips_analyzer() {
        let resolver = ReadingResolver::new(
            Arc::new(UnavailableAnalyzer::new("broken")),
            ReadingConfig::default(),
        );
        assert_eq!(resolver.resolve("").unwrap(), "");
        assert!(resolver.readings("").unwrap().is_empty());
    }

    #[test]
    fn test_concatenates_readings_in_order() {
        let (analyzer, resolver) = resolver(ScriptedAnalyzer::new(vec![
            ipadic("学校", "ガッコウ", "ガッコー"),
            ipadic("へ", "ヘ", "エ"),
            ipadic("行く", "イク", "イク"),
        ]));
        assert_eq!(resolver.resolve("学校へ行く").unwrap(), "がっこうへいく");
        assert_eq!(analyzer.calls(), 1);
        assert_eq!(analyzer.last_mode(), Some(SegmentMode::Search));
    }

    #[test]
    fn test_fallback_tiers() {
        let (_, resolver) = resolver(ScriptedAnalyzer::new(vec![
            ipadic("今日", "キョウ", "キョー"),
            ipadic("東京", "*", "トーキョー"),
            Token::from_feature_csv("ｘｙｚ", "名詞,固有名詞,*,*,*,*,*,*,*"),
            Token::from_feature_csv("。", "記号,句点"),
        ]));
        let readings = resolver.readings("今日東京ｘｙｚ。").unwrap();
        let sources: Vec<_> = readings.iter().map(|r| r.source).collect();
        assert_eq!(
            sources,
            [
                ReadingSource::Primary,
                ReadingSource::Secondary,
                ReadingSource::Surface,
                ReadingSource::Surface,
            ]
        );
        assert_eq!(readings[1].text, "とーきょー");
        assert_eq!(readings[2].text, "ｘｙｚ");
        assert_eq!(readings[3].text, "。");
        assert_eq!(
            resolver.resolve("今日東京ｘｙｚ。").unwrap(),
            "きょうとーきょーｘｙｚ。"
        );
    }

    #[test]
    fn test_boundary_tokens_are_skipped() {
        let (_, resolver) = resolver(ScriptedAnalyzer::new(vec![
            Token::boundary(),
            ipadic("猫", "ネコ", "ネコ"),
            Token::boundary(),
        ]));
        let readings = resolver.readings("猫").unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].surface, "猫");
        assert_eq!(readings[0].text, "ねこ");
    }

    #[test]
    fn test_katakana_readings_are_folded() {
        let tokens = vec![
            ipadic("学校", "ガッコウ", "ガッコー"),
            Token::from_feature_csv("カナ", "名詞,一般,*,*,*,*,*"),
        ];
        let (_, resolver) = resolver(ScriptedAnalyzer::new(tokens.clone()));
        let readings = resolver.readings("学校カナ").unwrap();
        assert_eq!(readings[0].text, "がっこう");
        // surface fallbacks stay verbatim
        assert_eq!(readings[1].text, "カナ");

        let config = ReadingConfig {
            fold_katakana: false,
            ..ReadingConfig::default()
        };
        let keeping = ReadingResolver::new(Arc::new(ScriptedAnalyzer::new(tokens)), config);
        assert_eq!(keeping.resolve("学校カナ").unwrap(), "ガッコウカナ");
    }

    #[test]
    fn test_custom_fields_and_mode() {
        let analyzer = Arc::new(ScriptedAnalyzer::new(vec![Token::new(
            "猫",
            vec!["名詞".into(), "-".into(), "ねこ".into()],
        )]));
        let config = ReadingConfig {
            mode: SegmentMode::Normal,
            reading_field: 1,
            fallback_reading_field: Some(2),
            placeholder: String::from("-"),
            fold_katakana: false,
        };
        let resolver = ReadingResolver::new(analyzer.clone(), config);
        let readings = resolver.readings("猫").unwrap();
        assert_eq!(readings[0].source, ReadingSource::Secondary);
        assert_eq!(readings[0].text, "ねこ");
        assert_eq!(analyzer.last_mode(), Some(SegmentMode::Normal));
    }

    #[test]
    fn test_analyzer_error_propagates() {
        let resolver = ReadingResolver::new(
            Arc::new(UnavailableAnalyzer::new("no dictionary")),
            ReadingConfig::default(),
        );
        let err = resolver.resolve("かな").unwrap_err();
        assert!(matches!(err, AnalyzerError::Unavailable(_)));
    }
}
