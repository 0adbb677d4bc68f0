//! The full conversion pipeline.

use std::fmt::Display;

use serde::Serialize;

use crate::analyzer::AnalyzerError;
use crate::japanese::{fold_halfwidth_kana, to_katakana};
use crate::reading::{Reading, ReadingResolver};
use crate::romanji::to_romanji;

/// The three renderings of one input text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub hiragana: String,
    pub katakana: String,
    pub romanji: String,
}

#[derive(Debug)]
pub enum ConvertError {
    /// The analyzer could not be used, so no reading could be produced.
    AnalyzerUnavailable(AnalyzerError),
}

impl From<AnalyzerError> for ConvertError {
    fn from(value: AnalyzerError) -> Self {
        Self::AnalyzerUnavailable(value)
    }
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::AnalyzerUnavailable(error) => {
                write!(f, "conversion failed: {error}")
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::AnalyzerUnavailable(error) => Some(error),
        }
    }
}

pub struct Converter {
    resolver: ReadingResolver,
    fold_halfwidth: bool,
}

impl Converter {
    pub fn new(resolver: ReadingResolver) -> Self {
        Self {
            resolver,
            fold_halfwidth: false,
        }
    }

    /// Fold half-width katakana in the input before analysis.
    pub fn fold_halfwidth(mut self, yes: bool) -> Self {
        self.fold_halfwidth = yes;
        self
    }

    pub fn resolver(&self) -> &ReadingResolver {
        &self.resolver
    }

    /// Per-token readings of `text`, after the same input folding as
    /// [`Converter::convert`].
    pub fn readings(&self, text: &str) -> Result<Vec<Reading>, ConvertError> {
        if self.fold_halfwidth {
            Ok(self.resolver.readings(&fold_halfwidth_kana(text))?)
        } else {
            Ok(self.resolver.readings(text)?)
        }
    }

    pub fn convert(&self, text: &str) -> Result<ConversionResult, ConvertError> {
        if text.is_empty() {
            return Ok(ConversionResult::default());
        }
        let hiragana = if self.fold_halfwidth {
            self.resolver.resolve(&fold_halfwidth_kana(text))?
        } else {
            self.resolver.resolve(text)?
        };
        let katakana = to_katakana(&hiragana);
        let romanji = to_romanji(&hiragana);
        Ok(ConversionResult {
            hiragana,
            katakana,
            romanji,
        })
    }
}
