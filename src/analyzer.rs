//! The morphological analyzer seam.
//!
//! The conversion pipeline only needs tokens with a surface form and a list
//! of features, so any analyzer that can produce those can be plugged in.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How aggressively the analyzer should split compound words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// Keep compounds together where the dictionary allows it.
    Normal,
    /// Prefer fine-grained segments, which gives better reading coverage.
    #[default]
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Ordinary,
    /// A sentence boundary marker (BOS/EOS) with no text of its own.
    Boundary,
}

/// One segment of analyzed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub features: Vec<String>,
    pub class: TokenClass,
}

impl Token {
    pub fn new(surface: impl Into<String>, features: Vec<String>) -> Self {
        Self {
            surface: surface.into(),
            features,
            class: TokenClass::Ordinary,
        }
    }

    /// Creates a token from a MeCab style comma separated feature string.
    pub fn from_feature_csv(surface: impl Into<String>, csv: &str) -> Self {
        let features = if csv.is_empty() {
            Vec::new()
        } else {
            csv.split(',').map(str::to_owned).collect()
        };
        Self::new(surface, features)
    }

    pub fn boundary() -> Self {
        Self {
            surface: String::new(),
            features: Vec::new(),
            class: TokenClass::Boundary,
        }
    }

    /// Returns the feature at `index`, if the token has that many features.
    pub fn feature(&self, index: usize) -> Option<&str> {
        self.features.get(index).map(String::as_str)
    }

    pub const fn is_boundary(&self) -> bool {
        matches!(self.class, TokenClass::Boundary)
    }
}

/// An error that occurs while loading or running an analyzer
#[derive(Debug)]
pub enum AnalyzerError {
    /// The dictionary file could not be read.
    Io(std::io::Error),
    /// The dictionary file was read but is not a valid dictionary.
    Dictionary(String),
    /// Segmentation itself failed.
    Segmentation(String),
    /// No analyzer could be set up at startup.
    Unavailable(String),
}

impl From<std::io::Error> for AnalyzerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzerError::Io(error) => write!(f, "could not read dictionary: {error}"),
            AnalyzerError::Dictionary(reason) => write!(f, "invalid dictionary: {reason}"),
            AnalyzerError::Segmentation(reason) => write!(f, "segmentation failed: {reason}"),
            AnalyzerError::Unavailable(reason) => write!(f, "analyzer unavailable: {reason}"),
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzerError::Io(error) => Some(error),
            _ => None,
        }
    }
}

/// Splits text into tokens.
///
/// Implementations are shared between request threads, so `segment` must be
/// callable concurrently.
pub trait Analyzer: Send + Sync {
    fn segment(&self, text: &str, mode: SegmentMode) -> Result<Vec<Token>, AnalyzerError>;
}

/// Stand-in used when the real analyzer failed to initialize.
///
/// Every call fails with [`AnalyzerError::Unavailable`] carrying the startup
/// reason.
#[derive(Debug, Clone)]
pub struct UnavailableAnalyzer {
    reason: String,
}

impl UnavailableAnalyzer {
    pub fn new(reason: impl Display) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl Analyzer for UnavailableAnalyzer {
    fn segment(&self, _text: &str, _mode: SegmentMode) -> Result<Vec<Token>, AnalyzerError> {
        Err(AnalyzerError::Unavailable(self.reason.clone()))
    }
}
