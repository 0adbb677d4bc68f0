//! An [`Analyzer`] backed by the vibrato tokenizer.

use std::{fs::File, io::BufReader, path::Path};

use vibrato::{Dictionary, Tokenizer};

use crate::analyzer::{Analyzer, AnalyzerError, SegmentMode, Token};

/// A vibrato tokenizer over a compiled system dictionary.
///
/// The dictionary is loaded once; every call to [`Analyzer::segment`] gets its
/// own worker so the analyzer can be shared between threads.
pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
}

impl VibratoAnalyzer {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            tokenizer: Tokenizer::new(dictionary),
        }
    }

    /// Loads a compiled dictionary from `path`.
    ///
    /// Files ending in `.zst` are decompressed while reading.
    pub fn from_path(path: &Path) -> Result<Self, AnalyzerError> {
        let file = File::open(path)?;
        let is_zstd = path.extension().map(|s| s == "zst").unwrap_or_default();
        let dictionary = if is_zstd {
            Dictionary::read(zstd::Decoder::new(file)?)
        } else {
            Dictionary::read(BufReader::new(file))
        }
        .map_err(|e| AnalyzerError::Dictionary(e.to_string()))?;

        log::info!("loaded dictionary from {}", path.display());
        Ok(Self::new(dictionary))
    }
}

impl Analyzer for VibratoAnalyzer {
    // vibrato only has one lattice mode so both modes segment the same way
    fn segment(&self, text: &str, mode: SegmentMode) -> Result<Vec<Token>, AnalyzerError> {
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(text);
        worker.tokenize();
        let tokens = (0..worker.num_tokens())
            .map(|i| {
                let token = worker.token(i);
                Token::from_feature_csv(token.surface(), token.feature())
            })
            .collect::<Vec<_>>();
        log::debug!("segmented into {} tokens ({mode:?})", tokens.len());
        Ok(tokens)
    }
}
