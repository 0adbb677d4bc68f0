use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use crate::analyzer::{Analyzer, AnalyzerError, SegmentMode, Token};

/// An analyzer that returns the same tokens for every input.
pub(crate) struct ScriptedAnalyzer {
    tokens: Vec<Token>,
    calls: AtomicUsize,
    last_mode: Mutex<Option<SegmentMode>>,
}

impl ScriptedAnalyzer {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            calls: AtomicUsize::new(0),
            last_mode: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_mode(&self) -> Option<SegmentMode> {
        *self.last_mode.lock().unwrap()
    }
}

impl Analyzer for ScriptedAnalyzer {
    fn segment(&self, _text: &str, mode: SegmentMode) -> Result<Vec<Token>, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_mode.lock().unwrap() = Some(mode);
        Ok(self.tokens.clone())
    }
}

/// A token laid out like an IPADIC entry.
pub(crate) fn ipadic(surface: &str, reading: &str, pronunciation: &str) -> Token {
    Token::from_feature_csv(
        surface,
        &format!("名詞,一般,*,*,*,*,{surface},{reading},{pronunciation}"),
    )
}
