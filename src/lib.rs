use std::io::Read as _;

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod convert;
pub mod japanese;
pub mod reading;
pub mod romanji;
pub mod server;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod testutil;

pub use analyzer::{Analyzer, AnalyzerError, SegmentMode, Token, TokenClass};
pub use convert::{ConversionResult, ConvertError, Converter};
pub use japanese::{to_hiragana, to_katakana};
pub use reading::{ReadingConfig, ReadingResolver};
pub use romanji::to_romanji;

/// Removes a leading UTF-8 BOM and normalizes CRLF line endings.
pub(crate) fn normalize_text(mut buffer: String) -> String {
    if buffer.starts_with('\u{feff}') {
        // U+FEFF is 3 bytes
        buffer.drain(..3);
    }

    if buffer.contains("\r\n") {
        buffer = buffer.replace("\r\n", "\n");
    }

    buffer
}

/// Loads a file into a string.
///
/// This checks for the UTF-8 BOM and strips it
pub(crate) fn load_file(path: &std::path::Path) -> std::io::Result<String> {
    let mut fp = std::fs::File::open(path)?;
    let mut buffer = String::new();
    fp.read_to_string(&mut buffer)?;
    Ok(normalize_text(buffer))
}
