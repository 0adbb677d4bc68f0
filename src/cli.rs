use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{
    io::{stdin, Read},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context;

use crate::{
    analyzer::{Analyzer, SegmentMode, UnavailableAnalyzer},
    config::Config,
    convert::Converter,
    reading::ReadingResolver,
    server,
    tokenizer::VibratoAnalyzer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputLocation {
    Text(String),
    Path(PathBuf),
    Stdio,
}

impl InputLocation {
    fn read_as_string(&self) -> std::io::Result<String> {
        match self {
            InputLocation::Text(text) => Ok(text.clone()),
            InputLocation::Path(path) => crate::load_file(path),
            InputLocation::Stdio => {
                let mut buffer = String::new();
                stdin().read_to_string(&mut buffer)?;
                Ok(crate::normalize_text(buffer))
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Subcommands,
}

#[derive(Subcommand, Debug)]
pub enum Subcommands {
    /// Runs the conversion HTTP server
    Serve(ServeArgs),
    /// Converts text into hiragana, katakana and romanji
    Convert(ConvertArgs),
    /// Shows how each token of the text got its reading
    Tokens(TokensArgs),
}

impl Subcommands {
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            Subcommands::Serve(args) => args.run(),
            Subcommands::Convert(args) => args.run(),
            Subcommands::Tokens(args) => args.run(),
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    Normal,
    Search,
}

impl From<ModeArg> for SegmentMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Normal => SegmentMode::Normal,
            ModeArg::Search => SegmentMode::Search,
        }
    }
}

/// Options shared by every subcommand that needs an analyzer.
#[derive(Args, Default, Debug)]
pub struct AnalyzerArgs {
    /// A JSON configuration file.
    ///
    /// Options given on the command line take precedence over the file.
    #[arg(long, verbatim_doc_comment)]
    pub config: Option<PathBuf>,
    /// The compiled vibrato dictionary to use.
    ///
    /// Files ending in `.zst` are decompressed while loading.
    #[arg(short, long, verbatim_doc_comment)]
    pub dictionary: Option<PathBuf>,
    /// How the analyzer should segment compound words
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
    /// The feature index holding a token's reading
    #[arg(long)]
    pub reading_field: Option<usize>,
    /// The feature index to use when the reading is missing
    #[arg(long)]
    pub fallback_reading_field: Option<usize>,
    /// Keep dictionary readings in katakana.
    ///
    /// By default readings are folded into hiragana, since
    /// dictionaries such as IPADIC store them in katakana.
    #[arg(long, verbatim_doc_comment)]
    pub keep_katakana: bool,
    /// Convert half-width katakana into full-width before analysis
    #[arg(long)]
    pub fold_halfwidth: bool,
}

impl AnalyzerArgs {
    /// Loads the configuration file, if any, and applies the overrides.
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("could not load config from {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(dictionary) = &self.dictionary {
            config.dictionary = Some(dictionary.clone());
        }
        if let Some(mode) = self.mode {
            config.reading.mode = mode.into();
        }
        if let Some(field) = self.reading_field {
            config.reading.reading_field = field;
        }
        if let Some(field) = self.fallback_reading_field {
            config.reading.fallback_reading_field = Some(field);
        }
        if self.keep_katakana {
            config.reading.fold_katakana = false;
        }
        config.fold_halfwidth |= self.fold_halfwidth;
        Ok(config)
    }
}

fn load_analyzer(config: &Config) -> anyhow::Result<VibratoAnalyzer> {
    let Some(path) = &config.dictionary else {
        anyhow::bail!("no dictionary given (use --dictionary or the config file)");
    };
    VibratoAnalyzer::from_path(path)
        .with_context(|| format!("could not load dictionary {}", path.display()))
}

fn build_converter(config: &Config, analyzer: Arc<dyn Analyzer>) -> Converter {
    let resolver = ReadingResolver::new(analyzer, config.reading.clone());
    Converter::new(resolver).fold_halfwidth(config.fold_halfwidth)
}

#[derive(Args, Default, Debug)]
#[group(required = false, multiple = false)]
pub struct InputArgs {
    /// The text to work on
    pub text: Vec<String>,
    /// Read the text from a file instead.
    ///
    /// If `-` is given, then it's interpreted as stdin.
    #[arg(short, long, verbatim_doc_comment)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    fn location(&self) -> anyhow::Result<InputLocation> {
        match &self.file {
            Some(path) if path.as_os_str() == "-" => Ok(InputLocation::Stdio),
            Some(path) => Ok(InputLocation::Path(path.clone())),
            None if self.text.is_empty() => {
                anyhow::bail!("no text given (pass it as arguments or use --file)")
            }
            None => Ok(InputLocation::Text(self.text.join(" "))),
        }
    }

    fn read(&self) -> anyhow::Result<String> {
        let location = self.location()?;
        location
            .read_as_string()
            .with_context(|| format!("could not read input from {location:?}"))
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    analyzer: AnalyzerArgs,
    /// The address to listen on
    #[arg(long)]
    host: Option<String>,
    /// The port to listen on
    #[arg(short, long)]
    port: Option<u16>,
    /// The number of request handling threads
    #[arg(long)]
    workers: Option<usize>,
}

impl ServeArgs {
    pub fn run(self) -> anyhow::Result<()> {
        let mut config = self.analyzer.config()?;
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(workers) = self.workers {
            config.server.workers = workers;
        }

        // A broken dictionary shouldn't take the server down, requests
        // will get a 503 instead.
        let analyzer: Arc<dyn Analyzer> = match load_analyzer(&config) {
            Ok(analyzer) => Arc::new(analyzer),
            Err(e) => {
                log::error!("{e:#}");
                Arc::new(UnavailableAnalyzer::new(format!("{e:#}")))
            }
        };
        let converter = Arc::new(build_converter(&config, analyzer));
        server::serve(converter, &config.server)
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    analyzer: AnalyzerArgs,
    #[command(flatten)]
    input: InputArgs,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl ConvertArgs {
    pub fn run(self) -> anyhow::Result<()> {
        let text = self.input.read()?;
        let config = self.analyzer.config()?;
        let converter = build_converter(&config, Arc::new(load_analyzer(&config)?));
        let result = converter.convert(&text)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("Hiragana: {}", result.hiragana);
            println!("Katakana: {}", result.katakana);
            println!("Romanji:  {}", result.romanji);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct TokensArgs {
    #[command(flatten)]
    analyzer: AnalyzerArgs,
    #[command(flatten)]
    input: InputArgs,
}

impl TokensArgs {
    pub fn run(self) -> anyhow::Result<()> {
        let text = self.input.read()?;
        let config = self.analyzer.config()?;
        let converter = build_converter(&config, Arc::new(load_analyzer(&config)?));
        let readings = converter.readings(&text)?;
        println!("Tokens:\n  Total: {}", readings.len());
        for reading in readings {
            println!(
                "  {}\t{}\t({})",
                reading.surface.escape_debug(),
                reading.text.escape_debug(),
                reading.source.as_str()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::parse_from([
            "kana-tools",
            "convert",
            "--dictionary",
            "ipadic.dic",
            "--mode",
            "normal",
            "--reading-field",
            "3",
            "--keep-katakana",
            "学校",
            "へ",
        ]);
        let Subcommands::Convert(args) = cli.command else {
            panic!("expected the convert subcommand");
        };
        let config = args.analyzer.config().unwrap();
        assert_eq!(config.dictionary, Some(PathBuf::from("ipadic.dic")));
        assert_eq!(config.reading.mode, SegmentMode::Normal);
        assert_eq!(config.reading.reading_field, 3);
        assert_eq!(config.reading.fallback_reading_field, Some(8));
        assert!(!config.reading.fold_katakana);
        assert!(!config.fold_halfwidth);
        assert_eq!(
            args.input.location().unwrap(),
            InputLocation::Text(String::from("学校 へ"))
        );
    }

    #[test]
    fn test_input_location() {
        let stdin = InputArgs {
            text: Vec::new(),
            file: Some(PathBuf::from("-")),
        };
        assert_eq!(stdin.location().unwrap(), InputLocation::Stdio);
        assert!(InputArgs::default().location().is_err());
    }

    #[test]
    fn test_missing_dictionary() {
        let err = load_analyzer(&Config::default()).err().unwrap();
        assert!(err.to_string().contains("no dictionary given"));

        let config = Config {
            dictionary: Some(PathBuf::from("/nonexistent/kana-tools.dic")),
            ..Config::default()
        };
        assert!(load_analyzer(&config).is_err());
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["kana-tools", "serve", "--port", "9000", "--workers", "2"]);
        let Subcommands::Serve(args) = cli.command else {
            panic!("expected the serve subcommand");
        };
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.workers, Some(2));
        assert_eq!(args.host, None);
    }
}
