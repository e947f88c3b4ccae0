//! Process command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::language_source::LanguageSource;
use crate::output::{OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use glossa_api::{Config, DocumentMeta, EnrichmentUnit, ExecutionMode, TextProcessor};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Language name or code; unknown languages get generic rules
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// External language profile (TOML)
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Document title (default: file name without extension)
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Text id of the first document; later files count up from it
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub text_id: u64,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Known-word list used to rate difficulty
    #[arg(long, value_name = "FILE")]
    pub known_words: Option<PathBuf>,

    /// Tab-separated form to lemma table
    #[arg(long, value_name = "FILE")]
    pub lemmas: Option<PathBuf>,

    /// Assess tokens on a worker pool
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for parallel assessment
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Assess whole words instead of characters in Chinese and Japanese
    #[arg(long)]
    pub words: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting text processing");
        log::debug!("Arguments: {:?}", self);

        let cli_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let language = self
            .language
            .as_deref()
            .or(cli_config.processing.default_language.as_deref());
        let source = LanguageSource::resolve(language, self.language_config.as_deref());
        log::info!("Language: {}", source.display_name());

        let format = self.output_format(&cli_config)?;
        let processor = TextProcessor::with_config(self.processing_config(&cli_config, &source)?)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let files = resolve_patterns(&self.input)?;
        let mut formatter = self.create_formatter(format, &cli_config)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_documents(files.len() as u64);

        for (index, path) in files.iter().enumerate() {
            let text_id = self.text_id + index as u64;
            let text = FileReader::read_text(path)?;
            log::debug!(
                "Processing {} ({} bytes) as text {}",
                path.display(),
                text.len(),
                text_id
            );

            let title = self
                .title
                .clone()
                .unwrap_or_else(|| FileReader::title_for(path));
            let output = processor
                .process_text(&text, DocumentMeta::new(text_id, title))
                .map_err(|e| CliError::ProcessingError(format!("{}: {e}", path.display())))?;

            log::info!(
                "{}: {} sentences, {} tokens, {} vocabulary entries in {} ms",
                path.display(),
                output.document.total_sentences,
                output.document.total_tokens,
                output.document.vocab_expressions.len(),
                output.metadata.processing_time_ms
            );
            if output.metadata.enrichment_failures > 0 {
                log::warn!(
                    "{}: {} of {} enrichment calls failed ({} timed out, {} skipped)",
                    path.display(),
                    output.metadata.enrichment_failures,
                    output.metadata.enrichment_calls,
                    output.metadata.enrichment_timeouts,
                    output.metadata.enrichment_skipped
                );
            }

            formatter.format_document(&output)?;
            progress.document_completed(&path.display().to_string());
        }

        formatter.finish()?;
        progress.finish();

        Ok(())
    }

    /// Command-line format, then the config default
    fn output_format(&self, cli_config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        let name = &cli_config.output.default_format;
        OutputFormat::parse(name)
            .ok_or_else(|| CliError::ConfigError(format!("unknown output format '{name}'")).into())
    }

    /// Merge flags over the config file into the processing configuration
    fn processing_config(&self, cli_config: &CliConfig, source: &LanguageSource) -> Result<Config> {
        let enrichment = &cli_config.enrichment;

        let mode = if self.parallel || enrichment.parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        };
        let unit = if self.words {
            EnrichmentUnit::Words
        } else {
            cli_config.processing.enrichment_unit.into()
        };

        let mut builder = Config::builder()
            .execution_mode(mode)
            .threads(self.threads.or(enrichment.threads()))
            .enrichment_timeout(enrichment.timeout())
            .max_consecutive_failures(enrichment.failure_limit())
            .enrichment_unit(unit)
            .medium_ratio(enrichment.medium_ratio)
            .split_on_blank_lines(cli_config.processing.split_on_blank_lines);

        if let Some(language) = source.language() {
            builder = builder.language(language);
        }
        if let LanguageSource::External { path, .. } = source {
            builder = builder.language_config(path.clone());
        }
        if let Some(path) = self.known_words.as_ref().or(enrichment.known_words.as_ref()) {
            builder = builder.known_words(path.clone());
        }
        if let Some(path) = self.lemmas.as_ref().or(enrichment.lemma_table.as_ref()) {
            builder = builder.lemma_table(path.clone());
        }

        builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    fn create_formatter(
        &self,
        format: OutputFormat,
        cli_config: &CliConfig,
    ) -> Result<Box<dyn OutputFormatter>> {
        let include_metadata = cli_config.output.include_metadata;
        let pretty = cli_config.output.pretty_json;

        let formatter = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                format.formatter(BufWriter::new(file), include_metadata, pretty)
            }
            None => format.formatter(io::stdout(), include_metadata, pretty),
        };
        Ok(formatter)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger installed earlier in the process wins
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
