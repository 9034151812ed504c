use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use docsim::config::{Config, Overrides};
use docsim::similarity::scores::Metric;
use docsim::text::document::Document;
use docsim::text::ngram::ngrams;
use docsim::text::tokenizer::Tokenizer;

/// docsim: compare two documents for similarity.
///
/// Scores the pair with cosine, Jaccard, and n-gram similarity, and lists
/// the passages they share word for word.
#[derive(Parser)]
#[command(name = "docsim", version, about)]
struct Cli {
    /// Enable debug logging and print matched passages in full
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a source document against a comparison document
    Compare {
        /// The source document
        source: PathBuf,

        /// The document to compare against
        comparison: PathBuf,

        /// Which similarity metric(s) to compute
        #[arg(long, value_enum, default_value = "all")]
        method: Method,

        /// Write the report to this file (.json for JSON, anything else for Markdown)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Shortest shared passage to report, in characters (default: 30)
        #[arg(long)]
        min_match_len: Option<usize>,

        /// Token window for n-gram similarity (default: 3)
        #[arg(long)]
        ngram_size: Option<usize>,

        /// Match passages regardless of letter case
        #[arg(long)]
        ignore_case: bool,

        /// Keep stop words when tokenizing
        #[arg(long)]
        keep_stop_words: bool,
    },

    /// Show how a document tokenizes
    Tokens {
        /// The document to tokenize
        file: PathBuf,

        /// Token window used to count n-grams (default: 3)
        #[arg(long)]
        ngram_size: Option<usize>,

        /// Keep stop words when tokenizing
        #[arg(long)]
        keep_stop_words: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    All,
    Cosine,
    Jaccard,
    Ngram,
}

impl Method {
    fn metrics(self) -> Vec<Metric> {
        match self {
            Method::All => Metric::ALL.to_vec(),
            Method::Cosine => vec![Metric::Cosine],
            Method::Jaccard => vec![Metric::Jaccard],
            Method::Ngram => vec![Metric::NGram],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up structured logging; RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "docsim=debug" } else { "docsim=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compare {
            source,
            comparison,
            method,
            output,
            min_match_len,
            ngram_size,
            ignore_case,
            keep_stop_words,
        } => {
            let config = Config::load()?.apply_overrides(&Overrides {
                min_match_len,
                ngram_size,
                ignore_case,
                keep_stop_words,
            })?;
            info!(?config, "Loaded configuration");

            let tokenizer = Tokenizer::new(config.keep_stop_words);
            let source_doc = Arc::new(Document::load(&source, &tokenizer)?);
            let comparison_doc = Arc::new(Document::load(&comparison, &tokenizer)?);

            let options = config.compare_options(method.metrics());

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} {msg} ({elapsed})")
                    .expect("valid template"),
            );
            spinner.set_message("Comparing documents...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result =
                docsim::pipeline::compare::run(source_doc, comparison_doc, &options).await;
            spinner.finish_and_clear();
            let report = result?;

            docsim::report::terminal::display_report(&report, cli.verbose);

            if let Some(path) = output {
                docsim::report::write_report(&report, &path)?;
                println!("\n{} {}", "Report saved to".bold(), path.display());
            }
        }

        Commands::Tokens {
            file,
            ngram_size,
            keep_stop_words,
        } => {
            let config = Config::load()?.apply_overrides(&Overrides {
                ngram_size,
                keep_stop_words,
                ..Overrides::default()
            })?;

            let tokenizer = Tokenizer::new(config.keep_stop_words);
            let doc = Document::load(&file, &tokenizer)?;
            let grams = ngrams(&doc.tokens, config.ngram_size)?;

            println!("\n{}", format!("=== Tokens for {} ===", doc.label).bold());
            println!("  Characters: {}", doc.char_count());
            println!("  Tokens:     {}", doc.tokens.len());
            println!("  {}-grams:    {}", config.ngram_size, grams.len());
            println!();
            if doc.tokens.is_empty() {
                println!("  {}", "No tokens after normalization.".dimmed());
            } else {
                println!("  {}", doc.tokens.join(" ").dimmed());
            }
        }
    }

    Ok(())
}
