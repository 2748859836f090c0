use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use talkhis_core::{LengthSelector, Summarizer, SummarizerConfig, TalkhisError};
use talkhis_extractors::{ExtractError, ExtractionPipeline};
use talkhis_llm::LlmFactory;

/// Talkhis - Arabic academic summaries of research papers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (.toml, .json or .yaml); TALKHIS_CONFIG is used when unset
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a .txt/.docx file, literal text, or stdin
    Summarize {
        /// Path to the .txt or .docx file to summarize
        file: Option<PathBuf>,

        /// Summarize this text instead of a file
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Summary length: Arabic label or key (very-short, short, medium, long, very-long)
        #[arg(short, long)]
        length: Option<String>,

        /// Model override
        #[arg(long)]
        model: Option<String>,
    },

    /// Print the text extracted from a .txt or .docx file
    Extract {
        /// Path to the file
        file: PathBuf,
    },

    /// List the available summary lengths
    Lengths,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = %format!("{err:#}"), "Command failed");
            eprintln!("{}", user_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the result.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info,talkhis=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Environment variable naming an optional config file.
const CONFIG_ENV: &str = "TALKHIS_CONFIG";

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli
        .config
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    match cli.command {
        Command::Summarize {
            file,
            text,
            length,
            model,
        } => summarize(config.as_deref(), file, text, length, model).await,
        Command::Extract { file } => {
            let content = ExtractionPipeline::with_defaults().extract_file(&file).await?;
            println!("{}", content.text);
            Ok(())
        }
        Command::Lengths => {
            for length in LengthSelector::all() {
                let marker = if length == LengthSelector::default() {
                    " (default)"
                } else {
                    ""
                };
                println!("{}\t{}{}", length.key(), length.label(), marker);
            }
            Ok(())
        }
    }
}

async fn summarize(
    config_path: Option<&Path>,
    file: Option<PathBuf>,
    text: Option<String>,
    length: Option<String>,
    model: Option<String>,
) -> anyhow::Result<()> {
    let mut config = SummarizerConfig::load(config_path).context("Failed to load configuration")?;
    if let Some(model) = model {
        config.llm.model = model;
    }

    // Credential first: nothing is read or sent without it.
    let llm = LlmFactory::from_config(&config)?;
    let summarizer = Summarizer::new(llm, &config.llm);

    let input = read_input(file.as_deref(), text).await?;
    let length = length
        .as_deref()
        .map(LengthSelector::from_label)
        .unwrap_or_default();
    debug!(length = %length, chars = input.chars().count(), "Summarizing");

    let summary = summarizer.summarize(&input, length).await?;
    println!("{}", summary);
    Ok(())
}

/// The text to summarize: a file, literal text, or stdin.
async fn read_input(file: Option<&Path>, text: Option<String>) -> anyhow::Result<String> {
    match (file, text) {
        (Some(path), _) => Ok(ExtractionPipeline::with_defaults()
            .extract_file(path)
            .await?
            .into_text()),
        (None, Some(text)) => Ok(text),
        (None, None) => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Localized message for known failures, plain text otherwise.
fn user_message(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<TalkhisError>() {
        return e.localized_message();
    }
    if let Some(e) = err.downcast_ref::<ExtractError>() {
        return e.localized_message().to_string();
    }
    format!("{err:#}")
}
