mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ConfigInput, Prompter, ReportSource, TerminalPrompter};
use crate::errors::AppError;
use crate::generation::fetch_record;
use crate::generation::prompts::FORMAT_INSTRUCTION;
use crate::generation::requester::DEFAULT_TEMPERATURE;
use crate::llm_client::{LlmClient, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::models::LabReportRecord;
use crate::render::render_document;

/// Generate a formatted lab report (.docx) from a one-line prompt.
#[derive(Debug, Parser)]
#[command(name = "labgen", version, about)]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// What the report should cover, e.g. "Explain single inheritance in Java"
    #[arg(short, long)]
    prompt: Option<String>,

    /// Output document path [default: lab-report.docx]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gemini API host
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Gemini model identifier
    #[arg(long, env = "LABGEN_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature
    #[arg(long, env = "LABGEN_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Request timeout in seconds
    #[arg(long, env = "LABGEN_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Directive appended to the prompt
    #[arg(
        long,
        env = "LABGEN_FORMAT_INSTRUCTION",
        default_value = FORMAT_INSTRUCTION,
        hide_default_value = true
    )]
    format_instruction: String,

    /// Language named in the implementation heading, e.g. "Java"
    #[arg(short, long)]
    language: Option<String>,

    /// Render a saved report JSON file instead of calling the API
    #[arg(long, value_name = "PATH")]
    from_json: Option<PathBuf>,

    /// Never prompt; fail if a required value is missing
    #[arg(short = 'y', long)]
    no_input: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_input(self) -> ConfigInput {
        ConfigInput {
            api_key: self.api_key,
            prompt: self.prompt,
            output: self.output,
            base_url: self.base_url,
            model: self.model,
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
            format_instruction: self.format_instruction,
            language: self.language,
            from_json: self.from_json,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing

    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the result line.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting labgen v{}", env!("CARGO_PKG_VERSION"));

    let code = match run(cli).await {
        Ok(path) => {
            println!(
                "{} Lab report saved as {}",
                style("✓").green(),
                path.display()
            );
            0
        }
        Err(e) => {
            error!(code = e.code(), "{e}");
            eprintln!("{} {e}", style("✗").red());
            e.exit_code()
        }
    };
    std::process::exit(code);
}

/// Requester then renderer, once each. Returns the written path.
async fn run(cli: Cli) -> Result<PathBuf, AppError> {
    let interactive = !cli.no_input && std::io::stdin().is_terminal();
    let terminal = TerminalPrompter::default();
    let prompter: Option<&dyn Prompter> = if interactive { Some(&terminal) } else { None };

    let config = Config::resolve(cli.into_input(), prompter)?;

    let record = match config.source {
        ReportSource::Generate {
            api_key,
            prompt,
            base_url,
            model,
            timeout,
            settings,
        } => {
            let llm = LlmClient::new(api_key, model, timeout)?.with_base_url(base_url);
            info!("LLM client initialized (model: {})", llm.model());
            fetch_record(&llm, &prompt, &settings).await?
        }
        ReportSource::RecordFile(path) => {
            info!("Loading report from {}", path.display());
            LabReportRecord::from_file(&path)?
        }
    };

    render_document(&record, &config.output, &config.render)?;
    Ok(config.output)
}
