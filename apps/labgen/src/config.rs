use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::errors::AppError;
use crate::generation::GenerationSettings;
use crate::render::RenderOptions;

pub const DEFAULT_OUTPUT: &str = "lab-report.docx";

/// Raw values gathered from flags, environment variables and `.env`.
/// Nothing here is validated yet.
#[derive(Debug, Clone)]
pub struct ConfigInput {
    pub api_key: Option<String>,
    pub prompt: Option<String>,
    pub output: Option<PathBuf>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub format_instruction: String,
    pub language: Option<String>,
    pub from_json: Option<PathBuf>,
}

/// Where the report content comes from.
#[derive(Debug, Clone)]
pub enum ReportSource {
    /// Ask the generation service.
    Generate {
        api_key: String,
        prompt: String,
        base_url: String,
        model: String,
        timeout: Duration,
        settings: GenerationSettings,
    },
    /// Render a previously saved record without any network call.
    RecordFile(PathBuf),
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: ReportSource,
    pub output: PathBuf,
    pub render: RenderOptions,
}

/// Fills in values the user did not pass on the command line.
pub trait Prompter {
    fn prompt_text(&self) -> Result<String>;
    fn output_path(&self, default: &str) -> Result<String>;
    fn api_key(&self) -> Result<String>;
}

/// Terminal prompts via dialoguer.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn prompt_text(&self) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt("Describe the lab report you want")
            .interact_text()
            .context("Failed to read the prompt")
    }

    fn output_path(&self, default: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt("Output file")
            .default(default.to_string())
            .interact_text()
            .context("Failed to read the output path")
    }

    fn api_key(&self) -> Result<String> {
        Password::with_theme(&self.theme)
            .with_prompt("Gemini API key")
            .interact()
            .context("Failed to read the API key")
    }
}

impl Config {
    /// Validates `input`, asking `prompter` for anything missing when one is given.
    ///
    /// There is no fallback credential: generating without an API key is a
    /// `Config` error.
    pub fn resolve(input: ConfigInput, prompter: Option<&dyn Prompter>) -> Result<Self, AppError> {
        if !(0.0..=2.0).contains(&input.temperature) {
            return Err(AppError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                input.temperature
            )));
        }
        if input.timeout_secs == 0 {
            return Err(AppError::Config(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let source = match input.from_json {
            Some(path) => ReportSource::RecordFile(path),
            None => {
                let prompt = match (input.prompt, prompter) {
                    (Some(prompt), _) => prompt,
                    (None, Some(p)) => p.prompt_text().map_err(config_error)?,
                    (None, None) => {
                        return Err(AppError::Config(
                            "no prompt given; pass --prompt".to_string(),
                        ))
                    }
                };

                let api_key = match (non_empty(input.api_key), prompter) {
                    (Some(key), _) => key,
                    (None, Some(p)) => non_empty(Some(p.api_key().map_err(config_error)?))
                        .ok_or_else(missing_api_key)?,
                    (None, None) => return Err(missing_api_key()),
                };

                ReportSource::Generate {
                    api_key,
                    prompt,
                    base_url: input.base_url,
                    model: input.model,
                    timeout: Duration::from_secs(input.timeout_secs),
                    settings: GenerationSettings {
                        temperature: input.temperature,
                        format_instruction: input.format_instruction,
                    },
                }
            }
        };

        let output = match (input.output, prompter) {
            (Some(path), _) => path,
            (None, Some(p)) => {
                PathBuf::from(p.output_path(DEFAULT_OUTPUT).map_err(config_error)?)
            }
            (None, None) => PathBuf::from(DEFAULT_OUTPUT),
        };
        if output.as_os_str().is_empty() {
            return Err(AppError::Config("output path is empty".to_string()));
        }

        Ok(Config {
            source,
            output,
            render: RenderOptions {
                language: input.language,
                ..Default::default()
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn missing_api_key() -> AppError {
    AppError::Config("no API key given; pass --api-key or set GEMINI_API_KEY".to_string())
}

fn config_error(err: anyhow::Error) -> AppError {
    AppError::Config(format!("{err:#}"))
}
