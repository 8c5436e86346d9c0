//! The lab report record exchanged between the requester and the renderer.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;

/// Five-field structured content of one lab report.
///
/// Built once at the API boundary by `from_response_text` and read-only after that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabReportRecord {
    pub topic: String,
    /// Rendered as a bulleted list; order is meaningful.
    #[serde(rename = "objective")]
    pub objectives: Vec<String>,
    pub theory: String,
    /// Multi-line code, rendered verbatim.
    pub implementation: String,
    pub conclusion: String,
}

/// Wire shape. Every field optional so an absent (or null) field becomes empty
/// content instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReport {
    topic: Option<String>,
    objective: Option<Vec<String>>,
    theory: Option<String>,
    implementation: Option<String>,
    conclusion: Option<String>,
}

impl From<RawReport> for LabReportRecord {
    fn from(raw: RawReport) -> Self {
        Self {
            topic: raw.topic.unwrap_or_default(),
            objectives: raw.objective.unwrap_or_default(),
            theory: raw.theory.unwrap_or_default(),
            implementation: raw.implementation.unwrap_or_default(),
            conclusion: raw.conclusion.unwrap_or_default(),
        }
    }
}

impl LabReportRecord {
    /// Parses the service's response text.
    ///
    /// Fails with `MalformedResponse` when the text is not JSON, is not a JSON
    /// object, or carries a field of the wrong type.
    pub fn from_response_text(text: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AppError::MalformedResponse(format!("response is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Loads a record saved as JSON, in the same shape the service returns.
    ///
    /// An unreadable file is a `Config` error; unparsable content is `MalformedResponse`.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report file {}", path.display()))
            .map_err(|e| AppError::Config(format!("{e:#}")))?;
        Self::from_response_text(&text)
    }

    pub fn from_value(value: Value) -> Result<Self, AppError> {
        if !value.is_object() {
            return Err(AppError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        let raw: RawReport = serde_json::from_value(value).map_err(|e| {
            AppError::MalformedResponse(format!("response does not match the report shape: {e}"))
        })?;
        Ok(raw.into())
    }
}

/// Response-shape declaration sent with every generation request.
pub fn lab_report_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topic": { "type": "STRING" },
            "objective": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "theory": { "type": "STRING" },
            "implementation": { "type": "STRING" },
            "conclusion": { "type": "STRING" }
        },
        "required": ["topic", "objective", "theory", "implementation", "conclusion"],
        "propertyOrdering": ["topic", "objective", "theory", "implementation", "conclusion"]
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
