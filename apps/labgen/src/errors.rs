use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Every variant is fatal for the current run; `main` maps it to an exit code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request to the generation service failed: {0}")]
    RequestFailure(String),

    #[error("Malformed response from the generation service: {0}")]
    MalformedResponse(String),

    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Process exit status for this error. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::RequestFailure(_) => 3,
            AppError::MalformedResponse(_) => 4,
            AppError::Write { .. } => 5,
        }
    }

    /// Short machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::RequestFailure(_) => "REQUEST_FAILURE",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::Write { .. } => "WRITE_ERROR",
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(_) | LlmError::Api { .. } => AppError::RequestFailure(err.to_string()),
            LlmError::EmptyContent | LlmError::Parse(_) => {
                AppError::MalformedResponse(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let errors = [
            AppError::Config("missing key".to_string()),
            AppError::RequestFailure("timeout".to_string()),
            AppError::MalformedResponse("not json".to_string()),
            AppError::Write {
                path: PathBuf::from("/nope/report.docx"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such dir"),
            },
        ];
        let mut codes: Vec<i32> = errors.iter().map(AppError::exit_code).collect();
        assert!(codes.iter().all(|c| *c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 4);
    }

    #[test]
    fn test_api_error_maps_to_request_failure() {
        let err: AppError = LlmError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::RequestFailure(_)));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_empty_content_maps_to_malformed_response() {
        let err: AppError = LlmError::EmptyContent.into();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert_eq!(err.code(), "MALFORMED_RESPONSE");
    }

    #[test]
    fn test_write_error_names_the_path() {
        let err = AppError::Write {
            path: PathBuf::from("out/report.docx"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/report.docx"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }
}
