//! Content Requester: one schema-constrained call, one parsed record.
//!
//! Flow: build prompt → attach report schema → ContentService::generate →
//!       LabReportRecord::from_response_text.
//!
//! No retries. A failed call or an unparsable payload ends the run, and no
//! document is written because rendering never starts.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{build_prompt, FORMAT_INSTRUCTION};
use crate::llm_client::{ContentService, GenerationRequest};
use crate::models::{lab_report_schema, LabReportRecord};

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Sampling and prompt knobs for a generation request.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub format_instruction: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            format_instruction: FORMAT_INSTRUCTION.to_string(),
        }
    }
}

/// Asks the generation service for a lab report about `prompt`.
///
/// Errors:
/// - `RequestFailure`: transport, auth, quota or any non-2xx reply
/// - `MalformedResponse`: empty reply or text that does not parse as a report
pub async fn fetch_record(
    service: &dyn ContentService,
    prompt: &str,
    settings: &GenerationSettings,
) -> Result<LabReportRecord, AppError> {
    if prompt.trim().is_empty() {
        warn!("Prompt is empty; the generated report will likely be low quality");
    }

    let request = GenerationRequest {
        prompt: build_prompt(prompt, &settings.format_instruction),
        response_schema: lab_report_schema(),
        temperature: settings.temperature,
    };

    info!(
        "Requesting lab report (temperature={}, prompt_chars={})",
        request.temperature,
        request.prompt.chars().count()
    );

    let text = service.generate(&request).await?;
    let record = LabReportRecord::from_response_text(&text)?;

    info!(
        "Received report on {:?} with {} objectives",
        record.topic,
        record.objectives.len()
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Returns a canned reply and remembers the last request it saw.
    struct CannedService {
        reply: Mutex<Option<Result<String, LlmError>>>,
        seen: Mutex<Option<GenerationRequest>>,
    }

    impl CannedService {
        fn new(reply: Result<String, LlmError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(None),
            }
        }

        fn last_request(&self) -> GenerationRequest {
            self.seen.lock().unwrap().clone().expect("no request was sent")
        }
    }

    #[async_trait]
    impl ContentService for CannedService {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            self.reply
                .lock()
                .unwrap()
                .take()
                .expect("service called more than once")
        }
    }

    const INHERITANCE_REPLY: &str = r#"{"topic":"Inheritance","objective":["Understand inheritance"],"theory":"...","implementation":"class A{}","conclusion":"..."}"#;

    #[tokio::test]
    async fn test_fetch_record_parses_reply() {
        let service = CannedService::new(Ok(INHERITANCE_REPLY.to_string()));
        let record = fetch_record(
            &service,
            "Explain single inheritance in Java",
            &GenerationSettings::default(),
        )
        .await
        .unwrap();

        assert_eq!(record.topic, "Inheritance");
        assert_eq!(record.objectives, vec!["Understand inheritance"]);
        assert_eq!(record.implementation, "class A{}");
    }

    #[tokio::test]
    async fn test_fetch_record_sends_schema_temperature_and_directive() {
        let service = CannedService::new(Ok(INHERITANCE_REPLY.to_string()));
        let settings = GenerationSettings {
            temperature: 0.1,
            format_instruction: "Indent with four spaces.".to_string(),
        };
        fetch_record(&service, "Explain polymorphism", &settings)
            .await
            .unwrap();

        let request = service.last_request();
        assert_eq!(request.prompt, "Explain polymorphism\n\nIndent with four spaces.");
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(request.response_schema, lab_report_schema());
    }

    #[tokio::test]
    async fn test_invalid_json_reply_is_malformed_response() {
        let service = CannedService::new(Ok("I cannot help with that.".to_string()));
        let err = fetch_record(&service, "Explain loops", &GenerationSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_empty_reply_is_malformed_response() {
        let service = CannedService::new(Err(LlmError::EmptyContent));
        let err = fetch_record(&service, "Explain loops", &GenerationSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_api_error_is_request_failure() {
        let service = CannedService::new(Err(LlmError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        }));
        let err = fetch_record(&service, "Explain loops", &GenerationSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RequestFailure(_)), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_empty_prompt_is_still_sent() {
        let service = CannedService::new(Ok("{}".to_string()));
        let record = fetch_record(&service, "", &GenerationSettings::default())
            .await
            .unwrap();
        assert_eq!(record, LabReportRecord::default());
        assert_eq!(service.last_request().prompt, FORMAT_INSTRUCTION);
    }
}
