//! GeminiApiService - direct REST implementation for Gemini.
//!
//! Every call builds a fresh `generateContent` request from the
//! [`GenerationConfig`] it is handed, so settings changes apply to the very
//! next message. The only state kept between calls is the HTTP client and the
//! immutable credentials.

use async_trait::async_trait;
use gembridge_core::generation::{
    GenerationConfig, GenerationError, GenerationResult, GenerationService,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live [`GenerationService`] backed by the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiService {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiService")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiApiService {
    /// Creates a new service with the provided API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the service at another endpoint root (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> GenerationResult<String> {
        // Key travels as a header so it never appears in URLs echoed by reqwest errors.
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                GenerationError::transport(format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            GenerationError::decode(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerationService for GeminiApiService {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> GenerationResult<String> {
        let request = GenerateContentRequest::build(prompt, config);
        tracing::debug!(
            model = %self.model,
            temperature = config.temperature,
            top_p = config.top_p,
            top_k = config.top_k,
            prompt_chars = prompt.chars().count(),
            "sending generateContent request"
        );
        self.send_request(&request).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationParameters,
}

impl GenerateContentRequest {
    fn build(prompt: &str, config: &GenerationConfig) -> Self {
        let system_instruction = Some(config.system_prompt.as_str())
            .filter(|text| !text.trim().is_empty())
            .map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            });

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction,
            generation_config: GenerationParameters {
                temperature: config.temperature,
                top_p: config.top_p,
                top_k: config.top_k,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationParameters {
    temperature: f32,
    top_p: f32,
    top_k: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> GenerationResult<String> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(GenerationError::empty_response(format!(
            "Gemini blocked the prompt (reason: {reason})"
        )));
    }

    let Some(candidate) = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
    else {
        return Err(GenerationError::empty_response(
            "Gemini failed to generate text (empty response)",
        ));
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }

    let message = match candidate.finish_reason.as_deref() {
        Some(reason) if reason != "STOP" => {
            format!("Gemini failed to generate text (finish reason: {reason})")
        }
        _ => "Gemini failed to generate text (empty response)".to_string(),
    };
    Err(GenerationError::empty_response(message))
}

fn map_http_error(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| format!("Gemini API error {status}: {body}"));

    GenerationError::http(status.as_u16(), message)
}
