use crate::error::{Error, Result};
use crate::profile::CommentDelimiters;
use serde_json::{Value, json};

/// Opaque text-generation service consumed by the pipeline.
///
/// The seam exists so the pipeline can be driven without a network in tests;
/// production code uses [`GeminiClient`].
pub trait Generate {
    /// Send a prompt to the backend and return its raw text answer.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for a Gemini-style `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }
}

impl Generate for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&json!({
                "contents": [{"parts": [{"text": prompt}]}]
            }))
            .send()
            .map_err(|e| Error::Backend {
                status: 0,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| Error::Backend {
            status,
            message: e.to_string(),
        })?;
        parse_response(status, &body)
    }
}

/// Extract the generated text from a backend response.
///
/// Non-success statuses become [`Error::Backend`], carrying the message from
/// the `{"error": {"message": ...}}` shape when the body matches it, or the
/// raw body otherwise. A success body without extractable candidate text
/// becomes [`Error::ResponseShape`].
pub fn parse_response(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.to_string());
        return Err(Error::Backend { status, message });
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| Error::ResponseShape(e.to_string()))?;
    value["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::ResponseShape("no candidate text in response".to_string()))
}

/// Strip backend artifacts from a raw response.
///
/// Deterministic and order-sensitive; the steps must run exactly in this
/// sequence because several patterns can match the same input:
///
/// 1. strip fenced-code-block markers, with or without a language tag;
/// 2. strip one outer pair of the dialect's symmetric delimiter, when the
///    text both starts and ends with it;
/// 3. otherwise strip a leading open-comment token;
/// 4. truncate at the last occurrence of the close-comment token, discarding
///    it and any trailing content the backend echoed after the real answer.
///
/// # Examples
///
/// ```
/// use docweave::{clean_response, profile_for};
///
/// let profile = profile_for("python").unwrap();
/// let cleaned = clean_response("```text\n\"\"\"Adds two numbers.\"\"\"\n```", &profile.delimiters);
/// assert_eq!(cleaned, "Adds two numbers.");
/// ```
pub fn clean_response(raw: &str, delimiters: &CommentDelimiters) -> String {
    let mut text = strip_fences(raw.trim());

    let symmetric = delimiters.start == delimiters.end;
    let wrapped = symmetric
        && text.len() >= delimiters.start.len() + delimiters.end.len()
        && text.starts_with(delimiters.start)
        && text.ends_with(delimiters.end);
    if wrapped {
        text = text[delimiters.start.len()..text.len() - delimiters.end.len()]
            .trim()
            .to_string();
    } else if let Some(rest) = text.strip_prefix(delimiters.start) {
        text = rest.trim_start().to_string();
    }

    if let Some(index) = text.rfind(delimiters.end) {
        text.truncate(index);
    }

    text.trim().to_string()
}

fn strip_fences(text: &str) -> String {
    let mut text = text.trim().to_string();
    if text.starts_with("```") {
        text = match text.find('\n') {
            Some(index) => text[index + 1..].to_string(),
            None => String::new(),
        };
    }
    let trimmed = text.trim_end();
    if trimmed.ends_with("```") {
        text = trimmed[..trimmed.len() - 3].trim_end().to_string();
    }
    text.trim().to_string()
}
