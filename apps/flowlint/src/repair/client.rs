//! Blocking HTTP client for an OpenAI-style `/v1/completions` endpoint.
//!
//! One request per call, bounded by the client timeout. Errors are logged
//! and collapse to an empty completion.

use super::Completer;
use crate::error::LintError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

pub struct HttpCompleter {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl HttpCompleter {
    pub fn new(
        api_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
        insecure: bool,
    ) -> Result<Self, LintError> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure)
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/completions", self.api_url)
    }

    fn request(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String, LintError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens,
            temperature,
        };
        debug!(endpoint = %self.endpoint(), max_tokens, "sending completion request");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(LintError::Remote(format!("API error {}: {}", status, text)));
        }
        let parsed: CompletionResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text.trim().to_string())
            .ok_or_else(|| LintError::Remote("response has no choices".into()))
    }
}

impl Completer for HttpCompleter {
    fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> String {
        match self.request(prompt, max_tokens, temperature) {
            Ok(text) => text,
            Err(e) => {
                warn!("{}", e);
                eprintln!("{} {}", crate::utils::error_prefix(), e);
                String::new()
            }
        }
    }
}
