use super::util::with_retry;
use crate::core::advice::AdviceProvider;
use crate::core::config::GeminiProviderConfig;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
const RETRY_DELAY_MS: u64 = 500;

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize, Debug)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

/// Text generation through the Gemini `generateContent` endpoint.
pub struct GeminiAdviceProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    retries: usize,
}

impl GeminiAdviceProvider {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        GeminiAdviceProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            timeout: None,
            retries: 0,
        }
    }

    /// Builds a provider from config, taking the API key from the
    /// environment when the config has none.
    pub fn from_config(config: &GeminiProviderConfig) -> Self {
        let api_key = config.api_key.clone().or_else(|| {
            API_KEY_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        });
        let mut provider = Self::new(&config.base_url, &config.model, api_key);
        provider.timeout = config.timeout_secs.map(Duration::from_secs);
        provider.retries = config.retries;
        provider
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn send_once(
        &self,
        client: &reqwest::Client,
        api_key: &str,
        prompt: &str,
    ) -> Result<String> {
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for model: {}", e, self.model))?;

        debug!(status = %response.status(), "Received Gemini response");

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            debug!(%detail, "Gemini error body");
            return Err(anyhow!("HTTP error: {} for model: {}", status, self.model));
        }

        let text = response
            .text()
            .await
            .context("Failed to get response text")?;
        let data: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", self.model, e))?;

        let advice: String = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if advice.is_empty() {
            return Err(anyhow!("No advice text returned by model: {}", self.model));
        }
        Ok(advice)
    }
}

#[async_trait]
impl AdviceProvider for GeminiAdviceProvider {
    #[instrument(name = "GeminiGenerate", skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("No Gemini API key configured"))?;

        let mut builder = reqwest::Client::builder().user_agent("ecsa/0.1");
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        debug!("Requesting advice from {}", self.endpoint());
        with_retry(
            || self.send_once(&client, api_key, prompt),
            self.retries,
            RETRY_DELAY_MS,
        )
        .await
    }
}
