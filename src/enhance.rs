//! Optional model-backed summaries.
//!
//! An [`Analyzer`](crate::Analyzer) can carry a [`SummaryEnhancer`]. When one
//! is attached and returns clean text, that text replaces the heuristic
//! summary. Any failure leaves the heuristic summary in place.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Page text handed to an enhancer is cut to this many characters.
pub const MAX_CONTEXT_CHARS: usize = 4000;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 150;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What an enhancer gets to see of a page.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    /// The heuristic summary that stands if the enhancer fails.
    pub summary: &'a str,
    /// Extracted page text, at most [`MAX_CONTEXT_CHARS`] characters.
    pub text: &'a str,
}

impl<'a> PageContext<'a> {
    /// Build a context, cutting `text` to [`MAX_CONTEXT_CHARS`].
    #[must_use]
    pub fn new(
        url: &'a str,
        title: &'a str,
        description: &'a str,
        summary: &'a str,
        text: &'a str,
    ) -> Self {
        let text = match text.char_indices().nth(MAX_CONTEXT_CHARS) {
            Some((cut, _)) => &text[..cut],
            None => text,
        };
        Self {
            url,
            title,
            description,
            summary,
            text,
        }
    }
}

/// Produces a better summary from page context.
#[async_trait]
pub trait SummaryEnhancer: Send + Sync {
    async fn enhance(&self, page: &PageContext<'_>) -> Result<String>;
}

/// Enhancer backed by an OpenAI-compatible `/v1/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatEnhancer {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiCompatEnhancer {
    /// Enhancer for `base_url` with the default model, token limit and timeout.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configure from `PAGE_DIGEST_LLM_BASE_URL`, `PAGE_DIGEST_LLM_API_KEY`
    /// and `PAGE_DIGEST_LLM_MODEL`. The base URL is required.
    pub fn from_env(client: reqwest::Client) -> Result<Self> {
        Self::from_lookup(client, |name| std::env::var(name).ok())
    }

    /// Same as [`OpenAiCompatEnhancer::from_env`] with a custom variable source.
    pub fn from_lookup<F>(client: reqwest::Client, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let base_url = env("PAGE_DIGEST_LLM_BASE_URL")
            .ok_or_else(|| Error::Config("missing PAGE_DIGEST_LLM_BASE_URL".to_string()))?;

        let mut enhancer = Self::new(client, base_url);
        enhancer.api_key = env("PAGE_DIGEST_LLM_API_KEY");
        if let Some(model) = env("PAGE_DIGEST_LLM_MODEL") {
            enhancer.model = model;
        }
        Ok(enhancer)
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint_chat_completions(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SummaryEnhancer for OpenAiCompatEnhancer {
    async fn enhance(&self, page: &PageContext<'_>) -> Result<String> {
        let req = ChatCompletionsRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: build_prompt(page),
            }],
            max_tokens: self.max_tokens,
            stream: false,
        };

        let mut rb = self
            .client
            .post(self.endpoint_chat_completions())
            .timeout(self.timeout);
        if let Some(k) = &self.api_key {
            rb = rb.bearer_auth(k);
        }

        let resp = rb
            .json(&req)
            .send()
            .await
            .map_err(|e| Error::Enhancer(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Enhancer(format!("chat.completions HTTP {status}")));
        }

        let parsed: ChatCompletionsResponse = resp
            .json()
            .await
            .map_err(|e| Error::Enhancer(e.to_string()))?;
        if let Some(err) = parsed.error {
            return Err(Error::Enhancer(err.message));
        }
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Enhancer("no choices in response".to_string()))
    }
}

fn build_prompt(page: &PageContext<'_>) -> String {
    format!(
        "Summarize this webpage in 1-2 concise sentences. \
         Focus on what it is and why someone would bookmark it.\n\n\
         URL: {}\nTitle: {}\nDescription: {}\nPage content excerpt: {}\n\nSummary:",
        page.url, page.title, page.description, page.text
    )
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    message: String,
}
