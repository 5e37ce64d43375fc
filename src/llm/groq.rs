// ABOUTME: Groq LLM provider implementation
// ABOUTME: Calls Groq's OpenAI-compatible chat completions API with bearer auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! # Groq Provider
//!
//! Implementation of [`LlmProvider`] for Groq's OpenAI-compatible API.
//! The base URL is configurable so tests and proxies can stand in for
//! `https://api.groq.com/openai/v1`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;

const SERVICE: &str = "Groq";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for GroqMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GroqErrorResponse {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Groq LLM provider
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl GroqProvider {
    /// Create a provider for `base_url` using `default_model` when a request names none
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if the HTTP client cannot be built
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        default_model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            default_model: default_model.into(),
        })
    }

    /// Create a provider from configuration, `None` when no API key is set
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if the HTTP client cannot be built
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>, AppError> {
        config
            .api_key
            .as_deref()
            .map(|key| {
                Self::new(
                    key,
                    &config.base_url,
                    &config.model,
                    Duration::from_secs(config.timeout_secs),
                )
            })
            .transpose()
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Map a non-success API response to an error
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<GroqErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |parsed| match parsed.error.error_type {
                Some(kind) => format!("{kind}: {}", parsed.error.message),
                None => parsed.error.message,
            },
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Groq API authentication failed: {detail}"),
            ),
            StatusCode::TOO_MANY_REQUESTS => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("Groq rate limit exceeded: {detail}"),
            ),
            StatusCode::BAD_REQUEST => {
                AppError::invalid_input(format!("Groq API rejected the request: {detail}"))
            }
            _ => AppError::external_service(SERVICE, format!("API error ({status}): {detail}")),
        }
    }

    fn transport_error(e: &reqwest::Error) -> AppError {
        error!("Groq request failed: {e}");
        if e.is_timeout() {
            AppError::external_unavailable(SERVICE, "Request timed out")
        } else {
            AppError::external_unavailable(SERVICE, format!("Failed to connect: {e}"))
        }
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn display_name(&self) -> &'static str {
        "Groq (Llama)"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let started = Instant::now();
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let result = self.send_completion(model, request).await;

        AppLogger::log_llm_call(
            self.name(),
            model,
            result.is_ok(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        result
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!("Groq health check failed with status: {}", response.status());
        }
        Ok(healthy)
    }
}

impl GroqProvider {
    async fn send_completion(
        &self,
        model: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, AppError> {
        debug!("Sending chat completion request to Groq");

        let body = GroqRequest {
            model,
            messages: request.messages.iter().map(GroqMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::transport_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &text));
        }

        let parsed: GroqResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE, "API returned no choices"))?;
        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received response from Groq: {} chars, finish_reason: {:?}",
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: parsed.model.unwrap_or_else(|| model.to_owned()),
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}
