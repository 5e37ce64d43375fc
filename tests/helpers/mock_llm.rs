// ABOUTME: Scripted LLM provider for route tests
// ABOUTME: Replays queued replies and records every chat request it receives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use repup_server::errors::{AppError, ErrorCode};
use repup_server::llm::{ChatRequest, ChatResponse, LlmProvider, TokenUsage};

/// One scripted answer
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Successful completion with this content
    Content(String),
    /// Failure with this code and message
    Error(ErrorCode, String),
}

/// LLM provider that answers from a queue
pub struct MockLlmProvider {
    model: String,
    healthy: bool,
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockLlmProvider {
    /// Provider that answers with the given replies, in order
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            model: "mock-model".to_owned(),
            healthy: true,
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose health check reports it unreachable
    #[must_use]
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Provider that always has one plan ready
    pub fn with_content(content: &str) -> Self {
        Self::new([MockReply::Content(content.to_owned())])
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Mock"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Error(ErrorCode::InternalError, "no reply queued".to_owned()));

        match reply {
            MockReply::Content(content) => Ok(ChatResponse {
                content,
                model: request.model.clone().unwrap_or_else(|| self.model.clone()),
                usage: Some(TokenUsage {
                    prompt_tokens: 100,
                    completion_tokens: 200,
                    total_tokens: 300,
                }),
                finish_reason: Some("stop".to_owned()),
            }),
            MockReply::Error(code, message) => Err(AppError::new(code, message)),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(self.healthy)
    }
}
