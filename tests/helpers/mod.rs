// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the Axum request driver and the scripted LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
pub mod mock_llm;
