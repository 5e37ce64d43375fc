// ABOUTME: Security helpers for the HTTP layer
// ABOUTME: Session cookie construction and parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

/// Session cookie helpers
pub mod cookies;
