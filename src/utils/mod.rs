//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Input validation and sanitization utilities
pub mod validation;

/// Unicode-aware text formatting helpers
pub mod text;

/// Verbose/plain logging helpers for the CLI layer
pub mod logging;
