//! Errors raised at the input boundary.
//!
//! The analysis engine itself cannot fail; these errors describe requests
//! that are rejected before any text is analyzed.

use thiserror::Error;

/// Reasons a request is rejected before analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("content is required and must be a non-empty string")]
    EmptyContent,
    #[error("content exceeds maximum length of {limit} characters ({actual} given)")]
    ContentTooLong { limit: usize, actual: usize },
    #[error("contents must be an array of strings")]
    NotAnArray,
    #[error("maximum {limit} documents per batch ({actual} given)")]
    BatchTooLarge { limit: usize, actual: usize },
    #[error("content at index {index} must be a string")]
    ItemNotString { index: usize },
    #[error("content at index {index} exceeds maximum length of {limit} characters")]
    ItemTooLong { index: usize, limit: usize },
}
