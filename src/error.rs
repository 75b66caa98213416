//! Error taxonomy for the chat gateway.
//!
//! Every pipeline stage returns a discriminated result; these types are the
//! failure halves. Nothing here carries raw model output in its `Display`
//! impl, so surfacing an error to a caller never leaks the LLM's text.

use thiserror::Error;

/// Configuration loading/validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {key}")]
    MissingKey { key: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures reaching or receiving from the LLM provider.
///
/// Network/timeout/provider-side errors are system faults; they surface as a
/// generic error response and are never converted into a fabricated
/// completion.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider base URL cannot carry a path")]
    InvalidEndpoint,

    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider request timed out")]
    Timeout,

    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("provider returned no completion choices")]
    EmptyCompletion,
}

/// The model's output failed the structured-response contract.
///
/// Treated as a system fault even though the immediate cause is the LLM; the
/// violating text is logged for diagnosis but never echoed to the end user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("response is not valid JSON")]
    InvalidJson,

    #[error("response type {0:?} is not recognized")]
    UnknownType(String),

    #[error("response is missing required field {0:?}")]
    MissingField(&'static str),
}

/// Terminal failure states of an action dispatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Authentication required for this action")]
    AuthenticationRequired,

    #[error("{0}")]
    Failed(String),
}

/// Errors surfaced by the domain capability layer (recipe/meal-plan store).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Channel (HTTP server) lifecycle failures.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },
}
