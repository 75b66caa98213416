//! Request and response DTOs for the web gateway API.

use serde::{Deserialize, Serialize};

use crate::chat::RecipeContext;

// --- Chat ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Required: a request without a message is rejected with a 400 before
    /// the pipeline runs.
    pub message: String,
    #[serde(default)]
    pub recipe_context: Option<RecipeContext>,
}

/// Body of the 429 quota response.
#[derive(Debug, Serialize)]
pub struct QuotaExceededResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ActionListResponse {
    pub actions: Vec<&'static str>,
    pub description: &'static str,
}

// --- Health ---

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub channel: &'static str,
}
