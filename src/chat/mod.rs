//! The conversational pipeline: quota → guard → provider → contract →
//! dispatch, each stage able to short-circuit with a terminal reply.

pub mod contract;
pub mod guard;
pub mod prompt;
pub mod quota;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::actions::ActionDispatcher;
use crate::config::ChatConfig;
use crate::domain::Kitchen;
use crate::llm::LlmProvider;

use contract::ModelReply;
use guard::{GuardVerdict, PromptGuard};
use quota::{QuotaDecision, QuotaStore};

/// The recipe the user is viewing while chatting, if any.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeContext {
    pub recipe_id: String,
    pub recipe_name: String,
}

/// One inbound chat turn. Ephemeral; the gateway persists nothing.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Authenticated identity from the session layer; trusted as-is.
    /// `None` means the caller may chat but cannot dispatch actions.
    pub user_id: Option<String>,
    /// Quota-only identity fallback (client-supplied header) used when no
    /// session exists. Never grants action authentication.
    pub fallback_identity: Option<String>,
    pub message: String,
    pub recipe_context: Option<RecipeContext>,
}

/// The wire response union. Callers discriminate on `type`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatReply {
    Recipe { message: String, data: Value },
    Tip { message: String, data: Value },
    Clarification { message: String, data: Value },
    Refusal { message: String },
    ActionResult { message: String, data: Value },
    ActionError { message: String, data: Value },
    Error { message: String },
}

/// The one pipeline outcome that maps to a non-200 status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Daily message limit of {limit} reached. Try again tomorrow!")]
    QuotaExceeded { limit: u32 },
}

pub struct ChatGateway {
    quota: QuotaStore,
    guard: PromptGuard,
    provider: Arc<dyn LlmProvider>,
    dispatcher: ActionDispatcher,
}

impl ChatGateway {
    pub fn new(
        config: &ChatConfig,
        provider: Arc<dyn LlmProvider>,
        kitchen: Arc<dyn Kitchen>,
    ) -> Self {
        Self {
            quota: QuotaStore::new(config.daily_message_limit, config.quota_capacity),
            guard: PromptGuard::new(),
            provider,
            dispatcher: ActionDispatcher::new(kitchen),
        }
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Run one chat turn through the pipeline.
    ///
    /// Every outcome except quota exhaustion folds into a [`ChatReply`];
    /// later stages never run once an earlier one produced a terminal
    /// reply.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply, GatewayError> {
        let identity = request
            .user_id
            .as_deref()
            .or(request.fallback_identity.as_deref());

        if let QuotaDecision::Denied { limit } = self.quota.check(identity) {
            debug!(identity = identity.unwrap_or(quota::GUEST_IDENTITY), "daily quota exhausted");
            return Err(GatewayError::QuotaExceeded { limit });
        }

        if let GuardVerdict::Blocked { pattern } = self.guard.inspect(&request.message) {
            // User-caused, not a system fault; no provider call is made.
            debug!(pattern, "message blocked by prompt guard");
            return Ok(ChatReply::Refusal {
                message: prompt::COOKING_ONLY_MESSAGE.to_string(),
            });
        }

        let user_message =
            prompt::annotate_with_recipe_context(&request.message, request.recipe_context.as_ref());

        let raw = match self
            .provider
            .complete(prompt::SYSTEM_PROMPT, &user_message)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "provider call failed");
                return Ok(ChatReply::Error {
                    message: prompt::PROVIDER_UNAVAILABLE_MESSAGE.to_string(),
                });
            }
        };

        let reply = match contract::validate(&raw) {
            Ok(reply) => reply,
            Err(violation) => {
                // The raw text goes to the log for diagnosis, never to the
                // user.
                warn!(violation = %violation, raw_len = raw.len(), "model output violated the response contract");
                return Ok(ChatReply::Error {
                    message: prompt::INVALID_RESPONSE_MESSAGE.to_string(),
                });
            }
        };

        Ok(match reply {
            ModelReply::Recipe { message, data } => ChatReply::Recipe { message, data },
            ModelReply::Tip { message, data } => ChatReply::Tip { message, data },
            ModelReply::Clarification { message, data } => {
                ChatReply::Clarification { message, data }
            }
            ModelReply::Refusal { message } => ChatReply::Refusal { message },
            ModelReply::Action {
                message: _,
                action,
                params,
            } => {
                match self
                    .dispatcher
                    .execute(&action, &params, request.user_id.as_deref())
                    .await
                {
                    Ok(success) => ChatReply::ActionResult {
                        message: success.message,
                        data: success.data,
                    },
                    Err(e) => ChatReply::ActionError {
                        message: e.to_string(),
                        data: Value::Object(Default::default()),
                    },
                }
            }
        })
    }
}
