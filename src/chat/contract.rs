//! The structured-output contract enforced on raw model text.
//!
//! This is the single seam turning untrusted free text into a typed value.
//! [`validate`] is total: every input maps to either a [`ModelReply`] or a
//! [`ContractViolation`], never a panic and never a partial value.

use serde_json::Value;

use crate::error::ContractViolation;

/// A model response that passed the contract. Closed set of tags; anything
/// else is a violation at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    Recipe { message: String, data: Value },
    Tip { message: String, data: Value },
    Clarification { message: String, data: Value },
    Refusal { message: String },
    Action {
        message: String,
        action: String,
        params: Value,
    },
}

/// Strict-parse raw model text against the contract.
///
/// No markdown-fence stripping and no partial recovery: the system prompt
/// demands clean JSON, so anything else is a violation regardless of how
/// close it looks. Per-type `data` payloads other than `action` pass through
/// unvalidated; deep per-type schemas are an extension point, not enforced
/// here.
pub fn validate(raw: &str) -> Result<ModelReply, ContractViolation> {
    let value: Value = serde_json::from_str(raw).map_err(|_| ContractViolation::InvalidJson)?;

    let object = value.as_object().ok_or(ContractViolation::InvalidJson)?;

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ContractViolation::MissingField("type"))?;

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .ok_or(ContractViolation::MissingField("message"))?
        .to_string();

    let data = object.get("data").cloned().unwrap_or_else(|| Value::Object(Default::default()));

    match kind {
        "recipe" => Ok(ModelReply::Recipe { message, data }),
        "tip" => Ok(ModelReply::Tip { message, data }),
        "clarification" => Ok(ModelReply::Clarification { message, data }),
        "refusal" => Ok(ModelReply::Refusal { message }),
        "action" => {
            // A response claiming to be an action without naming one is
            // rejected, never guessed at.
            let action = data
                .get("action")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .ok_or(ContractViolation::MissingField("data.action"))?
                .to_string();
            let params = data
                .get("params")
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default()));
            Ok(ModelReply::Action {
                message,
                action,
                params,
            })
        }
        other => Err(ContractViolation::UnknownType(other.to_string())),
    }
}
