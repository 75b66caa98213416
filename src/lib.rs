//! PantryChef conversational action gateway.
//!
//! The pipeline between a user's free-text chat message and (a) the LLM
//! provider and (b) side-effecting domain actions: quota check, prompt
//! guard, provider call, response-contract validation, and authenticated
//! action dispatch. The surrounding recipe/pantry CRUD app is consumed only
//! through the [`domain::Kitchen`] capability.

pub mod actions;
pub mod channels;
pub mod chat;
pub mod config;
pub mod domain;
pub mod error;
pub mod llm;
