//! Axum web gateway for the chat pipeline.

pub mod auth;
pub mod server;
pub mod types;
