//! ModelClient trait — the abstraction over generative model backends.
//!
//! A ModelClient knows how to send an assembled prompt to a model and get
//! raw text back. The advisor façade calls `generate()` without knowing
//! which backend is configured; when no client is present at all it plans
//! offline instead.

use async_trait::async_trait;

use crate::error::ModelError;

/// The core model backend trait.
///
/// Implementations: Gemini (HTTP), plus test mocks. The single `generate`
/// call is the only suspension point in the advisor subsystem.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// A human-readable name for this backend (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a prompt and get the raw response text.
    ///
    /// The returned text is free-form model output; the caller is
    /// responsible for extracting a structured reply from it.
    async fn generate(&self, prompt: &str) -> std::result::Result<String, ModelError>;

    /// Health check — can we reach the backend?
    async fn health_check(&self) -> std::result::Result<bool, ModelError> {
        Ok(true)
    }
}
