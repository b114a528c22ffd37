//! Model backend implementations and the advisor façade for Uniplan.
//!
//! The backend implements the `uniplan_core::ModelClient` trait. The
//! `Advisor` façade decides between the model path (prompt → generate →
//! extract) and the offline fallback planner, always producing the same
//! canonical result shape.

pub mod advisor;
pub mod extract;
pub mod gemini;
pub mod prompt;

pub use advisor::Advisor;
pub use extract::{ExtractedReply, extract};
pub use gemini::GeminiClient;
pub use prompt::build_prompt;
