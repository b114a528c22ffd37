//! The advisor façade — response normalization over two paths.
//!
//! Model-configured: assemble the prompt, call the backend, extract a
//! structured reply; any failure (network, rate limit, timeout,
//! unusable payload) falls back to the offline planner with a short
//! diagnostic note attached. Model-absent: go straight to the planner.
//!
//! Both paths converge on the same canonical result; callers never see
//! an error from `plan_response`.

use std::sync::Arc;

use tracing::{info, warn};

use uniplan_catalog::Catalog;
use uniplan_config::AppConfig;
use uniplan_core::{AdvisorReply, AdvisorResponse, ChatTurn, ModelClient, StudentProfile};

use crate::extract;
use crate::gemini::GeminiClient;
use crate::prompt;

/// Characters of error detail carried into the fallback note. Bounded
/// so upstream error bodies never leak wholesale into user-visible text.
const NOTE_EXCERPT_CHARS: usize = 50;

/// Characters of raw model output kept in the debug map.
const RAW_EXCERPT_CHARS: usize = 200;

/// The Response Normalizer: one entry point, two convergent paths.
pub struct Advisor {
    model: Option<Arc<dyn ModelClient>>,
}

impl Advisor {
    /// An advisor with no model backend; every query plans offline.
    pub fn offline() -> Self {
        Self { model: None }
    }

    /// An advisor backed by the given model client.
    pub fn with_model(model: Arc<dyn ModelClient>) -> Self {
        Self { model: Some(model) }
    }

    /// Build from configuration: a Gemini backend when an API key is
    /// present, offline otherwise.
    pub fn from_config(config: &AppConfig) -> Self {
        match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => {
                info!(model = %config.model, "Advisor configured with Gemini backend");
                Self::with_model(Arc::new(GeminiClient::new(key, &config.model)))
            }
            None => {
                warn!("No API key configured; advisor will use offline fallback responses");
                Self::offline()
            }
        }
    }

    /// Whether a model backend is configured.
    pub fn model_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Answer a student query.
    ///
    /// Always returns a result; every failure mode resolves to the
    /// fallback planner. The model call is the sole await point.
    pub async fn plan_response(
        &self,
        profile: &StudentProfile,
        catalog: &Catalog,
        message: &str,
        history: &[ChatTurn],
    ) -> AdvisorResponse {
        let Some(model) = &self.model else {
            return AdvisorResponse::Fallback(uniplan_planner::plan(profile, catalog, None));
        };

        let prompt = prompt::build_prompt(profile, catalog, message, history);

        let raw = match model.generate(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(backend = model.name(), error = %err, "Model call failed; falling back");
                return self.fall_back(profile, catalog, model.name(), &err.to_string());
            }
        };

        let extracted = extract::extract(&raw);
        match extracted.message {
            Some(msg) if !msg.trim().is_empty() => {
                let mut debug = serde_json::Map::new();
                debug.insert(
                    "raw".into(),
                    serde_json::Value::String(excerpt(&raw, RAW_EXCERPT_CHARS)),
                );
                AdvisorResponse::Model(AdvisorReply {
                    message: msg,
                    schedule: extracted.schedule,
                    debug: Some(debug),
                })
            }
            _ => {
                warn!(
                    backend = model.name(),
                    "Model reply had no usable message; falling back"
                );
                self.fall_back(
                    profile,
                    catalog,
                    model.name(),
                    "returned an unexpected payload",
                )
            }
        }
    }

    fn fall_back(
        &self,
        profile: &StudentProfile,
        catalog: &Catalog,
        backend: &str,
        detail: &str,
    ) -> AdvisorResponse {
        let note = format!("{backend} error: {}", excerpt(detail, NOTE_EXCERPT_CHARS));
        let mut reply = uniplan_planner::plan(profile, catalog, Some(&note));

        let debug = reply.debug.get_or_insert_with(serde_json::Map::new);
        debug.insert("note".into(), serde_json::Value::String(note));

        AdvisorResponse::Fallback(reply)
    }
}

/// Truncate to at most `max` characters, appending an ellipsis when
/// anything was cut. Operates on chars, not bytes, so multi-byte
/// model output cannot split a code point.
fn excerpt(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uniplan_core::error::ModelError;

    /// A mock backend that replies with a fixed string.
    struct FixedClient {
        reply: String,
        call_count: Mutex<usize>,
    }

    impl FixedClient {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                call_count: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelClient for FixedClient {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(&self, _prompt: &str) -> std::result::Result<String, ModelError> {
            *self.call_count.lock().unwrap() += 1;
            Ok(self.reply.clone())
        }
    }

    /// A mock backend that always fails.
    struct FailingClient {
        error: ModelError,
    }

    #[async_trait]
    impl ModelClient for FailingClient {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(&self, _prompt: &str) -> std::result::Result<String, ModelError> {
            Err(self.error.clone())
        }
    }

    fn catalog_with_one_section() -> Catalog {
        let section: uniplan_core::Section = serde_json::from_value(serde_json::json!({
            "courseId": "CSE-1310",
            "profId": "p-1",
            "start": "09:00",
            "end": "09:50",
            "days": ["mon"]
        }))
        .unwrap();
        Catalog {
            sections: vec![section],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn model_absent_goes_straight_to_fallback() {
        let advisor = Advisor::offline();
        let response = advisor
            .plan_response(
                &StudentProfile::default(),
                &catalog_with_one_section(),
                "plan me",
                &[],
            )
            .await;

        assert_eq!(response.provider_tag(), "fallback");
        assert!(!response.reply().message.is_empty());
        assert!(response.reply().schedule.is_some());
    }

    #[tokio::test]
    async fn model_success_routes_through_extractor() {
        let raw = "```json\n{\"message\": \"Take CSE-1310.\", \"schedule\": {\"mon\": [{\"from\": \"09:00\", \"to\": \"09:50\", \"course\": \"CSE-1310\", \"prof\": \"B. Liskov\"}]}}\n```";
        let client = Arc::new(FixedClient::new(raw));
        let advisor = Advisor::with_model(client.clone());

        let response = advisor
            .plan_response(
                &StudentProfile::default(),
                &catalog_with_one_section(),
                "plan me",
                &[],
            )
            .await;

        assert_eq!(response.provider_tag(), "model");
        assert_eq!(response.reply().message, "Take CSE-1310.");
        assert!(response.reply().schedule.is_some());
        assert_eq!(*client.call_count.lock().unwrap(), 1);

        // Raw excerpt is carried in debug.
        let debug = response.reply().debug.as_ref().unwrap();
        assert!(debug["raw"].as_str().unwrap().starts_with("```json"));
    }

    #[tokio::test]
    async fn model_error_triggers_fallback_with_bounded_note() {
        let advisor = Advisor::with_model(Arc::new(FailingClient {
            error: ModelError::Network("x".repeat(400)),
        }));

        let response = advisor
            .plan_response(
                &StudentProfile::default(),
                &catalog_with_one_section(),
                "plan me",
                &[],
            )
            .await;

        assert_eq!(response.provider_tag(), "fallback");
        let message = &response.reply().message;
        assert!(message.contains("(Debug: mock error:"));
        // The 400-char detail must not appear wholesale.
        assert!(message.len() < 400);

        let debug = response.reply().debug.as_ref().unwrap();
        assert!(debug["note"].as_str().unwrap().contains("mock error:"));
    }

    #[tokio::test]
    async fn json_without_message_key_triggers_fallback() {
        let advisor = Advisor::with_model(Arc::new(FixedClient::new(r#"{"foo": 1}"#)));

        let response = advisor
            .plan_response(
                &StudentProfile::default(),
                &catalog_with_one_section(),
                "plan me",
                &[],
            )
            .await;

        assert_eq!(response.provider_tag(), "fallback");
        assert!(response.reply().message.contains("unexpected payload"));
    }

    #[tokio::test]
    async fn plain_prose_reply_is_still_a_model_response() {
        let advisor = Advisor::with_model(Arc::new(FixedClient::new(
            "You should talk to your department advisor.",
        )));

        let response = advisor
            .plan_response(
                &StudentProfile::default(),
                &catalog_with_one_section(),
                "plan me",
                &[],
            )
            .await;

        assert_eq!(response.provider_tag(), "model");
        assert_eq!(
            response.reply().message,
            "You should talk to your department advisor."
        );
        assert!(response.reply().schedule.is_none());
    }

    #[tokio::test]
    async fn empty_model_reply_becomes_no_response_message() {
        let advisor = Advisor::with_model(Arc::new(FixedClient::new("")));

        let response = advisor
            .plan_response(
                &StudentProfile::default(),
                &catalog_with_one_section(),
                "plan me",
                &[],
            )
            .await;

        assert_eq!(response.provider_tag(), "model");
        assert_eq!(response.reply().message, extract::NO_RESPONSE_MESSAGE);
    }

    #[test]
    fn from_config_without_key_is_offline() {
        let advisor = Advisor::from_config(&AppConfig::default());
        assert!(!advisor.model_configured());
    }

    #[test]
    fn from_config_with_key_is_configured() {
        let config = AppConfig {
            api_key: Some("k-123".into()),
            ..Default::default()
        };
        let advisor = Advisor::from_config(&config);
        assert!(advisor.model_configured());
    }

    #[test]
    fn excerpt_bounds_and_marks_truncation() {
        assert_eq!(excerpt("short", 50), "short");
        let long = "a".repeat(60);
        let cut = excerpt(&long, 50);
        assert_eq!(cut.len(), 53);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let s = "é".repeat(60);
        let cut = excerpt(&s, 50);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 53);
    }
}
