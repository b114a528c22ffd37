//! Prompt assembly for the advisor model call.
//!
//! Serializes the student setup, catalog knowledge, and conversation
//! history into the text handed to the model. The rest of the system
//! treats this output as an opaque string.

use uniplan_catalog::Catalog;
use uniplan_core::{ChatTurn, StudentProfile};

/// Build the advising prompt.
///
/// The model is instructed to answer with a pure JSON object shaped like
/// the canonical reply, which is what the extractor expects on the way
/// back.
pub fn build_prompt(
    profile: &StudentProfile,
    catalog: &Catalog,
    message: &str,
    history: &[ChatTurn],
) -> String {
    let setup = compact(&serde_json::json!({ "student": profile }));
    let degree_plan = compact(&catalog.degree_plan);
    let professors = compact(&serde_json::json!(
        catalog.professors.values().collect::<Vec<_>>()
    ));
    let sections = compact(&serde_json::json!(catalog.sections));

    let history_text = if history.is_empty() {
        String::from("(none)")
    } else {
        history
            .iter()
            .map(|turn| format!("{}: {}", turn.role.code(), turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are an AI academic advisor for the University of Texas at Arlington.\n\
         Plan schedules and give thoughtful counseling using the supplied JSON.\n\
         Only answer about UTA academics. Respond with a pure JSON object with\n\
         these keys:\n\
         \x20 - \"message\": string summary or guidance for the student.\n\
         \x20 - \"schedule\": optional object keyed by day (mon-sun) where each value\n\
         \x20   is a list of blocks with keys: from, to, course, title?, prof?.\n\
         \n\
         Keep responses concise, actionable, and tie recommendations to\n\
         prerequisites, professor ratings, and time preferences.\n\
         \n\
         Student setup JSON:\n{setup}\n\
         \n\
         Degree plan JSON:\n{degree_plan}\n\
         \n\
         Professor ratings JSON:\n{professors}\n\
         \n\
         Next-term schedule options JSON:\n{sections}\n\
         \n\
         Required Classes Information:\n{required}\n\
         \n\
         Conversation so far:\n{history_text}\n\
         \n\
         Student question:\n{message}",
        required = catalog.required_classes,
    )
}

/// Compact single-line JSON; serialization of our own types cannot fail,
/// but degrade to an empty object rather than panicking if it ever does.
fn compact(value: &serde_json::Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".into())
}
