//! `uniplan plan` — Run the offline planner against local fixtures.
//!
//! Always plans offline, regardless of any configured API key, so the
//! output is reproducible and reviewable.

use std::path::PathBuf;

use uniplan_catalog::CatalogStore;
use uniplan_config::AppConfig;
use uniplan_core::StudentProfile;
use uniplan_providers::Advisor;

pub async fn run(
    user: Option<PathBuf>,
    message: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let catalog = CatalogStore::new(&config.data_dir).get().await;

    let profile = match user {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
            StudentProfile::from_setup_json(&raw)
        }
        None => StudentProfile::default(),
    };

    let response = Advisor::offline()
        .plan_response(&profile, &catalog, &message, &[])
        .await;

    let reply = response.into_tagged_reply();
    println!("{}", serde_json::to_string_pretty(&reply)?);

    Ok(())
}
