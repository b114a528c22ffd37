//! `uniplan status` — Show config and catalog status.

use uniplan_catalog::CatalogStore;
use uniplan_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let catalog = CatalogStore::new(&config.data_dir).get().await;

    println!("🎓 Uniplan Status");
    println!("================");
    println!("  Config dir:     {}", AppConfig::config_dir().display());
    println!("  Data dir:       {}", config.data_dir.display());
    println!("  Model:          {}", config.model);
    println!(
        "  API key:        {}",
        if config.model_configured() {
            "configured"
        } else {
            "not set (offline fallback)"
        }
    );
    println!(
        "  Gateway:        {}:{}",
        config.gateway.host, config.gateway.port
    );
    println!();
    println!("  Sections:       {}", catalog.sections.len());
    println!("  Professors:     {}", catalog.professors.len());
    println!("  Degree courses: {}", catalog.degree_course_count());

    if catalog.sections.is_empty() {
        println!("\n  ⚠️  No sections loaded — check the data directory");
    }

    Ok(())
}
