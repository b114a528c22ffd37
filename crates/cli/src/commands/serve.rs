//! `uniplan serve` — Start the HTTP API server.

use uniplan_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🎓 Uniplan Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   Model: {}",
        if config.model_configured() {
            config.model.as_str()
        } else {
            "not configured (offline fallback)"
        }
    );

    uniplan_gateway::start(config).await?;

    Ok(())
}
