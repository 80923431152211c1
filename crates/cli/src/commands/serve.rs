//! `flytrap serve` — start the HTTP gateway.

use flytrap_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    if !config.has_gemini_key() {
        eprintln!("Warning: no Gemini API key configured. Set GEMINI_API_KEY or run `flytrap onboard` and edit the config.");
    }

    flytrap_gateway::start(config).await
}
