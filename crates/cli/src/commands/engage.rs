//! `flytrap engage` — run a single honeypot turn locally.
//!
//! Useful for poking at the decision engine without standing up the
//! gateway. State is explicit: history comes from a file (or is empty)
//! and the extended conversation is printed for the next invocation.

use std::path::PathBuf;

use flytrap_config::AppConfig;
use flytrap_core::Message;
use flytrap_engine::DecisionEngine;

pub async fn run(
    message: &str,
    history_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let provider = flytrap_providers::build_from_config(&config)?;
    let engine = DecisionEngine::new(provider, &config.model, config.temperature)
        .with_max_tokens(config.max_tokens);

    let history: Vec<Message> = match history_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
        None => Vec::new(),
    };

    let result = engine.decide(&history, message).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
