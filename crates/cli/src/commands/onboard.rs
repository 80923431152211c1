//! `flytrap onboard` — write a default configuration file.

use flytrap_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(&config_path, AppConfig::default_toml())?;

    println!("Wrote default config to {}", config_path.display());
    println!("Next steps:");
    println!("  1. Set gemini_api_key (or export GEMINI_API_KEY)");
    println!("  2. Set api_key to protect the honeypot endpoint");
    println!("  3. Run `flytrap serve`");
    Ok(())
}
