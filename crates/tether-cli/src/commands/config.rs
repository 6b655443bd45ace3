use crate::cli::ConfigAction;
use tether_core::{Config, ConfigStore};

pub fn run(store: &ConfigStore, action: ConfigAction) -> anyhow::Result<()> {
    let mut config = store.load();
    match action {
        ConfigAction::Show => {
            println!("path: {}", store.path().display());
            println!("{}", serde_json::to_string_pretty(&masked(&config))?);
            return Ok(());
        }
        ConfigAction::SetKey { key } => config.api_key = Some(key),
        ConfigAction::SetAgent { id } => config.agent_id = Some(id),
        ConfigAction::SetBaseUrl { url } => config.base_url = Some(url),
    }
    store.save(&config)?;
    println!("Saved {}", store.path().display());
    Ok(())
}

/// Copy of the config safe to print.
fn masked(config: &Config) -> Config {
    Config {
        api_key: config.api_key.as_deref().map(mask_key),
        ..config.clone()
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
