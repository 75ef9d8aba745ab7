use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub conversations: ConversationsConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversationsConfig {
    /// Base directory under which the `conversations/` folder is created.
    pub base_path: String,
}

impl Config {
    /// Load configuration: coded defaults, then an optional file at `path`,
    /// then `VOICELOG_*` environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "voicelog")?
            .set_default("conversations.base_path", ".")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("VOICELOG").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
