use anyhow::Context;
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path to the SQLite database file, created on first start
    pub db_path: String,
    pub listen_addr: String,
    /// Highest category id the quiz endpoint accepts
    pub quiz_max_category_id: i64,
}

impl Settings {
    fn builder() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("listen_addr", "0.0.0.0:8080")?
            .set_default("quiz_max_category_id", 6_i64)
    }

    /// Reads `.env`, an optional `trivia.toml` and `TRIVIA_*` variables, in that order of precedence
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::builder()?
            .add_source(File::with_name("trivia").required(false))
            .add_source(Environment::with_prefix("TRIVIA").try_parsing(true))
            .build()?
            .try_deserialize()
            .context("Failed to load settings, is TRIVIA_DB_PATH set?")
    }
}
