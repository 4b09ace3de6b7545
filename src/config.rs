use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    /// Guild that receives slash commands immediately; global registration otherwise.
    pub discord_dev_guild_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let discord_dev_guild_id = match std::env::var("DISCORD_DEV_GUILD_ID") {
            Ok(value) if !value.trim().is_empty() => {
                Some(value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvVar {
                    name: "DISCORD_DEV_GUILD_ID".to_string(),
                    value: value.clone(),
                })?)
            }
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            discord_dev_guild_id,
        })
    }
}
