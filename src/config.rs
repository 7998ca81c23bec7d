// config.rs - Configuration Loader
// Reads the bot credential and the optional registration scope from the process
// environment, with a local `.env` file as a best-effort fallback source.
//
// Used by: main.rs (startup), bot.rs (client construction and command scope)

use serenity::model::id::GuildId;
use std::env;
use std::fmt;
use thiserror::Error;

pub const TOKEN_VAR: &str = "BOT_TOKEN";
pub const GUILD_VAR: &str = "GUILD_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BOT_TOKEN is not set in the environment or .env file")]
    MissingToken,
    #[error("GUILD_ID must be a numeric Discord guild id, got '{0}'")]
    InvalidGuildId(String),
}

/// Startup configuration, passed explicitly to the session instead of living in globals.
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    /// `None` registers commands globally.
    pub guild_id: Option<GuildId>,
}

impl BotConfig {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenv::dotenv() {
            Ok(path) => log::info!("📂 Loaded environment overrides from {}", path.display()),
            Err(e) => log::warn!("⚠️  Error loading .env file ({}), using process environment only", e),
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests never touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let guild_id = match lookup(GUILD_VAR).map(|raw| raw.trim().to_string()) {
            Some(raw) if !raw.is_empty() => Some(parse_guild_id(&raw)?),
            _ => {
                log::info!("ℹ️  No {} specified in env, registering commands globally", GUILD_VAR);
                None
            }
        };

        Ok(Self { token, guild_id })
    }

    /// Scope id as the platform sees it; empty string means global.
    pub fn scope_id(&self) -> String {
        self.guild_id.map(|id| id.to_string()).unwrap_or_default()
    }
}

// Keep the credential out of any debug output
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

fn parse_guild_id(raw: &str) -> Result<GuildId, ConfigError> {
    match raw.parse::<u64>() {
        Ok(id) if id != 0 => Ok(GuildId(id)),
        _ => Err(ConfigError::InvalidGuildId(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let result = BotConfig::from_lookup(lookup_from(&[(GUILD_VAR, "1234")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingToken);
    }

    #[test]
    fn test_blank_token_is_fatal() {
        let result = BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "   ")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingToken);
    }

    #[test]
    fn test_missing_guild_means_global_scope() {
        let config = BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "secret")])).unwrap();
        assert_eq!(config.token, "secret");
        assert_eq!(config.guild_id, None);
        assert_eq!(config.scope_id(), "");
    }

    #[test]
    fn test_empty_guild_means_global_scope() {
        let config =
            BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "secret"), (GUILD_VAR, "")])).unwrap();
        assert_eq!(config.guild_id, None);
    }

    #[test]
    fn test_guild_id_is_parsed() {
        let config = BotConfig::from_lookup(lookup_from(&[
            (TOKEN_VAR, " secret "),
            (GUILD_VAR, "81384788765712384"),
        ]))
        .unwrap();
        assert_eq!(config.token, "secret");
        assert_eq!(config.guild_id, Some(GuildId(81384788765712384)));
        assert_eq!(config.scope_id(), "81384788765712384");
    }

    #[test]
    fn test_invalid_guild_id_is_rejected() {
        for bad in ["general", "0", "-5"] {
            let result =
                BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "secret"), (GUILD_VAR, bad)]));
            assert_eq!(result.unwrap_err(), ConfigError::InvalidGuildId(bad.to_string()));
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BotConfig::from_lookup(lookup_from(&[(TOKEN_VAR, "super-secret")])).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
