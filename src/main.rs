mod bot;
mod commands;
mod config;

use std::process::ExitCode;

use crate::bot::BotError;
use crate::config::BotConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn banner() -> String {
    format!("Science Defender! {:<16}\\/", format!("v{}", VERSION))
}

/// 0 after a graceful interrupt, 1 for every fatal startup or gateway error.
fn exit_status(outcome: &Result<(), BotError>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn failure_line(error: &BotError) -> String {
    format!("❌ {}", error)
}

async fn start() -> Result<(), BotError> {
    // Credentials are checked before any connection is attempted
    let config = BotConfig::load()?;
    log::info!("🔧 Loaded {:?} (scope: '{}')", config, config.scope_id());
    bot::run(config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logger - must be done before any logging calls
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    println!("{}\n", banner());

    let outcome = start().await;
    match &outcome {
        Ok(()) => println!("✅ Bot stopped"),
        Err(e) => log::error!("{}", failure_line(e)),
    }
    ExitCode::from(exit_status(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_banner_carries_version() {
        let banner = banner();
        assert!(banner.starts_with("Science Defender! v0.0.1-alpha"));
        assert!(banner.ends_with("\\/"));
    }

    #[test]
    fn test_failure_line_names_cause() {
        let line = failure_line(&BotError::Config(ConfigError::MissingToken));
        assert_eq!(line, "❌ configuration error: BOT_TOKEN is not set in the environment or .env file");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_status(&Ok(())), 0);
        assert_eq!(exit_status(&Err(BotError::Config(ConfigError::MissingToken))), 1);
    }
}
