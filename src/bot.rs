// bot.rs - Session Lifecycle Manager
// Owns the single Discord connection: builds the client, registers the slash
// commands once the gateway is ready, routes interactions to the dispatcher and
// closes the connection exactly once on shutdown.
//
// Used by: main.rs

use serenity::{
    async_trait,
    client::{Client, Context, EventHandler},
    model::{application::interaction::Interaction, gateway::Ready, id::GuildId},
    prelude::GatewayIntents,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::signal;
use tokio::sync::mpsc;

use crate::commands::slash::{
    register_slash_commands, Dispatch, Dispatcher, InteractionResponder, RegistrationError,
};
use crate::commands::Invocation;
use crate::config::{BotConfig, ConfigError};

// ============================================================================
// ERRORS
// ============================================================================

/// Fatal conditions; each one ends the process with a non-zero status.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("error creating Discord client: {0}")]
    Client(#[source] serenity::Error),
    #[error("error opening connection to Discord: {0}")]
    Gateway(#[source] serenity::Error),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error("failed to listen for interrupt signal: {0}")]
    Signal(#[source] std::io::Error),
}

/// Printed once every command is registered.
pub const RUNNING_NOTICE: &str = "🚀 Now running. Press CTRL-C to exit.";

// ============================================================================
// EVENT HANDLER
// ============================================================================

pub struct Bot {
    dispatcher: Arc<Dispatcher>,
    scope: Option<GuildId>,
    registered: AtomicBool,
    failures: mpsc::Sender<BotError>,
}

impl Bot {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        scope: Option<GuildId>,
        failures: mpsc::Sender<BotError>,
    ) -> Self {
        Self {
            dispatcher,
            scope,
            registered: AtomicBool::new(false),
            failures,
        }
    }

    /// True only for the first caller; reconnects fire `ready` again.
    fn claim_registration(&self) -> bool {
        !self.registered.swap(true, Ordering::SeqCst)
    }
}

#[async_trait]
impl EventHandler for Bot {
    async fn ready(&self, ctx: Context, ready: Ready) {
        println!("✅ Bot is up! Connected as {} ({})", ready.user.name, ready.user.id);

        if !self.claim_registration() {
            log::debug!("[BOT] Gateway resumed, commands already registered");
            return;
        }

        match register_slash_commands(&ctx.http, self.scope).await {
            Ok(count) => {
                match self.scope {
                    Some(guild_id) => log::info!("✅ Registered {} slash commands in guild {}", count, guild_id),
                    None => log::info!("✅ Registered {} global slash commands", count),
                }
                println!("{}", RUNNING_NOTICE);
            }
            Err(e) => {
                log::error!("❌ {}", e);
                if self.failures.send(e.into()).await.is_err() {
                    log::error!("❌ Lifecycle task is gone, registration failure not reported");
                }
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };

        let invocation = Invocation::from_interaction(&command);
        let responder = InteractionResponder::new(&ctx.http, &command);

        match self.dispatcher.dispatch(&invocation, &responder).await {
            Ok(Dispatch::Replied) => {
                log::debug!("[BOT] Answered /{} for {}", invocation.command, invocation.user.id)
            }
            Ok(Dispatch::Ignored) => {
                log::debug!("[BOT] Ignoring unregistered command /{}", invocation.command)
            }
            Err(e) => log::error!(
                "❌ Command '/{}' failed for user {} ({}): {}",
                invocation.command,
                invocation.user.username,
                invocation.user.id,
                e
            ),
        }
    }
}

// ============================================================================
// LIFECYCLE
// ============================================================================

pub fn intents() -> GatewayIntents {
    GatewayIntents::non_privileged()
}

/// Runs the bot until Ctrl-C, a gateway error, or a failed command registration.
pub async fn run(config: BotConfig) -> Result<(), BotError> {
    let (failures_tx, mut failures_rx) = mpsc::channel::<BotError>(1);
    let bot = Bot::new(Arc::new(Dispatcher::standard()), config.guild_id, failures_tx);

    let mut client = Client::builder(&config.token, intents())
        .event_handler(bot)
        .await
        .map_err(BotError::Client)?;

    let shard_manager = client.shard_manager.clone();

    println!("🔌 Connecting to Discord...");
    let outcome = tokio::select! {
        interrupt = signal::ctrl_c() => match interrupt {
            Ok(()) => {
                println!("\n⏹️ Gracefully shutting down...");
                Ok(())
            }
            Err(e) => Err(BotError::Signal(e)),
        },
        result = client.start() => result.map_err(BotError::Gateway),
        Some(failure) = failures_rx.recv() => Err(failure),
    };

    // Every exit path above lands here, so the connection is closed once
    shard_manager.lock().await.shutdown_all().await;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::slash::RegistrationError;

    fn bot() -> (Bot, mpsc::Receiver<BotError>) {
        let (tx, rx) = mpsc::channel(1);
        (Bot::new(Arc::new(Dispatcher::standard()), None, tx), rx)
    }

    #[test]
    fn test_registration_claimed_once() {
        let (bot, _rx) = bot();
        assert!(bot.claim_registration());
        assert!(!bot.claim_registration());
        assert!(!bot.claim_registration());
    }

    #[test]
    fn test_running_notice_tells_how_to_stop() {
        assert!(RUNNING_NOTICE.contains("Now running"));
        assert!(RUNNING_NOTICE.contains("CTRL-C"));
    }

    #[test]
    fn test_intents_are_not_privileged() {
        assert!(!intents().contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(!intents().contains(GatewayIntents::GUILD_MEMBERS));
        assert!(intents().contains(GatewayIntents::GUILDS));
    }

    #[tokio::test]
    async fn test_registration_failure_reaches_lifecycle() {
        let (bot, mut rx) = bot();
        let failure = RegistrationError {
            command: "whoami",
            source: serenity::Error::Other("401 Unauthorized"),
        };

        bot.failures.send(failure.into()).await.unwrap();

        match rx.recv().await {
            Some(BotError::Registration(e)) => assert_eq!(e.command, "whoami"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_config_error_converts() {
        let error: BotError = ConfigError::MissingToken.into();
        assert!(error.to_string().contains("BOT_TOKEN"));
    }
}
