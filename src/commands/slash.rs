// slash.rs - Slash Commands Module
// Routes incoming slash command interactions to their handlers and pushes the
// command registry to Discord on startup.
//
// Key Features:
// - Read-only dispatch table built once at startup
// - Unknown command names are dropped without a reply
// - Reply plumbing behind a trait so handlers can be exercised without a live session
// - Per-command registration, guild-scoped or global

use async_trait::async_trait;
use serenity::{
    http::Http,
    model::{
        application::{
            command::Command,
            interaction::{
                application_command::ApplicationCommandInteraction, InteractionResponseType,
            },
        },
        id::GuildId,
    },
};
use std::collections::HashMap;
use thiserror::Error;

use super::registry::{lookup, COMMANDS};
use super::{chan, serv, user_info, whoami, CommandError, Invocation};

pub type CommandHandler = fn(&Invocation) -> Result<String, CommandError>;

// ============================================================================
// REPLY PLUMBING
// ============================================================================

/// Sends the single reply an interaction gets.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, content: String) -> Result<(), CommandError>;
}

/// Answers a live interaction through the shared HTTP client.
pub struct InteractionResponder<'a> {
    http: &'a Http,
    interaction: &'a ApplicationCommandInteraction,
}

impl<'a> InteractionResponder<'a> {
    pub fn new(http: &'a Http, interaction: &'a ApplicationCommandInteraction) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl<'a> Responder for InteractionResponder<'a> {
    async fn reply(&self, content: String) -> Result<(), CommandError> {
        self.interaction
            .create_interaction_response(self.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(content))
            })
            .await
            .map_err(CommandError::Reply)
    }
}

// ============================================================================
// DISPATCH TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// No handler for this name; nothing was sent.
    Ignored,
    Replied,
}

#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<&'static str, CommandHandler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table covering every command in the registry.
    pub fn standard() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(whoami::NAME, whoami::run);
        dispatcher.register(chan::NAME, chan::run);
        dispatcher.register(serv::NAME, serv::run);
        dispatcher.register(user_info::NAME, user_info::run);
        debug_assert!(COMMANDS.iter().all(|spec| dispatcher.handles(spec.name)));
        debug_assert!(dispatcher.handlers.keys().all(|name| lookup(name).is_some()));
        dispatcher
    }

    pub fn register(&mut self, name: &'static str, handler: CommandHandler) {
        self.handlers.insert(name, handler);
    }

    pub fn handles(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Runs the handler for `invocation.command` and sends its reply.
    pub async fn dispatch(
        &self,
        invocation: &Invocation,
        responder: &dyn Responder,
    ) -> Result<Dispatch, CommandError> {
        let Some(handler) = self.handlers.get(invocation.command.as_str()) else {
            return Ok(Dispatch::Ignored);
        };

        let content = match handler(invocation) {
            Ok(content) => content,
            Err(e) if e.is_user_facing() => {
                log::warn!("[SLASH] /{} from {}: {}", invocation.command, invocation.user.id, e);
                e.to_string()
            }
            Err(e) => return Err(e),
        };

        responder.reply(content).await?;
        Ok(Dispatch::Replied)
    }
}

// ============================================================================
// SLASH COMMAND REGISTRATION
// ============================================================================

#[derive(Debug, Error)]
#[error("cannot create '{command}' command: {source}")]
pub struct RegistrationError {
    pub command: &'static str,
    #[source]
    pub source: serenity::Error,
}

/// Upserts every registry entry, in order, under `scope` (global when `None`).
/// Stops at the first failure; commands registered before it stay registered.
pub async fn register_slash_commands(
    http: &Http,
    scope: Option<GuildId>,
) -> Result<usize, RegistrationError> {
    for spec in COMMANDS {
        let result = match scope {
            Some(guild_id) => {
                guild_id
                    .create_application_command(http, |command| spec.build(command))
                    .await
            }
            None => {
                Command::create_global_application_command(http, |command| spec.build(command))
                    .await
            }
        };

        match result {
            Ok(command) => log::info!("📋 Registered /{} ({})", command.name, command.id),
            Err(source) => {
                return Err(RegistrationError {
                    command: spec.name,
                    source,
                })
            }
        }
    }

    Ok(COMMANDS.len())
}
