// commands/mod.rs - Command Module Registry
// Declares the slash command modules and the types every handler shares:
// the platform-neutral Invocation snapshot and the per-event CommandError.

pub mod registry;       // Static, ordered list of command definitions
pub mod slash;          // Dispatch table, reply plumbing and registration
pub mod whoami;         // Caller identity
pub mod chan;           // Channel id
pub mod serv;           // Guild id and locale
pub mod user_info;      // Selected user lookup

use serenity::model::{
    application::interaction::application_command::{
        ApplicationCommandInteraction, CommandDataOptionValue,
    },
    user::User,
};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("/{0} can only be used inside a server")]
    GuildOnly(&'static str),
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),
    #[error("failed to send interaction reply: {0}")]
    Reply(#[source] serenity::Error),
}

impl CommandError {
    /// Errors the invoking user can act on get sent back as the reply text.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, CommandError::GuildOnly(_) | CommandError::MissingOption(_))
    }
}

// ============================================================================
// INVOCATION SNAPSHOT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    /// Display string, `name#discriminator`.
    pub tag: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.name.clone(),
            tag: user.tag(),
        }
    }
}

/// Guild membership of the caller; absent when the command runs in a DM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberInfo {
    pub nick: Option<String>,
    /// RFC 3339 join timestamp.
    pub joined_at: Option<String>,
}

/// Everything a handler may read from an incoming slash command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub user: UserInfo,
    pub member: Option<MemberInfo>,
    pub channel_id: String,
    pub guild_id: Option<String>,
    pub guild_locale: Option<String>,
    /// Resolved user-typed options, keyed by option name.
    pub user_options: Vec<(String, UserInfo)>,
}

impl Invocation {
    pub fn from_interaction(interaction: &ApplicationCommandInteraction) -> Self {
        // In guilds the invoking user lives on the member object
        let user = interaction
            .member
            .as_ref()
            .map(|member| &member.user)
            .unwrap_or(&interaction.user);

        let member = interaction.member.as_ref().map(|member| MemberInfo {
            nick: member.nick.clone(),
            joined_at: member.joined_at.as_ref().map(|joined| joined.to_rfc3339()),
        });

        let user_options = interaction
            .data
            .options
            .iter()
            .filter_map(|option| match &option.resolved {
                Some(CommandDataOptionValue::User(user, _)) => {
                    Some((option.name.clone(), UserInfo::from(user)))
                }
                _ => None,
            })
            .collect();

        Self {
            command: interaction.data.name.clone(),
            user: UserInfo::from(user),
            member,
            channel_id: interaction.channel_id.to_string(),
            guild_id: interaction.guild_id.map(|id| id.to_string()),
            guild_locale: interaction.guild_locale.clone(),
            user_options,
        }
    }

    pub fn user_option(&self, name: &str) -> Option<&UserInfo> {
        self.user_options
            .iter()
            .find(|(option, _)| option == name)
            .map(|(_, user)| user)
    }
}
