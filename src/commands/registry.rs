// registry.rs - Command Registry
// The bot's public slash command surface as a static, ordered table.
// Order only affects how the Discord client lists the commands.

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use super::{chan, serv, user_info, whoami};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Number,
}

impl From<ParameterKind> for CommandOptionType {
    fn from(kind: ParameterKind) -> Self {
        match kind {
            ParameterKind::String => CommandOptionType::String,
            ParameterKind::Integer => CommandOptionType::Integer,
            ParameterKind::Boolean => CommandOptionType::Boolean,
            ParameterKind::User => CommandOptionType::User,
            ParameterKind::Channel => CommandOptionType::Channel,
            ParameterKind::Role => CommandOptionType::Role,
            ParameterKind::Number => CommandOptionType::Number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    pub kind: ParameterKind,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ParameterSpec],
}

impl CommandSpec {
    /// Fills a serenity command builder from this definition.
    pub fn build<'a>(
        &self,
        command: &'a mut CreateApplicationCommand,
    ) -> &'a mut CreateApplicationCommand {
        command.name(self.name).description(self.description);
        for parameter in self.parameters {
            command.create_option(|option| {
                option
                    .name(parameter.name)
                    .description(parameter.description)
                    .kind(parameter.kind.into())
                    .required(parameter.required)
            });
        }
        command
    }
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: whoami::NAME,
        description: whoami::DESCRIPTION,
        parameters: &[],
    },
    CommandSpec {
        name: chan::NAME,
        description: chan::DESCRIPTION,
        parameters: &[],
    },
    CommandSpec {
        name: serv::NAME,
        description: serv::DESCRIPTION,
        parameters: &[],
    },
    CommandSpec {
        name: user_info::NAME,
        description: user_info::DESCRIPTION,
        parameters: user_info::PARAMETERS,
    },
];

/// Exact, case-sensitive lookup by command name.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}
