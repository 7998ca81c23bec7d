// serv.rs - Serv Command Module
// Replies with the id and preferred locale of the server the command was invoked in.

use super::{CommandError, Invocation};

pub const NAME: &str = "serv";
pub const DESCRIPTION: &str = "Returns information about the server the command is called in";

pub fn run(invocation: &Invocation) -> Result<String, CommandError> {
    let guild_id = invocation
        .guild_id
        .as_deref()
        .ok_or(CommandError::GuildOnly(NAME))?;

    Ok(format!(
        "Guild discord id is: {}\nGuild locale is: {}",
        guild_id,
        invocation.guild_locale.as_deref().unwrap_or(""),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::guild_invocation;

    #[test]
    fn test_serv_reply() {
        let reply = run(&guild_invocation(NAME)).unwrap();
        assert_eq!(reply, "Guild discord id is: 777\nGuild locale is: en-US");
    }

    #[test]
    fn test_serv_outside_guild() {
        let mut invocation = guild_invocation(NAME);
        invocation.guild_id = None;
        invocation.guild_locale = None;
        assert!(matches!(run(&invocation), Err(CommandError::GuildOnly(NAME))));
    }
}
