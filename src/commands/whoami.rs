// whoami.rs - Whoami Command Module
// Replies with the calling member's id, nickname, username and server join date.
//
// Used by: commands/slash.rs (dispatch), commands/registry.rs (registration)

use super::{CommandError, Invocation};

pub const NAME: &str = "whoami";
pub const DESCRIPTION: &str = "Returns information about the user who called the command";

/// Main /whoami handler
pub fn run(invocation: &Invocation) -> Result<String, CommandError> {
    let member = invocation
        .member
        .as_ref()
        .ok_or(CommandError::GuildOnly(NAME))?;

    Ok(format!(
        "Your discord user id is: {}\n\
        Your Nick is: {}\n\
        Your Username is: {}\n\
        You joined this server: {}",
        invocation.user.id,
        member.nick.as_deref().unwrap_or(""),
        invocation.user.username,
        member.joined_at.as_deref().unwrap_or(""),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::guild_invocation;

    #[test]
    fn test_whoami_reply_lists_caller_in_order() {
        let reply = run(&guild_invocation(NAME)).unwrap();
        assert_eq!(
            reply,
            "Your discord user id is: 123\n\
            Your Nick is: Nik\n\
            Your Username is: nik#0001\n\
            You joined this server: 2020-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_whoami_without_nick_leaves_it_blank() {
        let mut invocation = guild_invocation(NAME);
        invocation.member.as_mut().unwrap().nick = None;
        let reply = run(&invocation).unwrap();
        assert!(reply.contains("Your Nick is: \n"));
    }

    #[test]
    fn test_whoami_outside_guild() {
        let mut invocation = guild_invocation(NAME);
        invocation.member = None;
        assert!(matches!(run(&invocation), Err(CommandError::GuildOnly(NAME))));
    }
}
