// chan.rs - Chan Command Module
// Replies with the id of the channel the command was invoked in.

use super::{CommandError, Invocation};

pub const NAME: &str = "chan";
pub const DESCRIPTION: &str = "Returns information about the channel the command is called in";

pub fn run(invocation: &Invocation) -> Result<String, CommandError> {
    Ok(format!("Channel discord id is: {}", invocation.channel_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::guild_invocation;

    #[test]
    fn test_chan_reply() {
        assert_eq!(run(&guild_invocation(NAME)).unwrap(), "Channel discord id is: 555");
    }

    #[test]
    fn test_chan_works_in_dms() {
        let mut invocation = guild_invocation(NAME);
        invocation.member = None;
        invocation.guild_id = None;
        invocation.channel_id = "900".to_string();
        assert_eq!(run(&invocation).unwrap(), "Channel discord id is: 900");
    }
}
