// user_info.rs - User Info Command Module
// Replies with the id, username and display tag of the user picked in `user-select`.
//
// Used by: commands/slash.rs (dispatch), commands/registry.rs (registration)

use super::registry::{ParameterKind, ParameterSpec};
use super::{CommandError, Invocation};

pub const NAME: &str = "user-info";
pub const DESCRIPTION: &str = "Returns information about the specified user";
pub const USER_OPTION: &str = "user-select";

pub const PARAMETERS: &[ParameterSpec] = &[ParameterSpec {
    kind: ParameterKind::User,
    name: USER_OPTION,
    description: "select a user to register",
    required: true,
}];

/// Main /user-info handler
/// The option is required and user-typed, so the platform resolves it before we see it.
pub fn run(invocation: &Invocation) -> Result<String, CommandError> {
    let user = invocation
        .user_option(USER_OPTION)
        .ok_or(CommandError::MissingOption(USER_OPTION))?;

    Ok(format!(
        "User discord id is: {}\nUser Username is: {}\nUser str is: {}",
        user.id, user.username, user.tag,
    ))
}
