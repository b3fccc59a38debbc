//! Name to id resolution against the system user and group databases.

use crate::errors::*;
use nix::unistd::{Gid, Group, Uid, User};

fn check_name(kind: &str, name: &str) -> Result<(), OsxError> {
    if name.as_bytes().contains(&0) {
        return Err(OsxError::invalid_argument(format!(
            "{} name contains a NUL byte",
            kind
        )));
    }
    Ok(())
}

/// Look up the uid of `name` in the user database.
///
/// `Ok(None)` means there is no such user. An error means the database
/// itself could not be read.
pub fn user_id(name: &str) -> Result<Option<Uid>, OsxError> {
    check_name("user", name)?;
    let user = User::from_name(name).map_err(|e| OsxError::sys("getpwnam", e))?;
    Ok(user.map(|user| user.uid))
}

/// Look up the gid of `name` in the group database.
pub fn group_id(name: &str) -> Result<Option<Gid>, OsxError> {
    check_name("group", name)?;
    let group = Group::from_name(name).map_err(|e| OsxError::sys("getgrnam", e))?;
    Ok(group.map(|group| group.gid))
}
