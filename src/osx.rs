use crate::errors::*;
use crate::syscalls::{Host, SystemCalls};
use std::path::Path;

/// Size of the host name buffer. Longer names are cut at this many bytes.
pub const HOSTNAME_MAX: usize = 64;

/// Operations on the process and its host
///
/// `chroot()`, `setuid()` and `setgid()` change process-wide state for the
/// lifetime of the process. There is no way back short of re-executing
/// with the privileges the process started with. Callers running several
/// threads must serialize these calls themselves.
///
/// # Example
/// ```no_run
/// let mut os = osx::Osx::host();
/// os.chown("/var/run/app.sock", "_app", Some("_app")).unwrap();
/// os.chroot("/var/empty").unwrap();
/// os.setgid("_app").unwrap();
/// os.setuid("_app").unwrap();
/// ```
#[derive(Default, Clone, Debug)]
pub struct Osx<S: SystemCalls = Host> {
    sys: S,
}

impl Osx<Host> {
    /// Operate on the running process
    pub fn host() -> Self {
        Osx { sys: Host }
    }
}

impl<S: SystemCalls> Osx<S> {
    /// Route every operation through `sys`
    pub fn with_system(sys: S) -> Self {
        Osx { sys }
    }

    /// The system calls every operation goes through
    pub fn system(&self) -> &S {
        &self.sys
    }

    /// Set the root directory of the process to `path`.
    ///
    /// The working directory is left untouched.
    pub fn chroot<P: AsRef<Path>>(&mut self, path: P) -> Result<(), OsxError> {
        let path = path.as_ref();
        log::debug!("chroot({})", path.display());
        self.sys.chroot(path).map_err(|e| {
            log::warn!("chroot({}) failed: {}", path.display(), e);
            OsxError::sys("chroot", e)
        })?;
        log::info!("Root directory set to {}", path.display());
        Ok(())
    }

    /// Change the owner of `path` to `user`, and its group to `group` if one
    /// is given. Both names are resolved before anything is changed.
    pub fn chown<P: AsRef<Path>>(
        &mut self,
        path: P,
        user: &str,
        group: Option<&str>,
    ) -> Result<(), OsxError> {
        let path = path.as_ref();
        log::debug!("chown({}, {}, {:?})", path.display(), user, group);
        let uid = self
            .sys
            .user_id(user)?
            .ok_or_else(|| OsxError::no_such_user("chown", user))?;
        let gid = match group {
            None => None,
            Some(group) => Some(
                self.sys
                    .group_id(group)?
                    .ok_or_else(|| OsxError::no_such_group("chown", group))?,
            ),
        };
        self.sys.chown(path, uid, gid).map_err(|e| {
            log::warn!("chown({}) failed: {}", path.display(), e);
            OsxError::sys("chown", e)
        })
    }

    /// Switch the process to the uid of `user`.
    ///
    /// This is `setuid(2)`: a privileged process also loses its real and
    /// saved uid, so the change cannot be undone.
    pub fn setuid(&mut self, user: &str) -> Result<(), OsxError> {
        log::debug!("setuid({})", user);
        let uid = self
            .sys
            .user_id(user)?
            .ok_or_else(|| OsxError::no_such_user("setuid", user))?;
        self.sys.setuid(uid).map_err(|e| {
            log::warn!("setuid({}) failed: {}", uid, e);
            OsxError::sys("setuid", e)
        })?;
        log::info!("Set UID to {} ({})", uid, user);
        Ok(())
    }

    /// Switch the process to the gid of `group`, with `setgid(2)`.
    pub fn setgid(&mut self, group: &str) -> Result<(), OsxError> {
        log::debug!("setgid({})", group);
        let gid = self
            .sys
            .group_id(group)?
            .ok_or_else(|| OsxError::no_such_group("setgid", group))?;
        self.sys.setgid(gid).map_err(|e| {
            log::warn!("setgid({}) failed: {}", gid, e);
            OsxError::sys("setgid", e)
        })?;
        log::info!("Set GID to {} ({})", gid, group);
        Ok(())
    }

    /// The host name, without its domain part
    pub fn hostname(&mut self) -> Result<String, OsxError> {
        let mut buf = [0u8; HOSTNAME_MAX + 1];
        self.sys
            .gethostname(&mut buf)
            .map_err(|e| OsxError::sys("hostname", e))?;
        Ok(truncate_hostname(&buf))
    }
}

/// Keep the first label of a raw host name.
///
/// `raw` is cut at `HOSTNAME_MAX` bytes, then at the first NUL, then at the
/// first `.`. Invalid UTF-8 bytes become `?` and a character split by the
/// cut is dropped, so the result is never longer than `HOSTNAME_MAX` bytes.
pub fn truncate_hostname(raw: &[u8]) -> String {
    let raw = &raw[..raw.len().min(HOSTNAME_MAX)];
    let raw = raw.split(|&b| b == 0).next().unwrap_or_default();
    let mut label = raw.split(|&b| b == b'.').next().unwrap_or_default();
    let mut name = String::with_capacity(label.len());
    loop {
        match std::str::from_utf8(label) {
            Ok(valid) => {
                name.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, rest) = label.split_at(e.valid_up_to());
                // valid_up_to() marks a UTF-8 boundary
                name.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    None => break,
                    Some(len) => {
                        name.push('?');
                        label = &rest[len..];
                    }
                }
            }
        }
    }
    name
}
