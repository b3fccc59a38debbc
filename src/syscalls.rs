//! The system calls behind every operation, collected in the [SystemCalls]
//! trait. [Host] performs them for real. Tests provide their own
//! implementations so that no actual system call is made.

use crate::errors::*;
use crate::lookup;
use nix::unistd::{self, Gid, Uid};
use std::path::Path;

pub trait SystemCalls {
    fn user_id(&mut self, name: &str) -> Result<Option<Uid>, OsxError> {
        lookup::user_id(name)
    }

    fn group_id(&mut self, name: &str) -> Result<Option<Gid>, OsxError> {
        lookup::group_id(name)
    }

    fn chroot(&mut self, path: &Path) -> nix::Result<()> {
        unistd::chroot(path)
    }

    /// `group == None` leaves the group unchanged
    fn chown(&mut self, path: &Path, owner: Uid, group: Option<Gid>) -> nix::Result<()> {
        unistd::chown(path, Some(owner), group)
    }

    fn setuid(&mut self, uid: Uid) -> nix::Result<()> {
        unistd::setuid(uid)
    }

    fn setgid(&mut self, gid: Gid) -> nix::Result<()> {
        unistd::setgid(gid)
    }

    /// Fill `buf` with the NUL-terminated host name
    fn gethostname(&mut self, buf: &mut [u8]) -> nix::Result<()> {
        unistd::gethostname(buf).map(drop)
    }
}

/// The running process and the host it runs on
#[derive(Default, Clone, Copy, Debug)]
pub struct Host;

impl SystemCalls for Host {}

impl<'a, S: SystemCalls + ?Sized> SystemCalls for &'a mut S {
    fn user_id(&mut self, name: &str) -> Result<Option<Uid>, OsxError> {
        (**self).user_id(name)
    }

    fn group_id(&mut self, name: &str) -> Result<Option<Gid>, OsxError> {
        (**self).group_id(name)
    }

    fn chroot(&mut self, path: &Path) -> nix::Result<()> {
        (**self).chroot(path)
    }

    fn chown(&mut self, path: &Path, owner: Uid, group: Option<Gid>) -> nix::Result<()> {
        (**self).chown(path, owner, group)
    }

    fn setuid(&mut self, uid: Uid) -> nix::Result<()> {
        (**self).setuid(uid)
    }

    fn setgid(&mut self, gid: Gid) -> nix::Result<()> {
        (**self).setgid(gid)
    }

    fn gethostname(&mut self, buf: &mut [u8]) -> nix::Result<()> {
        (**self).gethostname(buf)
    }
}

/// A [SystemCalls] double for tests: a fixed user and group table, a fixed
/// host name, and a log of every call that would have touched the process.
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Chroot(PathBuf),
        Chown(PathBuf, Uid, Option<Gid>),
        Setuid(Uid),
        Setgid(Gid),
        Gethostname,
    }

    #[derive(Debug, Default)]
    pub struct FakeSystem {
        pub users: Vec<(&'static str, u32)>,
        pub groups: Vec<(&'static str, u32)>,
        pub hostname: Vec<u8>,
        pub fail_with: Option<nix::errno::Errno>,
        pub calls: Vec<Call>,
    }

    impl FakeSystem {
        pub fn new() -> Self {
            FakeSystem {
                users: vec![("root", 0), ("daemon", 1), ("www", 67)],
                groups: vec![("wheel", 0), ("daemon", 1), ("www", 67)],
                hostname: b"node1.example.com".to_vec(),
                ..Default::default()
            }
        }

        fn record(&mut self, call: Call) -> nix::Result<()> {
            self.calls.push(call);
            match self.fail_with {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    impl SystemCalls for FakeSystem {
        fn user_id(&mut self, name: &str) -> Result<Option<Uid>, OsxError> {
            Ok(self
                .users
                .iter()
                .find(|(n, _)| *n == name)
                .map(|&(_, id)| Uid::from_raw(id)))
        }

        fn group_id(&mut self, name: &str) -> Result<Option<Gid>, OsxError> {
            Ok(self
                .groups
                .iter()
                .find(|(n, _)| *n == name)
                .map(|&(_, id)| Gid::from_raw(id)))
        }

        fn chroot(&mut self, path: &Path) -> nix::Result<()> {
            self.record(Call::Chroot(path.to_owned()))
        }

        fn chown(&mut self, path: &Path, owner: Uid, group: Option<Gid>) -> nix::Result<()> {
            self.record(Call::Chown(path.to_owned(), owner, group))
        }

        fn setuid(&mut self, uid: Uid) -> nix::Result<()> {
            self.record(Call::Setuid(uid))
        }

        fn setgid(&mut self, gid: Gid) -> nix::Result<()> {
            self.record(Call::Setgid(gid))
        }

        fn gethostname(&mut self, buf: &mut [u8]) -> nix::Result<()> {
            self.record(Call::Gethostname)?;
            let n = self.hostname.len().min(buf.len() - 1);
            buf[..n].copy_from_slice(&self.hostname[..n]);
            buf[n] = 0;
            Ok(())
        }
    }
}
