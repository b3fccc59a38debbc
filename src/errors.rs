use std::error::Error;
use std::fmt;

/// Types of errors that can be raised by an operation
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The operating system rejected the call
    SysError,
    /// A user or group name has no entry in the system database
    NotFound,
    /// Wrong number or type of arguments
    InvalidArgument,
}

/// Internal representation of errors
#[derive(Debug)]
enum ErrorRepr {
    /// Error from the nix crate, tagged with the operation that raised it
    FromNix(&'static str, nix::Error),
    /// Error with a formatted description
    WithDescription(ErrorKind, String),
}

/// Error type for all operations of this crate
#[derive(Debug)]
pub struct OsxError {
    repr: ErrorRepr,
}

impl OsxError {
    /// The OS rejected `op`
    pub fn sys(op: &'static str, e: nix::Error) -> OsxError {
        OsxError {
            repr: ErrorRepr::FromNix(op, e),
        }
    }

    /// No user database entry for `name`
    pub fn no_such_user(op: &'static str, name: &str) -> OsxError {
        OsxError::from((ErrorKind::NotFound, format!("{}: no such user: {}", op, name)))
    }

    /// No group database entry for `name`
    pub fn no_such_group(op: &'static str, name: &str) -> OsxError {
        OsxError::from((ErrorKind::NotFound, format!("{}: no such group: {}", op, name)))
    }

    /// Wrong number or type of arguments, described by `description`
    pub fn invalid_argument<T: Into<String>>(description: T) -> OsxError {
        OsxError::from((ErrorKind::InvalidArgument, description.into()))
    }

    /// The category of this error
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::FromNix(..) => ErrorKind::SysError,
            ErrorRepr::WithDescription(kind, _) => kind,
        }
    }

    /// The underlying errno, for OS failures
    pub fn errno(&self) -> Option<nix::errno::Errno> {
        match self.repr {
            ErrorRepr::FromNix(_, e) => Some(e),
            _ => None,
        }
    }
}

impl Error for OsxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.repr {
            ErrorRepr::FromNix(_, ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for OsxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.repr {
            ErrorRepr::FromNix(op, ref e) => write!(f, "{}: {}", op, e.desc()),
            ErrorRepr::WithDescription(_, ref description) => f.write_str(description),
        }
    }
}

impl From<(ErrorKind, String)> for OsxError {
    fn from((kind, description): (ErrorKind, String)) -> OsxError {
        OsxError {
            repr: ErrorRepr::WithDescription(kind, description),
        }
    }
}
