//! Host runtime surface.
//!
//! An embedding runtime registers [FUNCTIONS] under the `osx` namespace and
//! calls them with dynamically typed [Value]s. Each entry checks its arity
//! before converting arguments, and converts every argument before
//! touching the operating system.
//!
//! `chroot` and `chown` take strings or buffers for all of their arguments.
//! `setuid` and `setgid` take strings only.

use crate::errors::*;
use crate::osx::Osx;
use crate::syscalls::SystemCalls;
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsStr;
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Namespace the functions are registered under
pub const NAMESPACE: &str = "osx";

/// A value of the host runtime
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(f64),
    /// Immutable byte string
    String(Vec<u8>),
    /// Mutable byte buffer
    Buffer(Vec<u8>),
}

impl Value {
    /// Name of the type, as the host runtime spells it
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Buffer(_) => "buffer",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s.into_bytes())
    }
}

/// Accepted number of arguments, bounds included
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    /// Exactly `n` arguments
    pub const fn fixed(n: usize) -> Arity {
        Arity { min: n, max: n }
    }

    /// Between `min` and `max` arguments
    pub const fn range(min: usize, max: usize) -> Arity {
        Arity { min, max }
    }

    /// Fail with `InvalidArgument` unless `argc` is accepted
    pub fn check(&self, argc: usize) -> Result<(), OsxError> {
        if argc >= self.min && argc <= self.max {
            return Ok(());
        }
        Err(OsxError::invalid_argument(format!(
            "arity mismatch, expected {}, got {}",
            self, argc
        )))
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

type CFun = fn(&mut Osx<&mut dyn SystemCalls>, &[Value]) -> Result<Value, OsxError>;

/// A function exposed to the host runtime
pub struct Function {
    pub name: &'static str,
    pub doc: &'static str,
    pub arity: Arity,
    call: CFun,
}

impl Function {
    /// Call the function against `sys`
    pub fn invoke(&self, sys: &mut dyn SystemCalls, args: &[Value]) -> Result<Value, OsxError> {
        self.arity.check(args.len())?;
        log::debug!("{}/{} called with {} argument(s)", NAMESPACE, self.name, args.len());
        (self.call)(&mut Osx::with_system(sys), args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

pub static FUNCTIONS: [Function; 5] = [
    Function {
        name: "chroot",
        doc: "(osx/chroot path)\nSet root directory to _path_.",
        arity: Arity::fixed(1),
        call: cfun_chroot,
    },
    Function {
        name: "chown",
        doc: "(osx/chown path user &opt group)\nChange owner\\_id \
              (and optionally group\\_id) of path to _user_ and _group_.",
        arity: Arity::range(2, 3),
        call: cfun_chown,
    },
    Function {
        name: "setuid",
        doc: "(osx/setuid user)\nSet effective user\\_id of process to that of _user_.",
        arity: Arity::fixed(1),
        call: cfun_setuid,
    },
    Function {
        name: "setgid",
        doc: "(osx/setgid group)\nSet effective group\\_id of process to that of _group_.",
        arity: Arity::fixed(1),
        call: cfun_setgid,
    },
    Function {
        name: "hostname",
        doc: "(osx/hostname)\nReturn host name",
        arity: Arity::fixed(0),
        call: cfun_hostname,
    },
];

/// Find a function by its short name (`"chown"`, not `"osx/chown"`)
pub fn function(name: &str) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// Where the host runtime keeps its bindings
pub trait Environment {
    fn define(&mut self, name: String, function: &'static Function);
}

impl Environment for BTreeMap<String, &'static Function> {
    fn define(&mut self, name: String, function: &'static Function) {
        self.insert(name, function);
    }
}

impl Environment for HashMap<String, &'static Function> {
    fn define(&mut self, name: String, function: &'static Function) {
        self.insert(name, function);
    }
}

/// Define every function as `osx/<name>` in `env`
pub fn register<E: Environment + ?Sized>(env: &mut E) {
    for function in FUNCTIONS.iter() {
        env.define(format!("{}/{}", NAMESPACE, function.name), function);
    }
    log::debug!("registered {} functions under {}", FUNCTIONS.len(), NAMESPACE);
}

fn bad_slot(n: usize, expected: &str, got: &Value) -> OsxError {
    OsxError::invalid_argument(format!(
        "bad slot #{}, expected {}, got {}",
        n,
        expected,
        got.type_name()
    ))
}

fn buf_or_str(args: &[Value], n: usize) -> Result<&[u8], OsxError> {
    match &args[n] {
        Value::String(bytes) | Value::Buffer(bytes) => Ok(bytes.as_slice()),
        other => Err(bad_slot(n, "string|buffer", other)),
    }
}

fn string(args: &[Value], n: usize) -> Result<&[u8], OsxError> {
    match &args[n] {
        Value::String(bytes) => Ok(bytes.as_slice()),
        other => Err(bad_slot(n, "string", other)),
    }
}

fn as_path(bytes: &[u8]) -> &Path {
    Path::new(OsStr::from_bytes(bytes))
}

fn as_name(n: usize, bytes: &[u8]) -> Result<&str, OsxError> {
    std::str::from_utf8(bytes).map_err(|_| {
        OsxError::invalid_argument(format!("bad slot #{}, name is not valid UTF-8", n))
    })
}

fn cfun_chroot(os: &mut Osx<&mut dyn SystemCalls>, args: &[Value]) -> Result<Value, OsxError> {
    let path = as_path(buf_or_str(args, 0)?);
    os.chroot(path)?;
    Ok(Value::Nil)
}

fn cfun_chown(os: &mut Osx<&mut dyn SystemCalls>, args: &[Value]) -> Result<Value, OsxError> {
    let path = as_path(buf_or_str(args, 0)?);
    let user = as_name(1, buf_or_str(args, 1)?)?;
    let group = match args.len() {
        3 => Some(as_name(2, buf_or_str(args, 2)?)?),
        _ => None,
    };
    os.chown(path, user, group)?;
    Ok(Value::Nil)
}

fn cfun_setuid(os: &mut Osx<&mut dyn SystemCalls>, args: &[Value]) -> Result<Value, OsxError> {
    let user = as_name(0, string(args, 0)?)?;
    os.setuid(user)?;
    Ok(Value::Nil)
}

fn cfun_setgid(os: &mut Osx<&mut dyn SystemCalls>, args: &[Value]) -> Result<Value, OsxError> {
    let group = as_name(0, string(args, 0)?)?;
    os.setgid(group)?;
    Ok(Value::Nil)
}

fn cfun_hostname(os: &mut Osx<&mut dyn SystemCalls>, _args: &[Value]) -> Result<Value, OsxError> {
    Ok(Value::from(os.hostname()?))
}
