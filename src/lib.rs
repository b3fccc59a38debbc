/*!
# osx

Extra OS functions for daemons that need to change their root directory,
change the owner and group of files, and set the uid or gid of the running
process.

## Overview

Five operations, each a direct call into the operating system:

- `chroot`: set the root directory of the process
- `chown`: give a path to a user, and optionally a group, by name
- `setuid`: switch the process to the uid of a named user
- `setgid`: switch the process to the gid of a named group
- `hostname`: the host name without its domain part

User and group names are resolved through the system databases first. A
name with no entry fails with [`ErrorKind::NotFound`] and nothing is
changed. A call rejected by the OS fails with [`ErrorKind::SysError`] and
carries the OS message.

## Example

```no_run
use osx::Osx;

fn main() {
    let mut os = Osx::host();
    println!("running on {}", os.hostname().unwrap());

    os.chown("/var/run/app.pid", "_app", None)
        .unwrap_or_else(|e| panic!("{}", e));
    os.chroot("/var/empty")
        .unwrap_or_else(|e| panic!("{}", e));
    os.setgid("_app").unwrap_or_else(|e| panic!("{}", e));
    os.setuid("_app").unwrap_or_else(|e| panic!("{}", e));
}
```

`chroot`, `setuid` and `setgid` mutate the whole process and cannot be
undone. They take `&mut self` on purpose; share an [`Osx`] between threads
only behind your own lock.

## Host runtime

The [`binding`] module exposes the same operations as dynamically typed
functions for an embedding language runtime, registered under the `osx`
namespace:

```
use std::collections::HashMap;
use osx::binding::{self, Function, Value};
use osx::Host;

let mut env: HashMap<String, &'static Function> = HashMap::new();
binding::register(&mut env);
let name = env["osx/hostname"].invoke(&mut Host, &[]).unwrap();
assert!(matches!(name, Value::String(_)));
```
*/

pub use self::errors::*;
pub use self::lookup::{group_id, user_id};
pub use self::osx::*;
pub use self::syscalls::*;

pub mod binding;
mod errors;
mod lookup;
mod osx;
mod syscalls;

/// Reexported dependencies for use in consuming crates.
///
/// - `libc`: Low-level bindings to the C standard library
/// - `nix`: Rust friendly bindings to *nix APIs with user and filesystem features
pub mod reexports {
    pub use {libc, nix};
}
