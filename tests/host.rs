//! Runs the operations against the real host. Nothing here needs root, and
//! nothing changes process-wide state.

use osx::binding::{self, Value};
use osx::reexports::nix::unistd::{getegid, geteuid, getgid, getuid, User};
use osx::{ErrorKind, Host, Osx, HOSTNAME_MAX};
use std::os::unix::fs::MetadataExt;

fn current_user() -> String {
    User::from_uid(getuid())
        .unwrap()
        .expect("current uid has no passwd entry")
        .name
}

#[test]
fn chown_to_self_sets_owner() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let user = current_user();
    Osx::host().chown(file.path(), &user, None).unwrap();
    let uid = osx::user_id(&user).unwrap().unwrap();
    assert_eq!(file.path().metadata().unwrap().uid(), uid.as_raw());
}

#[test]
fn chown_unknown_user_or_group() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let before = file.path().metadata().unwrap();
    let mut os = Osx::host();

    let e = os.chown(file.path(), "osx-no-such-user-7f3a", None).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::NotFound);

    let e = os
        .chown(file.path(), &current_user(), Some("osx-no-such-group-7f3a"))
        .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::NotFound);

    let after = file.path().metadata().unwrap();
    assert_eq!((before.uid(), before.gid()), (after.uid(), after.gid()));
}

#[test]
fn chown_missing_path_is_an_os_error() {
    let dir = tempfile::tempdir().unwrap();
    let e = Osx::host()
        .chown(dir.path().join("missing"), &current_user(), None)
        .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::SysError);
    assert!(e.to_string().starts_with("chown: "));
}

#[test]
fn chroot_missing_path_is_an_os_error() {
    let dir = tempfile::tempdir().unwrap();
    let e = Osx::host().chroot(dir.path().join("missing")).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::SysError);
    assert!(e.to_string().starts_with("chroot: "));
}

#[test]
fn unknown_identities_leave_the_process_alone() {
    let ids = (getuid(), geteuid(), getgid(), getegid());
    let mut os = Osx::host();
    assert_eq!(
        os.setuid("osx-no-such-user-7f3a").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        os.setgid("osx-no-such-group-7f3a").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(ids, (getuid(), geteuid(), getgid(), getegid()));
}

#[test]
fn hostname_is_a_bare_label() {
    let name = Osx::host().hostname().unwrap();
    assert!(!name.contains('.'));
    assert!(name.len() <= HOSTNAME_MAX);
}

#[test]
fn binding_matches_typed_api() {
    let hostname = binding::function("hostname").unwrap();
    let expected = Osx::host().hostname().unwrap();
    assert_eq!(hostname.invoke(&mut Host, &[]).unwrap(), Value::from(expected));

    let e = hostname.invoke(&mut Host, &["extra".into()]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);

    let setuid = binding::function("setuid").unwrap();
    let e = setuid.invoke(&mut Host, &[]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);
}
