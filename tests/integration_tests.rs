//! End-to-end tests driving the executor and undo engine against a stub
//! pip installed inside a fake virtualenv.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

use pipmem::ops::exec;
use pipmem::ops::undo;
use pipmem::{Action, OpContext, OpError, Outcome};

/// A pip that reports success for installs and uninstalls.
const PIP_OK: &str = r#"#!/bin/sh
case "$1" in
  install)
    echo "Successfully installed foo-1.2 bar-3.4"
    ;;
  uninstall)
    echo "  Successfully uninstalled foo-1.2"
    echo "  Successfully uninstalled bar-3.4"
    ;;
esac
"#;

/// A pip whose uninstall output carries no version suffix.
const PIP_BARE: &str = r#"#!/bin/sh
echo "Successfully uninstalled foo"
"#;

/// A pip that succeeds without changing anything.
const PIP_SATISFIED: &str = r#"#!/bin/sh
echo "Requirement already satisfied: foo"
"#;

/// A pip that fails.
const PIP_FAIL: &str = r#"#!/bin/sh
echo "ERROR: No matching distribution found for foo"
exit 1
"#;

/// Test context with an isolated pipmem home and a fake venv whose pip
/// is a stub shell script.
struct TestContext {
    temp_dir: TempDir,
    ctx: OpContext,
}

impl TestContext {
    fn new(pip_script: &str) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let home = temp_dir.path().join(".pipmem");
        fs::create_dir_all(&home).expect("failed to create pipmem home");

        let bin = temp_dir.path().join("venv").join("bin");
        fs::create_dir_all(&bin).expect("failed to create venv bin");
        let pip = bin.join("pip");
        fs::write(&pip, pip_script).expect("failed to write stub pip");
        fs::set_permissions(&pip, fs::Permissions::from_mode(0o755))
            .expect("failed to chmod stub pip");

        let ctx = OpContext::rooted_at(&home);
        Self { temp_dir, ctx }
    }

    fn venv(&self) -> String {
        self.temp_dir
            .path()
            .join("venv")
            .to_string_lossy()
            .into_owned()
    }

    fn home(&self) -> PathBuf {
        self.temp_dir.path().join(".pipmem")
    }

    fn pkgs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }
}

#[test]
fn install_records_the_confirmed_effect() {
    let t = TestContext::new(PIP_OK);
    let venv = t.venv();

    let outcome = exec::execute(
        &t.ctx,
        Action::Install,
        &TestContext::pkgs(&["foo", "bar"]),
        Some(&venv),
    )
    .expect("install should succeed");

    let Outcome::Recorded { id, packages } = outcome else {
        panic!("expected a recorded outcome");
    };
    assert_eq!(packages, TestContext::pkgs(&["foo==1.2", "bar==3.4"]));

    // The record stores the pinned effect, not the requested names.
    let record = t.ctx.ledger.get_by_id(id).unwrap().unwrap();
    assert_eq!(record.action, Action::Install);
    assert_eq!(record.packages, TestContext::pkgs(&["foo==1.2", "bar==3.4"]));
    assert_eq!(record.venv.as_deref(), Some(venv.as_str()));
}

#[test]
fn uninstall_records_one_identity_per_output_line() {
    let t = TestContext::new(PIP_BARE);
    let venv = t.venv();

    let outcome = exec::execute(
        &t.ctx,
        Action::Uninstall,
        &TestContext::pkgs(&["foo"]),
        Some(&venv),
    )
    .expect("uninstall should succeed");

    let Outcome::Recorded { id, packages } = outcome else {
        panic!("expected a recorded outcome");
    };
    assert_eq!(packages, TestContext::pkgs(&["foo"]));

    let record = t.ctx.ledger.get_by_id(id).unwrap().unwrap();
    assert_eq!(record.action, Action::Uninstall);
    assert_eq!(record.packages, TestContext::pkgs(&["foo"]));
}

#[test]
fn upgrade_is_recorded_as_its_own_action() {
    let t = TestContext::new(PIP_OK);
    let venv = t.venv();

    let outcome = exec::execute(
        &t.ctx,
        Action::Upgrade,
        &TestContext::pkgs(&["foo", "bar"]),
        Some(&venv),
    )
    .expect("upgrade should succeed");

    let Outcome::Recorded { id, .. } = outcome else {
        panic!("expected a recorded outcome");
    };
    let record = t.ctx.ledger.get_by_id(id).unwrap().unwrap();
    assert_eq!(record.action, Action::Upgrade);
}

#[test]
fn undo_round_trips_the_package_set() {
    let t = TestContext::new(PIP_OK);
    let venv = t.venv();

    let outcome = exec::execute(
        &t.ctx,
        Action::Install,
        &TestContext::pkgs(&["foo", "bar"]),
        Some(&venv),
    )
    .unwrap();
    let Outcome::Recorded { id: first, .. } = outcome else {
        panic!("expected a recorded outcome");
    };

    // Undo replays the inverse action over the stored pinned set.
    let Outcome::Recorded { id: second, packages } = undo::undo(&t.ctx, first).unwrap() else {
        panic!("expected the undo to be recorded");
    };
    assert_ne!(second, first);
    assert_eq!(packages, TestContext::pkgs(&["foo==1.2", "bar==3.4"]));

    let inverse = t.ctx.ledger.get_by_id(second).unwrap().unwrap();
    assert_eq!(inverse.action, Action::Uninstall);
    assert_eq!(inverse.venv.as_deref(), Some(venv.as_str()));

    // Undoing the undo yields a third record with the original action.
    let Outcome::Recorded { id: third, .. } = undo::undo(&t.ctx, second).unwrap() else {
        panic!("expected the second undo to be recorded");
    };
    assert_ne!(third, second);
    let replay = t.ctx.ledger.get_by_id(third).unwrap().unwrap();
    assert_eq!(replay.action, Action::Install);
    assert_eq!(replay.packages, TestContext::pkgs(&["foo==1.2", "bar==3.4"]));

    // History is append-only: all three records still exist, newest first.
    let recent = t.ctx.ledger.list_recent(10).unwrap();
    assert_eq!(
        recent.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![third, second, first]
    );
}

#[test]
fn no_marker_success_records_nothing() {
    let t = TestContext::new(PIP_SATISFIED);
    let venv = t.venv();

    let outcome = exec::execute(
        &t.ctx,
        Action::Install,
        &TestContext::pkgs(&["foo"]),
        Some(&venv),
    )
    .expect("an already-satisfied install is not an error");

    assert!(matches!(outcome, Outcome::NoEffect));
    assert!(t.ctx.ledger.list_recent(10).unwrap().is_empty());
}

#[test]
fn failed_exit_records_nothing() {
    let t = TestContext::new(PIP_FAIL);
    let venv = t.venv();

    let err = exec::execute(
        &t.ctx,
        Action::Install,
        &TestContext::pkgs(&["foo"]),
        Some(&venv),
    )
    .expect_err("a failing pip must surface as an error");

    assert!(matches!(err, OpError::OperationFailed { .. }));
    assert!(t.ctx.ledger.list_recent(10).unwrap().is_empty());
}

#[test]
fn missing_pip_is_an_execution_failure() {
    let t = TestContext::new(PIP_OK);
    // A venv root with no bin/pip underneath it.
    let empty = t.temp_dir.path().join("empty-venv").display().to_string();

    let err = exec::execute(
        &t.ctx,
        Action::Install,
        &TestContext::pkgs(&["foo"]),
        Some(&empty),
    )
    .expect_err("spawning a missing pip must fail");

    assert!(matches!(err, OpError::ExecutionFailed { .. }));
    assert!(t.ctx.ledger.list_recent(10).unwrap().is_empty());
}

#[test]
fn undo_of_a_missing_id_is_record_not_found() {
    let t = TestContext::new(PIP_OK);

    let err = undo::undo(&t.ctx, 42).expect_err("missing id must fail");
    assert!(matches!(err, OpError::RecordNotFound(42)));
    assert!(t.ctx.ledger.list_recent(10).unwrap().is_empty());
}

#[test]
fn undo_of_an_upgrade_is_refused() {
    let t = TestContext::new(PIP_OK);
    let id = t
        .ctx
        .ledger
        .append(Action::Upgrade, &TestContext::pkgs(&["foo==2.0"]), None)
        .unwrap();

    let err = undo::undo(&t.ctx, id).expect_err("upgrades have no inverse");
    assert!(matches!(err, OpError::UpgradeNotInvertible(found) if found == id));

    // Refusal has no side effects: the upgrade is still the only record.
    assert_eq!(t.ctx.ledger.list_recent(10).unwrap().len(), 1);
}

#[test]
fn journal_gains_one_line_per_affected_package() {
    let t = TestContext::new(PIP_OK);
    let venv = t.venv();

    exec::execute(
        &t.ctx,
        Action::Install,
        &TestContext::pkgs(&["foo", "bar"]),
        Some(&venv),
    )
    .unwrap();

    let contents = fs::read_to_string(t.home().join("pipmem.log")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("Installed foo==1.2"));
    assert!(lines[1].ends_with("Installed bar==3.4"));
}

#[test]
fn help_smoke_test() {
    let output = Command::new(env!("CARGO_BIN_EXE_pipmem"))
        .arg("--help")
        .output()
        .expect("failed to run pipmem");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn history_on_a_fresh_home_initializes_the_ledger() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let home = temp_dir.path().join(".pipmem");

    let output = Command::new(env!("CARGO_BIN_EXE_pipmem"))
        .env("PIPMEM_HOME", &home)
        .env_remove("VIRTUAL_ENV")
        .args(["history", "-n", "5"])
        .output()
        .expect("failed to run pipmem");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No transactions recorded yet."));
    assert!(home.join("pipmem.db").exists());
}
