//! pip executable resolution.

use std::path::{Path, PathBuf};

/// Compute the pip executable to invoke for an optional virtualenv.
///
/// With no venv this is the bare program name, resolved through the
/// process search path at spawn time. With a venv it is the venv's own
/// pip: `Scripts\pip.exe` on Windows, `bin/pip` elsewhere. The path is
/// not checked for existence; a missing pip surfaces as a spawn failure
/// in the executor.
pub fn pip_executable(venv: Option<&str>) -> PathBuf {
    match venv {
        None => PathBuf::from("pip"),
        Some(root) => {
            let root = Path::new(root);
            if cfg!(windows) {
                root.join("Scripts").join("pip.exe")
            } else {
                root.join("bin").join("pip")
            }
        }
    }
}
