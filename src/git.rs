//! # External Git Invocation
//!
//! Runs the system `git` command to materialize working copies. Using the
//! system git means SSH keys, credential helpers, and personal access tokens
//! configured in `~/.gitconfig` all work without any handling here.
//!
//! The executable is located once per run; a missing binary is reported with
//! a remediation hint instead of a bare "No such file" error.

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use log::debug;

use crate::error::{Error, Result};

/// Locate the `git` executable on `PATH`.
pub fn locate_git() -> Result<PathBuf> {
    which::which("git").map_err(|e| Error::GitNotFound {
        message: e.to_string(),
        hint: "install git or make sure it is on your PATH".to_string(),
    })
}

/// Clone `url` into `target_dir`, streaming the child's stdout.
///
/// The child's stdout is consumed line-by-line as it arrives: echoed to our
/// own stdout when `echo_output` is set, discarded otherwise. Stderr is
/// captured for the error report. A non-zero exit status is fatal.
///
/// `target_dir` must not exist; git creates it as part of the clone.
pub fn clone(git: &Path, url: &str, target_dir: &Path, echo_output: bool) -> Result<()> {
    debug!("cloning {} into {}", url, target_dir.display());

    let mut child = Command::new(git)
        .arg("clone")
        .arg(url)
        .arg(target_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
            hint: None,
        })?;

    // Drain stderr on its own thread so neither pipe can fill up and stall
    // the child while we block on the other one.
    let stderr = child.stderr.take();
    let stderr_reader = thread::spawn(move || {
        let mut captured = String::new();
        if let Some(mut stderr) = stderr {
            let _ = stderr.read_to_string(&mut captured);
        }
        captured
    });

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let line = line?;
            if echo_output {
                println!("{}", line);
            } else {
                debug!("git clone: {}", line);
            }
        }
    }

    let status = child.wait()?;
    let stderr_output = stderr_reader.join().unwrap_or_default();

    if !status.success() {
        let message = if stderr_output.trim().is_empty() {
            format!("git clone exited with {}", status)
        } else {
            stderr_output.trim_end().to_string()
        };
        return Err(Error::GitClone {
            url: url.to_string(),
            message,
            hint: auth_hint(&stderr_output),
        });
    }

    Ok(())
}

/// Hint for the common authentication failures git reports on stderr.
fn auth_hint(stderr: &str) -> Option<String> {
    let auth_failure = stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository");
    auth_failure.then(|| {
        "make sure you have access to the repository (SSH key in ssh-agent, \
         credentials configured, or a personal access token set up)"
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_hint_on_authentication_failure() {
        let hint = auth_hint("fatal: Authentication failed for 'https://...'");
        assert!(hint.is_some());
        assert!(hint.unwrap().contains("access to the repository"));
    }

    #[test]
    fn test_auth_hint_on_permission_denied() {
        assert!(auth_hint("git@github.com: Permission denied (publickey).").is_some());
    }

    #[test]
    fn test_no_hint_for_other_failures() {
        assert!(auth_hint("fatal: repository 'x' does not exist").is_none());
    }

    // Cloning itself is exercised against local repositories in
    // tests/clone_integration.rs, where a real git binary is available.
}
