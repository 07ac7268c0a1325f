//! Hands the user's generated stylesheets to a privileged helper script.
//!
//! The script is external; this module only builds and runs
//! `pkexec SCRIPT HOME USER` and reports its exit status.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, bail};
use tracing::info;

/// Installed location of the helper script.
pub const DEFAULT_SCRIPT: &str = "/usr/share/titlebuttons/apply-to-root.sh";

/// The pkexec invocation for `script`.
pub fn command(script: &Path, home: &Path, user: &str) -> Command {
    let mut cmd = Command::new("pkexec");
    cmd.arg(script).arg(home).arg(user);
    cmd
}

/// Current user name: `$USER`, else the last component of `home`.
pub fn current_user(home: &Path) -> Option<String> {
    std::env::var("USER")
        .ok()
        .filter(|user| !user.is_empty())
        .or_else(|| {
            home.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
}

/// Run the helper and wait for it. A non-zero exit is an error.
pub fn apply(script: &Path, home: &Path) -> anyhow::Result<()> {
    if !script.exists() {
        bail!("apply script not found: {}", script.display());
    }

    let user = current_user(home).context("cannot determine the current user name")?;
    info!("Running {} for {} ({})", script.display(), user, home.display());

    let status = command(script, home, &user)
        .status()
        .context("failed to run pkexec")?;

    if !status.success() {
        bail!(
            "apply script exited with {}; check that it is executable and authorised",
            status
        );
    }

    Ok(())
}
