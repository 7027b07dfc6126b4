//! Hands the finished chart to the desktop image viewer.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::Command;

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", "/WAIT"]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Launches the viewer and waits for the launcher to exit.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let mut cmd = viewer_command(path);
    let program = cmd.get_program().to_string_lossy().into_owned();
    let status = cmd
        .status()
        .with_context(|| format!("failed to launch {} for {}", program, path.display()))?;
    if !status.success() {
        return Err(anyhow!("{} exited with {}", program, status));
    }
    Ok(())
}
