use anyhow::{Context, Result};
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

/// Hand a deep link to whatever app the OS registered for its scheme.
pub fn open_external(href: &str) -> Result<()> {
    Command::new(OPENER)
        .arg(href)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run `{}`", OPENER))?;
    tracing::info!(href, "opened external player link");
    Ok(())
}
