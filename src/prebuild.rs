//! Optional pre-flight build of the measurement target.

use crate::error::{Error, Result};
use std::process::Command;

/// Clean and rebuild `target` via make. A failing build aborts before any
/// measurement happens.
pub fn rebuild(target: &str) -> Result<()> {
    println!("Rebuilding {target}...");
    run_make(&["clean"])?;
    run_make(&[target])?;
    Ok(())
}

fn run_make(args: &[&str]) -> Result<()> {
    let status = Command::new("make")
        .args(args)
        .status()
        .map_err(|e| Error::Process(format!("failed to launch make: {e}")))?;
    if !status.success() {
        return Err(Error::Process(format!(
            "make {} exited with {status}",
            args.join(" ")
        )));
    }
    Ok(())
}
