//! External project delegation boundary
//!
//! When a run is delegated, the core hands over only a working directory
//! and an optional entry-point identifier; the runner's own execution
//! semantics are opaque here.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use async_trait::async_trait;
use tracing::info;

/// Runs a whole project directory on the core's behalf
#[async_trait]
pub trait ProjectRunner: Send + Sync {
    async fn run(&self, dir: &Path, entry_point: Option<&str>) -> Result<()>;
}

/// Default runner: `cargo run` in the project directory.
///
/// An entry-point source file maps to the binary target sharing its stem.
pub struct CargoRunner;

#[async_trait]
impl ProjectRunner for CargoRunner {
    async fn run(&self, dir: &Path, entry_point: Option<&str>) -> Result<()> {
        let mut command = tokio::process::Command::new("cargo");
        command.arg("run").arg("--quiet").current_dir(dir);
        if let Some(entry) = entry_point {
            let target = Path::new(entry)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(entry);
            command.arg("--bin").arg(target);
        }

        info!(dir = %dir.display(), entry_point = ?entry_point, "delegating run to cargo");
        let status = command
            .status()
            .await
            .context("failed to launch the project runner")?;
        ensure!(status.success(), "project run failed with {status}");
        Ok(())
    }
}
