use std::path::{Path, PathBuf};
use std::time::Duration;

use glm_build::{Script, write_file};
use glm_core::BuildVariable;

use crate::error::RunError;
use crate::executor::ScriptExecutor;

/// Where generated scripts are written. Overwritten on every run and left
/// in place afterwards.
pub const SCRIPT_PATH: &str = "./script.sh";

/// A rendered script that has not touched the disk yet.
#[derive(Debug)]
pub struct ScriptArtifact {
    path: PathBuf,
    script: Script,
}

/// A script on disk, ready to run once.
#[derive(Debug)]
pub struct WrittenScript {
    path: PathBuf,
}

impl ScriptArtifact {
    pub fn new(path: impl Into<PathBuf>, script: Script) -> Self {
        Self {
            path: path.into(),
            script,
        }
    }

    pub fn write(self) -> Result<WrittenScript, RunError> {
        write_file(&self.path, &self.script.render())?;
        Ok(WrittenScript { path: self.path })
    }
}

impl WrittenScript {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait `delay` (if any), then run the script to completion.
    ///
    /// `env` is set in the child's environment before it starts.
    pub async fn execute<E: ScriptExecutor>(
        self,
        executor: &E,
        delay: Option<Duration>,
        env: &[BuildVariable],
    ) -> Result<(), RunError> {
        if let Some(delay) = delay.filter(|d| !d.is_zero()) {
            tracing::info!(seconds = delay.as_secs_f64(), "waiting before running script");
            tokio::time::sleep(delay).await;
        }

        tracing::info!("Running {} ...", self.path.display());
        executor.run(&self.path, env).await
    }
}
