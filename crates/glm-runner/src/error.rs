use std::path::PathBuf;
use std::process::ExitStatus;

use glm_build::BuildError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("cannot write script")]
    Write {
        #[from]
        source: BuildError,
    },

    #[error("cannot start {}", script.display())]
    Spawn {
        script: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot wait for {}", script.display())]
    Wait {
        script: PathBuf,
        source: std::io::Error,
    },

    #[error("{} failed: {status}", script.display())]
    Failed { script: PathBuf, status: ExitStatus },
}

impl RunError {
    /// Exit code of the script, when it ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { status, .. } => status.code(),
            _ => None,
        }
    }
}
