//! Artifact generation for glm.
//!
//! # Actions
//!
//! ```text
//! glm --action gen-env-file       KEY=VALUE lines      → ./env.env
//! glm --action build-web          docker build script  → ./script.sh
//! glm --action gen-marathon-file  cat | jq script      → ./script.sh → target.json
//! ```
//!
//! # Scripts
//!
//! Generated scripts never embed variable values. Each value is referenced
//! as `$KEY` and supplied through the environment of the process that runs
//! the script. Scripts start with `set -ef` and `IFS=''`, so an expansion
//! is neither word-split nor globbed and values containing spaces or `*`
//! reach the command intact.

pub mod docker;
pub mod env_file;
pub mod error;
pub mod file;
pub mod marathon;
pub mod shell;

pub use docker::ImageBuildGenerator;
pub use env_file::{ENV_FILE_PATH, render_env_file, write_env_file};
pub use error::BuildError;
pub use file::write_file;
pub use marathon::{MarathonGenerator, additional_from_env};
pub use shell::{Pipeline, Script, ShellCommand, Word};
