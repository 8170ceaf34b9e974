//! Execution of generated scripts.
//!
//! A run moves through `Idle → ScriptWritten → Started → {Succeeded | Failed}`:
//! [`ScriptArtifact`] is written to disk and becomes a [`WrittenScript`],
//! which is consumed by [`WrittenScript::execute`]. Each step takes `self`
//! by value, so a finished run cannot be restarted.

pub mod error;
pub mod executor;
pub mod script;

pub use error::RunError;
pub use executor::{ScriptExecutor, ShellExecutor, forward_lines};
pub use script::{SCRIPT_PATH, ScriptArtifact, WrittenScript};
