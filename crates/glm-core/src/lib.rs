//! Core types and configuration for glm.
//!
//! This crate defines the build variable model ([`BuildVariable`]) and the
//! blocklist filter applied to every fetched variable set, the optional
//! `glm.toml` schema ([`GlmConfig`]), the resolved per-run [`Settings`],
//! and shared error types.

pub mod config;
pub mod error;
pub mod settings;
pub mod variable;

pub use config::{DeployConfig, GitlabConfig, GlmConfig, VarsConfig};
pub use error::{Error, Result};
pub use settings::{Action, FlagOverrides, ProjectRef, Settings};
pub use variable::{BuildVariable, DEFAULT_IGNORED_VARS, effective_blocklist, filter_ignored};
