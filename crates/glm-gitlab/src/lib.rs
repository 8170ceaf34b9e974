//! GitLab API access for glm.
//!
//! Only one endpoint is used: the project-level CI/CD variable list.
//! [`GitlabClient`] fetches it in full (see [`client`] for the pagination
//! rules) and [`VariableSource`] abstracts it so the CLI pipeline can run
//! against a mock.

pub mod client;
pub mod error;
pub mod source;

pub use client::GitlabClient;
pub use error::GitlabError;
pub use source::VariableSource;
