use glm_core::{BuildVariable, ProjectRef};

use crate::error::GitlabError;

/// Abstraction over the build variable API for testability.
///
/// Production code uses [`crate::GitlabClient`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait VariableSource: Send + Sync {
    /// Fetch every build variable of `project`, in API order.
    async fn fetch_build_variables(
        &self,
        project: &ProjectRef,
    ) -> Result<Vec<BuildVariable>, GitlabError>;
}
