use std::path::Path;

use anyhow::Context;
use glm_build::write_env_file;
use glm_core::BuildVariable;

pub(crate) fn gen_env_file(vars: &[BuildVariable], path: &Path) -> anyhow::Result<()> {
    write_env_file(path, vars).with_context(|| format!("cannot generate {}", path.display()))?;
    tracing::info!(vars = vars.len(), path = %path.display(), "env file written");
    Ok(())
}
