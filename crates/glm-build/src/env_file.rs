use std::path::Path;

use glm_core::BuildVariable;

use crate::error::BuildError;
use crate::file::write_file;

/// Where `gen-env-file` writes its output.
pub const ENV_FILE_PATH: &str = "./env.env";

/// One `KEY=VALUE` line per variable. Values are written verbatim.
pub fn render_env_file(vars: &[BuildVariable]) -> String {
    vars.iter()
        .map(|v| format!("{}={}\n", v.key, v.value))
        .collect()
}

pub fn write_env_file(path: &Path, vars: &[BuildVariable]) -> Result<(), BuildError> {
    write_file(path, &render_env_file(vars))
}
