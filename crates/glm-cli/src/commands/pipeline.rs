use std::path::PathBuf;

use anyhow::Context;
use glm_build::ENV_FILE_PATH;
use glm_core::{Action, Settings, filter_ignored};
use glm_gitlab::VariableSource;
use glm_runner::{SCRIPT_PATH, ScriptExecutor};

use super::build_web::build_web;
use super::env_file::gen_env_file;
use super::marathon::gen_marathon_file;

/// Fixed output locations, relative to the working directory.
pub(crate) struct Outputs {
    pub env_file: PathBuf,
    pub script: PathBuf,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(ENV_FILE_PATH),
            script: PathBuf::from(SCRIPT_PATH),
        }
    }
}

/// Fetch → filter → generate. `settings` must already be validated.
pub(crate) async fn run<S: VariableSource, E: ScriptExecutor>(
    settings: &Settings,
    source: &S,
    executor: &E,
    outputs: &Outputs,
) -> anyhow::Result<()> {
    let fetched = source
        .fetch_build_variables(&settings.project)
        .await
        .context("Cannot get build vars")?;
    let total = fetched.len();

    let vars = filter_ignored(fetched, &settings.ignore_vars);
    tracing::info!(
        fetched = total,
        kept = vars.len(),
        action = %settings.action,
        "build vars ready"
    );

    match settings.action {
        Action::GenEnvFile => gen_env_file(&vars, &outputs.env_file),
        Action::BuildWeb => build_web(settings, &vars, &outputs.script, executor).await,
        Action::GenMarathonFile => {
            gen_marathon_file(settings, &vars, &outputs.script, executor).await
        }
    }
}
