use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use glm_build::{MarathonGenerator, additional_from_env};
use glm_core::{BuildVariable, Settings};
use glm_runner::{ScriptArtifact, ScriptExecutor};

/// Pause before running the jq script when no delay is configured.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Write `cat <template> | jq ... > <target>` into the script and run it.
pub(crate) async fn gen_marathon_file<E: ScriptExecutor>(
    settings: &Settings,
    vars: &[BuildVariable],
    script_path: &Path,
    executor: &E,
) -> anyhow::Result<()> {
    let target = &settings.marathon_target_file;
    tracing::info!("Create arguments and envs to create {} ...", target.display());

    let additional = additional_from_env(&settings.additional_vars);
    let script =
        MarathonGenerator::new(&settings.marathon_file, target, vars, &additional).render()?;

    let written = ScriptArtifact::new(script_path, script).write()?;

    let env: Vec<BuildVariable> = vars.iter().chain(&additional).cloned().collect();
    written
        .execute(executor, Some(settings.delay.unwrap_or(SETTLE_DELAY)), &env)
        .await
        .with_context(|| format!("cannot generate {}", target.display()))
}
