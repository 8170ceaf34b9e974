use std::path::Path;

use anyhow::Context;
use glm_build::ImageBuildGenerator;
use glm_core::{BuildVariable, Error, Settings};
use glm_runner::{ScriptArtifact, ScriptExecutor};

/// Write `docker build` into the script and run it.
pub(crate) async fn build_web<E: ScriptExecutor>(
    settings: &Settings,
    vars: &[BuildVariable],
    script_path: &Path,
    executor: &E,
) -> anyhow::Result<()> {
    let image = settings.image.as_deref().ok_or(Error::MissingImage)?;

    let script = ImageBuildGenerator::new(image, vars).render()?;
    tracing::info!("{}", script.command_line());

    let written = ScriptArtifact::new(script_path, script).write()?;

    tracing::info!("Building image {image} ...");
    written
        .execute(executor, settings.delay, vars)
        .await
        .with_context(|| format!("cannot build image {image}"))
}
