use glm_core::BuildVariable;

use crate::error::BuildError;
use crate::shell::{Script, ShellCommand, Word};

/// Generates the `docker build` script for `build-web`.
///
/// Every variable becomes `--build-arg KEY=$KEY`; the build context is the
/// working directory.
pub struct ImageBuildGenerator<'a> {
    image: &'a str,
    vars: &'a [BuildVariable],
}

impl<'a> ImageBuildGenerator<'a> {
    pub fn new(image: &'a str, vars: &'a [BuildVariable]) -> Self {
        Self { image, vars }
    }

    pub fn command(&self) -> Result<ShellCommand, BuildError> {
        let mut command = ShellCommand::new("docker").arg(Word::literal("build")?);
        for var in self.vars {
            command = command
                .arg(Word::literal("--build-arg")?)
                .arg(Word::assign(&var.key)?);
        }

        Ok(command.args([
            Word::literal("-t")?,
            Word::literal(self.image)?,
            Word::literal(".")?,
        ]))
    }

    pub fn render(&self) -> Result<Script, BuildError> {
        Ok(Script::new(self.command()?))
    }
}
