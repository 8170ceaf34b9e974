use std::env::VarError;
use std::path::Path;

use glm_core::BuildVariable;

use crate::error::BuildError;
use crate::shell::{Pipeline, Script, ShellCommand, Word};

/// Generates the `cat <template> | jq ... > <target>` script for
/// `gen-marathon-file`.
///
/// For each variable `KEY` the value is handed to jq as `--arg key $KEY`
/// (lowercased argument name) and assigned with `.env.KEY |= $key`.
/// Fetched variables come first, then the additional ones, each in input
/// order.
pub struct MarathonGenerator<'a> {
    template: &'a Path,
    target: &'a Path,
    vars: &'a [BuildVariable],
    additional: &'a [BuildVariable],
}

impl<'a> MarathonGenerator<'a> {
    pub fn new(
        template: &'a Path,
        target: &'a Path,
        vars: &'a [BuildVariable],
        additional: &'a [BuildVariable],
    ) -> Self {
        Self {
            template,
            target,
            vars,
            additional,
        }
    }

    /// The jq filter, fragments joined with ` | `. Identity when there is
    /// nothing to substitute.
    pub fn filter(&self) -> String {
        let fragments: Vec<String> = self
            .all_vars()
            .map(|v| format!(".env.{} |= ${}", v.key, v.key.to_lowercase()))
            .collect();

        if fragments.is_empty() {
            ".".to_owned()
        } else {
            fragments.join(" | ")
        }
    }

    pub fn pipeline(&self) -> Result<Pipeline, BuildError> {
        let mut jq = ShellCommand::new("jq");
        for var in self.all_vars() {
            jq = jq
                .arg(Word::literal("--arg")?)
                .arg(Word::literal(var.key.to_lowercase())?)
                .arg(Word::var(&var.key, &var.value)?);
        }
        jq = jq.arg(Word::literal(self.filter())?);

        let cat = ShellCommand::new("cat").arg(Word::path(self.template)?);

        Pipeline::new(cat).pipe(jq).redirect_to(self.target)
    }

    pub fn render(&self) -> Result<Script, BuildError> {
        Ok(Script::new(self.pipeline()?))
    }

    fn all_vars(&self) -> impl Iterator<Item = &BuildVariable> {
        self.vars.iter().chain(self.additional)
    }
}

/// Read the additional variables from the process environment.
///
/// An unset variable resolves to an empty value, which jq receives as `""`.
pub fn additional_from_env(names: &[String]) -> Vec<BuildVariable> {
    names
        .iter()
        .map(|name| {
            let value = match std::env::var(name) {
                Ok(value) => value,
                Err(VarError::NotPresent) => {
                    tracing::warn!(%name, "additional build var is not set, using empty value");
                    String::new()
                }
                Err(e @ VarError::NotUnicode(_)) => {
                    tracing::warn!(%name, error = %e, "additional build var is not UTF-8, using empty value");
                    String::new()
                }
            };
            BuildVariable::new(name.clone(), value)
        })
        .collect()
}
