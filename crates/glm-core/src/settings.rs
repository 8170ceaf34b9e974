use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::GlmConfig;
use crate::error::{Error, Result};
use crate::variable::effective_blocklist;

/// The artifact a run produces. Exactly one per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Write `./env.env` with `KEY=VALUE` lines
    GenEnvFile,
    /// Run `docker build` with every variable as a build argument
    BuildWeb,
    /// Render the marathon template through jq into the target file
    GenMarathonFile,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenEnvFile => "gen-env-file",
            Self::BuildWeb => "build-web",
            Self::GenMarathonFile => "gen-marathon-file",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gen-env-file" => Ok(Self::GenEnvFile),
            "build-web" => Ok(Self::BuildWeb),
            "gen-marathon-file" => Ok(Self::GenMarathonFile),
            other => Err(Error::UnknownAction(other.to_owned())),
        }
    }
}

/// A GitLab project reference: numeric ID or `namespace/project` path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectRef {
    Id(u64),
    Path(String),
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Path(path) => f.write_str(path),
        }
    }
}

impl FromStr for ProjectRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(Error::InvalidProjectId(s.to_owned()));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            s.parse::<u64>()
                .map(Self::Id)
                .map_err(|e| Error::InvalidProjectId(format!("{s}: {e}")))
        } else {
            Ok(Self::Path(s.to_owned()))
        }
    }
}

/// Values given on the command line. `None` / empty means "not given",
/// in which case glm.toml and then the built-in default apply.
#[derive(Debug, Default)]
pub struct FlagOverrides {
    pub base_url: Option<String>,
    pub token: Option<SecretString>,
    pub project: Option<ProjectRef>,
    pub user_role: Option<String>,
    pub marathon_file: Option<PathBuf>,
    pub marathon_target_file: Option<PathBuf>,
    pub ignore_vars: Vec<String>,
    pub additional_vars: Vec<String>,
    pub image: Option<String>,
    pub delay_time: Option<u64>,
}

/// Immutable configuration for a single run.
///
/// Built once at startup by [`Settings::resolve`] and passed by reference
/// to every stage. `ignore_vars` already includes the built-in credential
/// list.
#[derive(Clone)]
pub struct Settings {
    pub action: Action,
    pub base_url: String,
    pub token: SecretString,
    pub project: ProjectRef,
    pub user_role: String,
    pub marathon_file: PathBuf,
    pub marathon_target_file: PathBuf,
    pub ignore_vars: Vec<String>,
    pub additional_vars: Vec<String>,
    pub image: Option<String>,
    pub delay: Option<Duration>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("action", &self.action)
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("project", &self.project)
            .field("user_role", &self.user_role)
            .field("marathon_file", &self.marathon_file)
            .field("marathon_target_file", &self.marathon_target_file)
            .field("ignore_vars", &self.ignore_vars)
            .field("additional_vars", &self.additional_vars)
            .field("image", &self.image)
            .field("delay", &self.delay)
            .finish()
    }
}

impl Settings {
    /// Layer command-line flags over glm.toml over built-in defaults.
    ///
    /// Only presence is checked here; call [`Settings::validate`] for the
    /// pre-flight checks.
    pub fn resolve(action: Action, flags: FlagOverrides, file: GlmConfig) -> Result<Self> {
        let project = flags
            .project
            .or(file.gitlab.project_id)
            .ok_or(Error::MissingProjectId)?;

        let user_ignore = if flags.ignore_vars.is_empty() {
            file.vars.ignore
        } else {
            flags.ignore_vars
        };

        let additional_vars = if flags.additional_vars.is_empty() {
            file.vars.additional
        } else {
            flags.additional_vars
        };

        Ok(Self {
            action,
            base_url: flags.base_url.or(file.gitlab.base_url).unwrap_or_default(),
            token: flags.token.unwrap_or_else(|| SecretString::from(String::new())),
            project,
            user_role: flags.user_role.unwrap_or(file.gitlab.user_role),
            marathon_file: flags.marathon_file.unwrap_or(file.deploy.marathon_file),
            marathon_target_file: flags
                .marathon_target_file
                .unwrap_or(file.deploy.marathon_target_file),
            ignore_vars: effective_blocklist(&user_ignore),
            additional_vars,
            image: flags
                .image
                .or(file.deploy.image)
                .filter(|i| !i.trim().is_empty()),
            delay: flags
                .delay_time
                .or(file.deploy.delay_time)
                .map(Duration::from_secs),
        })
    }

    /// Pre-flight checks, run before any variable is fetched.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::MissingBaseUrl);
        }
        if self.token.expose_secret().trim().is_empty() {
            return Err(Error::MissingToken);
        }
        match self.action {
            Action::GenEnvFile => {}
            Action::BuildWeb => {
                if self.image.is_none() {
                    return Err(Error::MissingImage);
                }
            }
            Action::GenMarathonFile => {
                if !self.marathon_file.exists() {
                    return Err(Error::TemplateNotFound(self.marathon_file.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_ref_parses_numeric_and_path() {
        assert_eq!("42".parse::<ProjectRef>().unwrap(), ProjectRef::Id(42));
        assert_eq!(
            "group/app".parse::<ProjectRef>().unwrap(),
            ProjectRef::Path("group/app".to_owned())
        );
        assert!("".parse::<ProjectRef>().is_err());
        assert!("a b".parse::<ProjectRef>().is_err());
    }

    #[test]
    fn action_round_trips_through_str() {
        for action in [Action::GenEnvFile, Action::BuildWeb, Action::GenMarathonFile] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert!(matches!(
            "deploy".parse::<Action>(),
            Err(Error::UnknownAction(ref a)) if a == "deploy"
        ));
    }
}
