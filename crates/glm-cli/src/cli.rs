use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glm_core::{Action, FlagOverrides, GlmConfig, ProjectRef, Settings};
use secrecy::SecretString;

#[derive(Parser)]
#[command(
    name = "glm",
    about = "Generate env files, docker builds, and marathon descriptors from GitLab build variables"
)]
#[command(version)]
pub(crate) struct Cli {
    /// Action to run
    #[arg(long, short = 'a', value_enum)]
    action: ActionArg,

    /// GitLab project ID or namespace/project path
    #[arg(long)]
    project_id: Option<ProjectRef>,

    /// GitLab base URL
    #[arg(long, short = 'b', env = "GITLAB_BASE_URL")]
    base_url: Option<String>,

    /// User to impersonate through the Sudo header [default: root]
    #[arg(long, short = 'u')]
    user_role: Option<String>,

    /// Marathon template file [default: ./marathon/marathon.json]
    #[arg(long, short = 'm')]
    marathon_file: Option<PathBuf>,

    /// Marathon target file to deploy [default: ./target.json]
    #[arg(long, short = 't')]
    marathon_target_file: Option<PathBuf>,

    /// Build vars to ignore, repeatable [default: CONN]
    #[arg(long, short = 'v')]
    ignore_build_vars: Vec<String>,

    /// Environment variables passed to the marathon template, repeatable [default: CI_JOB_ID]
    #[arg(long, short = 'd')]
    additional_build_vars: Vec<String>,

    /// Docker image name to build
    #[arg(long, short = 'i')]
    image: Option<String>,

    /// GitLab private token used to read the project's build vars
    #[arg(long, short = 'p', env = "GITLAB_PRIVATE_TOKEN", hide_env_values = true)]
    gitlab_private_token: Option<String>,

    /// Delay in seconds before running the generated script
    #[arg(long, short = 'l')]
    delay_time: Option<u64>,

    /// Config file [default: ./glm.toml when present]
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    /// Write ./env.env with KEY=VALUE lines
    GenEnvFile,
    /// Run docker build with every build var as --build-arg
    BuildWeb,
    /// Render the marathon template through jq into the target file
    GenMarathonFile,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::GenEnvFile => Action::GenEnvFile,
            ActionArg::BuildWeb => Action::BuildWeb,
            ActionArg::GenMarathonFile => Action::GenMarathonFile,
        }
    }
}

impl Cli {
    /// Resolve flags against glm.toml and built-in defaults.
    pub(crate) fn into_settings(self) -> glm_core::Result<Settings> {
        let file = match &self.config {
            Some(path) => GlmConfig::load_file(path)?,
            None => GlmConfig::load(&PathBuf::from("."))?,
        };

        let flags = FlagOverrides {
            base_url: self.base_url,
            token: self.gitlab_private_token.map(SecretString::from),
            project: self.project_id,
            user_role: self.user_role,
            marathon_file: self.marathon_file,
            marathon_target_file: self.marathon_target_file,
            ignore_vars: self.ignore_build_vars,
            additional_vars: self.additional_build_vars,
            image: self.image,
            delay_time: self.delay_time,
        };

        Settings::resolve(self.action.into(), flags, file)
    }
}
