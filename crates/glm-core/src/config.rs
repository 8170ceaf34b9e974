use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::settings::ProjectRef;

/// Name of the optional project file read from the working directory.
pub const CONFIG_FILE_NAME: &str = "glm.toml";

/// glm.toml configuration
///
/// Every value here can be overridden by the matching command-line flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlmConfig {
    #[serde(default)]
    pub gitlab: GitlabConfig,
    #[serde(default)]
    pub vars: VarsConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitlabConfig {
    /// GitLab base URL, with or without the `/api/v4` suffix
    pub base_url: Option<String>,
    /// User to impersonate through the `Sudo` header (defaults to root)
    #[serde(default = "default_user_role")]
    pub user_role: String,
    /// Numeric project ID or `namespace/project` path
    pub project_id: Option<ProjectRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarsConfig {
    /// Build variables excluded from every artifact, on top of the
    /// built-in credential list
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    /// Names of process environment variables passed to the
    /// marathon template alongside the fetched variables
    #[serde(default = "default_additional")]
    pub additional: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Docker image name for build-web
    pub image: Option<String>,
    /// Marathon template file
    #[serde(default = "default_marathon_file")]
    pub marathon_file: PathBuf,
    /// Where the rendered marathon descriptor is written
    #[serde(default = "default_marathon_target_file")]
    pub marathon_target_file: PathBuf,
    /// Seconds to wait before running the generated script
    pub delay_time: Option<u64>,
}

impl Default for GitlabConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_role: default_user_role(),
            project_id: None,
        }
    }
}

impl Default for VarsConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            additional: default_additional(),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            image: None,
            marathon_file: default_marathon_file(),
            marathon_target_file: default_marathon_target_file(),
            delay_time: None,
        }
    }
}

impl GlmConfig {
    /// Load from glm.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an explicit path. A missing file is an error here.
    pub fn load_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ConfigLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "loaded glm config");
        toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn default_user_role() -> String {
    "root".to_owned()
}

fn default_ignore() -> Vec<String> {
    vec!["CONN".to_owned()]
}

fn default_additional() -> Vec<String> {
    vec!["CI_JOB_ID".to_owned()]
}

fn default_marathon_file() -> PathBuf {
    PathBuf::from("./marathon/marathon.json")
}

fn default_marathon_target_file() -> PathBuf {
    PathBuf::from("./target.json")
}
