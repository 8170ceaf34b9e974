use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors. All of them are fatal and raised before any
/// request is sent to the hosting API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("base URL cannot be empty; pass --base-url or set GITLAB_BASE_URL")]
    MissingBaseUrl,

    #[error("GitLab private token cannot be empty; pass --gitlab-private-token or set GITLAB_PRIVATE_TOKEN")]
    MissingToken,

    #[error("project ID cannot be empty; pass --project-id or set [gitlab].project_id in glm.toml")]
    MissingProjectId,

    #[error("invalid project ID {0:?}")]
    InvalidProjectId(String),

    #[error("option image cannot be empty for the build-web action")]
    MissingImage,

    #[error("marathon template {0} does not exist")]
    TemplateNotFound(PathBuf),

    #[error("unknown action {0:?} (expected gen-env-file, build-web, or gen-marathon-file)")]
    UnknownAction(String),
}
