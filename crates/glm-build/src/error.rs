use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("cannot create file {path}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write to file {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("variable name {0:?} cannot be referenced from a shell script")]
    InvalidVariableName(String),

    #[error("cannot quote {word:?} for a shell script: {reason}")]
    Unquotable { word: String, reason: String },

    #[error("path {} is not valid UTF-8 and cannot be named in a shell script", .0.display())]
    NonUtf8Path(PathBuf),
}
