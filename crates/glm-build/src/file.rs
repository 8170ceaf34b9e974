use std::io::Write;
use std::path::Path;

use crate::error::BuildError;

/// Create (or truncate) `path` and write `content` to it, flushed to disk.
pub fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    tracing::info!("Creating {} ...", path.display());

    let mut file = std::fs::File::create(path).map_err(|e| BuildError::Create {
        path: path.to_path_buf(),
        source: e,
    })?;

    file.write_all(content.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| BuildError::Write {
            path: path.to_path_buf(),
            source: e,
        })
}
