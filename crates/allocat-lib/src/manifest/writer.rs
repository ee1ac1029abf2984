//! Writing deployment descriptors to disk

use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// Path of the descriptor for an application inside `output_dir`
pub fn descriptor_path(output_dir: &Path, app_name: &str) -> PathBuf {
    output_dir.join(format!("{}-deployment.yaml", app_name))
}

/// Create `output_dir` if needed and write the descriptor into it
pub fn write_descriptor(
    output_dir: &Path,
    app_name: &str,
    contents: &str,
) -> Result<PathBuf, ManifestError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ManifestError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = descriptor_path(output_dir, app_name);
    std::fs::write(&path, contents).map_err(|source| ManifestError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
