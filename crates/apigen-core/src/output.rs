use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::GeneratedFile;
use crate::error::WriteError;

/// Write generated files under `output_dir`, creating it if needed.
///
/// Existing files are overwritten. The first failure aborts the run; files
/// already written are left in place.
pub fn write_files(output_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, WriteError> {
    fs::create_dir_all(output_dir).map_err(|source| WriteError {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = output_dir.join(&file.path);
        if let Some(parent) = path.parent()
            && parent != output_dir
        {
            fs::create_dir_all(parent).map_err(|source| WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
