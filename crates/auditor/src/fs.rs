use beets_audit_core::{Filesystem, Result};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// [`Filesystem`] backed by the real disk
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(path.try_exists()?)
    }

    fn count_matching(&self, dir: &Path, suffix: &str) -> Result<usize> {
        // A directory that is not there simply holds nothing
        if !dir.try_exists()? {
            return Ok(0);
        }

        let mut count = 0;
        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_dir() {
                continue;
            }
            if name_ends_with(&entry.file_name().to_string_lossy(), suffix) {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Suffix match following the platform's file name case rules
fn name_ends_with(name: &str, suffix: &str) -> bool {
    if cfg!(windows) {
        name.to_lowercase().ends_with(&suffix.to_lowercase())
    } else {
        name.ends_with(suffix)
    }
}
