//! Best-effort removal of intermediate rasters.
use std::fs;
use std::path::Path;

use tracing::debug;

/// Remove each path, ignoring failures. Returns how many were removed.
///
/// Directories are removed recursively, since some raster drivers write a
/// directory in place of a single file.
pub fn remove_quietly<'a, I>(paths: I) -> usize
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut removed = 0;
    for path in paths {
        let result = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        match result {
            Ok(()) => removed += 1,
            Err(e) => debug!("Could not remove {:?}: {}", path, e),
        }
    }
    removed
}
