//! Output directory preparation and staging of ancillary inputs.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Create `path` (and parents) when missing.
///
/// Fails with `OutputPathConflict` when something other than a directory
/// already occupies the path.
pub fn prepare_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(Error::OutputPathConflict {
                path: path.to_path_buf(),
            });
        }
        debug!("Reusing output directory: {:?}", path);
        return Ok(());
    }
    fs::create_dir_all(path)?;
    info!("Created output directory: {:?}", path);
    Ok(())
}

/// Copy `file` into `out_dir` under its own file name.
pub fn stage_file(file: &Path, out_dir: &Path) -> Result<PathBuf> {
    let name = file
        .file_name()
        .ok_or_else(|| Error::invalid("file", file.display()))?;
    let target = out_dir.join(name);
    if target.exists() && fs::canonicalize(&target)? == fs::canonicalize(file)? {
        debug!("{:?} already staged", file);
        return Ok(target);
    }
    fs::copy(file, &target)?;
    debug!("Staged {:?} -> {:?}", file, target);
    Ok(target)
}

/// Ancillary inputs as they exist in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAncillary {
    pub bands_map: PathBuf,
    pub scattering_coef: Option<PathBuf>,
}

/// Copy the bands mapping and, when given, the scattering coefficients into `out_dir`.
pub fn stage_ancillary(
    out_dir: &Path,
    bands_map: &Path,
    scattering_coef: Option<&Path>,
) -> Result<StagedAncillary> {
    let bands_map = stage_file(bands_map, out_dir)?;
    let scattering_coef = scattering_coef
        .map(|coef| stage_file(coef, out_dir))
        .transpose()?;
    if let Some(coef) = &scattering_coef {
        info!("Scattering coefficients: {:?}", coef);
    }
    Ok(StagedAncillary {
        bands_map,
        scattering_coef,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("a/b/c");
        prepare_output_dir(&out).unwrap();
        assert!(out.is_dir());
        prepare_output_dir(&out).unwrap();
    }

    #[test]
    fn file_in_place_of_output_dir_is_a_conflict() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        fs::write(&out, b"not a dir").unwrap();
        let err = prepare_output_dir(&out).unwrap_err();
        assert!(matches!(err, Error::OutputPathConflict { ref path } if path == &out));
    }

    #[test]
    fn stages_optional_coefficients() {
        let tmp = tempfile::tempdir().unwrap();
        let bands = tmp.path().join("bands_mapping.txt");
        let coef = tmp.path().join("scattering_coeffs_10m.txt");
        fs::write(&bands, "B2 B3 B4").unwrap();
        fs::write(&coef, "1.0").unwrap();
        let out = tmp.path().join("out");
        fs::create_dir(&out).unwrap();

        let staged = stage_ancillary(&out, &bands, None).unwrap();
        assert_eq!(staged.bands_map, out.join("bands_mapping.txt"));
        assert!(staged.scattering_coef.is_none());

        let staged = stage_ancillary(&out, &bands, Some(&coef)).unwrap();
        let coef_copy = staged.scattering_coef.unwrap();
        assert_eq!(coef_copy, out.join("scattering_coeffs_10m.txt"));
        assert_eq!(fs::read_to_string(coef_copy).unwrap(), "1.0");
    }

    #[test]
    fn missing_ancillary_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = stage_ancillary(tmp.path(), &tmp.path().join("nope.txt"), None).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
