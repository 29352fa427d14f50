//! Output file naming for a composite run.
//!
//! Per-iteration rasters are described by `FileTemplate`s whose `#` is
//! replaced by the iteration index; scratch rasters shared by all iterations
//! have fixed names derived from the resolution.
use std::path::{Path, PathBuf};

const INDEX_PLACEHOLDER: char = '#';

/// File name pattern inside the output directory, `#` marks the iteration index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTemplate {
    dir: PathBuf,
    pattern: String,
}

impl FileTemplate {
    pub fn new(dir: &Path, pattern: impl Into<String>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            pattern: pattern.into(),
        }
    }

    pub fn instantiate(&self, index: usize) -> PathBuf {
        let name = self
            .pattern
            .replace(INDEX_PLACEHOLDER, &index.to_string());
        self.dir.join(name)
    }
}

/// Rasters rewritten by every iteration and removed at its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchFiles {
    pub spot_masks: PathBuf,
    pub bands: PathBuf,
    pub cloud: PathBuf,
    pub water: PathBuf,
    pub snow: PathBuf,
    pub aot: PathBuf,
}

impl ScratchFiles {
    pub fn all(&self) -> [&Path; 6] {
        [
            &self.spot_masks,
            &self.bands,
            &self.cloud,
            &self.water,
            &self.snow,
            &self.aot,
        ]
    }
}

/// The split composite of one iteration: what the next one folds in and
/// what the product formatter consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L3aOutputs {
    pub weights: PathBuf,
    pub dates: PathBuf,
    pub refls: PathBuf,
    pub flags: PathBuf,
    pub rgb: PathBuf,
}

impl L3aOutputs {
    /// Rasters carried into the next iteration (RGB is a preview only).
    pub fn carried(&self) -> [&Path; 4] {
        [&self.weights, &self.dates, &self.refls, &self.flags]
    }

    pub fn all(&self) -> [&Path; 5] {
        [
            &self.weights,
            &self.dates,
            &self.refls,
            &self.flags,
            &self.rgb,
        ]
    }
}

/// Every path produced by iteration `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationFiles {
    pub index: usize,
    pub weight_aot: PathBuf,
    pub weight_cloud: PathBuf,
    pub weight_total: PathBuf,
    /// Fused synthesis written by UpdateSynthesis, split right after
    pub synthesis: PathBuf,
    pub l3a: L3aOutputs,
}

impl IterationFiles {
    pub fn weights(&self) -> [&Path; 3] {
        [&self.weight_aot, &self.weight_cloud, &self.weight_total]
    }
}

/// All output names of a run, derived from the output directory and resolution.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    out_dir: PathBuf,
    scratch: ScratchFiles,
    weight_aot: FileTemplate,
    weight_cloud: FileTemplate,
    weight_total: FileTemplate,
    synthesis: FileTemplate,
    weights: FileTemplate,
    dates: FileTemplate,
    refls: FileTemplate,
    flags: FileTemplate,
    rgb: FileTemplate,
}

impl OutputLayout {
    pub fn new(out_dir: &Path, resolution: u32) -> Self {
        let scratch = ScratchFiles {
            spot_masks: out_dir.join("spot_masks.tif"),
            bands: out_dir.join(format!("res{resolution}.tif")),
            cloud: out_dir.join(format!("cld{resolution}.tif")),
            water: out_dir.join(format!("wat{resolution}.tif")),
            snow: out_dir.join(format!("snow{resolution}.tif")),
            aot: out_dir.join(format!("aot{resolution}.tif")),
        };
        Self {
            out_dir: out_dir.to_path_buf(),
            scratch,
            weight_aot: FileTemplate::new(out_dir, "WeightAot#.tif"),
            weight_cloud: FileTemplate::new(out_dir, "WeightCloud#.tif"),
            weight_total: FileTemplate::new(out_dir, "WeightTotal#.tif"),
            synthesis: FileTemplate::new(out_dir, format!("L3AResult#_{resolution}M.tif")),
            weights: FileTemplate::new(out_dir, "L3AResult#_weights.tif"),
            dates: FileTemplate::new(out_dir, "L3AResult#_dates.tif"),
            refls: FileTemplate::new(out_dir, "L3AResult#_refls.tif"),
            flags: FileTemplate::new(out_dir, "L3AResult#_flags.tif"),
            rgb: FileTemplate::new(out_dir, "L3AResult#_rgb.tif"),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn scratch(&self) -> &ScratchFiles {
        &self.scratch
    }

    pub fn params_xml(&self) -> PathBuf {
        self.out_dir.join("params.xml")
    }

    pub fn params_txt(&self) -> PathBuf {
        self.out_dir.join("params.txt")
    }

    pub fn l3a(&self, index: usize) -> L3aOutputs {
        L3aOutputs {
            weights: self.weights.instantiate(index),
            dates: self.dates.instantiate(index),
            refls: self.refls.instantiate(index),
            flags: self.flags.instantiate(index),
            rgb: self.rgb.instantiate(index),
        }
    }

    pub fn iteration(&self, index: usize) -> IterationFiles {
        IterationFiles {
            index,
            weight_aot: self.weight_aot.instantiate(index),
            weight_cloud: self.weight_cloud.instantiate(index),
            weight_total: self.weight_total.instantiate(index),
            synthesis: self.synthesis.instantiate(index),
            l3a: self.l3a(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_replaces_index_placeholder() {
        let t = FileTemplate::new(Path::new("/out"), "L3AResult#_20M.tif");
        assert_eq!(t.instantiate(3), PathBuf::from("/out/L3AResult3_20M.tif"));
        assert_eq!(t.instantiate(0), PathBuf::from("/out/L3AResult0_20M.tif"));
    }

    #[test]
    fn layout_names_follow_resolution() {
        let layout = OutputLayout::new(Path::new("/out"), 20);
        assert_eq!(layout.scratch().bands, PathBuf::from("/out/res20.tif"));
        assert_eq!(layout.scratch().aot, PathBuf::from("/out/aot20.tif"));
        let it = layout.iteration(0);
        assert_eq!(it.synthesis, PathBuf::from("/out/L3AResult0_20M.tif"));
        assert_eq!(it.weight_total, PathBuf::from("/out/WeightTotal0.tif"));
        assert_eq!(it.l3a.flags, PathBuf::from("/out/L3AResult0_flags.tif"));
    }

    #[test]
    fn carried_outputs_exclude_rgb() {
        let l3a = OutputLayout::new(Path::new("/out"), 10).l3a(1);
        assert!(!l3a.carried().contains(&l3a.rgb.as_path()));
        assert!(l3a.all().contains(&l3a.rgb.as_path()));
    }
}
