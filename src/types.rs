//! Shared types and enums used across l3acomp.
//! Includes the external tool catalogue (`Tool`) and the raster compression
//! modes (`Compression`) applied to splitter outputs.
use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// External OTB applications driven by the composite chain, in invocation order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Tool {
    MaskHandler,
    CompositePreprocessing,
    WeightAot,
    WeightOnClouds,
    TotalWeight,
    UpdateSynthesis,
    CompositeSplitter,
    ProductFormatter,
}

impl Tool {
    /// The seven tools run once per input product.
    pub const PER_INPUT: [Tool; 7] = [
        Tool::MaskHandler,
        Tool::CompositePreprocessing,
        Tool::WeightAot,
        Tool::WeightOnClouds,
        Tool::TotalWeight,
        Tool::UpdateSynthesis,
        Tool::CompositeSplitter,
    ];

    /// Application name as registered with the launcher.
    pub fn app_name(&self) -> &'static str {
        match self {
            Tool::MaskHandler => "MaskHandler",
            Tool::CompositePreprocessing => "CompositePreprocessing2",
            Tool::WeightAot => "WeightAOT",
            Tool::WeightOnClouds => "WeightOnClouds",
            Tool::TotalWeight => "TotalWeight",
            Tool::UpdateSynthesis => "UpdateSynthesis",
            Tool::CompositeSplitter => "CompositeSplitter2",
            Tool::ProductFormatter => "ProductFormatter",
        }
    }

    /// Module directory relative to the application build root.
    pub fn module_subdir(&self) -> &'static str {
        match self {
            Tool::MaskHandler => "Composite/MaskHandler",
            Tool::CompositePreprocessing => "Composite/CompositePreprocessing",
            Tool::WeightAot => "Composite/WeightCalculation/WeightAOT",
            Tool::WeightOnClouds => "Composite/WeightCalculation/WeightOnClouds",
            Tool::TotalWeight => "Composite/WeightCalculation/TotalWeight",
            Tool::UpdateSynthesis => "Composite/UpdateSynthesis",
            Tool::CompositeSplitter => "Composite/CompositeSplitter",
            Tool::ProductFormatter => "MACCSMetadata/src",
        }
    }

    pub fn module_dir(&self, app_location: &Path) -> PathBuf {
        app_location.join(self.module_subdir())
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.app_name())
    }
}

/// GDAL creation option appended to the splitter output file names.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Compression {
    #[default]
    Deflate,
    Lzw,
    None,
}

impl Compression {
    /// Extended filename suffix understood by OTB writers, empty when disabled.
    pub fn suffix(&self) -> &'static str {
        match self {
            Compression::Deflate => "?gdal:co:COMPRESS=DEFLATE",
            Compression::Lzw => "?gdal:co:COMPRESS=LZW",
            Compression::None => "",
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::Deflate => write!(f, "Deflate"),
            Compression::Lzw => write!(f, "Lzw"),
            Compression::None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_tools_live_under_weight_calculation() {
        let root = Path::new("/opt/sen2agri");
        assert_eq!(
            Tool::TotalWeight.module_dir(root),
            PathBuf::from("/opt/sen2agri/Composite/WeightCalculation/TotalWeight")
        );
        assert_eq!(
            Tool::ProductFormatter.module_dir(root),
            PathBuf::from("/opt/sen2agri/MACCSMetadata/src")
        );
    }

    #[test]
    fn disabled_compression_has_no_suffix() {
        assert_eq!(Compression::None.suffix(), "");
        assert_eq!(Compression::default(), Compression::Deflate);
    }
}
