use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Compression;

/// Date layout expected for the synthesis date (e.g. `20160315`).
pub const SYNTHESIS_DATE_FORMAT: &str = "%Y%m%d";

/// Tile label used when no tile id is given.
pub const NO_TILE: &str = "TILE_none";

/// Weighting constants passed to the AOT, cloud and date weighting tools.
///
/// Values are kept as the literal text they were given in, so the metadata
/// documents and tool arguments reproduce them exactly. `validate` checks
/// that every one of them parses as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightParams {
    pub weight_aot_min: String,
    pub weight_aot_max: String,
    pub aot_max: String,
    /// Coarse resolution (meters) used by the cloud distance weighting
    pub coarse_res: String,
    pub sigma_small_cloud: String,
    pub sigma_large_cloud: String,
    pub weight_date_min: String,
}

impl Default for WeightParams {
    fn default() -> Self {
        Self {
            weight_aot_min: "0.33".to_string(),
            weight_aot_max: "1".to_string(),
            aot_max: "0.8".to_string(),
            coarse_res: "240".to_string(),
            sigma_small_cloud: "2".to_string(),
            sigma_large_cloud: "10".to_string(),
            weight_date_min: "0.10".to_string(),
        }
    }
}

impl WeightParams {
    pub fn validate(&self) -> Result<()> {
        let fields: [(&'static str, &str); 7] = [
            ("weight_aot_min", &self.weight_aot_min),
            ("weight_aot_max", &self.weight_aot_max),
            ("aot_max", &self.aot_max),
            ("coarse_res", &self.coarse_res),
            ("sigma_small_cloud", &self.sigma_small_cloud),
            ("sigma_large_cloud", &self.sigma_large_cloud),
            ("weight_date_min", &self.weight_date_min),
        ];
        for (name, value) in fields {
            if value.trim().parse::<f64>().is_err() {
                return Err(Error::invalid(name, value));
            }
        }
        Ok(())
    }
}

/// Product formatter labels written into the final L3A product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterParams {
    pub file_class: String,
    pub level: String,
    pub baseline: String,
    pub processor: String,
}

impl Default for FormatterParams {
    fn default() -> Self {
        Self {
            file_class: "SVT1".to_string(),
            level: "L3A".to_string(),
            baseline: "01.00".to_string(),
            processor: "composite".to_string(),
        }
    }
}

/// Tunable parameters suitable for a JSON parameter file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeParams {
    pub weights: WeightParams,
    pub formatter: FormatterParams,
}

impl CompositeParams {
    /// Load overrides from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: CompositeParams = serde_json::from_str(&text)?;
        params.weights.validate()?;
        Ok(params)
    }
}

/// Immutable description of one composite run, built once at startup.
#[derive(Debug, Clone)]
pub struct CompositeConfig {
    /// Root of the built application tree (holds `Composite/` and `MACCSMetadata/`)
    pub app_location: PathBuf,
    /// L3A synthesis date, `YYYYMMDD`
    pub synthesis_date: String,
    /// Half synthesis window in days, kept as given
    pub synthesis_half: String,
    /// L2A product descriptors, processed in this order
    pub inputs: Vec<PathBuf>,
    /// Requested resolution in meters
    pub resolution: u32,
    pub out_dir: PathBuf,
    pub bands_map: PathBuf,
    /// Scattering coefficient file, Sentinel-2 only
    pub scattering_coef: Option<PathBuf>,
    pub tile_id: Option<String>,
    pub compression: Compression,
    /// Delete superseded intermediate rasters while running
    pub remove_temp: bool,
    /// Program used to start OTB applications
    pub launcher: String,
    pub params: CompositeParams,
}

impl CompositeConfig {
    /// Build a configuration with default launcher, compression and parameters.
    pub fn new(
        app_location: impl Into<PathBuf>,
        synthesis_date: impl Into<String>,
        synthesis_half: impl Into<String>,
        inputs: Vec<PathBuf>,
        resolution: u32,
        out_dir: impl Into<PathBuf>,
        bands_map: impl Into<PathBuf>,
    ) -> Self {
        Self {
            app_location: app_location.into(),
            synthesis_date: synthesis_date.into(),
            synthesis_half: synthesis_half.into(),
            inputs,
            resolution,
            out_dir: out_dir.into(),
            bands_map: bands_map.into(),
            scattering_coef: None,
            tile_id: None,
            compression: Compression::default(),
            remove_temp: false,
            launcher: "otbcli".to_string(),
            params: CompositeParams::default(),
        }
    }

    /// Check the run-level invariants before anything touches the disk.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::NoInputs);
        }
        parse_synthesis_date(&self.synthesis_date)?;
        parse_synthesis_half(&self.synthesis_half)?;
        if self.resolution == 0 {
            return Err(Error::invalid("res", self.resolution));
        }
        if self.launcher.trim().is_empty() {
            return Err(Error::invalid("launcher", &self.launcher));
        }
        self.params.weights.validate()
    }

    /// Label used by the product formatter for every raster of the product.
    pub fn tile_label(&self) -> String {
        match self.tile_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => format!("TILE_{id}"),
            None => NO_TILE.to_string(),
        }
    }
}

pub fn parse_synthesis_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, SYNTHESIS_DATE_FORMAT)
        .map_err(|_| Error::invalid("syntdate", text))
}

/// Half synthesis as a day count; the text itself is what the tools receive.
pub fn parse_synthesis_half(text: &str) -> Result<u32> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| Error::invalid("synthalf", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CompositeConfig {
        CompositeConfig::new(
            "/opt/app",
            "20160315",
            "25",
            vec![PathBuf::from("/data/a.xml")],
            10,
            "/tmp/out",
            "/data/bands.txt",
        )
    }

    #[test]
    fn tile_label_falls_back_to_sentinel() {
        let mut cfg = config();
        assert_eq!(cfg.tile_label(), "TILE_none");
        cfg.tile_id = Some("31TCJ".to_string());
        assert_eq!(cfg.tile_label(), "TILE_31TCJ");
    }

    #[test]
    fn empty_tile_id_counts_as_absent() {
        let mut cfg = config();
        cfg.tile_id = Some(String::new());
        assert_eq!(cfg.tile_label(), "TILE_none");
    }

    #[test]
    fn half_synthesis_must_be_a_day_count() {
        let mut cfg = config();
        cfg.synthesis_half = "025".to_string();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.synthesis_half, "025");
        cfg.synthesis_half = "two weeks".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(Error::InvalidArgument { arg: "synthalf", .. })
        ));
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let mut cfg = config();
        cfg.inputs.clear();
        assert!(matches!(cfg.validate(), Err(Error::NoInputs)));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let mut cfg = config();
        cfg.synthesis_date = "2016-03-15".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(Error::InvalidArgument { arg: "syntdate", .. })
        ));
        cfg.synthesis_date = "20160231".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: CompositeParams =
            serde_json::from_str(r#"{ "weights": { "aot_max": "0.6" } }"#).unwrap();
        assert_eq!(params.weights.aot_max, "0.6");
        assert_eq!(params.weights.weight_date_min, "0.10");
        assert_eq!(params.formatter, FormatterParams::default());
    }

    #[test]
    fn non_numeric_weight_is_rejected() {
        let mut weights = WeightParams::default();
        weights.sigma_large_cloud = "ten".to_string();
        assert!(matches!(
            weights.validate(),
            Err(Error::InvalidArgument {
                arg: "sigma_large_cloud",
                ..
            })
        ));
    }
}
