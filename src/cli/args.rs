use clap::Parser;
use std::path::PathBuf;

use l3acomp::Compression;

#[derive(Parser, Debug)]
#[command(name = "l3acomp", version, about = "Composite processor")]
pub struct CliArgs {
    /// The path where the sen2agri applications are built
    #[arg(long = "applocation")]
    pub app_location: PathBuf,

    /// L3A synthesis date (YYYYMMDD)
    #[arg(long = "syntdate")]
    pub synthesis_date: String,

    /// Half synthesis, in days
    #[arg(long = "synthalf")]
    pub synthesis_half: String,

    /// The list of products xml descriptors
    #[arg(long, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// The requested resolution in meters
    #[arg(long)]
    pub res: u32,

    /// Output directory
    #[arg(long)]
    pub outdir: PathBuf,

    /// Bands mapping file location
    #[arg(long)]
    pub bandsmap: PathBuf,

    /// Scattering coefficient file. This file is requested in S2 case ONLY
    #[arg(long)]
    pub scatteringcoef: Option<PathBuf>,

    /// Tile id
    #[arg(long)]
    pub tileid: Option<String>,

    /// JSON file overriding the weighting constants and product formatter labels
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Compression of the split composite rasters (deflate, lzw, none)
    #[arg(long, value_enum, default_value_t = Compression::Deflate)]
    pub compression: Compression,

    /// Delete intermediate rasters once they are no longer needed
    #[arg(long, default_value_t = false)]
    pub remove_temp: bool,

    /// Program used to start the OTB applications
    #[arg(long, default_value = "otbcli")]
    pub launcher: String,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
