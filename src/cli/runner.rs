use tracing::info;
use tracing_subscriber::EnvFilter;

use l3acomp::{CompositeConfig, CompositeParams, ProcessRunner, run_composite};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(debug: bool) -> Result<(), AppError> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

/// Translate parsed flags into a run configuration.
pub fn build_config(args: CliArgs) -> Result<CompositeConfig, AppError> {
    let params = match &args.params {
        Some(path) => CompositeParams::from_json_file(path).map_err(|source| AppError::ParamsFile {
            path: path.clone(),
            source,
        })?,
        None => CompositeParams::default(),
    };

    let mut config = CompositeConfig::new(
        args.app_location,
        args.synthesis_date,
        args.synthesis_half,
        args.input,
        args.res,
        args.outdir,
        args.bandsmap,
    );
    config.scattering_coef = args.scatteringcoef;
    config.tile_id = args.tileid;
    config.compression = args.compression;
    config.remove_temp = args.remove_temp;
    config.launcher = args.launcher;
    config.params = params;
    Ok(config)
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_logging(args.log)?;

    let config = build_config(args)?;
    info!("Composite location: {:?}", config.app_location.join("Composite"));
    info!(
        "Product formatter location: {:?}",
        config.app_location.join("MACCSMetadata/src")
    );

    let report = run_composite(&config, &mut ProcessRunner::new())?;
    info!(
        "Composite of {} product(s) written to {:?}",
        report.iterations, config.out_dir
    );
    Ok(())
}
