//! The composite run: setup, one seven-tool iteration per input, product
//! formatting and cleanup of superseded rasters.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::core::layout::{L3aOutputs, OutputLayout};
use crate::core::params::{CompositeConfig, parse_synthesis_date};
use crate::core::plan::{Planner, PreviousL3a};
use crate::error::{Error, Result};
use crate::exec::{ToolRunner, format_elapsed};
use crate::io::{prepare_output_dir, remove_quietly, stage_ancillary, write_params_documents};

/// Outcome of a completed composite run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of L2A products folded into the composite
    pub iterations: usize,
    /// Split composite of the last iteration, as handed to the product formatter
    pub last: L3aOutputs,
    pub params_xml: PathBuf,
    pub params_txt: PathBuf,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
}

/// Run the whole composite chain over `config.inputs`.
///
/// Setup errors are reported before any tool runs. The first tool failure
/// aborts the run and leaves already produced files in place.
pub fn run_composite<R: ToolRunner + ?Sized>(
    config: &CompositeConfig,
    runner: &mut R,
) -> Result<RunReport> {
    config.validate()?;

    let layout = OutputLayout::new(&config.out_dir, config.resolution);
    prepare_output_dir(layout.out_dir())?;
    let staged = stage_ancillary(
        layout.out_dir(),
        &config.bands_map,
        config.scattering_coef.as_deref(),
    )?;
    debug!("Bands mapping staged at {:?}", staged.bands_map);

    let params_xml = layout.params_xml();
    let params_txt = layout.params_txt();
    write_params_documents(config, &params_xml, &params_txt)?;

    let planner = Planner::new(config, &layout, staged.scattering_coef);

    let started = Local::now();
    info!("Processing started: {}", started);
    if let Ok(date) = parse_synthesis_date(&config.synthesis_date) {
        info!(
            "Synthesis date {} +/- {} days, {} product(s)",
            date,
            config.synthesis_half,
            config.inputs.len()
        );
    }

    let mut previous = PreviousL3a::empty();
    for (index, input) in config.inputs.iter().enumerate() {
        previous = run_iteration(config, &layout, &planner, runner, index, input, previous)?;
    }

    let (Some(last), Some(last_input)) = (previous.into_outputs(), config.inputs.last()) else {
        return Err(Error::NoInputs);
    };

    runner.run(&planner.product_formatter(&last, last_input))?;

    if config.remove_temp {
        log_removal(&last.carried());
        remove_quietly(last.carried());
    }

    let finished = Local::now();
    info!("Processing finished: {}", finished);
    info!(
        "Total execution time: {}",
        format_elapsed(finished.signed_duration_since(started))
    );

    Ok(RunReport {
        iterations: config.inputs.len(),
        last,
        params_xml,
        params_txt,
        started,
        finished,
    })
}

/// Fold one L2A product into the composite and return the new accumulator.
fn run_iteration<R: ToolRunner + ?Sized>(
    config: &CompositeConfig,
    layout: &OutputLayout,
    planner: &Planner<'_>,
    runner: &mut R,
    index: usize,
    input: &Path,
    previous: PreviousL3a,
) -> Result<PreviousL3a> {
    info!(
        "Product {}/{}: {:?}",
        index + 1,
        config.inputs.len(),
        input
    );
    if !input.exists() {
        warn!("Input descriptor not found, the tools will likely fail: {:?}", input);
    }

    let files = layout.iteration(index);
    for invocation in planner.iteration(input, &files, &previous) {
        runner.run(&invocation)?;
    }

    if config.remove_temp {
        remove_quietly(files.weights());
    }
    remove_quietly(std::iter::once(files.synthesis.as_path()).chain(layout.scratch().all()));

    if config.remove_temp {
        if let Some(superseded) = previous.outputs() {
            log_removal(&superseded.all());
            remove_quietly(superseded.all());
        }
    }

    Ok(PreviousL3a::from_outputs(files.l3a))
}

fn log_removal(paths: &[&Path]) {
    info!("The following files will be deleted:");
    for path in paths {
        info!("{}", path.display());
    }
}
