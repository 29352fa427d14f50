//! Command lines for the external tools of the composite chain.
//!
//! `Planner` turns the run configuration and the output layout into
//! `ToolInvocation`s; nothing here touches the disk or spawns processes.
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::core::layout::{IterationFiles, L3aOutputs, OutputLayout};
use crate::core::params::CompositeConfig;
use crate::types::Tool;

/// One fully resolved call of an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: Tool,
    pub program: String,
    /// Arguments after `program`, starting with the application name and module dir
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    fn new(launcher: &str, tool: Tool, app_location: &Path) -> Self {
        Self {
            tool,
            program: launcher.to_string(),
            args: vec![
                tool.app_name().into(),
                tool.module_dir(app_location).into_os_string(),
            ],
        }
    }

    fn arg(mut self, value: impl AsRef<OsStr>) -> Self {
        self.args.push(value.as_ref().to_os_string());
        self
    }

    fn flag(self, name: &str, value: impl AsRef<OsStr>) -> Self {
        self.arg(name).arg(value)
    }

    /// Path argument with an OTB extended-filename suffix appended.
    fn flag_with_suffix(self, name: &str, path: &Path, suffix: &str) -> Self {
        let mut value = path.as_os_str().to_os_string();
        value.push(suffix);
        self.flag(name, value)
    }

    /// Values following `flag`, up to the next argument starting with `-`.
    pub fn values_of(&self, flag: &str) -> Vec<&OsStr> {
        self.args
            .iter()
            .skip_while(|a| a.as_os_str() != OsStr::new(flag))
            .skip(1)
            .take_while(|a| !a.to_string_lossy().starts_with('-'))
            .map(|a| a.as_os_str())
            .collect()
    }

    pub fn value_of(&self, flag: &str) -> Option<&OsStr> {
        self.values_of(flag).into_iter().next()
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a.as_os_str() == OsStr::new(flag))
    }

    /// Printable command line, for logs.
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect()
    }
}

/// Composite carried from one iteration into the next.
///
/// Empty before the first product; afterwards it names the split outputs of
/// the latest iteration, which UpdateSynthesis folds into the new synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviousL3a(Option<L3aOutputs>);

impl PreviousL3a {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn from_outputs(outputs: L3aOutputs) -> Self {
        Self(Some(outputs))
    }

    pub fn outputs(&self) -> Option<&L3aOutputs> {
        self.0.as_ref()
    }

    pub fn into_outputs(self) -> Option<L3aOutputs> {
        self.0
    }

    /// `-prevl3aw/-prevl3ad/-prevl3ar/-prevl3af` pairs, nothing when empty.
    pub fn args(&self) -> Vec<OsString> {
        let Some(prev) = &self.0 else {
            return Vec::new();
        };
        let flags = ["-prevl3aw", "-prevl3ad", "-prevl3ar", "-prevl3af"];
        flags
            .iter()
            .zip(prev.carried())
            .flat_map(|(flag, path)| [OsString::from(*flag), path.as_os_str().to_os_string()])
            .collect()
    }
}

pub struct Planner<'a> {
    config: &'a CompositeConfig,
    layout: &'a OutputLayout,
    /// Scattering coefficients as staged in the output directory
    scattering_coef: Option<PathBuf>,
}

impl<'a> Planner<'a> {
    pub fn new(
        config: &'a CompositeConfig,
        layout: &'a OutputLayout,
        scattering_coef: Option<PathBuf>,
    ) -> Self {
        Self {
            config,
            layout,
            scattering_coef,
        }
    }

    fn invocation(&self, tool: Tool) -> ToolInvocation {
        ToolInvocation::new(&self.config.launcher, tool, &self.config.app_location)
    }

    fn resolution(&self) -> String {
        self.config.resolution.to_string()
    }

    pub fn mask_handler(&self, input: &Path) -> ToolInvocation {
        self.invocation(Tool::MaskHandler)
            .flag("-xml", input)
            .flag("-out", &self.layout.scratch().spot_masks)
            .flag("-sentinelres", self.resolution())
    }

    pub fn preprocessing(&self, input: &Path) -> ToolInvocation {
        let scratch = self.layout.scratch();
        let mut inv = self
            .invocation(Tool::CompositePreprocessing)
            .flag("-xml", input)
            .flag("-bmap", &self.config.bands_map)
            .flag("-res", self.resolution());
        if let Some(coef) = &self.scattering_coef {
            inv = inv.flag("-scatcoef", coef);
        }
        inv.flag("-msk", &scratch.spot_masks)
            .flag("-outres", &scratch.bands)
            .flag("-outcmres", &scratch.cloud)
            .flag("-outwmres", &scratch.water)
            .flag("-outsmres", &scratch.snow)
            .flag("-outaotres", &scratch.aot)
    }

    pub fn weight_aot(&self, input: &Path, files: &IterationFiles) -> ToolInvocation {
        let w = &self.config.params.weights;
        self.invocation(Tool::WeightAot)
            .flag("-xml", input)
            .flag("-in", &self.layout.scratch().aot)
            .flag("-waotmin", &w.weight_aot_min)
            .flag("-waotmax", &w.weight_aot_max)
            .flag("-aotmax", &w.aot_max)
            .flag("-out", &files.weight_aot)
    }

    pub fn weight_on_clouds(&self, input: &Path, files: &IterationFiles) -> ToolInvocation {
        let w = &self.config.params.weights;
        self.invocation(Tool::WeightOnClouds)
            .flag("-inxml", input)
            .flag("-incldmsk", &self.layout.scratch().cloud)
            .flag("-coarseres", &w.coarse_res)
            .flag("-sigmasmallcld", &w.sigma_small_cloud)
            .flag("-sigmalargecld", &w.sigma_large_cloud)
            .flag("-out", &files.weight_cloud)
    }

    pub fn total_weight(&self, input: &Path, files: &IterationFiles) -> ToolInvocation {
        self.invocation(Tool::TotalWeight)
            .flag("-xml", input)
            .flag("-waotfile", &files.weight_aot)
            .flag("-wcldfile", &files.weight_cloud)
            .flag("-l3adate", &self.config.synthesis_date)
            .flag("-halfsynthesis", &self.config.synthesis_half)
            .flag("-wdatemin", &self.config.params.weights.weight_date_min)
            .flag("-out", &files.weight_total)
    }

    pub fn update_synthesis(
        &self,
        input: &Path,
        files: &IterationFiles,
        previous: &PreviousL3a,
    ) -> ToolInvocation {
        let scratch = self.layout.scratch();
        let mut inv = self
            .invocation(Tool::UpdateSynthesis)
            .flag("-in", &scratch.bands)
            .flag("-bmap", &self.config.bands_map)
            .flag("-xml", input)
            .flag("-csm", &scratch.cloud)
            .flag("-wm", &scratch.water)
            .flag("-sm", &scratch.snow)
            .flag("-wl2a", &files.weight_total)
            .flag("-out", &files.synthesis);
        inv.args.extend(previous.args());
        inv
    }

    pub fn splitter(&self, input: &Path, files: &IterationFiles) -> ToolInvocation {
        let suffix = self.config.compression.suffix();
        let l3a = &files.l3a;
        self.invocation(Tool::CompositeSplitter)
            .flag("-in", &files.synthesis)
            .flag("-xml", input)
            .flag("-bmap", &self.config.bands_map)
            .flag_with_suffix("-outweights", &l3a.weights, suffix)
            .flag_with_suffix("-outdates", &l3a.dates, suffix)
            .flag_with_suffix("-outrefls", &l3a.refls, suffix)
            .flag_with_suffix("-outflags", &l3a.flags, suffix)
            .flag_with_suffix("-outrgb", &l3a.rgb, suffix)
    }

    /// The seven per-product invocations, in execution order.
    pub fn iteration(
        &self,
        input: &Path,
        files: &IterationFiles,
        previous: &PreviousL3a,
    ) -> Vec<ToolInvocation> {
        vec![
            self.mask_handler(input),
            self.preprocessing(input),
            self.weight_aot(input, files),
            self.weight_on_clouds(input, files),
            self.total_weight(input, files),
            self.update_synthesis(input, files, previous),
            self.splitter(input, files),
        ]
    }

    /// Final formatting of the last iteration's composite into an L3A product.
    pub fn product_formatter(&self, last: &L3aOutputs, last_input: &Path) -> ToolInvocation {
        let fmt = &self.config.params.formatter;
        let tile = self.config.tile_label();
        let band = |name: &str| format!("-processor.{}.{}", fmt.processor, name);
        self.invocation(Tool::ProductFormatter)
            .flag("-destroot", self.layout.out_dir())
            .flag("-fileclass", &fmt.file_class)
            .flag("-level", &fmt.level)
            .flag("-timeperiod", &self.config.synthesis_date)
            .flag("-baseline", &fmt.baseline)
            .flag("-processor", &fmt.processor)
            .flag(&band("refls"), &tile)
            .arg(&last.refls)
            .flag(&band("weights"), &tile)
            .arg(&last.weights)
            .flag(&band("flags"), &tile)
            .arg(&last.flags)
            .flag(&band("dates"), &tile)
            .arg(&last.dates)
            .flag(&band("rgb"), &tile)
            .arg(&last.rgb)
            .flag("-il", last_input)
            .flag("-gipp", self.layout.params_xml())
    }
}
