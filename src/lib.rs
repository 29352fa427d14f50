#![doc = r#"
l3acomp: orchestrator for the L3A temporal composite chain.

The composite algorithms themselves live in external OTB applications
(mask extraction, preprocessing, AOT/cloud/date weighting, synthesis update,
splitting and product formatting). This crate sequences those tools over a
list of L2A product descriptors, threads file paths between them, carries the
previous iteration's composite into the next one, writes the run parameter
documents and cleans up intermediates.

Quick start
-----------
```rust,no_run
use std::path::PathBuf;
use l3acomp::{CompositeConfig, ProcessRunner, run_composite};

fn main() -> l3acomp::Result<()> {
    let mut config = CompositeConfig::new(
        "/opt/sen2agri",
        "20160315",
        "25",
        vec![
            PathBuf::from("/data/S2A_L2A_20160301.HDR"),
            PathBuf::from("/data/S2A_L2A_20160311.HDR"),
        ],
        10,
        "/out/composite",
        "/opt/sen2agri/bands_mapping_s2.txt",
    );
    config.tile_id = Some("31TCJ".to_string());

    let report = run_composite(&config, &mut ProcessRunner::new())?;
    println!("composited {} products", report.iterations);
    Ok(())
}
```

Inspecting the command sequence
-------------------------------
Any `ToolRunner` can stand in for process spawning. `exec::mock::RecordingRunner`
records the invocations instead of running them:

```rust,no_run
use std::path::PathBuf;
use l3acomp::{CompositeConfig, Tool, run_composite};
use l3acomp::exec::mock::RecordingRunner;

let config = CompositeConfig::new(
    "/opt/sen2agri", "20160315", "25",
    vec![PathBuf::from("/data/a.HDR")], 10, "/tmp/out", "/data/bands.txt",
);
let mut runner = RecordingRunner::new();
run_composite(&config, &mut runner).unwrap();
assert_eq!(runner.tools().last(), Some(&Tool::ProductFormatter));
```

Error handling
--------------
All public functions return `l3acomp::Result<T>`; match on `l3acomp::Error`
to tell setup problems from tool failures.

Useful modules
--------------
- [`core`]: run parameters, output layout, tool command lines, run sequencing.
- [`exec`]: the `ToolRunner` seam and the process-backed runner.
- [`io`]: output directory setup, parameter documents, cleanup.
- [`types`]: the tool catalogue and compression modes.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod core;
pub mod error;
pub mod exec;
pub mod io;
pub mod types;

pub use core::layout::{FileTemplate, IterationFiles, L3aOutputs, OutputLayout, ScratchFiles};
pub use core::params::{CompositeConfig, CompositeParams, FormatterParams, WeightParams};
pub use core::pipeline::{RunReport, run_composite};
pub use core::plan::{Planner, PreviousL3a, ToolInvocation};
pub use error::{Error, Result};
pub use exec::{ProcessRunner, ToolRunner};
pub use types::{Compression, Tool};
