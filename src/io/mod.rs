//! File-system side of a run: output directory setup and ancillary staging
//! (`workspace`), the parameter documents (`params_doc`) and best-effort
//! cleanup of intermediates (`reaper`).
pub mod params_doc;
pub use params_doc::{ParamsDocument, write_params_documents};

pub mod workspace;
pub use workspace::{StagedAncillary, prepare_output_dir, stage_ancillary};

pub mod reaper;
pub use reaper::remove_quietly;
