use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot load parameter file {path:?}: {source}")]
    ParamsFile {
        path: PathBuf,
        #[source]
        source: l3acomp::Error,
    },

    #[error("Cannot install logger: {0}")]
    Logging(String),

    #[error(transparent)]
    Run(#[from] l3acomp::Error),
}
