//! Execution of external tools.
//!
//! `ToolRunner` is the seam between the composite chain and the operating
//! system: production code uses `ProcessRunner`, tests use
//! `mock::RecordingRunner` to observe the exact sequence of invocations.
use std::process::Command;
use std::time::Instant;

use chrono::Duration;
use tracing::{error, info};

use crate::core::plan::ToolInvocation;
use crate::error::{Error, Result};

/// Runs one external tool to completion.
pub trait ToolRunner {
    /// Blocks until the tool exits; any non-zero status is an error.
    fn run(&mut self, invocation: &ToolInvocation) -> Result<()>;
}

impl<R: ToolRunner + ?Sized> ToolRunner for &mut R {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<()> {
        (**self).run(invocation)
    }
}

/// Spawns real processes through `std::process::Command`.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&mut self, invocation: &ToolInvocation) -> Result<()> {
        let tool = invocation.tool.app_name().to_string();
        info!("{}", invocation.command_line().join(" "));

        let start = Instant::now();
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|source| Error::ToolSpawn {
                tool: tool.clone(),
                source,
            })?;
        info!(
            "OTB app finished in: {}",
            format_elapsed(Duration::from_std(start.elapsed()).unwrap_or_else(|_| Duration::zero()))
        );

        if !status.success() {
            error!("{} exited with status {}", tool, status);
            return Err(Error::ToolFailed {
                tool,
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// `H:MM:SS.ffffff`, the layout used for run timings in the logs.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_micros = elapsed.num_microseconds().unwrap_or(i64::MAX).max(0);
    let secs = total_micros / 1_000_000;
    let micros = total_micros % 1_000_000;
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        micros
    )
}

pub mod mock {
    //! Recording runner for tests.
    //!
    //! Available for integration tests and external test crates.

    use super::*;
    use crate::types::Tool;

    /// Records every invocation instead of spawning it.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        invocations: Vec<ToolInvocation>,
        fail_at: Option<usize>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the call with this zero-based position exit with code 1.
        pub fn failing_at(call: usize) -> Self {
            Self {
                invocations: Vec::new(),
                fail_at: Some(call),
            }
        }

        pub fn invocations(&self) -> &[ToolInvocation] {
            &self.invocations
        }

        pub fn tools(&self) -> Vec<Tool> {
            self.invocations.iter().map(|inv| inv.tool).collect()
        }

        pub fn of_tool(&self, tool: Tool) -> Vec<&ToolInvocation> {
            self.invocations
                .iter()
                .filter(|inv| inv.tool == tool)
                .collect()
        }
    }

    impl ToolRunner for RecordingRunner {
        fn run(&mut self, invocation: &ToolInvocation) -> Result<()> {
            let position = self.invocations.len();
            self.invocations.push(invocation.clone());
            if self.fail_at == Some(position) {
                return Err(Error::ToolFailed {
                    tool: invocation.tool.app_name().to_string(),
                    code: Some(1),
                });
            }
            Ok(())
        }
    }
}
