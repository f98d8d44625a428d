//! Process execution for the `git`, `ssh`, `ssh-keygen` and `ssh-keyscan`
//! invocations behind the `CommandRunner` port.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tokio::process::Command;

use crate::application::ports::CommandRunner;

/// Budget for a single external tool call unless the caller passes its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs tools as tokio child processes with stdin closed and both output
/// streams captured.
///
/// The child is marked `kill_on_drop`, so a call that overruns its budget
/// takes the process down with the dropped future. Argument vectors are
/// never logged because `ssh-keygen -N` carries the passphrase.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    budget: Duration,
}

impl ProcessRunner {
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.budget).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::debug!(program, ?timeout, "running");
        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| anyhow!("{program} timed out after {timeout:?}"))?
            .with_context(|| format!("failed to run {program}"))?;
        tracing::debug!(program, code = ?output.status.code(), "finished");
        Ok(output)
    }
}
