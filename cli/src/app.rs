//! Per-invocation wiring of the production adapters.

use anyhow::{Context, Result};

use crate::application::services::config_service::load_config;
use crate::application::services::keygen::SshKeyProvisioner;
use crate::application::services::profile_registry::ProfileRegistry;
use crate::domain::{GitprofConfig, SshLayout};
use crate::infra::command_runner::ProcessRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::StdFs;
use crate::infra::git::GitCli;
use crate::infra::known_hosts::KnownHostsFile;
use crate::infra::paths;
use crate::infra::registry_store::JsonRegistryStore;
use crate::infra::ssh_config::SshConfigFile;
use crate::output::{HumanRenderer, OutputContext, TerminalReporter};

/// Environment variables that switch off every prompt when present.
const UNATTENDED_ENV: [&str; 2] = ["CI", "GITPROF_YES"];

/// Global flags lifted off the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppFlags {
    pub no_color: bool,
    pub quiet: bool,
    /// `--yes`: answer every prompt with its default.
    pub yes: bool,
}

/// Everything a command handler needs: output, adapters bound to the
/// resolved `~/.ssh` layout, and the effective configuration.
pub struct AppContext {
    pub output: OutputContext,
    pub runner: ProcessRunner,
    pub fs: StdFs,
    pub config_store: YamlConfigStore,
    pub config: GitprofConfig,
    pub layout: SshLayout,
    /// Holds the `# Git profile:` routing stanzas.
    pub routes: SshConfigFile,
    pub known_hosts: KnownHostsFile,
    /// No prompts are shown; confirmations take their default and required
    /// values must come from flags.
    pub non_interactive: bool,
}

impl AppContext {
    /// Resolve paths, read the configuration file and bind the adapters.
    ///
    /// # Errors
    ///
    /// Fails when no home directory can be found or the configuration file
    /// exists but is not valid YAML.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let non_interactive =
            flags.yes || UNATTENDED_ENV.iter().any(|var| std::env::var_os(var).is_some());

        let config_store = YamlConfigStore::new()?;
        let config = load_config(&config_store)?;
        let layout = SshLayout::new(paths::ssh_dir()?);
        tracing::debug!(ssh_dir = %layout.dir().display(), non_interactive, "context ready");

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            runner: ProcessRunner::default(),
            fs: StdFs,
            routes: SshConfigFile::with_path(layout.config_file()),
            known_hosts: KnownHostsFile::with_path(layout.known_hosts()),
            config_store,
            config,
            layout,
            non_interactive,
        })
    }

    /// A registry handle over the JSON file; nothing is read until a
    /// service calls `load`.
    ///
    /// # Errors
    ///
    /// Fails when the registry path cannot be resolved.
    pub fn registry(&self) -> Result<ProfileRegistry<JsonRegistryStore>> {
        Ok(ProfileRegistry::new(JsonRegistryStore::new()?))
    }

    #[must_use]
    pub fn git(&self) -> GitCli<'_, ProcessRunner> {
        GitCli::new(&self.runner)
    }

    /// Key provisioner bound to this context's ports.
    #[must_use]
    pub fn keygen(&self) -> SshKeyProvisioner<'_, ProcessRunner, StdFs, SshConfigFile> {
        SshKeyProvisioner::new(
            &self.runner,
            &self.fs,
            &self.routes,
            &self.layout,
            &self.config.service,
        )
    }

    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// Yes/no question; unattended runs get `default`.
    ///
    /// # Errors
    ///
    /// Fails when the terminal cannot be read.
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .with_context(|| format!("reading answer to '{prompt}'"))
    }

    /// Use `given` if present, otherwise prompt until `validate` accepts.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is missing in non-interactive mode or
    /// the prompt fails.
    pub fn text_or_prompt<F>(&self, given: Option<String>, prompt: &str, validate: F) -> Result<String>
    where
        F: Fn(&str) -> Result<(), String>,
    {
        if let Some(value) = given {
            return Ok(value);
        }
        anyhow::ensure!(
            !self.non_interactive,
            "{prompt} is required when running non-interactively"
        );
        let value: String = dialoguer::Input::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| validate(input.trim()))
            .interact_text()
            .with_context(|| format!("reading {prompt}"))?;
        Ok(value.trim().to_string())
    }

    /// Prompt for optional text, returning `None` for an empty answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt fails.
    pub fn optional_text(&self, prompt: &str) -> Result<Option<String>> {
        if self.non_interactive {
            return Ok(None);
        }
        let value: String = dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("reading {prompt}"))?;
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    /// Hidden prompt with confirmation; empty is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt fails.
    pub fn password(&self, prompt: &str) -> Result<String> {
        if self.non_interactive {
            return Ok(String::new());
        }
        dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Repeat passphrase", "Passphrases do not match")
            .allow_empty_password(true)
            .interact()
            .context("reading passphrase")
    }

    /// Let the user pick one of `items`.
    ///
    /// # Errors
    ///
    /// Returns an error in non-interactive mode or if the prompt fails.
    pub fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        anyhow::ensure!(
            !self.non_interactive,
            "{prompt}: a choice is required when running non-interactively"
        );
        dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .with_context(|| format!("reading {prompt}"))
    }
}
