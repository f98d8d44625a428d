//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::doctor::DoctorReport;
use crate::application::services::profile_registry::{
    AddedProfile, CurrentIdentity, ProfileEntry, RemovalReport,
};
use crate::application::services::remote::RemoteUpdate;
use crate::domain::health::{Finding, Severity};
use crate::domain::{GitprofConfig, ProbeOutcome};
use crate::infra::paths::{CONFIG_ENV, REGISTRY_ENV, SSH_DIR_ENV};
use crate::output::OutputContext;
use crate::output::styles::marker;

/// Renders service results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("gitprof {version}");
    }

    /// Render every profile, marking the active one.
    pub fn render_profiles(&self, entries: &[ProfileEntry]) {
        if self.ctx.quiet {
            return;
        }
        if entries.is_empty() {
            println!("No profiles configured. Add one: gitprof add <name>");
            return;
        }
        println!();
        self.ctx.header("Profiles:");
        println!();
        for entry in entries {
            let marker = if entry.active { "*" } else { " " };
            let name = format!("{:<20}", entry.name);
            let key = entry
                .profile
                .key_path()
                .map(|k| k.display().to_string())
                .unwrap_or_else(|| "(no key)".to_string());
            if entry.active {
                println!(
                    "  {} {} {} <{}>",
                    marker.style(self.ctx.styles.current),
                    name.style(self.ctx.styles.current),
                    entry.profile.display_name,
                    entry.profile.email
                );
            } else {
                println!(
                    "  {marker} {name} {} <{}>",
                    entry.profile.display_name, entry.profile.email
                );
            }
            println!("      {}", key.style(self.ctx.styles.muted));
        }
        println!();
    }

    /// Render the global identity and its profile.
    pub fn render_current(&self, current: Option<&CurrentIdentity>) {
        let Some(current) = current else {
            self.ctx.warn("No global git identity is set.");
            return;
        };
        self.ctx.kv("Name:", &current.identity.name);
        self.ctx.kv("Email:", &current.identity.email);
        match &current.profile {
            Some(name) => self.ctx.kv("Profile:", name),
            None => self.ctx.kv("Profile:", "(no matching profile)"),
        }
    }

    /// Render the result of `add` with the public key and setup steps.
    pub fn render_added(
        &self,
        added: &AddedProfile,
        alias: &str,
        user: &str,
        keys_url: &str,
        public_key: Option<&str>,
    ) {
        self.ctx
            .success(&format!("Profile '{}' added", added.name));
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header("Next steps:");
        println!("  1. Add this public key to your account at {keys_url}");
        println!();
        match public_key {
            Some(key) => println!("     {}", key.trim()),
            None => println!(
                "     {}",
                "(public key could not be read)".style(self.ctx.styles.muted)
            ),
        }
        println!();
        println!("  2. Clone through the profile alias:");
        println!(
            "     {}",
            format!("git clone {user}@{alias}:<owner>/<repo>.git").style(self.ctx.styles.strong)
        );
        println!();
        println!("  3. Verify access: gitprof test {}", added.name);
        println!();
    }

    /// Render the per-step outcome of `remove`.
    pub fn render_removal(&self, name: &str, report: &RemovalReport) {
        if report.identity_cleared {
            self.ctx.info("Global git identity cleared");
        }
        for path in &report.removed_files {
            self.ctx.info(&format!("Deleted {}", path.display()));
        }
        match report.routes_removed {
            0 => self.ctx.info("No routing stanza found"),
            1 => self.ctx.info("Routing stanza removed"),
            n => self.ctx.warn(&format!("Removed {n} duplicate routing stanzas")),
        }
        if report.is_clean() {
            self.ctx.success(&format!("Profile '{name}' removed"));
        } else {
            self.ctx.warn(&format!(
                "Profile '{name}' removed with {} problem(s)",
                report.failures.len()
            ));
        }
    }

    /// Render one probe outcome.
    pub fn render_probe(&self, name: &str, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Authenticated => {
                self.ctx.success(&format!("{name}: authenticated"));
            }
            ProbeOutcome::Rejected(detail) => {
                self.ctx.error(&format!("{name}: rejected ({detail})"));
            }
            ProbeOutcome::Unreachable(detail) => {
                self.ctx.error(&format!("{name}: unreachable ({detail})"));
            }
        }
    }

    /// Render a remote rewrite.
    pub fn render_remote_update(&self, update: &RemoteUpdate) {
        if update.unchanged() {
            self.ctx.info(&format!(
                "Remote '{}' already uses {}",
                update.remote, update.new_url
            ));
            return;
        }
        self.ctx.kv("Old URL:", &update.old_url);
        self.ctx.kv("New URL:", &update.new_url);
        if update.applied {
            self.ctx
                .success(&format!("Remote '{}' updated", update.remote));
        } else {
            self.ctx.info("Dry run: remote not changed");
        }
    }

    /// Render doctor findings.
    pub fn render_doctor(&self, report: &DoctorReport) {
        if self.ctx.quiet {
            return;
        }
        println!();
        println!("  {}", "gitprof doctor".style(self.ctx.styles.title));
        for (title, findings) in [
            ("Tools:", &report.tools),
            ("Keys:", &report.keys),
            ("Routing:", &report.routes),
        ] {
            println!();
            println!("  {}", title.style(self.ctx.styles.strong));
            if findings.is_empty() {
                println!("    {}", "(nothing to check)".style(self.ctx.styles.muted));
            }
            for finding in findings {
                self.render_finding(finding);
            }
        }
        println!();
        match report.severity() {
            Severity::Ok => self.ctx.success("Everything looks good."),
            Severity::Warn => self.ctx.warn("Some checks need attention."),
            Severity::Fail => self.ctx.error("Some checks failed."),
        }
    }

    fn render_finding(&self, finding: &Finding) {
        let glyph = marker(finding.severity);
        let glyph = glyph.style(self.ctx.styles.severity(finding.severity));
        println!("    {glyph} {}", finding.message);
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &GitprofConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.title)
        );
        println!();
        for key in crate::domain::config::VALID_CONFIG_KEYS {
            println!(
                "  {:<22} {}",
                format!("{key}:"),
                config.get(key).unwrap_or_default()
            );
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.strong));
        for var in [CONFIG_ENV, REGISTRY_ENV, SSH_DIR_ENV, "GITPROF_LOG", "NO_COLOR"] {
            println!(
                "    {:<20} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
