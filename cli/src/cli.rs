//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Manage several git identities, each with its own SSH key
#[derive(Parser, Debug)]
#[command(name = "gitprof", version, propagate_version = true)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Skip prompts and accept defaults
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Without a command, an interactive menu is shown
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a profile and generate its SSH key
    Add(commands::add::AddArgs),

    /// Make a profile the global git identity
    Switch(commands::switch::SwitchArgs),

    /// Show the global git identity
    Current,

    /// List profiles
    List,

    /// Remove a profile, its keys and its SSH routing
    Remove(commands::remove::RemoveArgs),

    /// Test SSH authentication for a profile
    Test(commands::test::TestArgs),

    /// Rewrite a repository remote to use a profile's host alias
    RemoteUrl(commands::remote_url::RemoteUrlArgs),

    /// Diagnose tools, keys and SSH routing
    Doctor,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(AppFlags {
            no_color,
            quiet,
            yes,
        })?;

        match command {
            None => commands::menu::run(&app).await,
            Some(Command::Add(args)) => commands::add::run(&app, args).await,
            Some(Command::Switch(args)) => commands::switch::run(&app, args).await,
            Some(Command::Current) => commands::current::run(&app).await,
            Some(Command::List) => commands::list::run(&app).await,
            Some(Command::Remove(args)) => commands::remove::run(&app, args).await,
            Some(Command::Test(args)) => commands::test::run(&app, args).await,
            Some(Command::RemoteUrl(args)) => commands::remote_url::run(&app, args).await,
            Some(Command::Doctor) => commands::doctor::run(&app).await,
            Some(Command::Config(cmd)) => commands::config::run(&app, cmd),
            Some(Command::Version) => {
                commands::version::run(&app.renderer());
                Ok(())
            }
        }
    }
}
