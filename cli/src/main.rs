//! gitprof - multiple git identities, one SSH key per identity

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitprof_cli::cli::Cli;
use gitprof_cli::commands::is_interrupted;

const LOG_ENV: &str = "GITPROF_LOG";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn goodbye() -> ! {
    let _ = console::Term::stdout().show_cursor();
    eprintln!();
    eprintln!("Goodbye!");
    std::process::exit(0);
}

#[tokio::main]
async fn main() {
    init_tracing();
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            goodbye();
        }
    });

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        if is_interrupted(&e) {
            goodbye();
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
