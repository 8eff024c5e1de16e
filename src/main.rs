// Copyright 2026 Kagami Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use kagami::cli;

#[derive(Parser)]
#[command(
    name = "kagami",
    about = "Kagami — live-search bridge for static site mirrors",
    version,
    after_help = "Run 'kagami <command> --help' for details on each command.\nRun 'kagami compose' for the interactive composition loop."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the live site and list result links
    Search {
        /// Query string (compose one interactively with `kagami compose`)
        query: String,
    },
    /// Open a mirror-local page, falling back to a live fetch
    Open {
        /// Mirror-local href (e.g. "/snapshot/articles/42/")
        href: String,
    },
    /// Interactive composition, search, and open loop
    Compose,
    /// Inspect the composition key-map
    Keymap {
        /// Outer key to list or look up
        outer: Option<String>,
        /// Inner key to look up together with the outer key
        inner: Option<String>,
    },
    /// Check mirror, companion API, and mode resolution
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Mirror global flags into the environment so all modules can check them
    if cli.json {
        std::env::set_var("KAGAMI_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("KAGAMI_QUIET", "1");
    }

    let default_filter = if cli.verbose { "kagami=debug" } else { "kagami=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Search { query } => cli::search_cmd::run(&query).await,
        Commands::Open { href } => cli::open_cmd::run(&href).await,
        Commands::Compose => cli::compose_repl::run().await,
        Commands::Keymap { outer, inner } => {
            cli::keymap_cmd::run(outer.as_deref(), inner.as_deref()).await
        }
        Commands::Doctor => cli::doctor::run().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "kagami", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
