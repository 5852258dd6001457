//! Agentry CLI - compose and drive pluggable agents
//!
//! Resolves Agent/Policy/Environment/Trainer implementations from the
//! working directory's configuration, from manifest files, or from dotted
//! component identifiers, and drives the resulting agent.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

use std::path::PathBuf;

use agentry_core::LoopBudget;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{components, init, run, test, train};

#[derive(Parser)]
#[command(name = "agentry")]
#[command(author, version, about = "Agentry - composable agent runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Working directory for configuration and component discovery
    #[arg(long, global = true)]
    workdir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize current (or specified) directories as agent directories
    Init {
        /// Directories to initialize; created if they do not exist
        dir_names: Vec<PathBuf>,

        /// Name for the scaffolded agent (may not contain ' ', ':', or '/')
        #[arg(short = 'n', long, default_value = "BasicAgent")]
        agent_name: String,
    },
    /// Train the configured agent
    Train {
        /// Number of training iterations
        iters: u64,
    },
    /// Step the configured agent until it signals completion
    Test,
    /// Run an agent with an environment
    Run {
        /// 0, 1, or 2 references: nothing (discover in the working
        /// directory), an agent file or directory, or an agent reference
        /// and an environment reference
        run_args: Vec<String>,

        /// Frequency to call advance(), in Hz
        #[arg(long, default_value_t = 40)]
        hz: u32,

        /// Stop after this many calls to advance()
        #[arg(short = 'm', long)]
        max_iters: Option<u64>,
    },
    /// List registered components by role
    Components,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("agentry_core={log_level},agentry_cli={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ctx = commands::context(cli.workdir)?;

    match cli.command {
        Commands::Init {
            dir_names,
            agent_name,
        } => init::run(&ctx, &dir_names, &agent_name),
        Commands::Train { iters } => train::run(&ctx, iters),
        Commands::Test => test::run(&ctx),
        Commands::Run {
            run_args,
            hz,
            max_iters,
        } => run::run(&ctx, &run_args, &LoopBudget { hz, max_iters }).await,
        Commands::Components => components::run(),
    }
}
