//! Arbor CLI - behavior tree tooling.
//!
//! - `arbor check` - compile a tree and report errors
//! - `arbor dump` - print the compiled tree as an outline or JSON
//! - `arbor run` - tick a tree against a scripted agent

mod outline;
mod script;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arbor_bt::{BehaviorTree, CompilerConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use crate::script::ScriptedAgent;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Behavior tree compiler and runner", version)]
struct Cli {
    /// Compiler configuration (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a tree document and report the result
    Check {
        /// Tree document (XML)
        tree: PathBuf,
    },

    /// Print the compiled tree
    Dump {
        /// Tree document (XML)
        tree: PathBuf,

        /// Emit JSON instead of an outline
        #[arg(long)]
        json: bool,
    },

    /// Tick a tree against a scripted agent
    Run {
        /// Tree document (XML)
        tree: PathBuf,

        /// Agent script (YAML)
        #[arg(short, long)]
        agent: PathBuf,

        /// Number of ticks
        #[arg(short, long, default_value_t = 1)]
        ticks: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CompilerConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Check { tree } => check(&tree, &config),
        Commands::Dump { tree, json } => dump(&tree, &config, json),
        Commands::Run { tree, agent, ticks } => run(&tree, &agent, ticks, &config),
    }
}

fn load(path: &Path, config: &CompilerConfig) -> Result<BehaviorTree> {
    BehaviorTree::load_with(path, config)
        .with_context(|| format!("Failed to compile {}", path.display()))
}

fn check(path: &Path, config: &CompilerConfig) -> Result<()> {
    let tree = load(path, config)?;
    println!("{}: ok ({} nodes)", path.display(), tree.node_count());
    Ok(())
}

fn dump(path: &Path, config: &CompilerConfig, json: bool) -> Result<()> {
    let tree = load(path, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(tree.root())?);
    } else {
        print!("{}", outline::render(tree.root())?);
    }
    Ok(())
}

fn run(path: &Path, agent_path: &Path, ticks: u64, config: &CompilerConfig) -> Result<()> {
    let mut tree = load(path, config)?;
    let mut agent = ScriptedAgent::load(agent_path)?;

    for _ in 0..ticks {
        let tick = tree.ticks();
        let status = tree
            .tick(&mut agent)
            .with_context(|| format!("Tick {tick} aborted"))?;
        println!("tick {tick}: {status:?}");
    }

    for (capability, count) in agent.invocation_counts() {
        println!("{capability}: {count} invocation(s)");
    }
    tracing::info!(ticks = tree.ticks(), "Run complete");
    Ok(())
}
