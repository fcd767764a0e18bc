//! Asteroid Mining CLI Application
//!
//! A command-line interface for calling the asteroid mining contracts.

use asteroid_mining::cli::{self, AppState};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asteroid")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "Ledger and mining simulation for asteroid-mining contracts", long_about = None)]
struct Cli {
    /// Data directory for contract state
    #[arg(short, long, default_value = ".asteroid_data")]
    data_dir: PathBuf,

    /// Config file (defaults to config.json in the data directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transaction sender (defaults to the contract owner)
    #[arg(short, long)]
    sender: Option<String>,

    /// Block height for the call (defaults to the stored chain height)
    #[arg(long)]
    block_height: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy fresh contracts
    Init {
        /// Contract owner principal
        #[arg(short, long)]
        owner: Option<String>,

        /// Replace existing state
        #[arg(long)]
        force: bool,
    },

    /// Call a contract function
    Call {
        /// Contract name (e.g. mining-simulation)
        contract: String,

        /// Function name (e.g. register-asteroid)
        function: String,

        /// Arguments, parsed as JSON when possible; quote numeric-looking
        /// strings ('"2024"') to pass them as text
        args: Vec<String>,
    },

    /// Advance the chain height
    Advance {
        /// Number of blocks
        #[arg(short, long)]
        blocks: Option<u64>,

        /// Number of days
        #[arg(long)]
        days: Option<u64>,
    },

    /// Restore every contract from a backup (0 is the newest)
    Restore {
        /// Backup index
        #[arg(default_value_t = 0)]
        index: usize,
    },

    /// Display contract state overview
    Status,

    /// List available contracts
    Contracts,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle init command separately (doesn't need loaded state)
    if let Commands::Init { owner, force } = &cli.command {
        return cli::cmd_init(&cli.data_dir, cli.config.as_deref(), owner.as_deref(), *force);
    }

    if let Commands::Contracts = cli.command {
        return cli::cmd_contracts();
    }

    // Initialize application state
    let mut state = AppState::new(cli.data_dir.clone(), cli.config.as_deref())?;

    // Process commands
    match cli.command {
        Commands::Init { .. } | Commands::Contracts => unreachable!(),

        Commands::Call {
            contract,
            function,
            args,
        } => {
            let ctx = state.context(cli.sender.as_deref(), cli.block_height);
            cli::cmd_call(&mut state, &ctx, &contract, &function, &args)?;
        }

        Commands::Advance { blocks, days } => {
            cli::cmd_advance(&mut state, blocks, days)?;
        }

        Commands::Restore { index } => {
            cli::cmd_restore(&mut state, index)?;
        }

        Commands::Status => {
            cli::cmd_status(&state)?;
        }
    }

    Ok(())
}
