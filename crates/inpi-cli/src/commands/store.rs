//! Store command - inspect the directory-backed record store.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use inpi_core::storage::{DirectoryStore, RecordStore};

use super::load_config;

/// Arguments for the store command.
#[derive(Args)]
pub struct StoreArgs {
    /// Store directory (default: configured directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: StoreCommand,
}

#[derive(Subcommand)]
enum StoreCommand {
    /// List stored keys
    List {
        /// Only keys starting with this prefix (e.g. "peticao_")
        prefix: Option<String>,
    },

    /// Print a stored record
    Get {
        /// Storage key
        key: String,
    },

    /// Delete a stored record
    Delete {
        /// Storage key
        key: String,
    },
}

pub async fn run(args: StoreArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => load_config(config_path)?.storage.directory,
    };
    let mut store = DirectoryStore::open(&dir)?;

    match args.command {
        StoreCommand::List { prefix } => {
            for key in store.list(prefix.as_deref().unwrap_or(""))? {
                println!("{}", key);
            }
        }
        StoreCommand::Get { key } => match store.get(&key)? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => anyhow::bail!("No record stored under {}", key),
        },
        StoreCommand::Delete { key } => {
            if !store.delete(&key)? {
                anyhow::bail!("No record stored under {}", key);
            }
            println!("{} Deleted {}", style("✓").green(), key);
        }
    }

    Ok(())
}
