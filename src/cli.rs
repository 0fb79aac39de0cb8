use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::core::{AppError, AppResult};
use crate::storage::{create_pool, get_connection, prizes};

#[derive(Parser)]
#[command(name = "prizebot")]
#[command(author, version, about = "Telegram bot for redeeming and activating promotional prize codes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (default)
    Run,

    /// Create a prize under a fresh code and print the code as JSON
    CreatePrize {
        /// Prize label shown to the claimant
        label: String,

        /// Database file (defaults to DATABASE_PATH)
        #[arg(long)]
        database: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Output of `create-prize`
#[derive(Debug, Serialize)]
pub struct CreatedPrize {
    pub code: String,
}

/// Creates a prize in the database at `database_path`.
pub fn create_prize(database_path: &str, label: &str) -> AppResult<CreatedPrize> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::Validation("prize label must not be empty".to_string()));
    }

    let pool = create_pool(database_path)?;
    let conn = get_connection(&pool)?;
    let code = prizes::create_prize(&conn, label)?;
    log::info!("Created prize {:?} with code {}", label, code);

    Ok(CreatedPrize { code })
}
