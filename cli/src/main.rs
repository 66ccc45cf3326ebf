mod commands;
mod config;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    cmd_commit, cmd_defaults, cmd_draft_add, cmd_draft_clear, cmd_draft_delete, cmd_draft_list,
    cmd_export, cmd_ingredients, cmd_recipes,
};
use crate::config::Config;
use recepten_core::db::Database;
use recepten_core::drafts::DraftStore;

#[derive(Parser)]
#[command(
    name = "recepten",
    version,
    about = "A simple recipe and shopping-list manager"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Address to bind to (default: 127.0.0.1, use 0.0.0.0 to expose to network)
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
    },
    /// Manage recipe drafts in the scratch file
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Commit all drafts to the database and clear the scratch file
    Commit {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recipes saved in the database
    Recipes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the combined ingredient list for saved recipe ids
    Ingredients {
        /// Recipe ids to look up
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up the stock ingredient list for a recipe name
    Defaults {
        /// Recipe name (case-insensitive, e.g. "pannenkoeken")
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a saved recipe back to the draft file
    Export {
        /// Recipe id to export
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum DraftCommands {
    /// Add a draft recipe
    Add {
        /// Recipe name
        name: String,
        /// Ingredient list
        #[arg(required = true)]
        ingredients: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List drafts with their indices
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the draft at an index
    Delete {
        /// Draft index (as shown by `recepten draft list`)
        index: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove all drafts
    Clear {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let drafts = DraftStore::new(config.drafts_path.clone());

    match cli.command {
        Commands::Serve { port, bind } => {
            server::start_server(config.db_path, drafts, port, &bind).await
        }
        Commands::Draft { command } => match command {
            DraftCommands::Add {
                name,
                ingredients,
                json,
            } => cmd_draft_add(&drafts, &name, ingredients, json),
            DraftCommands::List { json } => cmd_draft_list(&drafts, json),
            DraftCommands::Delete { index, json } => cmd_draft_delete(&drafts, index, json),
            DraftCommands::Clear { json } => cmd_draft_clear(&drafts, json),
        },
        Commands::Commit { json } => {
            let db = Database::open(&config.db_path)?;
            cmd_commit(&db, &drafts, json)
        }
        Commands::Recipes { json } => {
            let db = Database::open(&config.db_path)?;
            cmd_recipes(&db, json)
        }
        Commands::Ingredients { ids, json } => {
            let db = Database::open(&config.db_path)?;
            cmd_ingredients(&db, &ids, json)
        }
        Commands::Defaults { name, json } => cmd_defaults(&name, json),
        Commands::Export { id, json } => {
            let db = Database::open(&config.db_path)?;
            cmd_export(&db, &drafts, id, json)
        }
    }
}
