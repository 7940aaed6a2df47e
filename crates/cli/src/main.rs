//! Elena's Menu CLI - browse the menu, fill a cart, place an order.
//!
//! # Usage
//!
//! ```bash
//! # Show the menu
//! menu list
//!
//! # Add two milk teas and a cake
//! menu cart add milk-tea
//! menu cart add milk-tea
//! menu cart add strawberry-cake
//!
//! # Review and adjust
//! menu cart show
//! menu cart set milk-tea 1
//!
//! # Send it to the order server
//! menu order submit --email guest@example.com
//! ```
//!
//! # Commands
//!
//! - `list` - Show the catalog
//! - `cart` - Show or change the cart (`show`, `add`, `remove`, `set`, `clear`)
//! - `order submit` - Post the cart to the order server and clear it

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod client;
mod commands;
mod error;

use client::OrderClient;
use commands::catalog::Catalog;
use error::CliError;

#[derive(Parser)]
#[command(name = "menu")]
#[command(author, version, about = "Elena's Menu in the terminal")]
struct Cli {
    /// Directory holding the saved cart
    #[arg(long, env = "MENU_DATA_DIR", default_value = ".menu", global = true)]
    data_dir: PathBuf,

    /// Catalog YAML file
    #[arg(long, env = "MENU_CATALOG", default_value = "menu.yaml", global = true)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu
    List,
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show entries, item count and total
    Show,
    /// Add one of a dish
    Add {
        /// Dish id from the menu
        id: String,
    },
    /// Remove a dish entirely
    Remove {
        /// Dish id
        id: String,
    },
    /// Set a dish's quantity (zero or less removes it)
    Set {
        /// Dish id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Submit the cart to the order server
    Submit {
        /// Send a confirmation email to this address
        #[arg(short, long)]
        email: Option<String>,

        /// Order server base URL
        #[arg(
            long,
            env = "MENU_SERVER_URL",
            default_value = "http://127.0.0.1:5000"
        )]
        server: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::List => {
            let catalog = Catalog::load(&cli.catalog).await?;
            commands::catalog::list(&catalog);
        }
        Commands::Cart { action } => {
            let mut store = commands::cart::open_store(&cli.data_dir);
            match action {
                CartAction::Show => commands::cart::show(&store),
                CartAction::Add { id } => {
                    let catalog = Catalog::load(&cli.catalog).await?;
                    commands::cart::add(&mut store, &catalog, &id)?;
                }
                CartAction::Remove { id } => commands::cart::remove(&mut store, &id)?,
                CartAction::Set { id, quantity } => {
                    commands::cart::set(&mut store, &id, quantity)?;
                }
                CartAction::Clear => commands::cart::clear(&mut store)?,
            }
        }
        Commands::Order { action } => match action {
            OrderAction::Submit { email, server } => {
                let mut store = commands::cart::open_store(&cli.data_dir);
                let client = OrderClient::new(&server);
                commands::order::submit(&mut store, &client, email.as_deref()).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_set_accepts_negative_quantity() {
        let cli = Cli::try_parse_from(["menu", "cart", "set", "tea", "-2"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Cart {
                action: CartAction::Set { quantity: -2, .. }
            })
        ));
    }
}
