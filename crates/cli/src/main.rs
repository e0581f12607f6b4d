//! Orderdesk CLI - operator console for the food-ordering backend.
//!
//! # Usage
//!
//! ```bash
//! # Verify credentials against the backend
//! orderdesk login-check
//!
//! # Show dashboard metrics and the five most recent orders
//! orderdesk dashboard
//!
//! # Move an order through the fulfillment lifecycle
//! orderdesk orders status 42 preparing
//!
//! # Manage the catalog
//! orderdesk categories create --name Pizza --description "Wood-fired"
//! orderdesk menu create --store 7 --name Margherita --price 32.50
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERDESK_EMAIL` / `ORDERDESK_PASSWORD` - Operator credentials (required)
//! - `ORDERDESK_API_URL` - Backend admin API base URL
//!
//! See `orderdesk_console::config` for the full list.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use orderdesk_console::types::{CategoryInput, MenuItemInput, StoreInput};
use orderdesk_console::{Console, ConsoleConfig, telemetry};
use orderdesk_core::{CategoryId, MenuItemId, Money, OrderId, StoreId};

mod commands;
mod output;

use commands::{CliError, catalog, dashboard, orders, session};
use output::Format;

#[derive(Parser)]
#[command(name = "orderdesk")]
#[command(author, version, about = "Orderdesk operator console")]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with the configured credentials and report the outcome
    LoginCheck,
    /// Show dashboard metrics
    Dashboard,
    /// Browse orders and change their status
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage store categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage stores
    Stores {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Manage menu items
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List all orders
    List,
    /// Show an order with its items
    Show { id: OrderId },
    /// Change an order's status
    Status {
        id: OrderId,
        /// Target status (pending, confirmed, preparing, ready, delivered, cancelled)
        status: String,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List all categories
    List,
    /// Create a category
    Create(CategoryArgs),
    /// Update a category
    Update {
        id: CategoryId,
        #[command(flatten)]
        fields: CategoryArgs,
    },
    /// Delete a category
    Delete { id: CategoryId },
}

#[derive(Subcommand)]
enum StoreAction {
    /// List all stores
    List,
    /// Show a store
    Show { id: StoreId },
    /// Create a store
    Create(StoreArgs),
    /// Update a store
    Update {
        id: StoreId,
        #[command(flatten)]
        fields: StoreArgs,
    },
    /// Delete a store
    Delete { id: StoreId },
}

#[derive(Subcommand)]
enum MenuAction {
    /// List menu items, for one store or all stores
    List {
        #[arg(long)]
        store: Option<StoreId>,
    },
    /// Show a menu item
    Show { id: MenuItemId },
    /// Add a menu item to a store
    Create {
        #[arg(long)]
        store: StoreId,
        #[command(flatten)]
        fields: MenuItemArgs,
    },
    /// Update a menu item
    Update {
        id: MenuItemId,
        #[command(flatten)]
        fields: MenuItemArgs,
    },
    /// Delete a menu item
    Delete { id: MenuItemId },
}

#[derive(Args)]
struct CategoryArgs {
    #[arg(short, long)]
    name: String,
    #[arg(short, long, default_value = "")]
    description: String,
}

#[derive(Args)]
struct StoreArgs {
    #[arg(short, long)]
    name: String,
    #[arg(short, long, default_value = "")]
    description: String,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    category: Option<CategoryId>,
    /// Opening time, e.g. 09:00
    #[arg(long)]
    opens: Option<String>,
    /// Closing time, e.g. 23:00
    #[arg(long)]
    closes: Option<String>,
}

#[derive(Args)]
struct MenuItemArgs {
    #[arg(short, long)]
    name: String,
    #[arg(short, long, default_value = "")]
    description: String,
    /// Unit price, e.g. 12.50
    #[arg(short, long)]
    price: Money,
    #[arg(long)]
    image_url: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConsoleConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let _telemetry = telemetry::init(&config);

    if let Err(e) = run(cli, config).await {
        tracing::error!(error = %e, "Command failed");
        output::failure(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ConsoleConfig) -> Result<(), CliError> {
    let format = Format::from_json_flag(cli.json);

    match cli.command {
        Commands::LoginCheck => session::login_check(config).await,
        command => {
            let console = session::connect(config).await?;
            dispatch(&console, command, format).await
        }
    }
}

async fn dispatch(console: &Console, command: Commands, format: Format) -> Result<(), CliError> {
    match command {
        Commands::LoginCheck => Ok(()),
        Commands::Dashboard => dashboard::show(console, format).await,
        Commands::Orders { action } => match action {
            OrderAction::List => orders::list(console, format).await,
            OrderAction::Show { id } => orders::show(console, &id, format).await,
            OrderAction::Status { id, status } => {
                orders::change_status(console, &id, &status, format).await
            }
        },
        Commands::Categories { action } => match action {
            CategoryAction::List => catalog::list_categories(console, format).await,
            CategoryAction::Create(fields) => {
                catalog::create_category(console, &fields.into(), format).await
            }
            CategoryAction::Update { id, fields } => {
                catalog::update_category(console, &id, &fields.into(), format).await
            }
            CategoryAction::Delete { id } => catalog::delete_category(console, &id).await,
        },
        Commands::Stores { action } => match action {
            StoreAction::List => catalog::list_stores(console, format).await,
            StoreAction::Show { id } => catalog::show_store(console, &id, format).await,
            StoreAction::Create(fields) => {
                catalog::create_store(console, &fields.into(), format).await
            }
            StoreAction::Update { id, fields } => {
                catalog::update_store(console, &id, &fields.into(), format).await
            }
            StoreAction::Delete { id } => catalog::delete_store(console, &id).await,
        },
        Commands::Menu { action } => match action {
            MenuAction::List { store } => catalog::list_menu(console, store.as_ref(), format).await,
            MenuAction::Show { id } => catalog::show_menu_item(console, &id, format).await,
            MenuAction::Create { store, fields } => {
                catalog::create_menu_item(console, &store, &fields.into(), format).await
            }
            MenuAction::Update { id, fields } => {
                catalog::update_menu_item(console, &id, &fields.into(), format).await
            }
            MenuAction::Delete { id } => catalog::delete_menu_item(console, &id).await,
        },
    }
}

// =============================================================================
// Argument conversions
// =============================================================================

impl From<CategoryArgs> for CategoryInput {
    fn from(args: CategoryArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
        }
    }
}

impl From<StoreArgs> for StoreInput {
    fn from(args: StoreArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            image_url: args.image_url,
            category_id: args.category,
            opening_time: args.opens,
            closing_time: args.closes,
        }
    }
}

impl From<MenuItemArgs> for MenuItemInput {
    fn from(args: MenuItemArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            price: args.price,
            image_url: args.image_url,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["orderdesk"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_store_args_map_to_input() {
        let Commands::Stores {
            action: StoreAction::Create(args),
        } = parse(&[
            "stores",
            "create",
            "--name",
            "Falafel House",
            "--category",
            "3",
            "--opens",
            "09:00",
        ])
        else {
            panic!("expected stores create");
        };

        let input = StoreInput::from(args);
        assert_eq!(input.name, "Falafel House");
        assert_eq!(input.description, "");
        assert_eq!(input.category_id, Some(CategoryId::from(3)));
        assert_eq!(input.opening_time.as_deref(), Some("09:00"));
        assert_eq!(input.closing_time, None);
        assert_eq!(input.image_url, None);
    }

    #[test]
    fn test_menu_item_price_is_parsed() {
        let Commands::Menu {
            action: MenuAction::Create { store, fields },
        } = parse(&["menu", "create", "--store", "7", "--name", "Tea", "--price", "4.5"])
        else {
            panic!("expected menu create");
        };

        assert_eq!(store, StoreId::from(7));
        let input = MenuItemInput::from(fields);
        assert_eq!(input.price, Money::from_minor_units(450));
        let free = ["orderdesk", "menu", "create", "--store", "7", "-n", "Tea", "-p", "free"];
        assert!(Cli::try_parse_from(free).is_err());
    }

    #[test]
    fn test_dot_segment_ids_are_rejected() {
        assert!(Cli::try_parse_from(["orderdesk", "stores", "delete", "."]).is_err());
        assert!(Cli::try_parse_from(["orderdesk", "orders", "show", ".."]).is_err());
        assert!(Cli::try_parse_from(["orderdesk", "stores", "delete", "st-7"]).is_ok());
    }
}
