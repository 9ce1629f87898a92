//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use collector_catalog::Price;
use collector_db::Layout;

#[derive(Parser)]
#[command(name = "collector")]
#[command(about = "Record, search, and summarize a stamp collection", long_about = None)]
pub(crate) struct Cli {
    /// Store file (defaults to the configured path, then ./stamps.db or ./collector.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print records and statistics as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add a stamp to the collection
    Add(AddArgs),

    /// List all stamps, newest first
    List,

    /// Search stamps by free text and/or exact fields
    Search {
        /// Text to look for in country or description
        term: Option<String>,

        /// Exact country
        #[arg(long)]
        country: Option<String>,

        /// Exact year
        #[arg(long)]
        year: Option<i32>,

        /// Exact condition
        #[arg(long)]
        condition: Option<String>,
    },

    /// Show one stamp by id
    Show {
        id: i64,
    },

    /// Show collection statistics
    Stats,

    /// Manage catalog reference entries (catalog layout)
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Manage physical holdings (catalog layout)
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,
    },

    /// Manage the store secret that guards changes
    Secret {
        /// Target the catalog/inventory store instead of the stamp store
        #[arg(long)]
        catalog: bool,

        #[command(subcommand)]
        action: SecretAction,
    },

    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub(crate) struct AddArgs {
    #[arg(long)]
    pub country: String,

    #[arg(long)]
    pub year: i32,

    /// Face value, e.g. "10c" or "1 penny"
    #[arg(long)]
    pub denomination: String,

    /// Condition, e.g. Mint/Used/Fair/Poor
    #[arg(long)]
    pub condition: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Price paid, e.g. 12.50
    #[arg(long)]
    pub price: Option<Price>,

    /// Acquisition date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Store secret, required once one is set
    #[arg(long)]
    pub secret: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// Add a catalog entry
    Add(CatalogAddArgs),

    /// List catalog entries, newest first
    List,

    /// Filter catalog entries by exact fields
    Search {
        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        /// Catalog number
        #[arg(long)]
        number: Option<String>,
    },

    /// Show catalog and inventory statistics
    Stats,
}

#[derive(Args)]
pub(crate) struct CatalogAddArgs {
    /// Catalog number (unique)
    #[arg(long)]
    pub number: String,

    #[arg(long)]
    pub region: String,

    #[arg(long)]
    pub year: Option<i32>,

    /// Set name or description
    #[arg(long)]
    pub set_name: Option<String>,

    #[arg(long)]
    pub secret: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum InventoryAction {
    /// Add a holding for a catalog number
    Add(InventoryAddArgs),

    /// List holdings, newest first
    List,

    /// Filter holdings by exact fields
    Search {
        /// Catalog number
        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        condition: Option<String>,
    },

    /// List holdings with their catalog data
    Joined,
}

#[derive(Args)]
pub(crate) struct InventoryAddArgs {
    /// Catalog number this holding belongs to
    #[arg(long)]
    pub number: String,

    #[arg(long)]
    pub condition: String,

    #[arg(long)]
    pub variant: Option<String>,

    #[arg(long)]
    pub secret: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum SecretAction {
    /// Report whether a secret is set
    Status,

    /// Set or replace the secret
    Set {
        /// New secret
        new: String,

        /// Current secret, required when replacing one
        #[arg(long)]
        current: Option<String>,
    },

    /// Check a secret against the stored one
    Verify {
        secret: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the settings file
    Show,

    /// Print the settings file path
    Path,

    /// Save a default store path
    SetDb {
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = LayoutArg::Stamps)]
        layout: LayoutArg,
    },

    /// Forget a saved store path
    ClearDb {
        #[arg(long, value_enum, default_value_t = LayoutArg::Stamps)]
        layout: LayoutArg,
    },
}

/// Store layout selector for config commands.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum LayoutArg {
    Stamps,
    Catalog,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Stamps => Layout::Stamps,
            LayoutArg::Catalog => Layout::CatalogInventory,
        }
    }
}
