pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};

use crate::core::models::log_entry::SortField;

/// Track who changed what on an order, and when.
#[derive(Parser, Debug)]
#[command(name = "ordertrail", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding config.toml, snapshots and the change log
    #[arg(long, global = true, env = "ORDERTRAIL_DIR", default_value = ".ordertrail")]
    pub dir: PathBuf,

    /// Who is making the change, e.g. "Jane Doe <jane@shop.test>" (default: git user)
    #[arg(long, global = true, env = "ORDERTRAIL_ACTOR")]
    pub actor: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory with a default config
    Init,

    /// Capture the state of an order before it is updated
    Snapshot {
        /// Order id
        order_id: String,
        /// JSON document with the order's current state
        #[arg(long)]
        file: PathBuf,
    },

    /// Compare an order against its snapshot and record every change
    Commit {
        /// Order id
        order_id: String,
        /// JSON document with the order's updated state
        #[arg(long)]
        file: PathBuf,
    },

    /// Show the changes between two order documents without recording them
    Diff {
        /// Order before the update
        old: PathBuf,
        /// Order after the update
        new: PathBuf,
    },

    /// Record a single change directly (coupon, note, fee, refund...)
    Record {
        /// Order id
        order_id: String,
        /// Action name, e.g. coupon_added or note_added
        action: String,
        /// Field the change applies to
        #[arg(long)]
        field: Option<String>,
        /// Previous value
        #[arg(long)]
        old: Option<String>,
        /// New value
        #[arg(long)]
        new: Option<String>,
    },

    /// Browse the change log
    Log {
        /// Only this order
        #[arg(long)]
        order: Option<String>,
        /// Only this action, e.g. status_changed
        #[arg(long)]
        action: Option<String>,
        /// User name or email contains
        #[arg(long)]
        user: Option<String>,
        /// First day included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Field, values or user contain
        #[arg(long)]
        search: Option<String>,
        /// Sort column
        #[arg(long, value_enum, default_value_t = SortArg::Date)]
        sort: SortArg,
        /// Oldest first
        #[arg(long)]
        asc: bool,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Entries per page, 10 to 100 (default from config)
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(10..=100))]
        per_page: Option<usize>,
    },

    /// Show the change history of one order
    Show {
        /// Order id
        order_id: String,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Delete change log entries by id
    Delete {
        /// Entry ids
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Purge entries older than the retention window
    Cleanup {
        /// Keep this many days (default from config)
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    Date,
    Order,
    Action,
    User,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortField::Timestamp,
            SortArg::Order => SortField::OrderId,
            SortArg::Action => SortField::Action,
            SortArg::User => SortField::User,
        }
    }
}
