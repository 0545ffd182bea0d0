use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bugtrack",
    about = "bugtrack: report, filter, and triage bugs in a local store",
    version
)]
pub struct Cli {
    /// Path to the TOML configuration file (missing file means defaults)
    #[arg(long, global = true, default_value = "bugtrack.toml")]
    pub config: String,

    /// Store directory; overrides the configured `storage.dir`
    #[arg(long, global = true, env = "BUGTRACK_STORE_DIR")]
    pub store_dir: Option<String>,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Submit a new bug report
    Report {
        /// Short summary of the bug
        #[arg(long)]
        title: String,

        /// Steps to reproduce, expected and actual behavior
        #[arg(long)]
        description: String,

        /// Priority: Low, Medium, or High
        #[arg(long)]
        priority: String,

        /// Name of the person reporting
        #[arg(long)]
        reporter: String,

        /// Optional screenshot image file
        #[arg(long)]
        screenshot: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List bugs, newest first, with optional search and filters
    List {
        /// Case-insensitive text matched against title, description, and reporter
        #[arg(long, default_value = "")]
        search: String,

        /// Status filter: all, Open, "In Progress", Resolved, Closed
        #[arg(long, default_value = "all")]
        status: String,

        /// Priority filter: all, Low, Medium, High
        #[arg(long, default_value = "all")]
        priority: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one bug in full
    Show {
        /// Bug ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a bug to a new status
    Status {
        /// Bug ID
        id: String,

        /// New status: Open, "In Progress", Resolved, Closed
        status: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign a bug to a team member (omit the name to unassign)
    Assign {
        /// Bug ID
        id: String,

        /// Team member name; empty or `unassigned` clears the assignment
        assignee: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show per-status totals
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the configured team roster
    Team {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
