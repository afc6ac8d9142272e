use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "catedra")]
#[command(version, about = "Content store admin for a bilingual academic site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the records of an entity type
    #[command(alias = "ls")]
    List {
        /// Entity type (e.g. BlogPost, Event, Publication)
        entity: String,

        /// Sort field, prefix with '-' for descending (e.g. -created_date)
        #[arg(short, long, allow_hyphen_values = true)]
        order: Option<String>,

        /// Maximum number of records
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// List records whose fields equal the given values
    #[command(alias = "f")]
    Filter {
        /// Entity type
        entity: String,

        /// Criteria as field=value (e.g. status=published featured=true)
        #[arg(num_args = 0..)]
        criteria: Vec<String>,

        /// Sort field, prefix with '-' for descending
        #[arg(short, long, allow_hyphen_values = true)]
        order: Option<String>,

        /// Maximum number of records
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one record as JSON
    Get {
        /// Entity type
        entity: String,

        /// Record id
        id: String,
    },

    /// Create a record
    #[command(alias = "n")]
    Create {
        /// Entity type
        entity: String,

        /// Fields as field=value
        #[arg(num_args = 0..)]
        fields: Vec<String>,

        /// Fields as a JSON object (field=value terms override it)
        #[arg(long)]
        data: Option<String>,
    },

    /// Merge fields into an existing record
    #[command(alias = "u")]
    Update {
        /// Entity type
        entity: String,

        /// Record id
        id: String,

        /// Fields as field=value
        #[arg(num_args = 0..)]
        fields: Vec<String>,

        /// Fields as a JSON object (field=value terms override it)
        #[arg(long)]
        data: Option<String>,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Entity type
        entity: String,

        /// Record id
        id: String,
    },

    /// Show every entity type with its record count
    Kinds,

    /// Show the signed-in user (signs in the default user if needed)
    Whoami,

    /// Sign out
    Logout,

    /// Get or set configuration
    Config {
        /// Configuration key (snapshot-key, session-key, user-email, user-name)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Discard all stored content and restore the defaults
    Reset {
        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
}
