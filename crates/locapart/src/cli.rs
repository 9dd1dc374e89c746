//! Clap derive structures for the `locapart` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of non-clap dependencies so `build.rs` can include it for man
//! page generation.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// locapart -- back office for apartments, cities and reservations
#[derive(Debug, Parser)]
#[command(
    name = "locapart",
    version,
    about = "Manage Locapart rental listings and reservations from the command line",
    long_about = "Administer the Locapart rental back office.\n\n\
        Lists, creates, edits and deletes apartments, cities and reservations\n\
        held by the Locapart REST service. Foreign keys are entered and shown\n\
        by name (a city for an apartment, an apartment for a reservation).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "LOCAPART_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Resource base URL (overrides profile)
    #[arg(long, short = 'u', env = "LOCAPART_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LOCAPART_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "LOCAPART_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "LOCAPART_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Keep the local edit when the server rejects a change
    #[arg(long, global = true)]
    pub keep_on_failure: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage apartments
    #[command(alias = "apt", alias = "a")]
    Apartments(ApartmentsArgs),

    /// Manage cities
    #[command(alias = "city", alias = "c")]
    Cities(CitiesArgs),

    /// Manage reservations
    #[command(alias = "resa", alias = "r")]
    Reservations(ReservationsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Apartments ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApartmentsArgs {
    #[command(subcommand)]
    pub command: ApartmentsCommand,
}

/// Apartment form fields. On update, omitted flags keep their value.
#[derive(Debug, Args)]
pub struct ApartmentFields {
    /// Apartment name
    #[arg(long)]
    pub name: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// Postal code
    #[arg(long)]
    pub postal_code: Option<String>,

    /// Apartment type (e.g. T2, studio)
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Price
    #[arg(long)]
    pub price: Option<f64>,

    /// City, by name
    #[arg(long)]
    pub city: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ApartmentsCommand {
    /// List apartments
    #[command(alias = "ls")]
    List,

    /// Create an apartment
    Create(ApartmentFields),

    /// Edit an apartment
    Update {
        /// Apartment id
        id: i64,

        #[command(flatten)]
        fields: ApartmentFields,
    },

    /// Delete an apartment
    #[command(alias = "rm")]
    Delete {
        /// Apartment id
        id: i64,
    },
}

// ── Cities ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CitiesArgs {
    #[command(subcommand)]
    pub command: CitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CitiesCommand {
    /// List cities
    #[command(alias = "ls")]
    List,

    /// Create a city
    Create {
        /// City name
        #[arg(long)]
        name: Option<String>,
    },

    /// Rename a city
    Update {
        /// City id
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a city
    #[command(alias = "rm")]
    Delete {
        /// City id
        id: i64,
    },
}

// ── Reservations ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReservationsArgs {
    #[command(subcommand)]
    pub command: ReservationsCommand,
}

/// Reservation form fields. On update, omitted flags keep their value.
#[derive(Debug, Args)]
pub struct ReservationFields {
    /// Apartment, by name
    #[arg(long)]
    pub apartment: Option<String>,

    /// Period start
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Period end
    #[arg(long, allow_negative_numbers = true)]
    pub end: Option<i64>,

    /// Booking reference
    #[arg(long)]
    pub code: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// List reservations
    #[command(alias = "ls")]
    List,

    /// Create a reservation
    Create(ReservationFields),

    /// Edit a reservation
    Update {
        /// Reservation id
        id: i64,

        #[command(flatten)]
        fields: ReservationFields,
    },

    /// Delete a reservation
    #[command(alias = "rm")]
    Delete {
        /// Reservation id
        id: i64,
    },

    /// Mark a reservation cancelled
    Cancel {
        /// Reservation id
        id: i64,
    },

    /// Mark a reservation active again
    Activate {
        /// Reservation id
        id: i64,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
