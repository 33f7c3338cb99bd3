//! Clap derive structures for the `shelterly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use shelterly_core::ShelterCategory;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shelterly -- find, register, and manage animal shelters
#[derive(Debug, Parser)]
#[command(
    name = "shelterly",
    version,
    about = "Find and manage animal shelters from the command line",
    long_about = "A CLI for the shelter marketplace API.\n\n\
        Browse shelters, look one up by name, register a new shelter,\n\
        and edit your own shelter's details and photo once logged in.",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "SHELTERLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 's', env = "SHELTERLY_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format [default: `defaults.output` from config, else table]
    #[arg(
        long = "output",
        short = 'o',
        env = "SHELTERLY_OUTPUT",
        global = true
    )]
    pub output_flag: Option<OutputFormat>,

    /// Effective output format, resolved after config is loaded.
    #[arg(skip = OutputFormat::Table)]
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SHELTERLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SHELTERLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Shelter category as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Individual,
    LocalGovernment,
    Veterinary,
    ShelterPoint,
    RetailPartner,
}

impl From<CategoryArg> for ShelterCategory {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Individual => Self::Individual,
            CategoryArg::LocalGovernment => Self::LocalGovernment,
            CategoryArg::Veterinary => Self::Veterinary,
            CategoryArg::ShelterPoint => Self::ShelterPoint,
            CategoryArg::RetailPartner => Self::RetailPartner,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in as a shelter and store the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show which shelter the stored session belongs to
    Whoami,

    /// Browse and manage shelters
    #[command(alias = "s")]
    Shelters(SheltersArgs),

    /// Register a new shelter
    Register(RegisterArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Login / Register ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account user name (prompted when omitted)
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "SHELTERLY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Shelter name
    #[arg(long)]
    pub name: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: String,

    /// Latitude of the shelter
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the shelter
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Kind of organisation
    #[arg(long, value_enum, default_value = "individual")]
    pub category: CategoryArg,

    /// Photo URL
    #[arg(long)]
    pub photo_url: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "SHELTERLY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ── Shelters ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SheltersArgs {
    #[command(subcommand)]
    pub command: SheltersCommand,
}

#[derive(Debug, Subcommand)]
pub enum SheltersCommand {
    /// List every shelter
    #[command(alias = "ls")]
    List {
        /// Show the last list fetched instead of contacting the server
        #[arg(long)]
        offline: bool,
    },

    /// Find shelters by exact name
    Find {
        /// Shelter name
        name: String,
    },

    /// Show one shelter
    Get {
        /// Shelter id
        id: String,
    },

    /// Edit fields of a shelter (requires login)
    Edit(EditArgs),

    /// Upload a JPEG photo for a shelter (requires login)
    Photo {
        /// Shelter id
        id: String,

        /// Path to the image file
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Shelter id
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// New latitude (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// New longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// New category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// New password (prompted when the flag is given without a value)
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub password: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile
    Init {
        /// API base URL (prompted when omitted)
        #[arg(long)]
        server: Option<String>,

        /// Where to keep the session token
        #[arg(long, value_enum)]
        token_store: Option<TokenStoreArg>,
    },

    /// Print the current configuration
    Show,

    /// Print the config file location
    Path,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TokenStoreArg {
    Keyring,
    File,
    Memory,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
