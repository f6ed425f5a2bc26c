use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dialdesk")]
#[command(about = "Command line back office for the DialDesk call-center platform")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[arg(long, global = true, env = "DIALDESK_API_TOKEN")]
    pub api_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Voice agent management
    Agents {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Call routine management
    Routines {
        #[command(subcommand)]
        command: RoutineCommands,
    },
    /// Back-office user management
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Lead group management
    LeadGroups {
        #[command(subcommand)]
        command: LeadGroupCommands,
    },
    /// Voice asset management
    Voices {
        #[command(subcommand)]
        command: VoiceCommands,
    },
    /// Record totals across all resources
    Overview,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Verify and store an API token for this profile
    Login {
        /// Token value; prompted for when omitted
        #[arg(long)]
        token: Option<String>,
    },
    /// Forget the stored API token
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a configuration value on the active profile
    Set {
        /// Configuration key: api_url, page_size, or timeout_seconds
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Options shared by every `list` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Server-side search term
    #[arg(long)]
    pub search: Option<String>,

    /// Sort specification: column, column:asc, or column:desc
    #[arg(long)]
    pub sort: Option<String>,

    /// 1-based page to fetch
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,

    /// Column filter in column=value form (client-side, repeatable)
    #[arg(long, action = clap::ArgAction::Append)]
    pub filter: Vec<String>,

    /// Fetch everything and browse interactively
    #[arg(short, long)]
    pub interactive: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List agents
    List {
        #[command(flatten)]
        args: ListArgs,
    },
    /// Show one agent
    Get { id: u32 },
    /// Create an agent
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        routine_id: Option<u32>,
        #[arg(long)]
        voice_id: Option<u32>,
    },
    /// Update an agent
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// draft, active, or paused
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        routine_id: Option<u32>,
        #[arg(long)]
        voice_id: Option<u32>,
    },
    /// Delete an agent
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoutineCommands {
    /// List routines
    List {
        #[command(flatten)]
        args: ListArgs,
    },
    /// Show one routine
    Get { id: u32 },
    /// Create a routine
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a routine
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        enabled: Option<bool>,
    },
    /// Delete a routine
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    List {
        #[command(flatten)]
        args: ListArgs,
    },
    /// Show one user
    Get { id: u32 },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// admin, operator, or viewer
        #[arg(long)]
        role: String,
    },
    /// Update a user
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// admin, operator, or viewer
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum LeadGroupCommands {
    /// List lead groups
    List {
        #[command(flatten)]
        args: ListArgs,
    },
    /// Show one lead group
    Get { id: u32 },
    /// Create a lead group
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a lead group
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a lead group
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum VoiceCommands {
    /// List voice assets
    List {
        #[command(flatten)]
        args: ListArgs,
    },
    /// Show one voice asset
    Get { id: u32 },
    /// Register a voice asset by URL
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        file_name: String,
        #[arg(long)]
        url: String,
    },
    /// Rename a voice asset
    Update {
        id: u32,
        #[arg(long)]
        name: String,
    },
    /// Delete a voice asset
    Delete {
        id: u32,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Preview a voice asset
    Preview { id: u32 },
}
