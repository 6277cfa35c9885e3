use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "berth")]
#[command(about = "Berth - admin console for a containerized workspace platform", long_about = None)]
struct Cli {
    /// Override the platform API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the platform
    Login {
        #[arg(long)]
        user: String,
        #[arg(long)]
        pass: String,
    },
    /// Discard the stored token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Probe platform health
    Health,
    /// Show platform version
    Version,
    /// Manage workspaces
    Workspace {
        #[command(subcommand)]
        action: WorkspaceAction,
    },
    /// Manage the sessions of a workspace
    Session {
        /// Owning workspace id
        #[arg(long)]
        workspace: String,
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Live session view for a workspace
    Watch {
        /// Workspace id to watch
        workspace: String,
        /// Poll interval in seconds (defaults to the configured interval)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
enum WorkspaceAction {
    /// List workspaces
    List,
    /// Create a workspace
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Rename or re-describe a workspace
    Update {
        id: String,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a workspace
    Delete { id: String },
}

#[derive(Subcommand)]
enum SessionAction {
    /// List sessions
    List,
    /// Create a session (stopped unless started afterwards)
    Create {
        name: String,
        /// Container image to attach as the session's descriptor
        #[arg(long)]
        image: Option<String>,
    },
    /// Start a session
    Start { id: String },
    /// Stop a session
    Stop { id: String },
    /// Delete a session
    Delete { id: String },
    /// Start every stopped session
    StartAll,
    /// Stop every running session
    StopAll,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::build(cli.api_url.as_deref())?;

    match cli.command {
        Commands::Login { user, pass } => commands::auth::login(&ctx, &user, &pass).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Health => commands::system::health(&ctx).await,
        Commands::Version => commands::system::version(&ctx).await,
        Commands::Workspace { action } => match action {
            WorkspaceAction::List => commands::workspaces::list(&ctx).await,
            WorkspaceAction::Create { name, description } => {
                commands::workspaces::create(&ctx, &name, description.as_deref()).await
            }
            WorkspaceAction::Update {
                id,
                name,
                description,
            } => commands::workspaces::update(&ctx, &id, &name, description.as_deref()).await,
            WorkspaceAction::Delete { id } => commands::workspaces::delete(&ctx, &id).await,
        },
        Commands::Session { workspace, action } => match action {
            SessionAction::List => commands::sessions::list(&ctx, &workspace).await,
            SessionAction::Create { name, image } => {
                commands::sessions::create(&ctx, &workspace, &name, image.as_deref()).await
            }
            SessionAction::Start { id } => commands::sessions::start(&ctx, &workspace, &id).await,
            SessionAction::Stop { id } => commands::sessions::stop(&ctx, &workspace, &id).await,
            SessionAction::Delete { id } => commands::sessions::delete(&ctx, &workspace, &id).await,
            SessionAction::StartAll => commands::sessions::start_all(&ctx, &workspace).await,
            SessionAction::StopAll => commands::sessions::stop_all(&ctx, &workspace).await,
        },
        Commands::Watch {
            workspace,
            interval,
        } => commands::watch::run(&ctx, &workspace, interval).await,
    }
}
