use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod commands;

use bootstrap::App;
use certdesk_infrastructure::ConfigService;

#[derive(Parser)]
#[command(name = "certdesk")]
#[command(about = "certdesk CLI - session and data sync client for the certificate tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the restored session and its sync state
    Status,
    /// Authenticate and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the session and clear stored credentials
    Logout,
    /// Fetch notices and the role's certificates
    Sync,
    /// Mark a notice as read and refresh
    Read {
        /// Notice id
        notice_id: i64,
    },
    /// Show whether the current session may open a path
    Route {
        /// Target path, e.g. /certificates
        path: String,
    },
    /// Set the avatar URL, or clear it when omitted
    Avatar {
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new()?;
    let config = config_service.load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app = App::bootstrap(&config_service, config)?;

    match cli.command {
        Commands::Status => commands::session::status(&app),
        Commands::Login { email, password } => {
            commands::session::login(&app, &email, &password).await?
        }
        Commands::Logout => commands::session::logout(&app)?,
        Commands::Sync => commands::sync::sync(&app).await,
        Commands::Read { notice_id } => commands::sync::read(&app, notice_id).await,
        Commands::Route { path } => commands::route::check(&app, &path),
        Commands::Avatar { url } => commands::session::avatar(&app, url.as_deref())?,
    }

    Ok(())
}
