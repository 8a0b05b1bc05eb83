mod commands;
mod terminal;
mod theme;
mod widgets;

use clap::{Parser, Subcommand};
use tracing::info;

use menu_infrastructure::{create_pool, run_migrations};
use menu_shared::config::AppConfig;
use menu_shared::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "menuctl")]
#[command(about = "Manage navigation menu groups and items")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Database URL, overrides the configured one
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively create a menu item - Default
    CreateItem,
    /// Create menu groups and items for the registered resources
    SeedResources,
    /// Print menu groups and their item trees
    List {
        /// Only this menu group
        #[arg(long)]
        group: Option<String>,

        /// Print JSON instead of an indented tree
        #[arg(long)]
        json: bool,
    },
    /// Apply database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();

    // Load .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    let _guard = init_telemetry(&config.log, &config.app.name);
    info!("{} starting ({})", config.app.name, config.app.env);

    let pool = create_pool(&config.database.url, config.database.max_connections).await?;

    match cli.command.unwrap_or(Commands::CreateItem) {
        Commands::Migrate => commands::migrate(pool).await?,
        command => {
            run_migrations(&pool).await?;
            match command {
                Commands::SeedResources => commands::seed_resources(&config, pool).await?,
                Commands::List { group, json } => commands::list(pool, group, json).await?,
                _ => commands::create_item(&config, pool).await?,
            }
        }
    }

    Ok(())
}
