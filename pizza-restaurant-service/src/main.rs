use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pizza_restaurant_service::{DEFAULT_BIND_ADDRESS, DEFAULT_DATABASE_URL};

pub mod app;

#[derive(Parser)]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, global = true)]
    database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "POOL_SIZE", default_value_t = 8, global = true)]
    pool_size: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending migrations and serve the HTTP API
    Serve {
        #[arg(long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
        bind: String,
    },
    /// Run pending migrations and exit
    Migrate,
    /// Replace all data with the demo restaurants and pizzas
    Seed,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = app::Settings {
        database_url: cli.database_url,
        pool_size: cli.pool_size,
    };
    match cli.command {
        Commands::Serve { bind } => app::server::main(&settings, &bind).await,
        Commands::Migrate => app::migrate::main(&settings),
        Commands::Seed => app::seed::main(&settings),
    }
}
