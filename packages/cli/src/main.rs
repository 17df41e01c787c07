use axum::http::Method;
use bodega_catalog::{ApiState, ProductoStorage, SqliteStorage, StorageConfig};
use bodega_tui::api::ApiClient;
use bodega_tui::camera::CommandCapture;
use clap::{Parser, Subcommand};
use colored::*;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "bodega")]
#[command(about = "Bodega - product catalog server and terminal client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the catalog API server
    Serve {
        /// API server port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database path (overrides BODEGA_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Launch the terminal client
    Tui {
        /// Base URL of the catalog API
        #[arg(long, default_value = "http://localhost:3000")]
        api_url: String,
        /// Command whose stdout yields a captured photo
        #[arg(long, default_value = "fswebcam --save - -q")]
        camera_cmd: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { port, db } => serve(port, db).await,
        Commands::Tui {
            api_url,
            camera_cmd,
        } => start_tui(api_url, camera_cmd).await,
    }
}

async fn serve(port: Option<u16>, db: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(db) = db {
        config.db_path = db;
    }

    println!("{}", "🚀 Starting Bodega API server...".green().bold());
    println!("{} {}", "📦 Database:".cyan(), config.db_path.display());
    println!("{} {}", "🔗 CORS origin:".cyan(), config.cors_origin);

    let storage = SqliteStorage::new(StorageConfig::with_path(config.db_path.clone())).await?;
    storage.initialize().await?;
    let state = ApiState::new(Arc::new(storage));

    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let app = bodega_catalog::create_productos_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    println!("{} {}", "✅ Server listening on".green(), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn start_tui(api_url: String, camera_cmd: String) -> Result<(), Box<dyn std::error::Error>> {
    use crossterm::{execute, terminal};

    println!("{}", "🎮 Starting Bodega TUI...".green().bold());
    println!("{} {}", "📡 Catalog API:".cyan(), api_url);

    let camera = CommandCapture::from_command_line(&camera_cmd)
        .ok_or("camera command must not be empty")?;
    let mut app = bodega_tui::App::new(ApiClient::new(api_url), Box::new(camera));

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    // Run the application with proper cleanup
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if there was an error
    let cleanup_result = (|| -> Result<(), Box<dyn std::error::Error>> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        Ok(())
    })();

    if let Err(cleanup_error) = cleanup_result {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }
    if let Err(e) = result {
        eprintln!("TUI application error: {}", e);
    }

    Ok(())
}
