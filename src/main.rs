use anyhow::{Context, Result};
use offer_search::{config::Settings, regions::RegionHierarchy, routes};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn load_regions(settings: &Settings) -> Result<RegionHierarchy> {
    match &settings.regions_file {
        Some(path) => {
            tracing::info!("Loading region tree from {}", path);
            RegionHierarchy::from_file(path)
        }
        None => {
            tracing::info!("Using the embedded region tree.");
            RegionHierarchy::default_tree()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "offer_search=info,tower_http=info".into())) // Default to info if RUST_LOG not set
        .with(fmt::layer())
        .init();

    tracing::info!("Initializing offer search server...");

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let regions = load_regions(&settings).context("Failed to load region hierarchy")?;
    tracing::info!("Region hierarchy ready with {} parent regions.", regions.parent_count());

    let app_state = routes::AppState::new(regions);
    let app = routes::create_router(app_state);

    // Parse the server address from settings
    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;

    // Create a TCP listener
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => {
            tracing::info!("Server listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("Failed to bind to address {}: {}", addr, e);
            return Err(e.into());
        }
    };

    // Run the server
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
