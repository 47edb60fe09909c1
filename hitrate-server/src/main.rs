use anyhow::Result;
use clap::Parser;
use hitrate_server::{
    AppState, CacheAsideAccessor, DataSource, ServerConfig, SqliteItemRepository, create_router, db,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "hitrate-server", about = "Cache-aside speed demo server")]
struct Args {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    init_tracing(&config);

    info!("Starting hitrate server v{}", env!("CARGO_PKG_VERSION"));

    // Open the database, then make sure the demo has rows to fetch
    let pool = db::create_pool(&config.database.url).await?;
    db::init_schema(&pool).await?;
    db::seed_items(&pool, config.database.seed_count).await?;

    let source: Arc<dyn DataSource> = Arc::new(SqliteItemRepository::new(pool));
    let accessor = Arc::new(CacheAsideAccessor::new(
        source.clone(),
        config.cache.clone(),
    ));

    let state = AppState { accessor, source };
    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));

    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
