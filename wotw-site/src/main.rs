//! wotw-site - Weed of the Week web page
//!
//! Startup:
//! 1. Tracing, then build identification
//! 2. Configuration (CLI > ENV > TOML > defaults)
//! 3. Database open + table creation + startup purge
//! 4. Seed set (TOML seed file or built-in catalog)
//! 5. HTTP server

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wotw_common::config::{ConfigOverrides, SiteConfig};
use wotw_common::db::{init_database, purge_all};
use wotw_site::seed::SeedSet;
use wotw_site::{build_router, AppState};

/// Weed of the Week web server
///
/// Every option can also be set through its environment variable or the
/// TOML config file.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Database URL [env: DATABASE_URL]
    #[arg(long)]
    database_url: Option<String>,

    /// Application secret key [env: SECRET_KEY]
    #[arg(long)]
    secret_key: Option<String>,

    /// Address to listen on [env: WOTW_HOST, default: 0.0.0.0]
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on [env: WOTW_PORT, default: 5000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served under /static/ [env: WOTW_STATIC_DIR, default: ./static]
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// TOML seed file replacing the built-in catalog [env: WOTW_SEED_FILE]
    #[arg(long)]
    seed_file: Option<PathBuf>,

    /// TOML config file [env: WOTW_CONFIG]
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            database_url: args.database_url,
            secret_key: args.secret_key,
            host: args.host,
            port: args.port,
            static_dir: args.static_dir,
            seed_file: args.seed_file,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wotw_site=info,wotw_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Weed of the Week (wotw-site) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = SiteConfig::resolve(&ConfigOverrides::from(args))
        .context("Failed to resolve configuration")?;
    config.warn_missing();

    let pool = match init_database(&config.database_url).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    // Start from empty tables; each page view writes the seed set again
    let mut tx = pool.begin().await?;
    let purged = purge_all(&mut tx).await?;
    tx.commit().await?;
    info!("Cleared {} rows left from a previous run", purged);

    let seed = SeedSet::load_or_builtin(config.seed_file.as_deref())
        .context("Failed to load seed set")?;
    info!(
        "Seed set ready: {} weeds, {} rows per page view",
        seed.weeds.len(),
        seed.row_count()
    );

    if !config.static_dir.is_dir() {
        warn!(
            "Static directory {} does not exist; images will not load",
            config.static_dir.display()
        );
    }

    let state = AppState::new(pool, seed, config.static_dir.clone());
    let app = build_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("wotw-site listening on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
