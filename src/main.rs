use anyhow::Result;
use clap::Parser;
use kenyatrees::{
    config::DashboardArgs,
    equity,
    load::LoadCache,
    server::{self, AppState},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = DashboardArgs::parse();
    info!(data = %args.data.display(), "startup");

    // ─── 2) warm the load cache ──────────────────────────────────────
    let cache = Arc::new(LoadCache::new());
    if let Err(e) = cache.get_or_load(&args.data) {
        // pages report the error per request until the file shows up
        warn!("initial load failed: {:#}", e);
    }

    // ─── 3) county reference table ───────────────────────────────────
    let rankings = match &args.counties {
        Some(path) => Some(equity::rank_counties(&equity::load_counties(path)?)),
        None => None,
    };

    // ─── 4) serve ────────────────────────────────────────────────────
    let state = Arc::new(AppState {
        cache,
        data_path: args.data.clone(),
        rankings,
        table_rows: args.table_rows,
    });
    server::serve(args.bind, state).await
}
