use std::sync::Arc;

use stockpick_web::{build_state, init_tracing, prewarm, router, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();
    let state = build_state(&config);

    if config.prewarm_skus.is_empty() {
        tracing::info!("no prewarm SKUs configured, scheduler disabled");
    } else {
        prewarm::spawn(
            Arc::clone(&state.service),
            config.prewarm_skus.clone(),
            config.prewarm_interval,
        );
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "stockpick listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
