use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursehub::api;
use coursehub::config::Config;
use coursehub::repository::open_store;
use coursehub::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "coursehub=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = open_store(config.database_url.as_deref()).await;
    info!("using {} store for student {}", store.kind(), config.student_id);

    let state = AppState::new(store, &config.student_id);
    let app = api::app(state, &config)?;

    let addr = config.addr();
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
