mod config;
mod llm;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal in production.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env()?;

    // Initialize LLM providers (non-fatal: generation disabled if config missing).
    let llm = match llm::LlmRegistry::from_env() {
        Ok(registry) => {
            let providers: Vec<&str> = registry
                .providers()
                .into_iter()
                .map(llm::Provider::as_str)
                .collect();
            if providers.is_empty() {
                tracing::warn!("no LLM API keys set; room generation disabled");
            } else {
                tracing::info!(?providers, "LLM providers initialized");
            }
            registry
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM providers not configured; room generation disabled");
            llm::LlmRegistry::default()
        }
    };

    let store = services::persistence::PalaceStore::new(&config.palace_path);
    tracing::info!(path = %store.path().display(), "palace store");
    let state = state::AppState::new(store, llm);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, "mind palace listening");
    axum::serve(listener, app).await?;
    Ok(())
}
