use laa_service::{AppState, ServiceConfig, build_router};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured JSON tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "laa_service=debug,laa_core=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    info!(?config, "Loaded configuration");

    let app = build_router(AppState::from_config(&config));
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let addr = listener.local_addr()?;

    info!("LAA eligibility service listening on http://{}", addr);
    info!("Eligibility endpoint: POST http://{}/api/check", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
