use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cotizador::{app, config::Config, AppState};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(cotizador::config::log_filter()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Nothing is served without a complete connection configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("startup aborted: {}", e);
            eprintln!("Error: configuración de base de datos no disponible o incompleta.");
            std::process::exit(1);
        }
    };

    info!("Starting quotation service");

    let state = match AppState::connect(&config).await {
        Ok(state) => state,
        Err(e) => {
            error!("startup aborted: {:?}", e);
            eprintln!("Error de conexión. Contacte al administrador.");
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state).into_make_service()).await?;
    Ok(())
}
