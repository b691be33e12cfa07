use std::sync::Arc;

use configs::AppConfig;
use migration::MigratorTrait;
use service::inventario::events::LoggingEventPublisher;
use service::inventario::{repo::SeaOrmInventarioRepository, InventarioService};
use service::producto_client::HttpProductoClient;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, InventarioState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect, migrate, wire the catalog client, and serve the stock ledger.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let productos = HttpProductoClient::new(&cfg.producto_service, cfg.api.key.clone())?;
    info!(
        url = %cfg.producto_service.url,
        connect_timeout_ms = cfg.producto_service.connect_timeout_ms,
        read_timeout_ms = cfg.producto_service.read_timeout_ms,
        "producto client ready"
    );
    let inventarios = InventarioService::new(
        Arc::new(SeaOrmInventarioRepository::new(db)),
        Arc::new(productos),
        Arc::new(LoggingEventPublisher),
    );
    let state = InventarioState::new(Arc::new(inventarios), &cfg.api.key);
    let app = routes::build_router(state, build_cors());

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    info!(addr = %listener.local_addr()?, "inventario service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
