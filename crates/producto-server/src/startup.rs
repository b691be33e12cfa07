use std::sync::Arc;

use configs::AppConfig;
use migration::MigratorTrait;
use service::producto::{repo::SeaOrmProductoRepository, ProductoService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ProductoState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect, migrate, and serve the catalog until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let productos = Arc::new(ProductoService::new(Arc::new(SeaOrmProductoRepository::new(db))));
    let state = ProductoState::new(productos, &cfg.api.key);
    let app = routes::build_router(state, build_cors());

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    info!(addr = %listener.local_addr()?, "producto service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
