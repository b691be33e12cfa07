#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn test_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(DatabaseConfig { url, min_connections: 1, ..DatabaseConfig::default() })
}

/// A migrated Postgres connection, or `None` when no database is configured.
pub async fn get_db() -> Option<DatabaseConnection> {
    let cfg = test_config()?;

    MIGRATED
        .get_or_init(|| async {
            let db = connect_with_config(&cfg).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Return a fresh connection for the current test's runtime
    Some(connect_with_config(&cfg).await.expect("connect test db"))
}
