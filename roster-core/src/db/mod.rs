//! Database Module
//!
//! Embedded SurrealDB engines and the document-store gateway abstraction.
//! The in-memory engine backs tests; RocksDB backs persistent deployments.

pub mod gateway;

pub use gateway::{Gateway, SurrealGateway, collections};

use shared::error::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "roster";
const DATABASE: &str = "main";

/// Open an in-memory database (volatile, used by tests and demos)
pub async fn connect_memory() -> AppResult<SurrealGateway> {
    let db: Surreal<Db> = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::gateway(format!("Failed to open in-memory database: {e}")))?;
    select_namespace(&db).await?;
    tracing::info!("In-memory database ready");
    Ok(SurrealGateway::new(db))
}

/// Open a persistent RocksDB-backed database at `path`
pub async fn connect_rocksdb(path: &str) -> AppResult<SurrealGateway> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::gateway(format!("Failed to open database at {path}: {e}")))?;
    select_namespace(&db).await?;
    tracing::info!(path, "Database connection established (RocksDB)");
    Ok(SurrealGateway::new(db))
}

async fn select_namespace(db: &Surreal<Db>) -> AppResult<()> {
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::gateway(format!("Failed to select namespace: {e}")))
}
