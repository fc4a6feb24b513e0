//! Document Store Gateway
//!
//! Generic create/read/update/delete/query-by-field operations over named
//! collections. Services depend on the [`Gateway`] trait, not on SurrealDB;
//! [`SurrealGateway`] is the production implementation over the embedded
//! engines. Tests wrap it to inject I/O failures.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Collection names, one per entity
pub mod collections {
    pub const STORES: &str = "store";
    pub const EMPLOYEES: &str = "employee";
    pub const SHIFT_DEFINITIONS: &str = "shift_definition";
    pub const ASSIGNMENTS: &str = "assignment";
}

/// Generic per-collection document operations.
///
/// Every call may suspend; implementations must not require the caller to
/// hold any lock across an await. `delete` is idempotent — removing an absent
/// id is not an error, because the UI can race a cascade. No other write is
/// safe to retry blindly, and the gateway never retries.
#[allow(async_fn_in_trait)]
pub trait Gateway: Clone + Send + Sync {
    /// Insert a document, generating and returning its id. Any `id` field in
    /// the document is ignored; identity is assigned here.
    async fn create<T>(&self, collection: &str, doc: &T) -> AppResult<String>
    where
        T: Serialize + Sync;

    /// Fetch one document by id
    async fn get<T>(&self, collection: &str, id: &str) -> AppResult<Option<T>>
    where
        T: DeserializeOwned;

    /// Fetch all documents matching every field-equals filter
    async fn query<T>(&self, collection: &str, filters: &[(&str, Value)]) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned;

    /// Merge a partial document into an existing record. Missing records are
    /// left untouched; existence checks belong to the caller.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> AppResult<()>;

    /// Remove a document. Idempotent.
    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;
}

/// Gateway over an embedded SurrealDB instance
#[derive(Clone)]
pub struct SurrealGateway {
    db: Surreal<Db>,
}

impl SurrealGateway {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }
}

fn to_gateway(e: surrealdb::Error) -> AppError {
    AppError::gateway(e.to_string())
}

/// Filter fields come from compile-time constants in this crate, but they are
/// interpolated into query text, so reject anything that is not a plain
/// identifier.
fn ensure_ident(field: &str) -> AppResult<()> {
    let ok = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(AppError::gateway(format!("Invalid filter field: {field}")))
    }
}

impl Gateway for SurrealGateway {
    async fn create<T>(&self, collection: &str, doc: &T) -> AppResult<String>
    where
        T: Serialize + Sync,
    {
        let mut value = serde_json::to_value(doc)
            .map_err(|e| AppError::gateway(format!("Failed to serialize document: {e}")))?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("id");
        }
        let key = uuid::Uuid::new_v4().simple().to_string();
        let _: Option<serde::de::IgnoredAny> = self
            .db
            .create((collection, key.as_str()))
            .content(value)
            .await
            .map_err(to_gateway)?;
        tracing::debug!(collection, id = %key, "document created");
        Ok(key)
    }

    async fn get<T>(&self, collection: &str, id: &str) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        // record::id(id) projects the plain string key over SurrealDB's
        // native record id, so models keep `id: String`.
        let mut response = self
            .db
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", collection.to_string()))
            .bind(("id", id.to_string()))
            .await
            .map_err(to_gateway)?;
        let mut rows: Vec<T> = response.take(0).map_err(to_gateway)?;
        Ok(rows.pop())
    }

    async fn query<T>(&self, collection: &str, filters: &[(&str, Value)]) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut sql = String::from("SELECT *, record::id(id) AS id FROM type::table($tb)");
        for (i, (field, _)) in filters.iter().enumerate() {
            ensure_ident(field)?;
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!("{field} = $p{i}"));
        }

        let mut request = self.db.query(sql).bind(("tb", collection.to_string()));
        for (i, (_, value)) in filters.iter().enumerate() {
            request = request.bind((format!("p{i}"), value.clone()));
        }
        let rows: Vec<T> = request
            .await
            .map_err(to_gateway)?
            .take(0)
            .map_err(to_gateway)?;
        Ok(rows)
    }

    async fn update(&self, collection: &str, id: &str, mut patch: Value) -> AppResult<()> {
        if let Some(obj) = patch.as_object_mut() {
            obj.remove("id");
        }
        self.db
            .query("UPDATE type::thing($tb, $id) MERGE $data")
            .bind(("tb", collection.to_string()))
            .bind(("id", id.to_string()))
            .bind(("data", patch))
            .await
            .map_err(to_gateway)?
            .check()
            .map_err(to_gateway)?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let _: Option<serde::de::IgnoredAny> = self
            .db
            .delete((collection, id))
            .await
            .map_err(to_gateway)?;
        tracing::debug!(collection, id, "document deleted");
        Ok(())
    }
}
