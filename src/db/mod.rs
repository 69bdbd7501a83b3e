use std::{future::Future, str::FromStr};

use serde::{Serialize, de::DeserializeOwned};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// A record kept as one JSON document per row, addressed by its `title`.
pub trait StoredDocument: Serialize + DeserializeOwned {
    /// Backing table.
    const COLLECTION: &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
    #[error("malformed record in {collection}: {source}")]
    Malformed {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode record for {collection}: {source}")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no record titled {title:?} in {collection}")]
    NotFound {
        collection: &'static str,
        title: String,
    },
}

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    // The UNIQUE title is what keeps concurrent cold starts from seeding twice.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS whitepapers (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            document TEXT NOT NULL,
            stored_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS presentations (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            document TEXT NOT NULL,
            stored_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

pub async fn find_one<T: StoredDocument>(
    pool: &SqlitePool,
    title: &str,
) -> Result<Option<T>, StoreError> {
    let sql = format!("SELECT document FROM {} WHERE title = ?", T::COLLECTION);
    let row: Option<(String,)> = sqlx::query_as(&sql).bind(title).fetch_optional(pool).await?;

    row.map(|(document,)| {
        serde_json::from_str(&document).map_err(|source| StoreError::Malformed {
            collection: T::COLLECTION,
            source,
        })
    })
    .transpose()
}

/// Stores `document` under `title`. Returns `false` when a record with that
/// title already exists, in which case nothing is written.
pub async fn insert_one<T: StoredDocument>(
    pool: &SqlitePool,
    title: &str,
    document: &T,
) -> Result<bool, StoreError> {
    let encoded = serde_json::to_string(document).map_err(|source| StoreError::Encode {
        collection: T::COLLECTION,
        source,
    })?;

    let sql = format!(
        "INSERT INTO {} (title, document) VALUES (?, ?) ON CONFLICT(title) DO NOTHING",
        T::COLLECTION
    );
    let result = sqlx::query(&sql)
        .bind(title)
        .bind(encoded)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Returns the record stored under `title`, building and storing it with
/// `factory` first if there is none.
///
/// When two callers race on an empty store, only one insert lands; the
/// loser discards what it built and returns the stored record instead, so
/// every caller sees the same document.
pub async fn ensure_and_fetch<T, F, Fut>(
    pool: &SqlitePool,
    title: &str,
    factory: F,
) -> Result<T, StoreError>
where
    T: StoredDocument,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    if let Some(existing) = find_one::<T>(pool, title).await? {
        return Ok(existing);
    }

    let document = factory().await?;
    if insert_one(pool, title, &document).await? {
        tracing::info!(collection = T::COLLECTION, title, "Seeded document");
        return Ok(document);
    }

    tracing::debug!(
        collection = T::COLLECTION,
        title,
        "Lost seeding race, reading stored document"
    );
    find_one::<T>(pool, title)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            collection: T::COLLECTION,
            title: title.to_string(),
        })
}
