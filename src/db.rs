use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::error::SourceError;
use crate::models::{Record, ViewRecord};
use crate::sample;
use crate::source;

pub async fn init_db(pool: &PgPool) -> Result<(), SourceError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Inserts or refreshes a record; returns whether a row changed.
async fn upsert(pool: &PgPool, record: &Record) -> Result<bool, SourceError> {
    let result = sqlx::query(
        r#"
        INSERT INTO afrilearn.records (id, kind, payload)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE
        SET kind = EXCLUDED.kind, payload = EXCLUDED.payload, updated_at = now()
        WHERE afrilearn.records.payload IS DISTINCT FROM EXCLUDED.payload
        "#,
    )
    .bind(record.id())
    .bind(record.kind().as_str())
    .bind(Json(record))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn seed(pool: &PgPool) -> Result<usize, SourceError> {
    let mut changed = 0usize;
    for record in sample::records()? {
        if upsert(pool, &record).await? {
            changed += 1;
        }
    }
    info!(changed, "sample catalog seeded");
    Ok(changed)
}

pub async fn fetch_records(pool: &PgPool) -> Result<Vec<Record>, SourceError> {
    let rows = sqlx::query(
        "SELECT payload FROM afrilearn.records ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let Json(record): Json<Record> = row.try_get("payload")?;
        records.push(record);
    }

    Ok(records)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> Result<usize, SourceError> {
    let records = source::read_csv(csv_path)?;
    let mut inserted = 0usize;

    for record in &records {
        if upsert(pool, record).await? {
            inserted += 1;
        }
    }

    info!(path = %csv_path.display(), rows = records.len(), inserted, "csv import finished");
    Ok(inserted)
}
