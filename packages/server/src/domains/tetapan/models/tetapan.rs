use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use tracing::info;

pub const MAX_KUNCI_LEN: usize = 24;
pub const MAX_NILAI_LEN: usize = 256;

/// Tetapan model - a key-value setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tetapan {
    pub kunci: String,
    #[serde(default)]
    pub nilai: String,
}

impl Tetapan {
    /// Check column limits before hitting the database
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.kunci.trim().is_empty(), "kunci must not be empty");
        ensure!(
            self.kunci.chars().count() <= MAX_KUNCI_LEN,
            "kunci {:?} is longer than {} characters",
            self.kunci,
            MAX_KUNCI_LEN
        );
        ensure!(
            self.nilai.chars().count() <= MAX_NILAI_LEN,
            "nilai for {:?} is longer than {} characters",
            self.kunci,
            MAX_NILAI_LEN
        );
        Ok(())
    }

    pub async fn find_all<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM tetapan ORDER BY kunci")
            .fetch_all(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_kunci<'e>(
        kunci: &str,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM tetapan WHERE kunci = $1")
            .bind(kunci)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// Insert or overwrite the value for `kunci`
    pub async fn upsert<'e>(&self, executor: impl PgExecutor<'e>) -> Result<Self> {
        self.validate()?;

        sqlx::query_as::<_, Self>(
            "INSERT INTO tetapan (kunci, nilai) VALUES ($1, $2)
             ON CONFLICT (kunci) DO UPDATE SET nilai = EXCLUDED.nilai
             RETURNING *",
        )
        .bind(&self.kunci)
        .bind(&self.nilai)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Upsert every entry in one transaction
    pub async fn upsert_all(entries: &[Self], pool: &PgPool) -> Result<Vec<Self>> {
        info!(count = entries.len(), "Saving tetapan list");

        let mut tx = pool.begin().await.context("Failed to begin transaction")?;
        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            saved.push(entry.upsert(&mut *tx).await?);
        }
        tx.commit().await.context("Failed to commit tetapan list")?;

        Ok(saved)
    }

    pub async fn delete<'e>(kunci: &str, executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tetapan WHERE kunci = $1")
            .bind(kunci)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
