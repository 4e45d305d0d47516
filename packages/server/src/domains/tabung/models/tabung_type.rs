use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::TabungTypeId;

/// TabungType model - category of collection fund
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TabungType {
    pub id: TabungTypeId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TabungTypeInput {
    #[serde(default)]
    pub id: Option<TabungTypeId>,
    pub name: String,
}

impl TabungType {
    pub async fn find_all<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM tabung_types ORDER BY id")
            .fetch_all(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id<'e>(
        id: TabungTypeId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM tabung_types WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn save<'e>(input: &TabungTypeInput, executor: impl PgExecutor<'e>) -> Result<Self> {
        let saved = match input.id {
            Some(id) => {
                sqlx::query_as::<_, Self>(
                    "UPDATE tabung_types SET name = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(&input.name)
                .fetch_optional(executor)
                .await?
            }
            None => Some(
                sqlx::query_as::<_, Self>(
                    "INSERT INTO tabung_types (name) VALUES ($1) RETURNING *",
                )
                .bind(&input.name)
                .fetch_one(executor)
                .await?,
            ),
        };

        match saved {
            Some(tabung_type) => Ok(tabung_type),
            None => bail!("tabung type {:?} does not exist", input.id),
        }
    }

    /// Fails while any tabung still uses the type.
    pub async fn delete<'e>(id: TabungTypeId, executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tabung_types WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
