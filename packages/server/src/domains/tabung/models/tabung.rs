use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::{entity_ids, IdRef, TabungId, TabungTypeId};
use crate::domains::tabung::models::tabung_type::TabungType;

/// Tabung model - a collection fund
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tabung {
    pub id: TabungId,
    pub name: String,
    pub tabung_type: TabungType,
    /// Whether coin denominations are counted for this tabung
    pub cents: bool,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TabungRow {
    pub id: TabungId,
    pub name: String,
    pub tabung_type_id: TabungTypeId,
    pub tabung_type_name: String,
    pub cents: bool,
}

impl From<TabungRow> for Tabung {
    fn from(row: TabungRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            tabung_type: TabungType {
                id: row.tabung_type_id,
                name: row.tabung_type_name,
            },
            cents: row.cents,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabungInput {
    #[serde(default)]
    pub id: Option<TabungId>,
    pub name: String,
    pub tabung_type: IdRef<entity_ids::TabungType>,
    #[serde(default)]
    pub cents: bool,
}

const SELECT_JOINED: &str = "SELECT t.id, t.name, t.tabung_type_id, tt.name AS tabung_type_name, t.cents
     FROM tabungs t
     JOIN tabung_types tt ON tt.id = t.tabung_type_id";

impl Tabung {
    pub async fn find_all<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        let sql = format!("{SELECT_JOINED} ORDER BY t.id");
        let rows = sqlx::query_as::<_, TabungRow>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id<'e>(id: TabungId, executor: impl PgExecutor<'e>) -> Result<Option<Self>> {
        let sql = format!("{SELECT_JOINED} WHERE t.id = $1");
        let row = sqlx::query_as::<_, TabungRow>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Insert or update; the caller has already resolved `tabung_type`.
    pub async fn save<'e>(
        input: &TabungInput,
        tabung_type: TabungType,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        let saved = match input.id {
            Some(id) => {
                sqlx::query_as::<_, (TabungId, String, bool)>(
                    "UPDATE tabungs SET name = $2, tabung_type_id = $3, cents = $4
                     WHERE id = $1
                     RETURNING id, name, cents",
                )
                .bind(id)
                .bind(&input.name)
                .bind(tabung_type.id)
                .bind(input.cents)
                .fetch_optional(executor)
                .await?
            }
            None => Some(
                sqlx::query_as::<_, (TabungId, String, bool)>(
                    "INSERT INTO tabungs (name, tabung_type_id, cents)
                     VALUES ($1, $2, $3)
                     RETURNING id, name, cents",
                )
                .bind(&input.name)
                .bind(tabung_type.id)
                .bind(input.cents)
                .fetch_one(executor)
                .await?,
            ),
        };

        match saved {
            Some((id, name, cents)) => Ok(Self {
                id,
                name,
                tabung_type,
                cents,
            }),
            None => bail!("tabung {:?} does not exist", input.id),
        }
    }

    /// Delete a tabung along with its kutipan records
    pub async fn delete<'e>(id: TabungId, executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tabungs WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
