use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::TagId;

/// Tag model - a label members can be grouped by (e.g. kariah zone)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Tag as posted by the dashboard; no `id` means create.
#[derive(Debug, Clone, Deserialize)]
pub struct TagInput {
    #[serde(default)]
    pub id: Option<TagId>,
    pub name: String,
}

impl Tag {
    /// All tags ordered by name
    pub async fn find_all<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM tags ORDER BY name, id")
            .fetch_all(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn save<'e>(input: &TagInput, executor: impl PgExecutor<'e>) -> Result<Self> {
        let saved = match input.id {
            Some(id) => {
                sqlx::query_as::<_, Self>("UPDATE tags SET name = $2 WHERE id = $1 RETURNING *")
                    .bind(id)
                    .bind(&input.name)
                    .fetch_optional(executor)
                    .await?
            }
            None => Some(
                sqlx::query_as::<_, Self>("INSERT INTO tags (name) VALUES ($1) RETURNING *")
                    .bind(&input.name)
                    .fetch_one(executor)
                    .await?,
            ),
        };

        match saved {
            Some(tag) => Ok(tag),
            None => bail!("tag {:?} does not exist", input.id),
        }
    }

    /// Delete a tag. Member links to it are removed by `ON DELETE CASCADE`.
    pub async fn delete<'e>(id: TagId, executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Parse a comma separated `tagIds` query value, skipping blanks.
pub fn parse_tag_ids(raw: &str) -> Result<Vec<TagId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<TagId>().map_err(|e| anyhow::anyhow!("invalid tag id {s:?}: {e}")))
        .collect()
}
