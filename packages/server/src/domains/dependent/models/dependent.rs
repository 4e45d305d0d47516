use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::{DependentId, MemberId, PersonId};

/// Dependent model - a person covered by a member's khairat
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub id: DependentId,
    pub person_id: PersonId,
    pub member_id: MemberId,
    /// Relationship to the member (lookup id owned by the dashboard)
    pub hubungan_id: Option<i32>,
}

impl Dependent {
    pub async fn find_by_id<'e>(
        id: DependentId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM dependents WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn insert<'e>(
        person_id: PersonId,
        member_id: MemberId,
        hubungan_id: Option<i32>,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO dependents (person_id, member_id, hubungan_id)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(person_id)
        .bind(member_id)
        .bind(hubungan_id)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Overwrite an existing dependent's person, member and relationship.
    pub async fn update<'e>(
        id: DependentId,
        person_id: PersonId,
        member_id: MemberId,
        hubungan_id: Option<i32>,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE dependents SET person_id = $2, member_id = $3, hubungan_id = $4
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(person_id)
        .bind(member_id)
        .bind(hubungan_id)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    /// Batch load dependents for multiple members
    pub async fn find_for_member_ids<'e>(
        member_ids: &[MemberId],
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Self>(
            "SELECT * FROM dependents WHERE member_id = ANY($1) ORDER BY id",
        )
        .bind(member_ids)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn delete<'e>(id: DependentId, executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM dependents WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
