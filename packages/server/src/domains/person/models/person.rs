use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::PersonId;
use crate::domains::person::data::PersonInput;

/// Person model - biographical record shared by members and dependents
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub ic_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl Person {
    pub async fn find_by_id<'e>(
        id: PersonId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM persons WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// Batch load persons by ID
    pub async fn find_by_ids<'e>(
        ids: &[PersonId],
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Self>("SELECT * FROM persons WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn insert<'e>(input: &PersonInput, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO persons (name, ic_number, address, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.ic_number)
        .bind(&input.address)
        .bind(&input.phone)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Overwrite every field of an existing person.
    ///
    /// Fails if no person with `id` exists.
    pub async fn update<'e>(
        id: PersonId,
        input: &PersonInput,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        let updated = sqlx::query_as::<_, Self>(
            "UPDATE persons
             SET name = $2, ic_number = $3, address = $4, phone = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.ic_number)
        .bind(&input.address)
        .bind(&input.phone)
        .fetch_optional(executor)
        .await?;

        match updated {
            Some(person) => Ok(person),
            None => bail!("person {} does not exist", id),
        }
    }

    pub async fn delete<'e>(id: PersonId, executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Insert when the input has no id, otherwise update in place.
    pub async fn save<'e>(input: &PersonInput, executor: impl PgExecutor<'e>) -> Result<Self> {
        match input.id {
            Some(id) => Self::update(id, input, executor).await,
            None => Self::insert(input, executor).await,
        }
    }
}
