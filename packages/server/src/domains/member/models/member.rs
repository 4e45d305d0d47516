use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{MemberId, PageRequest, PersonId, TagId};

/// Sortable properties for the paginated member listing.
pub const MEMBER_SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "m.id"),
    ("name", "p.name"),
    ("person.name", "p.name"),
    ("icNumber", "p.ic_number"),
    ("person.icNumber", "p.ic_number"),
];

/// Member model - a khairat member, owning exactly one person
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub person_id: PersonId,
}

impl Member {
    pub async fn find_by_id<'e>(
        id: MemberId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// Find a member and hold a row lock on it until the transaction ends.
    ///
    /// Serialises concurrent updates of the same member's tags and payments.
    pub async fn lock_by_id<'e>(
        id: MemberId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn insert<'e>(person_id: PersonId, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("INSERT INTO members (person_id) VALUES ($1) RETURNING *")
            .bind(person_id)
            .fetch_one(executor)
            .await
            .map_err(Into::into)
    }

    /// All members ordered by their person's name
    pub async fn find_all_by_name(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT m.*
             FROM members m
             JOIN persons p ON p.id = m.person_id
             ORDER BY p.name, m.id",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Members whose name, IC number, phone or address contains `query`,
    /// case-insensitively.
    pub async fn search(query: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let pattern = format!("%{}%", escape_like(query));

        sqlx::query_as::<_, Self>(
            r"SELECT m.*
              FROM members m
              JOIN persons p ON p.id = m.person_id
              WHERE p.name ILIKE $1 ESCAPE '\'
                 OR p.ic_number ILIKE $1 ESCAPE '\'
                 OR p.phone ILIKE $1 ESCAPE '\'
                 OR p.address ILIKE $1 ESCAPE '\'
              ORDER BY p.name, m.id",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Distinct members carrying any of the given tags, ordered by name
    pub async fn find_by_tag_ids(
        tag_ids: &[TagId],
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Self>(
            "SELECT m.*
             FROM members m
             JOIN persons p ON p.id = m.person_id
             WHERE EXISTS (
                 SELECT 1 FROM member_tags mt
                 WHERE mt.member_id = m.id AND mt.tag_id = ANY($1)
             )
             ORDER BY p.name, m.id",
        )
        .bind(tag_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// One page of members plus the total count
    pub async fn find_page(request: &PageRequest, pool: &PgPool) -> Result<(Vec<Self>, i64)> {
        // order_by only ever yields whitelisted columns
        let sql = format!(
            "SELECT m.*
             FROM members m
             JOIN persons p ON p.id = m.person_id
             ORDER BY {}, m.id
             LIMIT $1 OFFSET $2",
            request.order_by(MEMBER_SORT_COLUMNS, "m.id")
        );

        let members = sqlx::query_as::<_, Self>(&sql)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(pool)
            .await?;
        let total = Self::count(pool).await?;

        Ok((members, total))
    }

    pub async fn count<'e>(executor: impl PgExecutor<'e>) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(executor)
            .await
            .map_err(Into::into)
    }
}

/// Escape `LIKE` wildcards so the query is matched literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
