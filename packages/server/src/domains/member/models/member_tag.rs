use anyhow::Result;
use sqlx::PgExecutor;

use crate::common::{MemberId, MemberTagId, TagId};
use crate::domains::tag::Tag;

/// Link row between a member and a tag
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberTag {
    pub id: MemberTagId,
    pub member_id: MemberId,
    pub tag_id: TagId,
}

/// A link row joined with its tag, for batch loading.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberTagRow {
    pub member_tag_id: MemberTagId,
    pub member_id: MemberId,
    #[sqlx(flatten)]
    pub tag: Tag,
}

impl MemberTag {
    /// Link `member_id` to every tag in `tag_ids`, in order.
    pub async fn insert_many<'e>(
        member_id: MemberId,
        tag_ids: &[TagId],
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Self>(
            "INSERT INTO member_tags (member_id, tag_id)
             SELECT $1, tag_id FROM UNNEST($2::bigint[]) WITH ORDINALITY AS t(tag_id, ord)
             ORDER BY ord
             RETURNING *",
        )
        .bind(member_id)
        .bind(tag_ids)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn delete_for_member<'e>(
        member_id: MemberId,
        executor: impl PgExecutor<'e>,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM member_tags WHERE member_id = $1")
            .bind(member_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Batch load tags for multiple members (for aggregate loading)
    pub async fn find_for_member_ids<'e>(
        member_ids: &[MemberId],
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<MemberTagRow>> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, MemberTagRow>(
            "SELECT mt.id AS member_tag_id, mt.member_id, t.*
             FROM member_tags mt
             JOIN tags t ON t.id = mt.tag_id
             WHERE mt.member_id = ANY($1)
             ORDER BY mt.id",
        )
        .bind(member_ids)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }
}
