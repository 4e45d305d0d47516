//! Member query actions

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::{MemberId, Page, PageRequest};
use crate::domains::member::data::MemberData;
use crate::domains::member::loader::{load_aggregate, load_aggregates};
use crate::domains::member::models::Member;
use crate::domains::tag::parse_tag_ids;

/// Wildcard query that lists every member
pub const MATCH_ALL: &str = "*";

pub async fn find_member(id: MemberId, pool: &PgPool) -> Result<Option<MemberData>> {
    load_aggregate(id, pool).await
}

/// Free-text search; exactly `*` returns every member ordered by name.
///
/// Any other query, whitespace included, is matched as a literal substring.
pub async fn find_members_by_query(query: &str, pool: &PgPool) -> Result<Vec<MemberData>> {
    info!(query, "Searching members");

    let members = if query == MATCH_ALL {
        Member::find_all_by_name(pool).await?
    } else {
        Member::search(query, pool).await?
    };

    load_aggregates(members, pool).await
}

/// Members carrying any tag in a comma separated id list.
pub async fn find_members_by_tags(raw_tag_ids: &str, pool: &PgPool) -> Result<Vec<MemberData>> {
    let tag_ids = parse_tag_ids(raw_tag_ids)?;
    info!(count = tag_ids.len(), "Finding members by tags");

    let members = Member::find_by_tag_ids(&tag_ids, pool).await?;
    load_aggregates(members, pool).await
}

pub async fn find_members_page(request: &PageRequest, pool: &PgPool) -> Result<Page<MemberData>> {
    let (members, total) = Member::find_page(request, pool).await?;
    let content = load_aggregates(members, pool).await?;
    Ok(Page::new(content, total, request))
}

pub async fn count_members(pool: &PgPool) -> Result<i64> {
    Member::count(pool).await
}
