use anyhow::{Context, Result};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::common::MemberId;
use crate::domains::dependent::actions::load_for_member_ids;
use crate::domains::member::data::{MemberData, MemberTagData};
use crate::domains::member::models::{Member, MemberTag};
use crate::domains::payment::models::PaymentHistory;
use crate::domains::person::models::Person;

/// Assemble full aggregates for a list of members, keeping their order.
///
/// Children are fetched with one `= ANY($1)` query per table, however many
/// members are passed.
pub async fn load_aggregates(members: Vec<Member>, pool: &PgPool) -> Result<Vec<MemberData>> {
    if members.is_empty() {
        return Ok(Vec::new());
    }

    let member_ids: Vec<MemberId> = members.iter().map(|m| m.id).collect();
    let person_ids: Vec<_> = members.iter().map(|m| m.person_id).collect();

    let mut persons: HashMap<_, _> = Person::find_by_ids(&person_ids, pool)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut tags_by_member: HashMap<MemberId, Vec<MemberTagData>> = HashMap::new();
    for row in MemberTag::find_for_member_ids(&member_ids, pool).await? {
        tags_by_member
            .entry(row.member_id)
            .or_default()
            .push(MemberTagData {
                id: row.member_tag_id,
                tag: row.tag,
            });
    }

    let mut payments_by_member: HashMap<MemberId, Vec<PaymentHistory>> = HashMap::new();
    for payment in PaymentHistory::find_for_member_ids(&member_ids, pool).await? {
        payments_by_member
            .entry(payment.member_id)
            .or_default()
            .push(payment);
    }

    let mut dependents_by_member = load_for_member_ids(&member_ids, pool).await?;

    members
        .into_iter()
        .map(|member| {
            let person = persons
                .remove(&member.person_id)
                .with_context(|| format!("person {} missing for member {}", member.person_id, member.id))?;

            Ok(MemberData {
                id: member.id,
                person,
                member_tags: tags_by_member.remove(&member.id).unwrap_or_default(),
                dependents: dependents_by_member.remove(&member.id).unwrap_or_default(),
                payment_histories: payments_by_member.remove(&member.id).unwrap_or_default(),
            })
        })
        .collect()
}

/// Load a single aggregate by member id
pub async fn load_aggregate(id: MemberId, pool: &PgPool) -> Result<Option<MemberData>> {
    let Some(member) = Member::find_by_id(id, pool).await? else {
        return Ok(None);
    };

    Ok(load_aggregates(vec![member], pool).await?.pop())
}
