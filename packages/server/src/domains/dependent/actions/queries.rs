use anyhow::Result;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::common::MemberId;
use crate::domains::dependent::data::DependentData;
use crate::domains::dependent::models::Dependent;
use crate::domains::person::models::Person;

/// Batch load dependents (with persons) for several members in two queries.
pub async fn load_for_member_ids(
    member_ids: &[MemberId],
    pool: &PgPool,
) -> Result<HashMap<MemberId, Vec<DependentData>>> {
    let dependents = Dependent::find_for_member_ids(member_ids, pool).await?;

    let person_ids: Vec<_> = dependents.iter().map(|d| d.person_id).collect();
    let mut persons: HashMap<_, _> = Person::find_by_ids(&person_ids, pool)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut by_member: HashMap<MemberId, Vec<DependentData>> = HashMap::new();
    for dependent in dependents {
        // person_id is NOT NULL with a foreign key, so the person is always there
        if let Some(person) = persons.remove(&dependent.person_id) {
            by_member
                .entry(dependent.member_id)
                .or_default()
                .push(DependentData::new(dependent, person));
        }
    }

    Ok(by_member)
}

pub async fn find_by_member_id(member_id: MemberId, pool: &PgPool) -> Result<Vec<DependentData>> {
    let mut by_member = load_for_member_ids(&[member_id], pool).await?;
    Ok(by_member.remove(&member_id).unwrap_or_default())
}
