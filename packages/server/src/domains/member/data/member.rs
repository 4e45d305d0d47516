use serde::{Deserialize, Serialize};

use crate::common::{entity_ids, IdRef, MemberId, MemberTagId, TagId};
use crate::domains::dependent::data::{DependentData, DependentInput};
use crate::domains::payment::data::PaymentInput;
use crate::domains::payment::models::PaymentHistory;
use crate::domains::person::data::PersonInput;
use crate::domains::person::models::Person;
use crate::domains::tag::Tag;

/// Member aggregate as returned to the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberData {
    pub id: MemberId,
    pub person: Person,
    pub member_tags: Vec<MemberTagData>,
    pub dependents: Vec<DependentData>,
    pub payment_histories: Vec<PaymentHistory>,
}

/// A member's link to one tag
#[derive(Debug, Clone, Serialize)]
pub struct MemberTagData {
    pub id: MemberTagId,
    pub tag: Tag,
}

/// Member aggregate as posted to `/members/save`.
///
/// No `id` takes the create path; an `id` takes the update path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    #[serde(default)]
    pub id: Option<MemberId>,
    pub person: PersonInput,
    #[serde(default)]
    pub member_tags: Vec<MemberTagInput>,
    #[serde(default)]
    pub dependents: Vec<DependentInput>,
    #[serde(default)]
    pub payment_histories: Vec<PaymentInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberTagInput {
    #[serde(default)]
    pub id: Option<MemberTagId>,
    pub tag: IdRef<entity_ids::Tag>,
}

impl MemberInput {
    /// Tag ids in payload order
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.member_tags.iter().map(|mt| mt.tag.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payload() {
        let input: MemberInput = serde_json::from_str(
            r#"{
                "person": {"name": "Ahmad bin Ali", "icNumber": "700101-01-5555"},
                "memberTags": [{"tag": {"id": 2, "name": "Zon A"}}, {"tag": {"id": 5}}],
                "dependents": [{"person": {"name": "Aminah"}, "hubunganId": 1}],
                "paymentHistories": [{"amount": 60, "paymentDate": 1704067200000}]
            }"#,
        )
        .unwrap();

        assert!(input.id.is_none());
        assert_eq!(input.tag_ids(), vec![TagId::new(2), TagId::new(5)]);
        assert_eq!(input.dependents.len(), 1);
        assert_eq!(input.payment_histories.len(), 1);
    }

    #[test]
    fn test_children_default_to_empty() {
        let input: MemberInput =
            serde_json::from_str(r#"{"id": 9, "person": {"id": 3, "name": "Ali"}}"#).unwrap();

        assert_eq!(input.id, Some(MemberId::new(9)));
        assert!(input.member_tags.is_empty());
        assert!(input.dependents.is_empty());
        assert!(input.payment_histories.is_empty());
    }
}
