use serde::{Deserialize, Serialize};

use crate::common::{DependentId, MemberId};
use crate::domains::dependent::models::Dependent;
use crate::domains::person::data::PersonInput;
use crate::domains::person::models::Person;

/// Dependent with its person, as returned to the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentData {
    pub id: DependentId,
    pub member_id: MemberId,
    pub person: Person,
    pub hubungan_id: Option<i32>,
}

impl DependentData {
    pub fn new(dependent: Dependent, person: Person) -> Self {
        Self {
            id: dependent.id,
            member_id: dependent.member_id,
            person,
            hubungan_id: dependent.hubungan_id,
        }
    }
}

/// Dependent as posted by the dashboard. Any `member` field is ignored; the
/// owning member comes from the route or the enclosing aggregate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentInput {
    #[serde(default)]
    pub id: Option<DependentId>,
    pub person: PersonInput,
    #[serde(default)]
    pub hubungan_id: Option<i32>,
}
