use serde::Deserialize;

use crate::common::PersonId;

/// Person fields as posted by the dashboard.
///
/// A missing `id` means "create"; a present one updates that person.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    #[serde(default)]
    pub id: Option<PersonId>,
    pub name: String,
    #[serde(default)]
    pub ic_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
