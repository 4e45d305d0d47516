use anyhow::{Context, Result};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

use crate::common::MemberId;
use crate::domains::dependent::data::{DependentData, DependentInput};
use crate::domains::dependent::models::Dependent;
use crate::domains::person::models::Person;

/// Save a dependent's person, then the dependent itself, for `member_id`.
///
/// The member is not checked here; a missing member fails on the foreign key.
pub async fn save_dependent_in(
    member_id: MemberId,
    input: &DependentInput,
    conn: &mut PgConnection,
) -> Result<DependentData> {
    let person = Person::save(&input.person, &mut *conn).await?;
    debug!(person_id = %person.id, "Saved dependent person");

    let dependent = match input.id {
        Some(id) => Dependent::update(id, person.id, member_id, input.hubungan_id, &mut *conn)
            .await?
            .with_context(|| format!("dependent {} does not exist", id))?,
        None => Dependent::insert(person.id, member_id, input.hubungan_id, &mut *conn).await?,
    };

    Ok(DependentData::new(dependent, person))
}

pub async fn save_dependent(
    member_id: MemberId,
    input: DependentInput,
    pool: &PgPool,
) -> Result<DependentData> {
    info!(member_id = %member_id, "Saving dependent");

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;
    let saved = save_dependent_in(member_id, &input, &mut tx).await?;
    tx.commit().await.context("Failed to commit dependent")?;

    Ok(saved)
}
