use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::common::DependentId;
use crate::domains::dependent::models::Dependent;
use crate::domains::person::models::Person;

/// Delete a dependent and the person it wraps.
///
/// A missing dependent is an error, not a no-op.
pub async fn delete_dependent(id: DependentId, pool: &PgPool) -> Result<()> {
    info!(dependent_id = %id, "Deleting dependent");

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let dependent = Dependent::find_by_id(id, &mut *tx)
        .await?
        .with_context(|| format!("dependent {} does not exist", id))?;

    Dependent::delete(dependent.id, &mut *tx).await?;
    Person::delete(dependent.person_id, &mut *tx).await?;

    tx.commit().await.context("Failed to commit dependent deletion")?;
    Ok(())
}
