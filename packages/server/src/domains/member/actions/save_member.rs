//! Member aggregate save
//!
//! Create and update are explicit, ordered transaction scripts. Either every
//! row of the aggregate is written or none is.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

use crate::common::MemberId;
use crate::domains::dependent::actions::save_dependent_in;
use crate::domains::member::data::{MemberData, MemberInput};
use crate::domains::member::loader::load_aggregate;
use crate::domains::member::models::{Member, MemberTag};
use crate::domains::payment::actions::reconcile_payments;
use crate::domains::payment::models::PaymentHistory;
use crate::domains::person::models::Person;

/// Create or update a member aggregate and return it as persisted.
pub async fn save_member(input: MemberInput, pool: &PgPool) -> Result<MemberData> {
    save_member_at(input, Utc::now(), pool).await
}

/// [`save_member`] with an explicit clock, for the current-year payment rule.
pub async fn save_member_at(
    input: MemberInput,
    now: DateTime<Utc>,
    pool: &PgPool,
) -> Result<MemberData> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let member_id = match input.id {
        None => create_member(&input, &mut tx).await?,
        Some(id) => {
            update_member(id, &input, now, &mut tx).await?;
            id
        }
    };

    tx.commit().await.context("Failed to commit member")?;

    load_aggregate(member_id, pool)
        .await?
        .with_context(|| format!("member {} vanished after save", member_id))
}

/// Create path: person, member, tags, dependents, then every payment given.
async fn create_member(input: &MemberInput, conn: &mut PgConnection) -> Result<MemberId> {
    info!("Creating member");

    let person = Person::save(&input.person, &mut *conn).await?;
    let member = Member::insert(person.id, &mut *conn).await?;
    debug!(member_id = %member.id, person_id = %person.id, "Inserted member");

    let tags = MemberTag::insert_many(member.id, &input.tag_ids(), &mut *conn).await?;
    debug!(member_id = %member.id, count = tags.len(), "Linked tags");

    for dependent in &input.dependents {
        save_dependent_in(member.id, dependent, &mut *conn).await?;
    }

    let payments =
        PaymentHistory::insert_many(member.id, &input.payment_histories, &mut *conn).await?;
    debug!(member_id = %member.id, count = payments.len(), "Inserted payments");

    Ok(member.id)
}

/// Update path: person, full tag replacement, payment reconciliation.
///
/// Dependents in the payload are ignored; they are managed through the
/// dependent endpoints.
async fn update_member(
    id: MemberId,
    input: &MemberInput,
    now: DateTime<Utc>,
    conn: &mut PgConnection,
) -> Result<()> {
    info!(member_id = %id, "Updating member");

    let member = Member::lock_by_id(id, &mut *conn)
        .await?
        .with_context(|| format!("member {} does not exist", id))?;

    let mut person = input.person.clone();
    match person.id {
        None => person.id = Some(member.person_id),
        Some(person_id) if person_id != member.person_id => {
            bail!("person {} does not belong to member {}", person_id, id)
        }
        Some(_) => {}
    }
    Person::save(&person, &mut *conn).await?;

    let removed = MemberTag::delete_for_member(id, &mut *conn).await?;
    let tags = MemberTag::insert_many(id, &input.tag_ids(), &mut *conn).await?;
    debug!(member_id = %id, removed, added = tags.len(), "Replaced tags");

    let outcome = reconcile_payments(id, &input.payment_histories, now, conn).await?;
    debug!(member_id = %id, ?outcome, "Reconciled payments");

    Ok(())
}
