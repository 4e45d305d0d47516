use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

use crate::common::utils::current_year_start_millis;
use crate::common::MemberId;
use crate::domains::payment::data::{NewPayment, PaymentInput};
use crate::domains::payment::models::PaymentHistory;

/// Replace the member's current-year payment with `input`.
///
/// Any record dated on or after the start of `now`'s year is deleted first.
pub async fn replace_current_year_payment(
    member_id: MemberId,
    input: &PaymentInput,
    now: DateTime<Utc>,
    conn: &mut PgConnection,
) -> Result<PaymentHistory> {
    let year_start = current_year_start_millis(now);

    let removed = PaymentHistory::delete_current_year(member_id, year_start, &mut *conn).await?;
    debug!(member_id = %member_id, removed, "Cleared current-year payments");

    let payment = PaymentHistory::insert(member_id, input, &mut *conn).await?;
    debug!(member_id = %member_id, payment_id = %payment.id, "Inserted payment");

    Ok(payment)
}

/// Save a payment for a member, replacing any current-year record.
pub async fn save_payment(new_payment: NewPayment, pool: &PgPool) -> Result<PaymentHistory> {
    let member_id = new_payment.member.id;
    info!(member_id = %member_id, "Saving payment");

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;
    let payment =
        replace_current_year_payment(member_id, &new_payment.payment, Utc::now(), &mut tx).await?;
    tx.commit().await.context("Failed to commit payment")?;

    Ok(payment)
}

/// Delete the member's current-year payment, if any.
pub async fn delete_current_year_payment(member_id: MemberId, pool: &PgPool) -> Result<u64> {
    info!(member_id = %member_id, "Deleting current-year payment");

    let year_start = current_year_start_millis(Utc::now());
    PaymentHistory::delete_current_year(member_id, year_start, pool).await
}

/// Members with at least one payment in the current year.
pub async fn total_members_paid_for_current_year(pool: &PgPool) -> Result<i64> {
    let year_start = current_year_start_millis(Utc::now());
    PaymentHistory::count_members_paid_since(year_start, pool).await
}
