use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tracing::debug;

use crate::common::utils::current_year_start_millis;
use crate::common::MemberId;
use crate::domains::payment::data::PaymentInput;
use crate::domains::payment::models::PaymentHistory;

use super::replace_current_year_payment;

/// What reconciling a member's payment list did.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// The incoming list was empty; this many current-year records were removed.
    Cleared(u64),
    /// No current-year record existed; the first new entry was stored.
    Inserted(PaymentHistory),
    /// Nothing changed.
    Unchanged,
}

/// Bring the member's current-year payment in line with an updated aggregate.
///
/// - empty `incoming` deletes the current-year record
/// - with no current-year record, the first entry without an id is saved and
///   the remaining entries are ignored
/// - an existing current-year record is left alone
pub async fn reconcile_payments(
    member_id: MemberId,
    incoming: &[PaymentInput],
    now: DateTime<Utc>,
    conn: &mut PgConnection,
) -> Result<ReconcileOutcome> {
    let year_start = current_year_start_millis(now);

    if incoming.is_empty() {
        let removed = PaymentHistory::delete_current_year(member_id, year_start, &mut *conn).await?;
        return Ok(ReconcileOutcome::Cleared(removed));
    }

    if let Some(existing) =
        PaymentHistory::find_current_year(member_id, year_start, &mut *conn).await?
    {
        debug!(member_id = %member_id, payment_id = %existing.id, "Current-year payment already recorded");
        return Ok(ReconcileOutcome::Unchanged);
    }

    match incoming.iter().find(|p| p.id.is_none()) {
        Some(new_payment) => {
            let payment = replace_current_year_payment(member_id, new_payment, now, conn).await?;
            Ok(ReconcileOutcome::Inserted(payment))
        }
        None => Ok(ReconcileOutcome::Unchanged),
    }
}
