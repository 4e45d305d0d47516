use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::{MemberId, PaymentHistoryId};
use crate::domains::payment::data::PaymentInput;

/// PaymentHistory model - one yearly khairat payment
///
/// `payment_date` is epoch millis. A record is "current year" when
/// `payment_date >= current_year_start_millis(now)`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistory {
    pub id: PaymentHistoryId,
    pub member_id: MemberId,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub payment_date: i64,
    pub no_resit: Option<String>,
}

impl PaymentHistory {
    pub async fn insert<'e>(
        member_id: MemberId,
        input: &PaymentInput,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO payment_histories (member_id, amount, payment_date, no_resit)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(member_id)
        .bind(input.amount)
        .bind(input.payment_date)
        .bind(&input.no_resit)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Insert all payments for a member in one statement
    pub async fn insert_many<'e>(
        member_id: MemberId,
        inputs: &[PaymentInput],
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let amounts: Vec<Option<Decimal>> = inputs.iter().map(|p| p.amount).collect();
        let dates: Vec<i64> = inputs.iter().map(|p| p.payment_date).collect();
        let resits: Vec<Option<String>> = inputs.iter().map(|p| p.no_resit.clone()).collect();

        sqlx::query_as::<_, Self>(
            "INSERT INTO payment_histories (member_id, amount, payment_date, no_resit)
             SELECT $1, amount, payment_date, no_resit
             FROM UNNEST($2::numeric[], $3::bigint[], $4::text[])
                  WITH ORDINALITY AS t(amount, payment_date, no_resit, ord)
             ORDER BY ord
             RETURNING *",
        )
        .bind(member_id)
        .bind(amounts)
        .bind(dates)
        .bind(resits)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    /// Latest payment dated on or after `year_start` (epoch millis)
    pub async fn find_current_year<'e>(
        member_id: MemberId,
        year_start: i64,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM payment_histories
             WHERE member_id = $1 AND payment_date >= $2
             ORDER BY payment_date DESC, id DESC
             LIMIT 1",
        )
        .bind(member_id)
        .bind(year_start)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    /// Delete every payment dated on or after `year_start` for the member
    pub async fn delete_current_year<'e>(
        member_id: MemberId,
        year_start: i64,
        executor: impl PgExecutor<'e>,
    ) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM payment_histories WHERE member_id = $1 AND payment_date >= $2",
        )
        .bind(member_id)
        .bind(year_start)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Batch load payments for multiple members, newest first
    pub async fn find_for_member_ids<'e>(
        member_ids: &[MemberId],
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Self>(
            "SELECT * FROM payment_histories
             WHERE member_id = ANY($1)
             ORDER BY payment_date DESC, id DESC",
        )
        .bind(member_ids)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    /// Number of distinct members with a payment dated on or after `year_start`
    pub async fn count_members_paid_since<'e>(
        year_start: i64,
        executor: impl PgExecutor<'e>,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT member_id) FROM payment_histories WHERE payment_date >= $1",
        )
        .bind(year_start)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }
}
