use anyhow::{bail, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::utils::now_millis;
use crate::common::{entity_ids, IdRef, KutipanId, PageRequest, TabungId, TabungTypeId};
use crate::domains::tabung::models::tabung::Tabung;
use crate::domains::tabung::models::tabung_type::TabungType;

/// Counts of each coin and note denomination in one collection.
///
/// Field order follows the denominations from 1 sen up to RM100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Denominations {
    #[serde(rename = "total1c", default)]
    pub total_1c: i32,
    #[serde(rename = "total5c", default)]
    pub total_5c: i32,
    #[serde(rename = "total10c", default)]
    pub total_10c: i32,
    #[serde(rename = "total20c", default)]
    pub total_20c: i32,
    #[serde(rename = "total50c", default)]
    pub total_50c: i32,
    #[serde(rename = "total1d", default)]
    pub total_1d: i32,
    #[serde(rename = "total5d", default)]
    pub total_5d: i32,
    #[serde(rename = "total10d", default)]
    pub total_10d: i32,
    #[serde(rename = "total20d", default)]
    pub total_20d: i32,
    #[serde(rename = "total50d", default)]
    pub total_50d: i32,
    #[serde(rename = "total100d", default)]
    pub total_100d: i32,
}

impl Denominations {
    /// `(count, face value)` pairs
    fn pairs(&self) -> [(i32, Decimal); 11] {
        [
            (self.total_1c, Decimal::new(1, 2)),
            (self.total_5c, Decimal::new(5, 2)),
            (self.total_10c, Decimal::new(10, 2)),
            (self.total_20c, Decimal::new(20, 2)),
            (self.total_50c, Decimal::new(50, 2)),
            (self.total_1d, Decimal::new(1, 0)),
            (self.total_5d, Decimal::new(5, 0)),
            (self.total_10d, Decimal::new(10, 0)),
            (self.total_20d, Decimal::new(20, 0)),
            (self.total_50d, Decimal::new(50, 0)),
            (self.total_100d, Decimal::new(100, 0)),
        ]
    }

    /// Ringgit value of the collection
    pub fn total(&self) -> Decimal {
        self.pairs()
            .into_iter()
            .map(|(count, value)| Decimal::from(count) * value)
            .sum()
    }
}

/// Kutipan model - one counted collection for a tabung
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kutipan {
    pub id: KutipanId,
    pub tabung: Tabung,
    /// Epoch millis
    pub create_date: i64,
    #[serde(flatten)]
    pub counts: Denominations,
    /// Derived from `counts`, never stored
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct KutipanRow {
    id: KutipanId,
    create_date: i64,
    tabung_id: TabungId,
    tabung_name: String,
    tabung_cents: bool,
    tabung_type_id: TabungTypeId,
    tabung_type_name: String,
    #[sqlx(flatten)]
    counts: Denominations,
}

impl From<KutipanRow> for Kutipan {
    fn from(row: KutipanRow) -> Self {
        Self {
            id: row.id,
            tabung: Tabung {
                id: row.tabung_id,
                name: row.tabung_name,
                tabung_type: TabungType {
                    id: row.tabung_type_id,
                    name: row.tabung_type_name,
                },
                cents: row.tabung_cents,
            },
            create_date: row.create_date,
            total: row.counts.total(),
            counts: row.counts,
        }
    }
}

/// Kutipan as posted by the dashboard
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KutipanInput {
    #[serde(default)]
    pub id: Option<KutipanId>,
    /// Required when creating; ignored on update
    #[serde(default)]
    pub tabung: Option<IdRef<entity_ids::Tabung>>,
    #[serde(default)]
    pub create_date: Option<i64>,
    #[serde(flatten)]
    pub counts: Denominations,
}

const SELECT_JOINED: &str = "SELECT k.id, k.create_date,
        t.id AS tabung_id, t.name AS tabung_name, t.cents AS tabung_cents,
        tt.id AS tabung_type_id, tt.name AS tabung_type_name,
        k.total_1c, k.total_5c, k.total_10c, k.total_20c, k.total_50c,
        k.total_1d, k.total_5d, k.total_10d, k.total_20d, k.total_50d, k.total_100d
     FROM kutipans k
     JOIN tabungs t ON t.id = k.tabung_id
     JOIN tabung_types tt ON tt.id = t.tabung_type_id";

impl Kutipan {
    pub async fn find_by_id<'e>(
        id: KutipanId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        let sql = format!("{SELECT_JOINED} WHERE k.id = $1");
        let row = sqlx::query_as::<_, KutipanRow>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Into::into))
    }

    /// All kutipan for a tabung, newest id first
    pub async fn find_by_tabung<'e>(
        tabung_id: TabungId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        let sql = format!("{SELECT_JOINED} WHERE k.tabung_id = $1 ORDER BY k.id DESC");
        let rows = sqlx::query_as::<_, KutipanRow>(&sql)
            .bind(tabung_id)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Kutipan for a tabung with `create_date` in `[from, to]`, oldest id first
    pub async fn find_by_tabung_between<'e>(
        tabung_id: TabungId,
        from: i64,
        to: i64,
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        let sql = format!(
            "{SELECT_JOINED}
             WHERE k.tabung_id = $1 AND k.create_date BETWEEN $2 AND $3
             ORDER BY k.id"
        );
        let rows = sqlx::query_as::<_, KutipanRow>(&sql)
            .bind(tabung_id)
            .bind(from)
            .bind(to)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Paginated [`Kutipan::find_by_tabung_between`] plus the total count
    pub async fn find_page_by_tabung_between(
        tabung_id: TabungId,
        from: i64,
        to: i64,
        request: &PageRequest,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        let sql = format!(
            "{SELECT_JOINED}
             WHERE k.tabung_id = $1 AND k.create_date BETWEEN $2 AND $3
             ORDER BY k.id
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, KutipanRow>(&sql)
            .bind(tabung_id)
            .bind(from)
            .bind(to)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM kutipans
             WHERE tabung_id = $1 AND create_date BETWEEN $2 AND $3",
        )
        .bind(tabung_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Insert a new kutipan, or update counts and date of an existing one.
    ///
    /// Updating never moves a kutipan to another tabung.
    pub async fn save(input: &KutipanInput, pool: &PgPool) -> Result<Self> {
        let c = &input.counts;

        let id = match input.id {
            Some(id) => sqlx::query_scalar::<_, KutipanId>(
                "UPDATE kutipans
                 SET create_date = COALESCE($2, create_date),
                     total_1c = $3, total_5c = $4, total_10c = $5, total_20c = $6, total_50c = $7,
                     total_1d = $8, total_5d = $9, total_10d = $10, total_20d = $11,
                     total_50d = $12, total_100d = $13
                 WHERE id = $1
                 RETURNING id",
            )
            .bind(id)
            .bind(input.create_date),
            None => {
                let Some(tabung) = input.tabung else {
                    bail!("kutipan needs a tabung");
                };
                sqlx::query_scalar::<_, KutipanId>(
                    "INSERT INTO kutipans (
                        tabung_id, create_date,
                        total_1c, total_5c, total_10c, total_20c, total_50c,
                        total_1d, total_5d, total_10d, total_20d, total_50d, total_100d
                     )
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                     RETURNING id",
                )
                .bind(tabung.id)
                .bind(input.create_date.unwrap_or_else(now_millis))
            }
        }
        .bind(c.total_1c)
        .bind(c.total_5c)
        .bind(c.total_10c)
        .bind(c.total_20c)
        .bind(c.total_50c)
        .bind(c.total_1d)
        .bind(c.total_5d)
        .bind(c.total_10d)
        .bind(c.total_20d)
        .bind(c.total_50d)
        .bind(c.total_100d)
        .fetch_optional(pool)
        .await?;

        let Some(id) = id else {
            bail!("kutipan {:?} does not exist", input.id);
        };

        match Self::find_by_id(id, pool).await? {
            Some(kutipan) => Ok(kutipan),
            None => bail!("kutipan {} vanished after save", id),
        }
    }

    pub async fn delete<'e>(id: KutipanId, executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM kutipans WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
