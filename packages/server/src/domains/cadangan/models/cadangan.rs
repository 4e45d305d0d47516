use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::utils::now_millis;
use crate::common::{entity_ids, CadanganId, CadanganTypeId, IdRef, PageRequest};
use crate::domains::cadangan::models::cadangan_type::{CadanganType, ADUAN, BARU, CADANGAN, LAIN_LAIN};

/// Cadangan model - a suggestion or complaint and the action taken on it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cadangan {
    pub id: CadanganId,
    pub cadangan_type: CadanganType,
    pub cadangan_text: String,
    pub tindakan_text: Option<String>,
    pub cadangan_nama: Option<String>,
    pub cadangan_email: Option<String>,
    pub cadangan_phone: Option<String>,
    pub score: Option<i32>,
    pub is_open: bool,
    /// Epoch millis
    pub create_date: i64,
}

/// A cadangan row joined with its type name
#[derive(Debug, sqlx::FromRow)]
struct CadanganRow {
    id: CadanganId,
    cadangan_type_id: CadanganTypeId,
    cadangan_type_name: String,
    cadangan_text: String,
    tindakan_text: Option<String>,
    cadangan_nama: Option<String>,
    cadangan_email: Option<String>,
    cadangan_phone: Option<String>,
    score: Option<i32>,
    is_open: bool,
    create_date: i64,
}

impl From<CadanganRow> for Cadangan {
    fn from(row: CadanganRow) -> Self {
        Self {
            id: row.id,
            cadangan_type: CadanganType {
                id: row.cadangan_type_id,
                name: row.cadangan_type_name,
            },
            cadangan_text: row.cadangan_text,
            tindakan_text: row.tindakan_text,
            cadangan_nama: row.cadangan_nama,
            cadangan_email: row.cadangan_email,
            cadangan_phone: row.cadangan_phone,
            score: row.score,
            is_open: row.is_open,
            create_date: row.create_date,
        }
    }
}

/// Cadangan as posted by the dashboard or the public form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadanganInput {
    #[serde(default)]
    pub cadangan_type: Option<IdRef<entity_ids::CadanganType>>,
    pub cadangan_text: String,
    #[serde(default)]
    pub tindakan_text: Option<String>,
    #[serde(default)]
    pub cadangan_nama: Option<String>,
    #[serde(default)]
    pub cadangan_email: Option<String>,
    #[serde(default)]
    pub cadangan_phone: Option<String>,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default = "default_open")]
    pub is_open: bool,
    #[serde(default)]
    pub create_date: Option<i64>,
}

fn default_open() -> bool {
    true
}

impl CadanganInput {
    fn type_id(&self) -> CadanganTypeId {
        self.cadangan_type
            .map(|t| t.id)
            .unwrap_or(CadanganTypeId::new(BARU))
    }
}

/// Open cadangan per type plus all closed ones:
/// `[baru, cadangan, aduan, lain-lain, closed]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct CadanganCounts {
    pub total_baru: i64,
    pub total_cadangan: i64,
    pub total_aduan: i64,
    pub total_lain: i64,
    pub total_closed: i64,
}

impl CadanganCounts {
    pub fn to_array(self) -> [i64; 5] {
        [
            self.total_baru,
            self.total_cadangan,
            self.total_aduan,
            self.total_lain,
            self.total_closed,
        ]
    }
}

const SELECT_JOINED: &str = "SELECT c.id, c.cadangan_type_id, ct.name AS cadangan_type_name,
        c.cadangan_text, c.tindakan_text, c.cadangan_nama, c.cadangan_email,
        c.cadangan_phone, c.score, c.is_open, c.create_date
     FROM cadangan c
     JOIN cadangan_types ct ON ct.id = c.cadangan_type_id";

impl Cadangan {
    pub async fn find_by_id<'e>(
        id: CadanganId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        let sql = format!("{SELECT_JOINED} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CadanganRow>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(Into::into))
    }

    /// One page ordered by id, filtered by open flag and optionally by type
    pub async fn find_page(
        type_id: Option<CadanganTypeId>,
        is_open: bool,
        request: &PageRequest,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        let sql = format!(
            "{SELECT_JOINED}
             WHERE c.is_open = $1 AND ($2::bigint IS NULL OR c.cadangan_type_id = $2)
             ORDER BY c.id
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, CadanganRow>(&sql)
            .bind(is_open)
            .bind(type_id)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM cadangan
             WHERE is_open = $1 AND ($2::bigint IS NULL OR cadangan_type_id = $2)",
        )
        .bind(is_open)
        .bind(type_id)
        .fetch_one(pool)
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn counts<'e>(executor: impl PgExecutor<'e>) -> Result<CadanganCounts> {
        sqlx::query_as::<_, CadanganCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE cadangan_type_id = $1 AND is_open) AS total_baru,
                COUNT(*) FILTER (WHERE cadangan_type_id = $2 AND is_open) AS total_cadangan,
                COUNT(*) FILTER (WHERE cadangan_type_id = $3 AND is_open) AS total_aduan,
                COUNT(*) FILTER (WHERE cadangan_type_id = $4 AND is_open) AS total_lain,
                COUNT(*) FILTER (WHERE NOT is_open) AS total_closed
             FROM cadangan",
        )
        .bind(BARU)
        .bind(CADANGAN)
        .bind(ADUAN)
        .bind(LAIN_LAIN)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Insert a new cadangan; `create_date` defaults to now.
    pub async fn insert(input: &CadanganInput, pool: &PgPool) -> Result<Self> {
        let id = sqlx::query_scalar::<_, CadanganId>(
            "INSERT INTO cadangan (cadangan_type_id, cadangan_text, tindakan_text, cadangan_nama,
                                   cadangan_email, cadangan_phone, score, is_open, create_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(input.type_id())
        .bind(&input.cadangan_text)
        .bind(&input.tindakan_text)
        .bind(&input.cadangan_nama)
        .bind(&input.cadangan_email)
        .bind(&input.cadangan_phone)
        .bind(input.score)
        .bind(input.is_open)
        .bind(input.create_date.unwrap_or_else(now_millis))
        .fetch_one(pool)
        .await?;

        Self::reload(id, pool).await
    }

    /// Overwrite an existing cadangan. A missing `create_date` keeps the stored one.
    pub async fn update(id: CadanganId, input: &CadanganInput, pool: &PgPool) -> Result<Self> {
        let updated = sqlx::query_scalar::<_, CadanganId>(
            "UPDATE cadangan
             SET cadangan_type_id = $2, cadangan_text = $3, tindakan_text = $4,
                 cadangan_nama = $5, cadangan_email = $6, cadangan_phone = $7,
                 score = $8, is_open = $9, create_date = COALESCE($10, create_date)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.type_id())
        .bind(&input.cadangan_text)
        .bind(&input.tindakan_text)
        .bind(&input.cadangan_nama)
        .bind(&input.cadangan_email)
        .bind(&input.cadangan_phone)
        .bind(input.score)
        .bind(input.is_open)
        .bind(input.create_date)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::reload(id, pool).await,
            None => bail!("cadangan {} does not exist", id),
        }
    }

    pub async fn delete<'e>(id: CadanganId, executor: impl PgExecutor<'e>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cadangan WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    async fn reload(id: CadanganId, pool: &PgPool) -> Result<Self> {
        match Self::find_by_id(id, pool).await? {
            Some(cadangan) => Ok(cadangan),
            None => bail!("cadangan {} vanished after save", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults() {
        let input: CadanganInput =
            serde_json::from_str(r#"{"cadanganText": "Tambah kipas di dewan solat"}"#).unwrap();

        assert_eq!(input.type_id(), CadanganTypeId::new(BARU));
        assert!(input.is_open);
        assert!(input.create_date.is_none());
    }

    #[test]
    fn test_input_reads_nested_type() {
        let input: CadanganInput = serde_json::from_str(
            r#"{"cadanganType": {"id": 3, "name": "Aduan"}, "cadanganText": "Lampu rosak", "isOpen": false}"#,
        )
        .unwrap();

        assert_eq!(input.type_id(), CadanganTypeId::new(ADUAN));
        assert!(!input.is_open);
    }

    #[test]
    fn test_counts_array_order() {
        let counts = CadanganCounts {
            total_baru: 1,
            total_cadangan: 2,
            total_aduan: 3,
            total_lain: 4,
            total_closed: 5,
        };
        assert_eq!(counts.to_array(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_serializes_nested_type() {
        let cadangan = Cadangan {
            id: CadanganId::new(7),
            cadangan_type: CadanganType {
                id: CadanganTypeId::new(2),
                name: "Cadangan".to_string(),
            },
            cadangan_text: "Kelas tajwid".to_string(),
            tindakan_text: None,
            cadangan_nama: None,
            cadangan_email: None,
            cadangan_phone: None,
            score: Some(4),
            is_open: true,
            create_date: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&cadangan).unwrap();
        assert_eq!(json["cadanganType"]["id"], 2);
        assert_eq!(json["isOpen"], true);
        assert_eq!(json["createDate"], 1_700_000_000_000_i64);
    }
}
