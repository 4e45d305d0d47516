use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::CadanganTypeId;

/// Seeded type ids, in the order `/cadangan/count` reports them.
pub const BARU: i64 = 1;
pub const CADANGAN: i64 = 2;
pub const ADUAN: i64 = 3;
pub const LAIN_LAIN: i64 = 4;

/// CadanganType model - lookup row (Baru, Cadangan, Aduan, Lain-lain)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CadanganType {
    pub id: CadanganTypeId,
    pub name: String,
}

impl CadanganType {
    pub async fn find_all<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM cadangan_types ORDER BY id")
            .fetch_all(executor)
            .await
            .map_err(Into::into)
    }
}
