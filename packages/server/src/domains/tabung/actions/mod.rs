//! Tabung and kutipan actions

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{Page, PageRequest, TabungId};
use crate::domains::tabung::models::{Kutipan, KutipanInput, Tabung, TabungInput, TabungType};

/// Save a tabung after resolving its type; an unknown type is an error.
pub async fn save_tabung(input: TabungInput, pool: &PgPool) -> Result<Tabung> {
    info!(name = %input.name, "Saving tabung");

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let tabung_type = TabungType::find_by_id(input.tabung_type.id, &mut *tx)
        .await?
        .with_context(|| format!("tabung type {} does not exist", input.tabung_type.id))?;
    let tabung = Tabung::save(&input, tabung_type, &mut *tx).await?;

    tx.commit().await.context("Failed to commit tabung")?;
    Ok(tabung)
}

pub async fn save_kutipan(input: KutipanInput, pool: &PgPool) -> Result<Kutipan> {
    info!(kutipan_id = ?input.id, "Saving kutipan");
    Kutipan::save(&input, pool).await
}

/// Kutipan in a date range, either all of them or one page.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum KutipanListing {
    All(Vec<Kutipan>),
    Paged(Page<Kutipan>),
}

pub async fn find_kutipan_between(
    tabung_id: TabungId,
    from: i64,
    to: i64,
    page: Option<PageRequest>,
    pool: &PgPool,
) -> Result<KutipanListing> {
    match page {
        None => Ok(KutipanListing::All(
            Kutipan::find_by_tabung_between(tabung_id, from, to, pool).await?,
        )),
        Some(request) => {
            let (content, total) =
                Kutipan::find_page_by_tabung_between(tabung_id, from, to, &request, pool).await?;
            Ok(KutipanListing::Paged(Page::new(content, total, &request)))
        }
    }
}
