//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods and actions directly. The database is
//! shared between tests, so every name is made unique with [`unique`].

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use emasjid_core::common::{IdRef, TabungId, TagId};
use emasjid_core::domains::dependent::DependentInput;
use emasjid_core::domains::member::actions::save_member;
use emasjid_core::domains::member::data::MemberTagInput;
use emasjid_core::domains::member::{MemberData, MemberInput};
use emasjid_core::domains::payment::PaymentInput;
use emasjid_core::domains::person::PersonInput;
use emasjid_core::domains::tabung::actions::save_tabung;
use emasjid_core::domains::tabung::{TabungInput, TabungType, TabungTypeInput};
use emasjid_core::domains::tag::{Tag, TagInput};
use rust_decimal::Decimal;
use sqlx::PgPool;

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A name no other test in this run will produce.
pub fn unique(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{} {}-{}", prefix, std::process::id(), n)
}

pub fn person(name: &str) -> PersonInput {
    PersonInput {
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn payment(amount: i64, payment_date: i64) -> PaymentInput {
    PaymentInput {
        id: None,
        amount: Some(Decimal::new(amount, 0)),
        payment_date,
        no_resit: None,
    }
}

pub fn dependent(name: &str, hubungan_id: i32) -> DependentInput {
    DependentInput {
        id: None,
        person: person(name),
        hubungan_id: Some(hubungan_id),
    }
}

pub fn member_tags(tag_ids: &[TagId]) -> Vec<MemberTagInput> {
    tag_ids
        .iter()
        .map(|&id| MemberTagInput {
            id: None,
            tag: IdRef::from(id),
        })
        .collect()
}

/// Create a tag with a unique name
pub async fn create_test_tag(pool: &PgPool, prefix: &str) -> Result<Tag> {
    Tag::save(
        &TagInput {
            id: None,
            name: unique(prefix),
        },
        pool,
    )
    .await
}

/// Create a member with just a person
pub async fn create_test_member(pool: &PgPool, name: &str) -> Result<MemberData> {
    save_member(
        MemberInput {
            id: None,
            person: person(name),
            member_tags: Vec::new(),
            dependents: Vec::new(),
            payment_histories: Vec::new(),
        },
        pool,
    )
    .await
}

/// Create a member carrying the given tags
pub async fn create_test_member_with_tags(
    pool: &PgPool,
    name: &str,
    tag_ids: &[TagId],
) -> Result<MemberData> {
    save_member(
        MemberInput {
            id: None,
            person: person(name),
            member_tags: member_tags(tag_ids),
            dependents: Vec::new(),
            payment_histories: Vec::new(),
        },
        pool,
    )
    .await
}

/// Create a tabung (and a fresh type for it)
pub async fn create_test_tabung(pool: &PgPool, cents: bool) -> Result<TabungId> {
    let tabung_type = TabungType::save(
        &TabungTypeInput {
            id: None,
            name: unique("Jenis"),
        },
        pool,
    )
    .await?;

    let tabung = save_tabung(
        TabungInput {
            id: None,
            name: unique("Tabung"),
            tabung_type: IdRef::from(tabung_type.id),
            cents,
        },
        pool,
    )
    .await?;

    Ok(tabung.id)
}
