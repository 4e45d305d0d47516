//! Integration tests for tabung and kutipan records.

mod common;

use crate::common::*;
use emasjid_core::common::{IdRef, PageRequest, TabungId, TabungTypeId};
use emasjid_core::domains::tabung::actions::{
    find_kutipan_between, save_kutipan, save_tabung, KutipanListing,
};
use emasjid_core::domains::tabung::{Denominations, Kutipan, KutipanInput, Tabung, TabungInput};
use rust_decimal::Decimal;
use test_context::test_context;

fn kutipan(tabung_id: TabungId, create_date: i64, counts: Denominations) -> KutipanInput {
    KutipanInput {
        id: None,
        tabung: Some(IdRef::from(tabung_id)),
        create_date: Some(create_date),
        counts,
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn save_tabung_resolves_type(ctx: &TestHarness) {
    // Arrange
    let tabung_id = create_test_tabung(&ctx.db_pool, true).await.unwrap();

    // Act
    let tabung = Tabung::find_by_id(tabung_id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert!(tabung.cents);
    assert!(tabung.tabung_type.name.starts_with("Jenis"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn save_tabung_with_unknown_type_fails(ctx: &TestHarness) {
    let result = save_tabung(
        TabungInput {
            id: None,
            name: unique("Yatim"),
            tabung_type: IdRef::from(TabungTypeId::new(i64::MAX)),
            cents: false,
        },
        &ctx.db_pool,
    )
    .await;

    assert!(result.is_err());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn kutipan_total_is_derived_from_counts(ctx: &TestHarness) {
    // Arrange
    let tabung_id = create_test_tabung(&ctx.db_pool, true).await.unwrap();
    let counts = Denominations {
        total_10c: 3,
        total_50c: 1,
        total_1d: 4,
        total_50d: 2,
        ..Default::default()
    };

    // Act
    let saved = save_kutipan(kutipan(tabung_id, 1_700_000_000_000, counts), &ctx.db_pool)
        .await
        .unwrap();

    // Assert: 0.30 + 0.50 + 4 + 100
    assert_eq!(saved.total, Decimal::new(10480, 2));
    assert_eq!(saved.counts, counts);
    assert_eq!(saved.tabung.id, tabung_id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_kutipan_keeps_tabung_and_date(ctx: &TestHarness) {
    // Arrange
    let tabung_id = create_test_tabung(&ctx.db_pool, false).await.unwrap();
    let other_tabung = create_test_tabung(&ctx.db_pool, false).await.unwrap();
    let saved = save_kutipan(
        kutipan(tabung_id, 1_700_000_000_000, Denominations::default()),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Act
    let updated = save_kutipan(
        KutipanInput {
            id: Some(saved.id),
            tabung: Some(IdRef::from(other_tabung)),
            create_date: None,
            counts: Denominations {
                total_100d: 1,
                ..Default::default()
            },
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(updated.tabung.id, tabung_id);
    assert_eq!(updated.create_date, 1_700_000_000_000);
    assert_eq!(updated.total, Decimal::new(100, 0));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn new_kutipan_without_tabung_fails(ctx: &TestHarness) {
    let result = save_kutipan(
        KutipanInput {
            id: None,
            tabung: None,
            create_date: None,
            counts: Denominations::default(),
        },
        &ctx.db_pool,
    )
    .await;

    assert!(result.is_err());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn between_dates_lists_or_pages(ctx: &TestHarness) {
    // Arrange
    let tabung_id = create_test_tabung(&ctx.db_pool, false).await.unwrap();
    for date in [1_000, 2_000, 3_000, 9_000] {
        save_kutipan(kutipan(tabung_id, date, Denominations::default()), &ctx.db_pool)
            .await
            .unwrap();
    }

    // Act
    let all = find_kutipan_between(tabung_id, 1_000, 3_000, None, &ctx.db_pool)
        .await
        .unwrap();
    let paged = find_kutipan_between(
        tabung_id,
        1_000,
        3_000,
        Some(PageRequest::of(1, 2)),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Assert: bounds are inclusive, oldest first
    match all {
        KutipanListing::All(rows) => {
            let dates: Vec<_> = rows.iter().map(|k| k.create_date).collect();
            assert_eq!(dates, vec![1_000, 2_000, 3_000]);
        }
        KutipanListing::Paged(_) => panic!("expected a plain list"),
    }
    match paged {
        KutipanListing::Paged(page) => {
            assert_eq!(page.total_elements, 3);
            assert_eq!(page.content.len(), 1);
            assert_eq!(page.content[0].create_date, 3_000);
        }
        KutipanListing::All(_) => panic!("expected a page"),
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn listing_by_tabung_is_newest_first_and_delete_cascades(ctx: &TestHarness) {
    // Arrange
    let tabung_id = create_test_tabung(&ctx.db_pool, false).await.unwrap();
    let first = save_kutipan(kutipan(tabung_id, 1, Denominations::default()), &ctx.db_pool)
        .await
        .unwrap();
    let second = save_kutipan(kutipan(tabung_id, 2, Denominations::default()), &ctx.db_pool)
        .await
        .unwrap();

    // Act
    let listed = Kutipan::find_by_tabung(tabung_id, &ctx.db_pool).await.unwrap();
    let removed = Tabung::delete(tabung_id, &ctx.db_pool).await.unwrap();

    // Assert
    let ids: Vec<_> = listed.iter().map(|k| k.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(removed, 1);
    assert!(Kutipan::find_by_id(first.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
}
