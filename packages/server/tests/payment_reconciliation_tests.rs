//! Integration tests for the current-year payment rules.

mod common;

use crate::common::*;
use chrono::{TimeZone, Utc};
use emasjid_core::common::utils::{current_year_start_millis, now_millis};
use emasjid_core::common::{IdRef, MemberId};
use emasjid_core::domains::member::actions::{find_member, save_member_at};
use emasjid_core::domains::member::{MemberData, MemberInput};
use emasjid_core::domains::payment::actions::{
    delete_current_year_payment, save_payment, total_members_paid_for_current_year,
};
use emasjid_core::domains::payment::{NewPayment, PaymentInput};
use rust_decimal::Decimal;
use test_context::test_context;

const LAST_YEAR: i64 = 1_690_000_000_000; // 2023-07-22
const THIS_YEAR: i64 = 1_710_000_000_000; // 2024-03-09

fn clock() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap()
}

fn update_with(member: &MemberData, payments: Vec<PaymentInput>) -> MemberInput {
    MemberInput {
        id: Some(member.id),
        person: person(&member.person.name),
        member_tags: Vec::new(),
        dependents: Vec::new(),
        payment_histories: payments,
    }
}

fn create_with(name: &str, payments: Vec<PaymentInput>) -> MemberInput {
    MemberInput {
        id: None,
        person: person(name),
        member_tags: Vec::new(),
        dependents: Vec::new(),
        payment_histories: payments,
    }
}

#[test]
fn fixture_dates_straddle_year_start() {
    let start = current_year_start_millis(clock());
    assert!(LAST_YEAR < start);
    assert!(THIS_YEAR >= start);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_inserts_first_new_payment_when_none_this_year(ctx: &TestHarness) {
    // Arrange
    let member = save_member_at(
        create_with(&unique("Bayar"), vec![payment(50, LAST_YEAR)]),
        clock(),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Act
    let updated = save_member_at(
        update_with(&member, vec![payment(60, THIS_YEAR), payment(70, THIS_YEAR + 1)]),
        clock(),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Assert: only the first new entry is stored, last year's stays
    assert_eq!(updated.payment_histories.len(), 2);
    let current: Vec<_> = updated
        .payment_histories
        .iter()
        .filter(|p| p.payment_date >= THIS_YEAR)
        .collect();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].amount, Some(Decimal::new(60, 0)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_leaves_existing_current_year_payment(ctx: &TestHarness) {
    // Arrange
    let member = save_member_at(
        create_with(&unique("Sudah"), vec![payment(60, THIS_YEAR)]),
        clock(),
        &ctx.db_pool,
    )
    .await
    .unwrap();
    let existing = member.payment_histories[0].clone();

    // Act
    let updated = save_member_at(
        update_with(&member, vec![payment(999, THIS_YEAR + 5)]),
        clock(),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Assert
    assert_eq!(updated.payment_histories.len(), 1);
    assert_eq!(updated.payment_histories[0].id, existing.id);
    assert_eq!(updated.payment_histories[0].amount, Some(Decimal::new(60, 0)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_with_only_known_payments_changes_nothing(ctx: &TestHarness) {
    // Arrange
    let member = save_member_at(
        create_with(&unique("Lama"), vec![payment(40, LAST_YEAR)]),
        clock(),
        &ctx.db_pool,
    )
    .await
    .unwrap();
    let known = PaymentInput {
        id: Some(member.payment_histories[0].id),
        ..payment(40, LAST_YEAR)
    };

    // Act
    let updated = save_member_at(update_with(&member, vec![known]), clock(), &ctx.db_pool)
        .await
        .unwrap();

    // Assert
    assert_eq!(updated.payment_histories.len(), 1);
    assert_eq!(updated.payment_histories[0].id, member.payment_histories[0].id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_with_empty_payments_clears_current_year_only(ctx: &TestHarness) {
    // Arrange
    let member = save_member_at(
        create_with(
            &unique("Kosong"),
            vec![payment(50, LAST_YEAR), payment(60, THIS_YEAR)],
        ),
        clock(),
        &ctx.db_pool,
    )
    .await
    .unwrap();
    assert_eq!(member.payment_histories.len(), 2);

    // Act
    let updated = save_member_at(update_with(&member, Vec::new()), clock(), &ctx.db_pool)
        .await
        .unwrap();

    // Assert
    assert_eq!(updated.payment_histories.len(), 1);
    assert_eq!(updated.payment_histories[0].payment_date, LAST_YEAR);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn save_payment_replaces_current_year_record(ctx: &TestHarness) {
    // Arrange
    let now = now_millis();
    let member = create_test_member(&ctx.db_pool, &unique("Ganti")).await.unwrap();
    save_payment(
        NewPayment {
            member: IdRef::from(member.id),
            payment: payment(10, now),
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Act
    let second = save_payment(
        NewPayment {
            member: IdRef::from(member.id),
            payment: PaymentInput {
                no_resit: Some("R-002".to_string()),
                ..payment(20, now)
            },
        },
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Assert
    let reloaded = find_member(member.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(reloaded.payment_histories.len(), 1);
    assert_eq!(reloaded.payment_histories[0].id, second.id);
    assert_eq!(reloaded.payment_histories[0].no_resit.as_deref(), Some("R-002"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn save_payment_for_missing_member_fails(ctx: &TestHarness) {
    let result = save_payment(
        NewPayment {
            member: IdRef::from(MemberId::new(i64::MAX)),
            payment: payment(10, now_millis()),
        },
        &ctx.db_pool,
    )
    .await;

    assert!(result.is_err());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_and_count_current_year_payments(ctx: &TestHarness) {
    // Arrange
    let now = now_millis();
    let before = total_members_paid_for_current_year(&ctx.db_pool).await.unwrap();
    let member = save_member_at(
        create_with(&unique("Kira"), vec![payment(60, now)]),
        Utc::now(),
        &ctx.db_pool,
    )
    .await
    .unwrap();

    // Act + Assert
    let after_save = total_members_paid_for_current_year(&ctx.db_pool).await.unwrap();
    assert!(after_save >= before + 1);

    let removed = delete_current_year_payment(member.id, &ctx.db_pool).await.unwrap();
    assert_eq!(removed, 1);

    let reloaded = find_member(member.id, &ctx.db_pool).await.unwrap().unwrap();
    assert!(reloaded.payment_histories.is_empty());
}
