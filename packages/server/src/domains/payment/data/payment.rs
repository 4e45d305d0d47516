use rust_decimal::Decimal;
use serde::Deserialize;

use crate::common::utils::now_millis;
use crate::common::{IdRef, Member, PaymentHistoryId};

/// Payment fields as posted inside a member aggregate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Present for records the client already knows about
    #[serde(default)]
    pub id: Option<PaymentHistoryId>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default = "now_millis")]
    pub payment_date: i64,
    #[serde(default)]
    pub no_resit: Option<String>,
}

/// Body of `POST /payment/save`: a payment plus the member it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    pub member: IdRef<Member>,
    #[serde(flatten)]
    pub payment: PaymentInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MemberId;

    #[test]
    fn test_payment_input_defaults() {
        let input: PaymentInput = serde_json::from_str(r#"{"amount": 50}"#).unwrap();
        assert!(input.id.is_none());
        assert_eq!(input.amount, Some(Decimal::new(50, 0)));
        assert!(input.payment_date > 0);
        assert!(input.no_resit.is_none());
    }

    #[test]
    fn test_new_payment_reads_member_reference() {
        let payment: NewPayment = serde_json::from_str(
            r#"{"member": {"id": 12}, "amount": 30.5, "paymentDate": 1700000000000, "noResit": "R-1"}"#,
        )
        .unwrap();

        assert_eq!(payment.member.id, MemberId::new(12));
        assert_eq!(payment.payment.amount, Some(Decimal::new(305, 1)));
        assert_eq!(payment.payment.payment_date, 1_700_000_000_000);
        assert_eq!(payment.payment.no_resit.as_deref(), Some("R-1"));
    }
}
