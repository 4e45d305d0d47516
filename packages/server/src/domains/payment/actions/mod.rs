//! Payment actions
//!
//! A member keeps at most one "current year" payment. Setting it is a
//! delete-then-insert inside one transaction.

mod reconcile;
mod save_payment;

pub use reconcile::{reconcile_payments, ReconcileOutcome};
pub use save_payment::{
    delete_current_year_payment, replace_current_year_payment, save_payment,
    total_members_paid_for_current_year,
};
