pub mod actions;
pub mod data;
pub mod models;

pub use data::{NewPayment, PaymentInput};
pub use models::PaymentHistory;
