pub mod payment;

pub use payment::{NewPayment, PaymentInput};
