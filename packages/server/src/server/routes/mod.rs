// HTTP routes
pub mod cadangan;
pub mod dependents;
pub mod health;
pub mod kutipan;
pub mod members;
pub mod payments;
pub mod tabung;
pub mod tags;
pub mod tetapan;

pub use health::*;
