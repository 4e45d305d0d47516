// Business domains
pub mod cadangan;
pub mod dependent;
pub mod member;
pub mod payment;
pub mod person;
pub mod tabung;
pub mod tag;
pub mod tetapan;
