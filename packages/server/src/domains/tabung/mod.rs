pub mod actions;
pub mod models;

pub use models::{Denominations, Kutipan, KutipanInput, Tabung, TabungInput, TabungType, TabungTypeInput};
