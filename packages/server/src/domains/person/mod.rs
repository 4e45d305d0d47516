pub mod data;
pub mod models;

pub use data::PersonInput;
pub use models::Person;
