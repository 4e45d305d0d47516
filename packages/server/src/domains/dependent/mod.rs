pub mod actions;
pub mod data;
pub mod models;

pub use data::{DependentData, DependentInput};
pub use models::Dependent;
