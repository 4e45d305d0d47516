pub mod dependent;

pub use dependent::{DependentData, DependentInput};
