pub mod dependent;

pub use dependent::Dependent;
