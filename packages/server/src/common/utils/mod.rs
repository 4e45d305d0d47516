pub mod current_year;

pub use current_year::*;
