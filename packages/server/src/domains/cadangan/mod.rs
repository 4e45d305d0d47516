pub mod models;

pub use models::{Cadangan, CadanganCounts, CadanganInput, CadanganType};
