pub mod cadangan;
pub mod cadangan_type;

pub use cadangan::{Cadangan, CadanganCounts, CadanganInput};
pub use cadangan_type::CadanganType;
