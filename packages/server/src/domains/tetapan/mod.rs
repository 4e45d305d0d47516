pub mod models;

pub use models::Tetapan;
