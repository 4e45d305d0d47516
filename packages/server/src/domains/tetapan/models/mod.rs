pub mod tetapan;

pub use tetapan::Tetapan;
