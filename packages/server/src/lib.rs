// e-Masjid administration API - core
//
// Khairat membership, tabung collections, cadangan box and tetapan settings
// behind one axum server and one Postgres database.
//
// Domains live in domains/*; each keeps sqlx models, request/response data
// types and the actions that orchestrate them.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
