pub mod actions;
pub mod data;
pub mod loader;
pub mod models;

pub use data::{MemberData, MemberInput};
pub use models::Member;
