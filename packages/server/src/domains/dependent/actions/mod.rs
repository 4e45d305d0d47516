//! Dependent actions

mod delete_dependent;
mod queries;
mod save_dependent;

pub use delete_dependent::delete_dependent;
pub use queries::{find_by_member_id, load_for_member_ids};
pub use save_dependent::{save_dependent, save_dependent_in};
