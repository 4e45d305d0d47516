//! Member domain actions
//!
//! Actions take the pool explicitly and return `anyhow::Result`; HTTP status
//! mapping happens in the route handlers.

mod queries;
mod save_member;

pub use queries::{
    count_members, find_member, find_members_by_query, find_members_by_tags, find_members_page,
    MATCH_ALL,
};
pub use save_member::{save_member, save_member_at};
