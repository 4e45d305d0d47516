pub mod member;
pub mod member_tag;

pub use member::{Member, MEMBER_SORT_COLUMNS};
pub use member_tag::{MemberTag, MemberTagRow};
