pub mod member;

pub use member::{MemberData, MemberInput, MemberTagData, MemberTagInput};
