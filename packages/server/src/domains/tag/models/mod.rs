pub mod tag;

pub use tag::{parse_tag_ids, Tag, TagInput};
