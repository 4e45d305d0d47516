pub mod models;

pub use models::{parse_tag_ids, Tag, TagInput};
