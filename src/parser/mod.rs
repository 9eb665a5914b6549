pub mod visitor;
pub mod tokenizer;
pub mod tag_counter;
pub mod patterns;

pub use tag_counter::{count_elements, TagCounts};
