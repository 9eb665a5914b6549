pub mod hex;
pub mod wcag;
pub mod color_parse;
pub mod vision;
