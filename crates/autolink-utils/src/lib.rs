pub mod slug;
pub mod text;

pub use slug::slugify;
pub use text::{encode_html_weak, escape_markdown};
