//! Markdown escaping and the minijinja output format for docgen.

mod escape;
mod format;
mod source;

pub use escape::escape;
pub use format::{install, FORMAT_NAME, MIME_TYPE};
pub use source::escape_source;
