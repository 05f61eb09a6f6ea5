pub mod formatter;
pub mod payload;

pub use formatter::{format_contributor_table, format_metadata, should_use_colors};
pub use payload::to_json;
