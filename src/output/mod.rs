pub mod formatter;
pub mod writer;

pub use formatter::{format_stats_summary, should_use_colors};
pub use writer::{format_json, write_output};
