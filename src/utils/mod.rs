pub mod text;
pub mod time;

pub use text::{pad_to_width, truncate_to_width};
pub use time::{current_human_timestamp, format_fetched_at};
