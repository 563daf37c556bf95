pub mod table;
pub mod terminal;
pub mod utils;

pub use table::{build_table, header_row, page_rows, page_widths};
pub use terminal::TerminalGuard;
