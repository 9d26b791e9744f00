pub mod formatter;
pub mod writer;

pub use formatter::{
    display_post_id, format_breakdown, format_summary, format_tsv, should_use_colors,
};
pub use writer::{card_path, write_card};
