pub mod formatter;
pub mod writer;

pub use formatter::{
    format_json, format_region_detail, format_results_table, format_score, format_tsv,
    should_use_colors, OutputFormat,
};
pub use writer::{save_results, write_results, RESULT_COLUMNS};
