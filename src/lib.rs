pub mod spreadsheet;
pub mod translation;
pub mod utils;

pub use spreadsheet::{load_table, output_file_name, write_table, write_table_to_buffer, Table};
pub use translation::{
    BatchSummary, GeminiClient, Pacing, ProgressSink, RowOutcome, RowProcessor, TextGenerator,
    TracingProgress,
};
pub use utils::{AppConfig, Result, TranslatorError};
