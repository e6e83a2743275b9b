pub mod reader;
pub mod table;
pub mod writer;

pub use reader::{load_table, load_table_from_bytes, InputFormat};
pub use table::{normalize_header, InputRow, Table, COLUMN_MAPPING, KEY_COLUMN, TEXT_COLUMN};
pub use writer::{output_file_name, write_table, write_table_to_buffer};
