use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(String),

    #[error("XLSX write error: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Unsupported input format: {0} (expected .xlsx or .csv)")]
    UnsupportedFormat(String),

    #[error("The uploaded file must contain columns named 'Key' and 'Text in english to be translated' (missing '{column}')")]
    MissingColumn { column: String },

    #[error("No API key supplied. Pass --api-key or set GOOGLE_API_KEY")]
    MissingCredential,

    #[error("Error configuring the API. Please check your key. Details: {0}")]
    InvalidCredential(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Unexpected reply shape: {0}")]
    UnexpectedReply(String),

    #[error("Row count mismatch: expected {expected}, got {got}")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl TranslatorError {
    /// Fatal errors stop the run before any row is sent to the model.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TranslatorError::MissingCredential
                | TranslatorError::InvalidCredential(_)
                | TranslatorError::ConfigError(_)
                | TranslatorError::MissingColumn { .. }
                | TranslatorError::UnsupportedFormat(_)
                | TranslatorError::SpreadsheetError(_)
                | TranslatorError::FileNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
