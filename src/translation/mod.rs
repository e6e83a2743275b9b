pub mod client;
pub mod parser;
pub mod processor;
pub mod prompt;

pub use client::{GeminiClient, TextGenerator};
pub use parser::{parse_reply, parse_response, strip_code_fences, ParsedReply};
pub use processor::{
    BatchSummary, Pacing, ProgressSink, RowOutcome, RowProcessor, RowResult, RowStage,
    TracingProgress, PARSE_ERROR, TRANSLATION_ERROR,
};
pub use prompt::render_prompt;
