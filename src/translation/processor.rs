use crate::spreadsheet::{InputRow, Table};
use crate::translation::client::TextGenerator;
use crate::translation::parser::{parse_response, ParsedReply};
use crate::translation::prompt::render_prompt;
use crate::utils::{PacingConfig, Result, TranslatorError};
use std::fmt;
use std::time::Duration;

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const TRANSLATION_ERROR: &str = "TRANSLATION_ERROR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStage {
    Format,
    Call,
    Parse,
}

impl fmt::Display for RowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStage::Format => write!(f, "format"),
            RowStage::Call => write!(f, "call"),
            RowStage::Parse => write!(f, "parse"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Translated(String),
    ParseError,
    TranslationError { stage: RowStage, reason: String },
}

impl RowOutcome {
    /// The string written into the output column.
    pub fn cell_value(&self) -> &str {
        match self {
            RowOutcome::Translated(text) => text.as_str(),
            RowOutcome::ParseError => PARSE_ERROR,
            RowOutcome::TranslationError { .. } => TRANSLATION_ERROR,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RowOutcome::Translated(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowResult {
    pub index: usize,
    pub key: String,
    pub outcome: RowOutcome,
}

/// Constant wait inserted after every row, whatever its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub delay_after_row: Duration,
}

impl Pacing {
    pub fn new(delay_after_row: Duration) -> Self {
        Self { delay_after_row }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    async fn wait(&self) {
        if !self.delay_after_row.is_zero() {
            tokio::time::sleep(self.delay_after_row).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from(&PacingConfig::default())
    }
}

impl From<&PacingConfig> for Pacing {
    fn from(config: &PacingConfig) -> Self {
        Self::new(config.delay())
    }
}

pub trait ProgressSink {
    fn row_started(&mut self, _position: usize, _total: usize, _key: &str) {}

    /// Called once per row, after its outcome is known.
    fn row_finished(&mut self, completed: usize, total: usize, result: &RowResult);

    fn warning(&mut self, key: &str, message: &str);
}

/// Reports progress through `tracing`.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn row_started(&mut self, position: usize, total: usize, key: &str) {
        tracing::info!("Translating row {}/{} (Key: {})", position, total, key);
    }

    fn row_finished(&mut self, completed: usize, total: usize, result: &RowResult) {
        let percent = if total > 0 {
            completed as f32 / total as f32 * 100.0
        } else {
            100.0
        };
        tracing::info!(
            key = %result.key,
            completed,
            total,
            ok = result.outcome.is_success(),
            "Progress {:.0}%",
            percent
        );
    }

    fn warning(&mut self, key: &str, message: &str) {
        tracing::warn!("Error on key '{}': {}. Skipping.", key, message);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub translated: usize,
    pub parse_errors: usize,
    pub translation_errors: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[RowResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Self::default()
            },
            |mut summary, result| {
                match result.outcome {
                    RowOutcome::Translated(_) => summary.translated += 1,
                    RowOutcome::ParseError => summary.parse_errors += 1,
                    RowOutcome::TranslationError { .. } => summary.translation_errors += 1,
                }
                summary
            },
        )
    }
}

pub struct RowProcessor<'a, G> {
    generator: &'a G,
    pacing: Pacing,
}

impl<'a, G: TextGenerator> RowProcessor<'a, G> {
    pub fn new(generator: &'a G, pacing: Pacing) -> Self {
        Self { generator, pacing }
    }

    /// Runs format, call and parse for one row. Never fails: errors become sentinels.
    pub async fn process_row(&self, row: InputRow<'_>) -> RowResult {
        let outcome = match self.translate_row(row).await {
            Ok(outcome) => outcome,
            Err((stage, err)) => RowOutcome::TranslationError {
                stage,
                reason: err.to_string(),
            },
        };

        RowResult {
            index: row.index,
            key: row.key.to_string(),
            outcome,
        }
    }

    async fn translate_row(
        &self,
        row: InputRow<'_>,
    ) -> std::result::Result<RowOutcome, (RowStage, TranslatorError)> {
        let prompt = render_prompt(row.key, row.text);

        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| (RowStage::Call, e))?;

        let reply = parse_response(&raw).map_err(|e| (RowStage::Parse, e))?;

        Ok(match reply {
            ParsedReply::Translation { text, echoed_key } => {
                if let Some(echoed) = echoed_key.filter(|k| k != row.key) {
                    tracing::warn!(key = %row.key, echoed = %echoed, "Model echoed a different key");
                }
                RowOutcome::Translated(text)
            }
            ParsedReply::MissingField => {
                tracing::debug!(key = %row.key, "Reply has no german_translation field");
                RowOutcome::ParseError
            }
        })
    }

    /// Translates every row in order. The result has exactly one entry per input row.
    pub async fn run<P: ProgressSink>(&self, table: &Table, progress: &mut P) -> Vec<RowResult> {
        let total = table.row_count();
        let mut results = Vec::with_capacity(total);

        for row in table.input_rows() {
            progress.row_started(row.index + 1, total, row.key);

            let result = self.process_row(row).await;
            if let RowOutcome::TranslationError { stage, reason } = &result.outcome {
                progress.warning(&result.key, &format!("{} failed: {}", stage, reason));
            }

            progress.row_finished(results.len() + 1, total, &result);
            results.push(result);

            self.pacing.wait().await;
        }

        results
    }

    /// Runs the batch and appends the results as a new column.
    pub async fn translate_table<P: ProgressSink>(
        &self,
        table: Table,
        column_name: &str,
        progress: &mut P,
    ) -> Result<(Table, BatchSummary)> {
        let results = self.run(&table, progress).await;
        let summary = BatchSummary::from_results(&results);

        let values = results
            .into_iter()
            .map(|r| r.outcome.cell_value().to_string())
            .collect();
        let table = table.with_column(column_name, values)?;

        tracing::info!(
            total = summary.total,
            translated = summary.translated,
            parse_errors = summary.parse_errors,
            translation_errors = summary.translation_errors,
            "All rows have been processed"
        );
        Ok((table, summary))
    }
}
