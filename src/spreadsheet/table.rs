use crate::utils::{Result, TranslatorError};

pub const KEY_COLUMN: &str = "key";
pub const TEXT_COLUMN: &str = "Text";

/// Accepted header variants and the canonical name each resolves to.
pub const COLUMN_MAPPING: &[(&str, &str)] = &[
    ("Key", KEY_COLUMN),
    ("Text in english to be translated", TEXT_COLUMN),
];

/// Maps a header to its canonical name. Surrounding whitespace is ignored for the
/// match only; any other header is returned exactly as written.
pub fn normalize_header(header: &str) -> String {
    let trimmed = header.trim();
    COLUMN_MAPPING
        .iter()
        .find(|(variant, _)| *variant == trimmed)
        .map(|(_, canonical)| *canonical)
        .or_else(|| [KEY_COLUMN, TEXT_COLUMN].into_iter().find(|c| *c == trimmed))
        .map(str::to_string)
        .unwrap_or_else(|| header.to_string())
}

/// A flat table of text cells with the `key` and `Text` columns located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    key_idx: usize,
    text_idx: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRow<'a> {
    pub index: usize,
    pub key: &'a str,
    pub text: &'a str,
}

impl Table {
    /// Normalizes headers, checks the canonical columns exist and pads short rows.
    pub fn from_raw(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TranslatorError::MissingColumn {
                    column: name.to_string(),
                })
        };
        let key_idx = position(KEY_COLUMN)?;
        let text_idx = position(TEXT_COLUMN)?;

        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();

        Ok(Self {
            headers,
            rows,
            key_idx,
            text_idx,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn input_rows(&self) -> impl Iterator<Item = InputRow<'_>> + '_ {
        self.rows.iter().enumerate().map(move |(index, row)| InputRow {
            index,
            key: &row[self.key_idx],
            text: &row[self.text_idx],
        })
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row[self.key_idx].as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Appends one column; `values` must hold exactly one cell per row.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<String>) -> Result<Self> {
        if values.len() != self.rows.len() {
            return Err(TranslatorError::RowCountMismatch {
                expected: self.rows.len(),
                got: values.len(),
            });
        }

        self.headers.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(self)
    }

    pub fn preview(&self, n: usize) -> String {
        let mut out = self.headers.join(" | ");
        for row in self.rows.iter().take(n) {
            out.push('\n');
            out.push_str(&row.join(" | "));
        }
        if self.rows.len() > n {
            out.push_str(&format!("\n... ({} more rows)", self.rows.len() - n));
        }
        out
    }
}
