use crate::spreadsheet::table::Table;
use crate::utils::{format_number, Result, TranslatorError};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Xlsx,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" => Ok(InputFormat::Xlsx),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(TranslatorError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub async fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(TranslatorError::FileNotFound(path.display().to_string()));
    }

    let format = InputFormat::from_path(path)?;
    let bytes = tokio::fs::read(path).await?;
    let table = load_table_from_bytes(&bytes, format)?;

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.headers().len(),
        "Loaded input table"
    );
    Ok(table)
}

pub fn load_table_from_bytes(bytes: &[u8], format: InputFormat) -> Result<Table> {
    let (headers, rows) = match format {
        InputFormat::Xlsx => read_xlsx(bytes)?,
        InputFormat::Csv => read_csv(bytes)?,
    };
    Table::from_raw(headers, rows)
}

/// Reads the first worksheet; its first row is the header row.
fn read_xlsx(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| TranslatorError::SpreadsheetError(format!("Failed to open Excel file: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| TranslatorError::SpreadsheetError("Excel file contains no sheets".to_string()))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        TranslatorError::SpreadsheetError(format!("Failed to read sheet '{}': {}", sheet_name, e))
    })?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };
    let records = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok((headers, records))
}

fn read_csv(bytes: &[u8]) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.iter().map(|s| s.to_string()).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok((headers, records))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => format_number(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn xlsx_fixture(headers: &[&str], rows: &[Vec<&str>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                sheet.write_string(r as u32 + 1, col as u16, *cell).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.XLSX")).unwrap(), InputFormat::Xlsx);
        assert_eq!(InputFormat::from_path(Path::new("a.csv")).unwrap(), InputFormat::Csv);
        assert!(matches!(
            InputFormat::from_path(Path::new("a.xls")),
            Err(TranslatorError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_xlsx_with_readable_headers() {
        let bytes = xlsx_fixture(
            &["Key", "Text in english to be translated", "Owner"],
            &[vec!["Q1", "<p>Hello</p>", "hr"], vec!["Q2", "Bye", "it"]],
        );

        let table = load_table_from_bytes(&bytes, InputFormat::Xlsx).unwrap();
        assert_eq!(table.headers(), &["key", "Text", "Owner"]);
        assert_eq!(table.keys(), vec!["Q1", "Q2"]);
        assert_eq!(table.column("Text").unwrap(), vec!["<p>Hello</p>", "Bye"]);
    }

    #[test]
    fn test_xlsx_numeric_cells_become_text() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "key").unwrap();
        sheet.write_string(0, 1, "Text").unwrap();
        sheet.write_number(1, 0, 101.0).unwrap();
        sheet.write_number(1, 1, 2.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = load_table_from_bytes(&bytes, InputFormat::Xlsx).unwrap();
        let row = table.input_rows().next().unwrap();
        assert_eq!(row.key, "101");
        assert_eq!(row.text, "2.5");
    }

    #[test]
    fn test_xlsx_missing_column_is_rejected() {
        let bytes = xlsx_fixture(&["Text"], &[vec!["Hello"]]);
        let err = load_table_from_bytes(&bytes, InputFormat::Xlsx).unwrap_err();
        assert!(matches!(err, TranslatorError::MissingColumn { .. }));
    }

    #[test]
    fn test_garbage_bytes_are_spreadsheet_error() {
        let err = load_table_from_bytes(b"not a zip", InputFormat::Xlsx).unwrap_err();
        assert!(matches!(err, TranslatorError::SpreadsheetError(_)));
    }

    #[test]
    fn test_csv_input() {
        let data = "Key,Text in english to be translated\nQ1,\"Hello, world\"\nQ2,Bye\n";
        let table = load_table_from_bytes(data.as_bytes(), InputFormat::Csv).unwrap();
        assert_eq!(table.keys(), vec!["Q1", "Q2"]);
        assert_eq!(table.column("Text").unwrap()[0], "Hello, world");
    }

    #[tokio::test]
    async fn test_load_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("nope.xlsx")).await.unwrap_err();
        assert!(matches!(err, TranslatorError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_load_table_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.xlsx");
        std::fs::write(&path, xlsx_fixture(&["key", "Text"], &[vec!["Q1", "Hi"]])).unwrap();

        let table = load_table(&path).await.unwrap();
        assert_eq!(table.row_count(), 1);
    }
}
