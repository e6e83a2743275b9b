use crate::spreadsheet::table::Table;
use crate::utils::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub const OUTPUT_PREFIX: &str = "Translated_";

/// Serializes the table into an in-memory xlsx workbook: one sheet, header row, no index column.
pub fn write_table_to_buffer(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            worksheet.write_string(row_idx as u32 + 1, col as u16, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

pub async fn write_table(table: &Table, sheet_name: &str, path: &Path) -> Result<usize> {
    let bytes = write_table_to_buffer(table, sheet_name)?;
    tokio::fs::write(path, &bytes).await?;

    tracing::info!(
        path = %path.display(),
        rows = table.row_count(),
        bytes = bytes.len(),
        "Wrote translated workbook"
    );
    Ok(table.row_count())
}

/// `Translated_<name>`; the extension is always `.xlsx` since that is what gets written.
pub fn output_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("{}{}.xlsx", OUTPUT_PREFIX, stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn sample_table() -> Table {
        Table::from_raw(
            vec!["key".into(), "Text".into(), "Notes".into()],
            vec![
                vec!["Q1".into(), "<p>Hello</p>".into(), "".into()],
                vec!["Q2".into(), "Bye".into(), "keep".into()],
            ],
        )
        .unwrap()
        .with_column("German Translation", vec!["<p>Hallo</p>".into(), "TRANSLATION_ERROR".into()])
        .unwrap()
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(Path::new("/tmp/content.xlsx")), "Translated_content.xlsx");
        assert_eq!(output_file_name(Path::new("content.csv")), "Translated_content.xlsx");
    }

    #[test]
    fn test_buffer_reads_back_as_single_sheet() {
        let bytes = write_table_to_buffer(&sample_table(), "Translations").unwrap();

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Translations".to_string()]);

        let range = workbook.worksheet_range("Translations").unwrap();
        assert_eq!(range.get_size(), (3, 4));
        assert_eq!(
            range.get_value((0, 3)),
            Some(&Data::String("German Translation".to_string()))
        );
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("Q1".to_string())));
        assert_eq!(range.get_value((1, 3)), Some(&Data::String("<p>Hallo</p>".to_string())));
        assert_eq!(range.get_value((2, 2)), Some(&Data::String("keep".to_string())));
        assert_eq!(
            range.get_value((2, 3)),
            Some(&Data::String("TRANSLATION_ERROR".to_string()))
        );
    }

    #[test]
    fn test_invalid_sheet_name_is_rejected() {
        assert!(write_table_to_buffer(&sample_table(), "bad/name").is_err());
    }

    #[tokio::test]
    async fn test_write_table_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(output_file_name(Path::new("content.xlsx")));

        let rows = write_table(&sample_table(), "Translations", &path).await.unwrap();
        assert_eq!(rows, 2);
        assert!(path.exists());
    }
}
