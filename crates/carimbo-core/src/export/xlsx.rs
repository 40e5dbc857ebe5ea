use crate::error::CarimboError;
use crate::export::{project_rows, ExportTable, NO, YES};
use crate::screening::outcome::BatchResult;
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;
use tracing::info;

pub const SHEET_NAME: &str = "Resultados PDF";

pub const YES_FILL: u32 = 0x00FF00;
pub const NO_FILL: u32 = 0xFF2C2B;

const MIN_WIDTH: usize = 10;
const MAX_WIDTH: usize = 50;

/// Render a table as a single-sheet xlsx workbook.
///
/// Columns are sized to their longest cell (header included) plus two,
/// clamped to 10..=50. In the styled columns "Sim" cells get a green fill and
/// "Não" cells a red one.
pub fn write_workbook(table: &ExportTable) -> Result<Vec<u8>, CarimboError> {
    let header_format = Format::new().set_bold();
    let yes_format = Format::new().set_background_color(Color::RGB(YES_FILL));
    let no_format = Format::new().set_background_color(Color::RGB(NO_FILL));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header.as_str(), &header_format)?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let fill = match cell_fill(table, col, cell) {
                Some(YES_FILL) => Some(&yes_format),
                Some(_) => Some(&no_format),
                None => None,
            };
            match fill {
                Some(format) => {
                    worksheet.write_string_with_format(row_num, col as u16, cell.as_str(), format)?
                }
                None => worksheet.write_string(row_num, col as u16, cell.as_str())?,
            };
        }
    }

    for (col, width) in column_widths(table).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Export a batch straight to xlsx bytes.
pub fn export_batch(batch: &BatchResult) -> Result<Vec<u8>, CarimboError> {
    write_workbook(&project_rows(batch))
}

/// Export a batch and write it to `path`.
pub fn save_workbook(batch: &BatchResult, path: &Path) -> Result<(), CarimboError> {
    let bytes = export_batch(batch)?;
    std::fs::write(path, bytes).map_err(|e| CarimboError::Export(e.to_string()))?;
    info!(path = %path.display(), documents = batch.len(), "workbook written");
    Ok(())
}

/// Background colour for a body cell, if any. Only "Sim"/"Não" cells in the
/// styled columns are filled.
pub fn cell_fill(table: &ExportTable, col: usize, value: &str) -> Option<u32> {
    if !table.styled_columns.contains(&col) {
        return None;
    }
    match value {
        YES => Some(YES_FILL),
        NO => Some(NO_FILL),
        _ => None,
    }
}

/// Width per column: longest cell in characters plus two, clamped.
pub fn column_widths(table: &ExportTable) -> Vec<usize> {
    (0..table.headers.len())
        .map(|col| {
            let longest = std::iter::once(&table.headers[col])
                .chain(table.rows.iter().filter_map(|r| r.get(col)))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            (longest + 2).clamp(MIN_WIDTH, MAX_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{HEADERS, NOT_IDENTIFIED};
    use crate::screening::outcome::DocumentResult;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn table(rows: Vec<Vec<&str>>) -> ExportTable {
        ExportTable {
            headers: vec!["A".into(), "Descrição".into()],
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(str::to_string).collect())
                .collect(),
            styled_columns: vec![],
        }
    }

    #[test]
    fn test_column_widths_clamped() {
        let long = "X".repeat(80);
        let widths = column_widths(&table(vec![vec!["B", "ação"], vec!["C", long.as_str()]]));
        assert_eq!(widths, vec![10, 50]);
    }

    #[test]
    fn test_column_width_counts_characters() {
        let widths = column_widths(&table(vec![vec!["ÇÇÇÇÇÇÇÇÇÇÇÇ", ""]]));
        assert_eq!(widths[0], 14);
    }

    #[test]
    fn test_workbook_round_trip_through_calamine() {
        let mut batch = BatchResult::default();
        batch.insert(
            "PRJ-ILUX-02-03_assinado.pdf",
            DocumentResult {
                found_keywords: vec!["SEINF".into()],
                filename_found_in_text: false,
                sheet_number_found_in_text: true,
                marked_signed_by_filename: true,
                project_description_found_in_text: true,
                project_code: Some("ILUX".into()),
                project_description: "PROJETO DE ILUMINAÇÃO EXTERNA".into(),
                sheet_number: Some("02 03".into()),
                base_file_name: "PRJ-ILUX-02-03".into(),
                processing_error: None,
            },
        );
        batch.insert(
            "memorial.pdf",
            DocumentResult {
                found_keywords: vec![],
                filename_found_in_text: false,
                sheet_number_found_in_text: false,
                marked_signed_by_filename: false,
                project_description_found_in_text: false,
                project_code: None,
                project_description: "Desconhecido".into(),
                sheet_number: None,
                base_file_name: "memorial".into(),
                processing_error: None,
            },
        );

        let bytes = export_batch(&batch).unwrap();
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let sheet = workbook.worksheet_range(SHEET_NAME).unwrap();

        for (col, header) in HEADERS.iter().enumerate() {
            assert_eq!(
                sheet.get_value((0, col as u32)),
                Some(&Data::String(header.to_string()))
            );
        }
        assert_eq!(
            sheet.get_value((1, 3)),
            Some(&Data::String("PRJ-ILUX-02-03_assinado.pdf".into()))
        );
        assert_eq!(sheet.get_value((1, 6)), Some(&Data::String("Sim".into())));
        assert_eq!(sheet.get_value((1, 5)), Some(&Data::String("Não".into())));
        assert_eq!(
            sheet.get_value((2, 0)),
            Some(&Data::String(NOT_IDENTIFIED.into()))
        );
        assert_eq!(sheet.get_value((2, 2)), Some(&Data::String("Nenhuma".into())));
    }

    #[test]
    fn test_cell_fill_only_in_check_columns() {
        let mut batch = BatchResult::default();
        batch.insert(
            "PRJ-ECX-01_07_assinado.pdf",
            DocumentResult {
                found_keywords: vec!["Sim".into()],
                filename_found_in_text: false,
                sheet_number_found_in_text: true,
                marked_signed_by_filename: true,
                project_description_found_in_text: false,
                project_code: Some("ECX".into()),
                project_description: "Não".into(),
                sheet_number: Some("01 07".into()),
                base_file_name: "PRJ-ECX-01_07".into(),
                processing_error: None,
            },
        );
        let table = project_rows(&batch);
        let row = &table.rows[0];

        // A keyword or description that happens to read "Sim"/"Não" stays plain.
        assert_eq!(row[2], "Sim");
        assert_eq!(cell_fill(&table, 2, &row[2]), None);
        assert_eq!(row[1], "Não");
        assert_eq!(cell_fill(&table, 1, &row[1]), None);

        assert_eq!(cell_fill(&table, 5, &row[5]), Some(0xFF2C2B));
        assert_eq!(cell_fill(&table, 6, &row[6]), Some(0x00FF00));
        assert_eq!(cell_fill(&table, 7, &row[7]), Some(0x00FF00));
        assert_eq!(cell_fill(&table, 8, &row[8]), Some(0xFF2C2B));
    }

    #[test]
    fn test_cell_fill_ignores_other_values_in_check_columns() {
        let table = project_rows(&BatchResult::default());
        assert_eq!(cell_fill(&table, 5, NOT_IDENTIFIED), None);
        assert_eq!(cell_fill(&table, 5, "sim"), None);
    }

    #[test]
    fn test_save_workbook_to_missing_dir_is_export_error() {
        let err = save_workbook(
            &BatchResult::default(),
            Path::new("/nonexistent-dir/resultados_analise.xlsx"),
        )
        .unwrap_err();
        assert!(matches!(err, CarimboError::Export(_)));
    }
}
