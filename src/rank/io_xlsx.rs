// Primitives for reading Excel files.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::rank::{io_common::*, *};

pub fn read_excel_table(
    path: &str,
    worksheet_name: Option<&str>,
    has_headers: bool,
) -> BRankResult<ParsedTable> {
    let wrange = get_range(path, worksheet_name)?;

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let lineno = idx + 1;
        // Fully empty rows are formatting leftovers, not alternatives.
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            debug!("read_excel_table: lineno: {:?} skipping empty row", lineno);
            continue;
        }
        let mut cells: Vec<String> = Vec::with_capacity(row.len());
        for cell in row {
            cells.push(read_cell(cell, lineno, row)?);
        }
        debug!("read_excel_table: lineno: {:?} row: {:?}", lineno, &cells);
        if header.is_none() && rows.is_empty() && has_headers {
            header = Some(trim_trailing_empty(cells));
        } else {
            rows.push(trim_trailing_empty(cells));
        }
    }
    Ok(ParsedTable { header, rows })
}

// Trailing empty cells come from the width of the sheet, not from the row itself.
fn trim_trailing_empty(mut cells: Vec<String>) -> Vec<String> {
    while cells.len() > 1 && cells.last().map(|c| c.is_empty()).unwrap_or(false) {
        cells.pop();
    }
    cells
}

fn read_cell(cell: &DataType, lineno: usize, row: &[DataType]) -> RankResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Empty => Ok("".to_string()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?} IN {:?}", cell, row),
        }
        .fail(),
    }
}

fn get_range(path: &str, worksheet_name_o: Option<&str>) -> BRankResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_table: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
                path,
            })?
            .context(OpeningExcelSnafu { path })?;
        return Ok(wrange);
    }

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    match sheet_names.as_slice() {
        [] => EmptyExcelSnafu { path }.fail()?,
        [first] => {
            debug!("read_excel_table: path: {:?} worksheet: {:?}", &path, first);
        }
        [first, ..] => {
            warn!(
                "read_excel_table: {} worksheets found in {:?}, using the first one: {:?}",
                sheet_names.len(),
                path,
                first
            );
        }
    }
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })?;
    Ok(wrange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        let row = vec![
            DataType::String("M1".to_string()),
            DataType::Float(250.0),
            DataType::Int(16),
            DataType::Float(0.5),
        ];
        let cells: Vec<String> = row.iter().map(|c| read_cell(c, 1, &row).unwrap()).collect();
        assert_eq!(cells, vec!["M1", "250", "16", "0.5"]);
        assert!(matches!(
            read_cell(&DataType::Bool(true), 2, &row),
            Err(RankError::ExcelWrongCellType { lineno: 2, .. })
        ));
    }

    #[test]
    fn trailing_empty_cells() {
        let cells = vec!["A".to_string(), "1".to_string(), "".to_string()];
        assert_eq!(trim_trailing_empty(cells), vec!["A", "1"]);
    }

    const WORKBOOK: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/phones.xlsx");

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_worksheet_by_default() {
        // The first sheet has an empty row and a blank cell two columns after the header.
        let t = read_excel_table(WORKBOOK, None, true).unwrap();
        assert_eq!(
            t.header,
            Some(strings(&["Model", "Price", "Storage", "Camera"]))
        );
        assert_eq!(
            t.rows,
            vec![
                strings(&["A", "250", "16", "12"]),
                strings(&["B", "200", "16", "8"]),
                strings(&["C", "300", "32", "16"]),
            ]
        );
    }

    #[test]
    fn worksheet_by_name() {
        let t = read_excel_table(WORKBOOK, Some("Budget"), false).unwrap();
        assert_eq!(t.header, None);
        assert_eq!(t.rows.len(), 4);
        assert_eq!(t.rows[0], strings(&["Model", "Cost", "Quality"]));
        assert_eq!(t.rows[3], strings(&["Z", "15", "4"]));
    }

    #[test]
    fn missing_worksheet() {
        let err = read_excel_table(WORKBOOK, Some("Laptops"), true).unwrap_err();
        assert!(matches!(*err, RankError::MissingWorksheet { .. }));
        assert_eq!(
            err.to_string(),
            format!("Worksheet Laptops not found in {}", WORKBOOK)
        );
    }

    #[test]
    fn missing_workbook() {
        let err = read_excel_table("/nonexistent/matrix.xlsx", None, true).unwrap_err();
        assert!(matches!(*err, RankError::OpeningExcel { .. }));
    }
}
