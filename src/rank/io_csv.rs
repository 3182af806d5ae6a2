// Primitives for reading and writing CSV files.

use std::io::Write;

use crate::rank::{io_common::*, *};

pub fn read_csv_table(path: &str, has_headers: bool) -> BRankResult<ParsedTable> {
    // Rows of different lengths are accepted here, the builder reports them with their position.
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, &cells);
        if idx == 0 && has_headers {
            header = Some(cells);
        } else {
            rows.push(cells);
        }
    }
    Ok(ParsedTable { header, rows })
}

/// Writes the input table with the score and the rank appended to each row.
pub fn write_result_csv<W: Write>(
    writer: W,
    table: &ParsedTable,
    result: &TopsisResult,
    columns: &OutputColumns,
) -> BRankResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    if let Some(header) = &table.header {
        let mut record: Vec<&str> = header.iter().map(|s| s.as_str()).collect();
        record.push(columns.score.as_str());
        record.push(columns.rank.as_str());
        wtr.write_record(&record).context(CsvWriteSnafu {})?;
    }

    for (row, score) in table.rows.iter().zip(result.scores.iter()) {
        let mut record: Vec<String> = row.clone();
        record.push(columns.format_score(score.score));
        record.push(score.rank.to_string());
        wtr.write_record(&record).context(CsvWriteSnafu {})?;
    }
    wtr.flush()
        .map_err(csv::Error::from)
        .context(CsvWriteSnafu {})?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> OutputColumns {
        OutputColumns {
            score: "Topsis Score".to_string(),
            rank: "Rank".to_string(),
            precision: Some(4),
        }
    }

    fn table() -> ParsedTable {
        let cells = |r: &[&str]| -> Vec<String> { r.iter().map(|s| s.to_string()).collect() };
        ParsedTable {
            header: Some(cells(&["Model", "Price", "Storage", "Camera"])),
            rows: vec![
                cells(&["A", "250", "16", "12"]),
                cells(&["B", "200", "16", "8"]),
                cells(&["C", "300", "32", "16"]),
            ],
        }
    }

    #[test]
    fn read_with_and_without_header() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "Model,Price,Storage").unwrap();
        writeln!(f, "A,250,16").unwrap();
        writeln!(f, "B,200").unwrap();
        let path = f.path().display().to_string();

        let t = read_csv_table(&path, true).unwrap();
        assert_eq!(
            t.criteria_names(),
            Some(vec!["Price".to_string(), "Storage".to_string()])
        );
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1], vec!["B".to_string(), "200".to_string()]);

        let t = read_csv_table(&path, false).unwrap();
        assert_eq!(t.header, None);
        assert_eq!(t.rows.len(), 3);
    }

    #[test]
    fn missing_file() {
        let err = read_csv_table("/nonexistent/matrix.csv", true).unwrap_err();
        assert!(matches!(*err, RankError::CsvOpen { .. }));
    }

    #[test]
    fn result_columns_are_appended() {
        let t = table();
        let weights = [1.0, 1.0, 1.0];
        let impacts = [Impact::Maximize, Impact::Maximize, Impact::Minimize];
        let mut builder = Builder::new(&TopsisRules::DEFAULT_RULES).unwrap();
        for row in t.rows.iter() {
            builder.add_row(row).unwrap();
        }
        let result = builder.weights(&weights).impacts(&impacts).rank().unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        write_result_csv(&mut buffer, &t, &result, &columns()).unwrap();
        let s = String::from_utf8(buffer).unwrap();
        assert_eq!(
            s,
            "Model,Price,Storage,Camera,Topsis Score,Rank\n\
             A,250,16,12,0.3201,3\n\
             B,200,16,8,0.4427,2\n\
             C,300,32,16,0.5573,1\n"
        );
    }
}
