// Primitives for reading and writing CSV datasets.

use log::debug;
use snafu::prelude::*;

use topsis_ranking::{CellValue, Dataset, RankedDataset};

use crate::topsis::io_common::assemble_dataset;
use crate::topsis::{CsvEmptySnafu, CsvLineSnafu, CsvOpenSnafu, CsvWriteSnafu, TopsisResult};

pub fn read_csv_dataset(path: String) -> TopsisResult<Dataset> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path.as_str())
        .context(CsvOpenSnafu { path: path.clone() })?;
    let mut records = rdr.into_records();

    // The first row carries the column schema.
    let header = records
        .next()
        .context(CsvEmptySnafu { path: path.clone() })?
        .context(CsvLineSnafu {})?;
    let columns: Vec<String> = header.iter().map(|s| s.trim().to_string()).collect();
    debug!("read_csv_dataset: header: {:?}", columns);

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let line = line_r.context(CsvLineSnafu {})?;
        debug!("read_csv_dataset: line {:?}: {:?}", idx + 2, line);
        rows.push(line.iter().map(CellValue::from_str_cell).collect());
    }
    assemble_dataset(columns, rows)
}

/// Renders the ranked dataset as CSV text, header first, rows in their
/// original order.
pub fn render_ranked_csv(ranked: &RankedDataset) -> TopsisResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&ranked.columns).context(CsvWriteSnafu {})?;
    for row in ranked.rows.iter() {
        let record: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        wtr.write_record(&record).context(CsvWriteSnafu {})?;
    }
    let bytes = match wtr.into_inner() {
        Ok(bytes) => bytes,
        Err(e) => whatever!("Failed to flush the CSV writer: {:?}", e),
    };
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => whatever!("The CSV output is not valid UTF-8: {:?}", e),
    }
}
