use snafu::prelude::*;

use std::path::Path;

use topsis_ranking::{CellValue, Dataset};

use crate::topsis::TopsisResult;

pub fn resolve_relative(root: &Path, file_path: &str) -> String {
    root.join(file_path).display().to_string()
}

/// Final assembly point for all the readers: checks that the parsed content
/// forms a rectangular table before handing it to the engine.
pub fn assemble_dataset(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> TopsisResult<Dataset> {
    if columns.is_empty() {
        whatever!("The dataset declares no columns");
    }
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != columns.len() {
            whatever!(
                "Dataset row {} has {} cells, expected {}",
                idx + 1,
                row.len(),
                columns.len()
            );
        }
    }
    Ok(Dataset { columns, rows })
}
