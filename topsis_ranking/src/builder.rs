pub use crate::config::*;

/// A builder for assembling datasets row by row.
///
/// This is the entry point for callers that do not go through a file reader,
/// such as tests or embedding applications.
///
/// ```
/// pub use topsis_ranking::Builder;
/// # use topsis_ranking::RankingErrors;
///
/// let mut builder = Builder::new().columns(&["Model", "Price", "Battery"]);
///
/// builder.add_row_simple(&["m-1", "250", "10"])?;
/// builder.add_row_simple(&["m-2", "350", "12.5"])?;
///
/// let dataset = builder.build()?;
/// assert_eq!(dataset.rows.len(), 2);
/// # Ok::<(), RankingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _columns: Vec<String>,
    pub(crate) _rows: Vec<Vec<CellValue>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _columns: Vec::new(),
            _rows: Vec::new(),
        }
    }

    /// Declares the column schema. The first name is the label column.
    pub fn columns(self, names: &[&str]) -> Builder {
        Builder {
            _columns: names.iter().map(|s| s.to_string()).collect(),
            _rows: self._rows,
        }
    }

    /// Adds a row of raw string cells, classifying each one the way the CSV
    /// reader would.
    ///
    /// It is the simplest use case for most callers.
    pub fn add_row_simple(&mut self, cells: &[&str]) -> Result<(), RankingErrors> {
        let row: Vec<CellValue> = cells.iter().map(|s| CellValue::from_str_cell(s)).collect();
        self.add_row(&row)
    }

    /// Adds a row of already-typed cells. The row must have exactly one cell
    /// per declared column.
    pub fn add_row(&mut self, cells: &[CellValue]) -> Result<(), RankingErrors> {
        if cells.len() != self._columns.len() {
            return Err(RankingErrors::RaggedRow {
                expected: self._columns.len(),
                found: cells.len(),
            });
        }
        self._rows.push(cells.to_vec());
        Ok(())
    }

    pub fn build(self) -> Result<Dataset, RankingErrors> {
        if self._rows.is_empty() {
            return Err(RankingErrors::EmptyDataset);
        }
        Ok(Dataset {
            columns: self._columns,
            rows: self._rows,
        })
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}
