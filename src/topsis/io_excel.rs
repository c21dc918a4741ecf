// Reader for Excel (.xlsx) datasets.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use topsis_ranking::{CellValue, Dataset};

use crate::topsis::io_common::assemble_dataset;
use crate::topsis::{EmptyExcelSnafu, ExcelWrongCellTypeSnafu, OpeningExcelSnafu, TopsisResult};

pub fn read_excel_dataset(path: String, worksheet_name: &Option<String>) -> TopsisResult<Dataset> {
    let wrange = get_range(path.as_str(), worksheet_name)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path: path.clone() })?;
    debug!("read_excel_dataset: header: {:?}", header);
    let mut columns: Vec<String> = Vec::new();
    for cell in header.iter() {
        match cell {
            DataType::String(s) => columns.push(s.trim().to_string()),
            DataType::Int(i) => columns.push(i.to_string()),
            DataType::Float(f) => columns.push(f.to_string()),
            _ => {
                return ExcelWrongCellTypeSnafu {
                    lineno: 1u64,
                    content: format!("{:?}", cell),
                }
                .fail()
            }
        }
    }

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let mut cells: Vec<CellValue> = Vec::with_capacity(row.len());
        for cell in row.iter() {
            // Data starts at line 2, below the header.
            cells.push(read_cell_calamine(cell, (idx + 2) as u64)?);
        }
        rows.push(cells);
    }
    assemble_dataset(columns, rows)
}

fn read_cell_calamine(cell: &DataType, lineno: u64) -> TopsisResult<CellValue> {
    match cell {
        DataType::String(s) => Ok(CellValue::Text(s.clone())),
        DataType::Int(i) => Ok(CellValue::Int(*i)),
        DataType::Float(f) => Ok(CellValue::Float(*f)),
        DataType::Empty => Ok(CellValue::Empty),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(
    path: &str,
    worksheet_name_o: &Option<String>,
) -> TopsisResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_dataset: path: {:?} worksheet: {:?}",
        path, worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu {
        path: path.to_string(),
    })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(EmptyExcelSnafu {
                path: path.to_string(),
            })?
            .context(OpeningExcelSnafu {
                path: path.to_string(),
            })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {
                path: path.to_string(),
            }
            .fail(),
            [(worksheet_name, wrange)] => {
                debug!("read_excel_dataset: using worksheet {:?}", worksheet_name);
                Ok(wrange.clone())
            }
            _ => whatever!(
                "The workbook {} has several worksheets, pass --excel-worksheet-name",
                path
            ),
        }
    }
}
