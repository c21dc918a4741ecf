// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// Name of the appended score column. A column carrying this name on input is
/// treated as the leftover of a previous run and is regenerated.
pub const SCORE_COLUMN: &str = "Score";

/// Name of the appended rank column. Same re-analysis rule as [SCORE_COLUMN].
pub const RANK_COLUMN: &str = "Rank";

/// A single raw cell of a tabular dataset.
///
/// The shapes follow what spreadsheet readers produce: a cell is either typed
/// as a number, carries free text, or is empty. Numeric coercion for the
/// decision matrix happens through [CellValue::as_f64] and nowhere else.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Classifies a raw string the way the CSV reader sees it: empty content
    /// stays empty, integer and real literals become numbers, everything else
    /// is kept as text.
    pub fn from_str_cell(raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => CellValue::Float(f),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// The numeric value of the cell, if it has one.
    ///
    /// Text is parsed after trimming. Non-finite contents never coerce.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) if f.is_finite() => Some(*f),
            CellValue::Float(_) => None,
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            CellValue::Empty => None,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Empty => Ok(()),
        }
    }
}

/// A rectangular dataset: an ordered column schema and rows of raw cells.
///
/// The first column is the row label and is never used numerically. Every row
/// must have exactly one cell per column.
#[derive(PartialEq, Debug, Clone)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Direction of preference for one criterion column.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// Higher raw values are better (`+`).
    Benefit,
    /// Lower raw values are better (`-`).
    Cost,
}

/// The two parameter strings supplied by the caller, still in their raw
/// comma-separated form. Validation happens inside the engine so that every
/// failure mode surfaces through [RankingErrors].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankingParams {
    pub weights: String,
    pub impacts: String,
}

impl RankingParams {
    pub fn new(weights: &str, impacts: &str) -> RankingParams {
        RankingParams {
            weights: weights.to_string(),
            impacts: impacts.to_string(),
        }
    }
}

// ******** Output data structures *********

/// The ranked dataset: the input columns (minus any previous `Score`/`Rank`)
/// with the two result columns appended, rows in the original order.
///
/// `Score` cells are text formatted to 4 decimal places, `Rank` cells are
/// integers with 1 marking the best row. The raw values are also kept in
/// `scores` and `ranks`, indexed by original row position.
#[derive(PartialEq, Debug, Clone)]
pub struct RankedDataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub scores: Vec<f64>,
    pub ranks: Vec<u32>,
}

/// Errors that prevent the ranking from completing. All of them are terminal
/// for the current invocation: the computation is deterministic, retrying
/// without changed input reproduces the same error.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RankingErrors {
    EmptyDataset,
    MissingParameters,
    InvalidWeight {
        token: String,
    },
    InvalidImpact {
        token: String,
    },
    CriteriaMismatch {
        criteria: usize,
        weights: usize,
        impacts: usize,
    },
    NonNumericCell {
        column: String,
        row: usize,
    },
    RaggedRow {
        expected: usize,
        found: usize,
    },
}

impl Error for RankingErrors {}

impl Display for RankingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingErrors::EmptyDataset => write!(f, "the dataset contains no rows"),
            RankingErrors::MissingParameters => {
                write!(f, "both the weights and the impacts must be provided")
            }
            RankingErrors::InvalidWeight { token } => {
                write!(f, "weight token {:?} is not a finite number", token)
            }
            RankingErrors::InvalidImpact { token } => {
                write!(f, "impact token {:?} is not one of '+' or '-'", token)
            }
            RankingErrors::CriteriaMismatch {
                criteria,
                weights,
                impacts,
            } => write!(
                f,
                "found {} criterion columns, {} weights and {} impacts; the three counts must be equal",
                criteria, weights, impacts
            ),
            RankingErrors::NonNumericCell { column, row } => write!(
                f,
                "the cell in column {:?} at data row {} is not numeric",
                column, row
            ),
            RankingErrors::RaggedRow { expected, found } => write!(
                f,
                "a row has {} cells but the dataset declares {} columns",
                found, expected
            ),
        }
    }
}
