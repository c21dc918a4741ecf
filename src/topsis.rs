use log::{debug, info, warn};

use topsis_ranking::*;

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use text_diff::print_diff;

use crate::args::Args;
use crate::topsis::config_reader::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;

#[derive(Debug, Snafu)]
pub enum TopsisError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no readable worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Unsupported cell content at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("The CSV file {path} has no header row"))]
    CsvEmpty { path: String },
    #[snafu(display("Error reading a CSV line"))]
    CsvLine { source: csv::Error },
    #[snafu(display("Error writing the CSV output"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("No input dataset was provided (use --input or --config)"))]
    MissingInput {},
    #[snafu(display("Error writing the ranked output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Ranking failed: {source}"))]
    Ranking { source: RankingErrors },
    #[snafu(display("The ranked output does not match the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TopsisResult<T> = Result<T, TopsisError>;

/// Runs one ranking from the command line arguments: resolve the dataset
/// source and the parameters, rank, write the output, and optionally check
/// it against a reference file.
pub fn run_ranking(args: &Args) -> TopsisResult<()> {
    let mut source: Option<DatasetSource> = None;
    let mut weights = args.weights.clone();
    let mut impacts = args.impacts.clone();
    let mut out = args.out.clone();

    if let Some(config_path) = &args.config {
        let config = read_config(config_path.clone())?;
        info!("run_ranking: config: {:?}", config);
        let root = Path::new(config_path.as_str())
            .parent()
            .context(MissingParentDirSnafu {})?;
        let mut ds = config.dataset_source.clone();
        ds.file_path = io_common::resolve_relative(root, &ds.file_path);
        source = Some(ds);
        if weights.is_none() {
            weights = config.weights.clone();
        }
        if impacts.is_none() {
            impacts = config.impacts.clone();
        }
        if out.is_none() {
            out = config.output_settings.and_then(|o| o.output_path);
        }
    }

    // An explicit --input takes precedence over the configuration.
    if let Some(input) = &args.input {
        source = Some(DatasetSource {
            provider: args.input_type.clone().unwrap_or_else(|| "csv".to_string()),
            file_path: input.clone(),
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        });
    }
    let source = source.context(MissingInputSnafu {})?;
    debug!("run_ranking: resolved source: {:?}", source);

    let rendered = rank_file(
        &source,
        weights.as_deref().unwrap_or(""),
        impacts.as_deref().unwrap_or(""),
    )?;

    match out.as_deref() {
        None | Some("stdout") => println!("{}", rendered),
        Some(path) => {
            fs::write(path, &rendered).context(WritingOutputSnafu { path })?;
            info!("run_ranking: wrote the ranked dataset to {:?}", path);
        }
    }

    if let Some(ref_path) = &args.reference {
        check_reference(ref_path.clone(), &rendered)?;
    }
    Ok(())
}

/// Reads the dataset behind a source, ranks it, and renders the ranked CSV
/// text. This is the file-to-text pipeline without the output concerns.
pub fn rank_file(source: &DatasetSource, weights: &str, impacts: &str) -> TopsisResult<String> {
    info!("Attempting to read dataset file {:?}", source.file_path);
    let dataset = match source.provider.as_str() {
        "csv" => io_csv::read_csv_dataset(source.file_path.clone()),
        "excel" => io_excel::read_excel_dataset(
            source.file_path.clone(),
            &source.excel_worksheet_name,
        ),
        x => whatever!("Provider not implemented {:?}", x),
    }?;

    let params = RankingParams::new(weights, impacts);
    let ranked = rank_dataset(&dataset, &params).context(RankingSnafu {})?;
    io_csv::render_ranked_csv(&ranked)
}

fn check_reference(path: String, rendered: &str) -> TopsisResult<()> {
    let reference =
        fs::read_to_string(path.clone()).context(OpeningReferenceSnafu { path: path.clone() })?;
    if reference != rendered {
        warn!("Found differences with the reference file");
        print_diff(reference.as_str(), rendered, "\n");
        return Err(TopsisError::ReferenceMismatch { path });
    }
    Ok(())
}
