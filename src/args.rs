use clap::Parser;

/// This is a TOPSIS ranking program for tabular datasets.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON run configuration describing the dataset
    /// source, the weights and the impacts. Command line flags take
    /// precedence over the values found in the configuration.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The dataset to rank. The first row is the header, the
    /// first column is the row label.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or excel.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (list of comma-separated numbers) One weight per criterion column, in
    /// column order, e.g. "1,1,2".
    #[clap(short, long, value_parser)]
    pub weights: Option<String>,

    /// (list of comma-separated '+'/'-' tokens) One impact per criterion
    /// column, in column order, e.g. "+,-,+".
    #[clap(long, value_parser)]
    pub impacts: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the ranked dataset in
    /// CSV format. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference ranked CSV file. If provided, topsisrank will
    /// check that the produced output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default first worksheet) When using an Excel file, indicates the name
    /// of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard
    /// output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
