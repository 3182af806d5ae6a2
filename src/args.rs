use clap::Parser;

/// This is a multi-criteria ranking program, using the TOPSIS method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the input, the criteria and the output.
    /// All the other options override the values from this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The file containing the decision matrix. The first column holds the names
    /// of the alternatives, the other columns the values of the criteria.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (list of comma-separated numbers) One strictly positive weight per criterion, for example 1,1,2.
    #[clap(short, long, value_parser, allow_hyphen_values = true)]
    pub weights: Option<String>,

    /// (list of comma-separated + or -) One impact per criterion: + when higher values are
    /// better, - when lower values are better.
    #[clap(short = 'm', long, value_parser, allow_hyphen_values = true)]
    pub impacts: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the result CSV. Setting this option overrides
    /// the output settings that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, a summary of the ranking will be written in JSON format
    /// to the given location.
    #[clap(long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference CSV file containing the expected result. If provided, the program will
    /// check that the produced output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default competition) How tied scores are ranked: competition, dense or ordinal.
    #[clap(long, value_parser)]
    pub tie_mode: Option<String>,

    /// (number of decimals) Rounds the scores in the result CSV.
    #[clap(long, value_parser)]
    pub precision: Option<usize>,

    /// If passed as an argument, the first row of the input is treated as data and not as a header.
    #[clap(long, takes_value = false)]
    pub no_headers: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
