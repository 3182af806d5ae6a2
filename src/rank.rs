use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topsis_ranking::builder::Builder;
use topsis_ranking::*;

use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::rank::config_reader::*;
use crate::rank::io_common::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

/// The name of the result file when only an output directory is configured.
const DEFAULT_OUTPUT_FILE_NAME: &str = "topsis_result.csv";
const DEFAULT_SCORE_COLUMN: &str = "Topsis Score";
const DEFAULT_RANK_COLUMN: &str = "Rank";

#[derive(Debug, Snafu)]
pub enum RankError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} does not contain any worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Line {lineno}: cannot read cell {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON configuration"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error writing the result CSV"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Missing {name}: provide it on the command line or in the configuration file"))]
    MissingParameter { name: String },
    #[snafu(display("{source}"))]
    Ranking { source: TopsisErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type RankResult<T> = Result<T, RankError>;
pub type BRankResult<T> = Result<T, Box<RankError>>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Csv,
    Xlsx,
}

/// Everything needed to run one ranking request.
///
/// It is built once, from the configuration file and the command line, and then only read.
#[derive(PartialEq, Debug, Clone)]
pub struct RankingContext {
    pub input_path: String,
    pub provider: Provider,
    pub has_headers: bool,
    pub excel_worksheet_name: Option<String>,
    pub criteria_names: Option<Vec<String>>,
    pub weights: Vec<f64>,
    pub impacts: Vec<Impact>,
    pub rules: TopsisRules,
    pub output: Destination,
    pub summary: Option<Destination>,
    pub columns: OutputColumns,
}

pub fn context_from_args(args: &Args) -> BRankResult<RankingContext> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root: PathBuf = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root)
        }
        None => (RankConfig::default(), PathBuf::new()),
    };
    let input_source = config.input_source.clone().unwrap_or_default();
    let output_settings = config.output_settings.clone().unwrap_or_default();
    let criteria = config.criteria.clone().unwrap_or_default();

    let provider = parse_provider(
        args.input_type
            .clone()
            .or(input_source.provider.clone())
            .as_deref(),
    )?;

    let input_path = match (&args.input, &input_source.file_path) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => resolve(&root, p),
        (None, None) => MissingParameterSnafu { name: "input file" }.fail()?,
    };

    let weights: Vec<f64> = match (&args.weights, &criteria.weights) {
        (Some(s), _) => parse_weights(s).context(RankingSnafu {})?,
        (None, Some(js)) => read_js_weights(js)?,
        (None, None) => parse_weights("").context(RankingSnafu {})?,
    };
    let impacts: Vec<Impact> = match (&args.impacts, &criteria.impacts) {
        (Some(s), _) => parse_impacts(s).context(RankingSnafu {})?,
        (None, Some(js)) => read_js_impacts(js)?,
        (None, None) => parse_impacts("").context(RankingSnafu {})?,
    };
    validate_parameters(&weights, &impacts)?;

    let tie_mode = parse_tie_mode(
        args.tie_mode
            .clone()
            .or(config.rules.as_ref().and_then(|r| r.tie_mode.clone())),
    )?;

    let output = match (&args.out, &output_settings) {
        (Some(s), _) => Destination::parse(s),
        (
            None,
            OutputSettings {
                output_directory: None,
                output_file_name: None,
                ..
            },
        ) => Destination::Stdout,
        (None, settings) => {
            let dir = resolve(&root, settings.output_directory.as_deref().unwrap_or(""));
            let file_name = settings
                .output_file_name
                .as_deref()
                .unwrap_or(DEFAULT_OUTPUT_FILE_NAME);
            Destination::File(Path::new(&dir).join(file_name))
        }
    };

    let summary = match (&args.summary, &output_settings.summary_file) {
        (Some(s), _) => Some(Destination::parse(s)),
        (None, Some(s)) => Some(Destination::File(PathBuf::from(resolve(&root, s)))),
        (None, None) => None,
    };

    let ctx = RankingContext {
        input_path,
        provider,
        has_headers: !args.no_headers && input_source.has_headers.unwrap_or(true),
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or(input_source.excel_worksheet_name),
        criteria_names: criteria.names,
        weights,
        impacts,
        rules: TopsisRules { tie_mode },
        output,
        summary,
        columns: OutputColumns {
            score: output_settings
                .score_column_name
                .unwrap_or_else(|| DEFAULT_SCORE_COLUMN.to_string()),
            rank: output_settings
                .rank_column_name
                .unwrap_or_else(|| DEFAULT_RANK_COLUMN.to_string()),
            precision: args.precision.or(output_settings.precision),
        },
    };
    check_input_path(&ctx)?;
    debug!("context_from_args: {:?}", ctx);
    Ok(ctx)
}

fn parse_provider(s: Option<&str>) -> RankResult<Provider> {
    match s {
        None | Some("csv") => Ok(Provider::Csv),
        Some("xlsx") | Some("excel") => Ok(Provider::Xlsx),
        Some(x) => whatever!("Input type not implemented: {:?}", x),
    }
}

fn parse_tie_mode(s: Option<String>) -> RankResult<TieMode> {
    match s.map(|x| x.parse::<TieMode>()) {
        None => Ok(TopsisRules::DEFAULT_RULES.tie_mode),
        Some(Ok(m)) => Ok(m),
        Some(Err(msg)) => whatever!("{}", msg),
    }
}

fn resolve(root: &Path, p: &str) -> String {
    root.join(p).display().to_string()
}

/// The checks of the submission form, done before the input file is read.
fn validate_parameters(weights: &[f64], impacts: &[Impact]) -> RankResult<()> {
    if weights.len() != impacts.len() {
        return Err(RankError::Ranking {
            source: TopsisErrors::CriteriaCountMismatch {
                criteria: weights.len(),
                weights: weights.len(),
                impacts: impacts.len(),
            },
        });
    }
    Ok(())
}

fn check_input_path(ctx: &RankingContext) -> RankResult<()> {
    let extension = Path::new(&ctx.input_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match (ctx.provider, extension.as_deref()) {
        (Provider::Csv, Some("csv")) => Ok(()),
        (Provider::Xlsx, Some("xlsx")) => Ok(()),
        (Provider::Csv, _) => whatever!(
            "Only CSV files are accepted for the csv input type: {}",
            ctx.input_path
        ),
        (Provider::Xlsx, _) => whatever!(
            "Only .xlsx files are accepted for the xlsx input type: {}",
            ctx.input_path
        ),
    }
}

fn read_table(ctx: &RankingContext) -> BRankResult<ParsedTable> {
    info!("Attempting to read matrix file {:?}", ctx.input_path);
    match ctx.provider {
        Provider::Csv => io_csv::read_csv_table(&ctx.input_path, ctx.has_headers),
        Provider::Xlsx => io_xlsx::read_excel_table(
            &ctx.input_path,
            ctx.excel_worksheet_name.as_deref(),
            ctx.has_headers,
        ),
    }
}

/// Validates the table and runs the ranking.
fn rank_table(table: &ParsedTable, ctx: &RankingContext) -> RankResult<TopsisResult> {
    let mut builder = Builder::new(&ctx.rules).context(RankingSnafu {})?;
    let names = ctx
        .criteria_names
        .clone()
        .or_else(|| table.criteria_names());
    if let Some(names) = names {
        builder = builder.criteria(&names).context(RankingSnafu {})?;
    }
    for row in table.rows.iter() {
        builder.add_row(row).context(RankingSnafu {})?;
    }
    builder
        .weights(&ctx.weights)
        .impacts(&ctx.impacts)
        .rank()
        .context(RankingSnafu {})
}

fn build_summary_js(ctx: &RankingContext, table: &ParsedTable, result: &TopsisResult) -> JSValue {
    let c = SummaryConfig {
        input: simplify_file_name(&ctx.input_path),
        criteria: ctx
            .criteria_names
            .clone()
            .or_else(|| table.criteria_names()),
        weights: result.weights.clone(),
        impacts: ctx.impacts.iter().map(|i| i.to_string()).collect(),
        tie_mode: ctx.rules.tie_mode.to_string(),
    };
    let results: Vec<JSValue> = result
        .ranking
        .iter()
        .map(|idx| {
            let s = &result.scores[*idx];
            json!({
                "id": s.id,
                "score": s.score,
                "rank": s.rank,
                "distanceBest": s.distance_best,
                "distanceWorst": s.distance_worst,
            })
        })
        .collect();
    json!({
        "config": c,
        "idealBest": result.ideal_best,
        "idealWorst": result.ideal_worst,
        "results": results
    })
}

pub fn run_ranking(ctx: &RankingContext, check_reference_path: Option<String>) -> BRankResult<()> {
    let table = read_table(ctx)?;
    debug!("run_ranking: table: {:?}", table);

    let result = rank_table(&table, ctx)?;

    let mut buffer: Vec<u8> = Vec::new();
    io_csv::write_result_csv(&mut buffer, &table, &result, &ctx.columns)?;
    let result_csv = String::from_utf8_lossy(&buffer).to_string();
    ctx.output.write(&result_csv)?;
    info!("Ranking done, result written to {}", ctx.output);

    if let Some(summary_dest) = &ctx.summary {
        let summary_js = build_summary_js(ctx, &table, &result);
        let pretty_js = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
        summary_dest.write(&format!("{}\n", pretty_js))?;
    }

    // The reference result, if provided for comparison
    if let Some(reference_p) = check_reference_path {
        check_reference(&reference_p, &result_csv)?;
    }

    Ok(())
}

fn check_reference(reference_p: &str, result_csv: &str) -> RankResult<()> {
    let reference = read_reference(reference_p)?;
    let produced = normalize_csv_text(result_csv);
    if reference != produced {
        warn!("Found differences with the reference file");
        print_diff(reference.as_str(), produced.as_str(), "\n");
        whatever!("Difference detected between calculated result and reference result")
    }
    info!("Result matches the reference {}", reference_p);
    Ok(())
}
