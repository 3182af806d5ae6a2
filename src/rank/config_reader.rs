use crate::rank::*;

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "outputFileName")]
    pub output_file_name: Option<String>,
    #[serde(rename = "summaryFile")]
    pub summary_file: Option<String>,
    #[serde(rename = "scoreColumnName")]
    pub score_column_name: Option<String>,
    #[serde(rename = "rankColumnName")]
    pub rank_column_name: Option<String>,
    pub precision: Option<usize>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "hasHeaders")]
    pub has_headers: Option<bool>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriteriaSettings {
    /// Overrides the names found in the header of the input.
    pub names: Option<Vec<String>>,
    /// Either "1,1,2" or [1, 1, 2]
    pub weights: Option<JSValue>,
    /// Either "+,-" or ["+", "-"]
    pub impacts: Option<JSValue>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingRules {
    #[serde(rename = "tieMode")]
    pub tie_mode: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "inputSource")]
    pub input_source: Option<InputSource>,
    pub criteria: Option<CriteriaSettings>,
    pub rules: Option<RankingRules>,
}

/// The configuration, as reported in the summary.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub input: String,
    pub criteria: Option<Vec<String>>,
    pub weights: Vec<f64>,
    pub impacts: Vec<String>,
    #[serde(rename = "tieMode")]
    pub tie_mode: String,
}

pub fn read_config(path: &str) -> RankResult<RankConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: RankConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Reads a reference result, for comparison with the output.
pub fn read_reference(path: &str) -> RankResult<String> {
    let contents = fs::read_to_string(path).context(OpeningReferenceSnafu { path })?;
    Ok(normalize_csv_text(&contents))
}

/// Removes the differences that are not significant when comparing two CSV files.
pub fn normalize_csv_text(s: &str) -> String {
    s.lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.is_empty())
        .collect::<Vec<&str>>()
        .join("\n")
}

pub fn read_js_weights(x: &JSValue) -> RankResult<Vec<f64>> {
    let joined = read_js_list(x, "weights")?;
    parse_weights(&joined).context(RankingSnafu {})
}

pub fn read_js_impacts(x: &JSValue) -> RankResult<Vec<Impact>> {
    let joined = read_js_list(x, "impacts")?;
    parse_impacts(&joined).context(RankingSnafu {})
}

// Both notations end up in the comma-separated form, so that they share the same checks.
fn read_js_list(x: &JSValue, name: &str) -> RankResult<String> {
    match x {
        JSValue::String(s) => Ok(s.clone()),
        JSValue::Array(items) => {
            let mut res: Vec<String> = Vec::new();
            for item in items {
                match item {
                    JSValue::String(s) => res.push(s.clone()),
                    JSValue::Number(n) => res.push(n.to_string()),
                    _ => whatever!("Cannot read {} element {:?}", name, item),
                }
            }
            Ok(res.join(","))
        }
        _ => whatever!("Cannot read {}: expected a string or a list, got {:?}", name, x),
    }
}
