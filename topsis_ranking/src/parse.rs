//! Parsers for the textual parameters, as typed in a form or on the command line.

use crate::config::*;

/// Parses a comma-separated list of weights such as `1,1,2,0.5`.
pub fn parse_weights(s: &str) -> Result<Vec<f64>, TopsisErrors> {
    if s.trim().is_empty() {
        return Err(TopsisErrors::EmptyParameter("weights"));
    }
    let mut res: Vec<f64> = Vec::new();
    for (index, item) in s.split(',').enumerate() {
        let item = item.trim();
        let value = item
            .parse::<f64>()
            .map_err(|_| TopsisErrors::InvalidWeight(item.to_string()))?;
        if !value.is_finite() {
            return Err(TopsisErrors::InvalidWeight(item.to_string()));
        }
        if value <= 0.0 {
            return Err(TopsisErrors::NonPositiveWeight { index, value });
        }
        res.push(value);
    }
    Ok(res)
}

/// Parses a comma-separated list of impacts such as `+,+,-,+`.
pub fn parse_impacts(s: &str) -> Result<Vec<Impact>, TopsisErrors> {
    if s.trim().is_empty() {
        return Err(TopsisErrors::EmptyParameter("impacts"));
    }
    s.split(',').map(|item| item.trim().parse::<Impact>()).collect()
}

/// Parses the content of one cell of the matrix.
///
/// `row` and `column` are 0-based positions in the criteria (identifier excluded), used for
/// reporting.
pub fn parse_cell(row: usize, column: usize, content: &str) -> Result<f64, TopsisErrors> {
    let value = content
        .trim()
        .parse::<f64>()
        .map_err(|_| TopsisErrors::NonNumericCell {
            row,
            column,
            content: content.to_string(),
        })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TopsisErrors::NonFiniteValue { row, column })
    }
}
