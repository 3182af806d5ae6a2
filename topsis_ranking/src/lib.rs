mod config;
mod parse;

pub mod builder;
pub mod manual;

use log::{debug, info, warn};

pub use crate::config::*;
pub use crate::parse::*;

// **** Private structures ****

/// The score given to an alternative that is at the same distance (zero) from both ideals.
const DEGENERATE_SCORE: f64 = 0.5;

// Invariant: all the rows have the same number of columns, at least 2, all values finite.
#[derive(PartialEq, Debug, Clone)]
struct CheckedMatrix {
    num_criteria: usize,
    rows: Vec<Vec<f64>>,
}

impl CheckedMatrix {
    fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[col])
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
struct Distances {
    best: f64,
    worst: f64,
}

impl Distances {
    fn closeness(&self) -> Option<f64> {
        let total = self.best + self.worst;
        if total == 0.0 {
            None
        } else {
            Some(self.worst / total)
        }
    }
}

/// Runs the TOPSIS ranking for the given decision matrix.
///
/// Arguments:
/// * `matrix` the alternatives to rank
/// * `weights` one strictly positive weight per criterion. They do not need to sum to 1.
/// * `impacts` one impact per criterion
/// * `rules` the options for assigning the ranks
///
/// The parameters are validated before the matrix is looked at: a mismatch between the
/// parameters is a validation error even if the matrix is also invalid.
pub fn run_topsis(
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
    rules: &TopsisRules,
) -> Result<TopsisResult, TopsisErrors> {
    info!(
        "run_topsis: Processing {:?} alternatives, weights: {:?}, impacts: {:?}, rules: {:?}",
        matrix.alternatives.len(),
        weights,
        impacts,
        rules
    );

    check_parameters(weights, impacts)?;
    let checked = checks(matrix)?;
    if checked.num_criteria != weights.len() {
        return Err(TopsisErrors::CriteriaCountMismatch {
            criteria: checked.num_criteria,
            weights: weights.len(),
            impacts: impacts.len(),
        });
    }

    let norm_weights = normalize_weights(weights);
    debug!("run_topsis: normalized weights: {:?}", norm_weights);

    let weighted = weighted_normalized_matrix(&checked, &norm_weights);
    debug!("run_topsis: weighted normalized matrix: {:?}", weighted.rows);

    let (ideal_best, ideal_worst) = ideal_vectors(&weighted, impacts);
    debug!(
        "run_topsis: ideal best: {:?} ideal worst: {:?}",
        ideal_best, ideal_worst
    );

    let distances: Vec<Distances> = weighted
        .rows
        .iter()
        .map(|row| Distances {
            best: euclidean_distance(row, &ideal_best),
            worst: euclidean_distance(row, &ideal_worst),
        })
        .collect();

    let mut scores: Vec<f64> = Vec::with_capacity(distances.len());
    for (idx, d) in distances.iter().enumerate() {
        let score = match d.closeness() {
            Some(s) => s,
            None => {
                warn!(
                    "run_topsis: alternative {:?} is at zero distance from both ideals, using score {}",
                    matrix.alternatives[idx].id, DEGENERATE_SCORE
                );
                DEGENERATE_SCORE
            }
        };
        scores.push(score);
    }

    let ranking = sorted_by_score(&scores);
    let ranks = assign_ranks(&scores, &ranking, rules.tie_mode);

    let alt_scores: Vec<AlternativeScore> = matrix
        .alternatives
        .iter()
        .zip(scores.iter())
        .zip(distances.iter())
        .zip(ranks.iter())
        .map(|(((alt, score), d), rank)| AlternativeScore {
            id: alt.id.clone(),
            score: *score,
            rank: *rank,
            distance_best: d.best,
            distance_worst: d.worst,
        })
        .collect();

    for idx in ranking.iter() {
        let s = &alt_scores[*idx];
        info!("Rank {:>4}: {:.6} {}", s.rank, s.score, s.id);
    }

    Ok(TopsisResult {
        scores: alt_scores,
        ranking,
        weights: norm_weights,
        ideal_best,
        ideal_worst,
    })
}

fn check_parameters(weights: &[f64], impacts: &[Impact]) -> Result<(), TopsisErrors> {
    if weights.is_empty() {
        return Err(TopsisErrors::EmptyParameter("weights"));
    }
    if impacts.is_empty() {
        return Err(TopsisErrors::EmptyParameter("impacts"));
    }
    if weights.len() != impacts.len() {
        return Err(TopsisErrors::CriteriaCountMismatch {
            criteria: weights.len(),
            weights: weights.len(),
            impacts: impacts.len(),
        });
    }
    for (index, w) in weights.iter().enumerate() {
        if !w.is_finite() {
            return Err(TopsisErrors::InvalidWeight(w.to_string()));
        }
        if *w <= 0.0 {
            return Err(TopsisErrors::NonPositiveWeight { index, value: *w });
        }
    }
    Ok(())
}

fn checks(matrix: &DecisionMatrix) -> Result<CheckedMatrix, TopsisErrors> {
    debug!("checks: matrix size: {:?}", matrix.alternatives.len());
    let first = matrix
        .alternatives
        .first()
        .ok_or(TopsisErrors::EmptyMatrix)?;
    let num_criteria = first.values.len();

    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(matrix.alternatives.len());
    for (row, alt) in matrix.alternatives.iter().enumerate() {
        if alt.values.len() != num_criteria {
            return Err(TopsisErrors::RaggedRow {
                row,
                expected: num_criteria,
                found: alt.values.len(),
            });
        }
        if let Some(column) = alt.values.iter().position(|v| !v.is_finite()) {
            return Err(TopsisErrors::NonFiniteValue { row, column });
        }
        rows.push(alt.values.clone());
    }

    if num_criteria < 2 {
        return Err(TopsisErrors::InsufficientCriteria(num_criteria));
    }

    Ok(CheckedMatrix { num_criteria, rows })
}

// Divided by the largest weight first, so that the sum stays finite.
fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    let largest = weights.iter().fold(0.0, |acc: f64, w| acc.max(*w));
    let scaled: Vec<f64> = weights.iter().map(|w| w / largest).collect();
    let total: f64 = scaled.iter().sum();
    scaled.iter().map(|w| w / total).collect()
}

/// The euclidean norm of a column, kept as the largest absolute value of the column (`scale`)
/// and the norm of the column divided by that value (`root`, at least 1).
///
/// Squaring the raw values overflows above 1e154 and underflows below 1e-162.
#[derive(PartialEq, Debug, Clone, Copy)]
struct ColumnNorm {
    scale: f64,
    root: f64,
}

impl ColumnNorm {
    fn of(matrix: &CheckedMatrix, col: usize) -> ColumnNorm {
        let scale = matrix.column(col).fold(0.0, |acc: f64, v| acc.max(v.abs()));
        if scale == 0.0 {
            return ColumnNorm { scale, root: 0.0 };
        }
        let root = matrix
            .column(col)
            .map(|v| (v / scale) * (v / scale))
            .sum::<f64>()
            .sqrt();
        ColumnNorm { scale, root }
    }

    fn normalize(&self, v: f64) -> f64 {
        // A column of zeros carries no information.
        if self.scale == 0.0 {
            0.0
        } else {
            (v / self.scale) / self.root
        }
    }
}

/// Vector normalization of every column, then weighting.
fn weighted_normalized_matrix(matrix: &CheckedMatrix, weights: &[f64]) -> CheckedMatrix {
    let norms: Vec<ColumnNorm> = (0..matrix.num_criteria)
        .map(|col| ColumnNorm::of(matrix, col))
        .collect();
    debug!("weighted_normalized_matrix: column norms: {:?}", norms);

    let rows = matrix
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(norms.iter())
                .zip(weights.iter())
                .map(|((v, norm), w)| norm.normalize(*v) * w)
                .collect()
        })
        .collect();
    CheckedMatrix {
        num_criteria: matrix.num_criteria,
        rows,
    }
}

fn ideal_vectors(matrix: &CheckedMatrix, impacts: &[Impact]) -> (Vec<f64>, Vec<f64>) {
    let mut best: Vec<f64> = Vec::with_capacity(matrix.num_criteria);
    let mut worst: Vec<f64> = Vec::with_capacity(matrix.num_criteria);
    for (col, impact) in impacts.iter().enumerate() {
        let max = matrix.column(col).fold(f64::NEG_INFINITY, f64::max);
        let min = matrix.column(col).fold(f64::INFINITY, f64::min);
        match impact {
            Impact::Maximize => {
                best.push(max);
                worst.push(min);
            }
            Impact::Minimize => {
                best.push(min);
                worst.push(max);
            }
        }
    }
    (best, worst)
}

fn euclidean_distance(row: &[f64], ideal: &[f64]) -> f64 {
    row.iter()
        .zip(ideal.iter())
        .map(|(v, i)| (v - i) * (v - i))
        .sum::<f64>()
        .sqrt()
}

/// The indexes of the alternatives, by decreasing score.
/// The sort is stable: equal scores stay in input order.
fn sorted_by_score(scores: &[f64]) -> Vec<usize> {
    let mut res: Vec<usize> = (0..scores.len()).collect();
    res.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]));
    res
}

/// The rank of each alternative, in input order.
fn assign_ranks(scores: &[f64], ranking: &[usize], tie_mode: TieMode) -> Vec<u32> {
    let mut ranks: Vec<u32> = vec![0; scores.len()];
    let mut current_rank: u32 = 0;
    let mut previous: Option<f64> = None;
    for (pos, idx) in ranking.iter().enumerate() {
        let score = scores[*idx];
        let is_tie = previous == Some(score);
        current_rank = match tie_mode {
            TieMode::Ordinal => (pos + 1) as u32,
            TieMode::Competition if is_tie => current_rank,
            TieMode::Competition => (pos + 1) as u32,
            TieMode::Dense if is_tie => current_rank,
            TieMode::Dense => current_rank + 1,
        };
        ranks[*idx] = current_rank;
        previous = Some(score);
    }
    ranks
}
