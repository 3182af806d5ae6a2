// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The direction of a criterion.
///
/// For a beneficial criterion (price of a sale, memory of a phone), higher values are better.
/// For a cost criterion (price of a purchase, weight), lower values are better.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// Higher is better. Written `+` on the command line.
    Maximize,
    /// Lower is better. Written `-` on the command line.
    Minimize,
}

impl FromStr for Impact {
    type Err = TopsisErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "max" | "maximize" => Ok(Impact::Maximize),
            "-" | "min" | "minimize" => Ok(Impact::Minimize),
            _ => Err(TopsisErrors::UnknownImpact(s.to_string())),
        }
    }
}

impl Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Maximize => write!(f, "+"),
            Impact::Minimize => write!(f, "-"),
        }
    }
}

/// One row of the decision matrix.
#[derive(PartialEq, Debug, Clone)]
pub struct Alternative {
    /// Opaque identifier (the first column of the input).
    pub id: String,
    /// One value per criterion.
    pub values: Vec<f64>,
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct DecisionMatrix {
    /// The names of the criteria, if known.
    pub criteria: Option<Vec<String>>,
    pub alternatives: Vec<Alternative>,
}

impl DecisionMatrix {
    /// The number of criteria, as seen on the first alternative.
    pub fn num_criteria(&self) -> usize {
        self.alternatives
            .first()
            .map(|a| a.values.len())
            .or_else(|| self.criteria.as_ref().map(|c| c.len()))
            .unwrap_or(0)
    }
}

// ******** Output data structures *********

#[derive(PartialEq, Debug, Clone)]
pub struct AlternativeScore {
    pub id: String,
    /// Relative closeness to the ideal solution, in [0, 1].
    pub score: f64,
    /// 1 is the best alternative.
    pub rank: u32,
    /// Euclidean distance to the ideal best vector.
    pub distance_best: f64,
    /// Euclidean distance to the ideal worst vector.
    pub distance_worst: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct TopsisResult {
    /// The scores, in the same order as the input alternatives.
    pub scores: Vec<AlternativeScore>,
    /// Indexes of the alternatives, best first.
    pub ranking: Vec<usize>,
    /// The weights actually applied, normalized to sum to 1.
    pub weights: Vec<f64>,
    pub ideal_best: Vec<f64>,
    pub ideal_worst: Vec<f64>,
}

/// The two families of failures.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ErrorKind {
    /// The parameters (weights, impacts) do not fit the matrix.
    Validation,
    /// The matrix itself cannot be scored.
    Data,
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(PartialEq, Debug, Clone)]
pub enum TopsisErrors {
    /// Weights, impacts and criteria do not have the same length.
    CriteriaCountMismatch {
        criteria: usize,
        weights: usize,
        impacts: usize,
    },
    NonPositiveWeight {
        index: usize,
        value: f64,
    },
    InvalidWeight(String),
    UnknownImpact(String),
    /// The weights or impacts were not provided.
    EmptyParameter(&'static str),
    NonNumericCell {
        row: usize,
        column: usize,
        content: String,
    },
    NonFiniteValue {
        row: usize,
        column: usize,
    },
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    InsufficientCriteria(usize),
    EmptyMatrix,
}

impl TopsisErrors {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TopsisErrors::CriteriaCountMismatch { .. }
            | TopsisErrors::NonPositiveWeight { .. }
            | TopsisErrors::InvalidWeight(_)
            | TopsisErrors::UnknownImpact(_)
            | TopsisErrors::EmptyParameter(_) => ErrorKind::Validation,
            TopsisErrors::NonNumericCell { .. }
            | TopsisErrors::NonFiniteValue { .. }
            | TopsisErrors::RaggedRow { .. }
            | TopsisErrors::InsufficientCriteria(_)
            | TopsisErrors::EmptyMatrix => ErrorKind::Data,
        }
    }
}

impl Error for TopsisErrors {}

impl Display for TopsisErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopsisErrors::CriteriaCountMismatch {
                criteria,
                weights,
                impacts,
            } => write!(
                f,
                "validation error: {} criteria, {} weights and {} impacts: the counts must be equal",
                criteria, weights, impacts
            ),
            TopsisErrors::NonPositiveWeight { index, value } => write!(
                f,
                "validation error: weight #{} is {}, weights must be strictly positive",
                index + 1,
                value
            ),
            TopsisErrors::InvalidWeight(s) => {
                write!(f, "validation error: weight {:?} is not a number", s)
            }
            TopsisErrors::UnknownImpact(s) => write!(
                f,
                "validation error: impact {:?} is not recognized, impacts must be + or -",
                s
            ),
            TopsisErrors::EmptyParameter(name) => {
                write!(f, "validation error: no {} provided", name)
            }
            TopsisErrors::NonNumericCell {
                row,
                column,
                content,
            } => write!(
                f,
                "data error: row {} column {}: {:?} is not numeric",
                row + 1,
                column + 1,
                content
            ),
            TopsisErrors::NonFiniteValue { row, column } => write!(
                f,
                "data error: row {} column {}: value is not finite",
                row + 1,
                column + 1
            ),
            TopsisErrors::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "data error: row {} has {} criteria, expected {}",
                row + 1,
                found,
                expected
            ),
            TopsisErrors::InsufficientCriteria(n) => write!(
                f,
                "data error: found {} criterion columns, at least 2 are required",
                n
            ),
            TopsisErrors::EmptyMatrix => write!(f, "data error: no alternative to rank"),
        }
    }
}

// ********* Configuration **********

/// How rank numbers are assigned to alternatives with equal scores.
///
/// In all the modes, the order of the ranking is stable: equal scores keep the order of the input.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieMode {
    /// Standard competition ranking ("1224").
    Competition,
    /// Dense ranking ("1223").
    Dense,
    /// Ordinal ranking ("1234"), ties resolved by input order.
    Ordinal,
}

impl FromStr for TieMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "competition" => Ok(TieMode::Competition),
            "dense" => Ok(TieMode::Dense),
            "ordinal" => Ok(TieMode::Ordinal),
            x => Err(format!(
                "unknown tie mode {:?}, expected one of competition, dense, ordinal",
                x
            )),
        }
    }
}

impl Display for TieMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TieMode::Competition => "competition",
            TieMode::Dense => "dense",
            TieMode::Ordinal => "ordinal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TopsisRules {
    pub tie_mode: TieMode,
}

impl TopsisRules {
    pub const DEFAULT_RULES: TopsisRules = TopsisRules {
        tie_mode: TieMode::Competition,
    };
}

impl Default for TopsisRules {
    fn default() -> Self {
        TopsisRules::DEFAULT_RULES
    }
}
