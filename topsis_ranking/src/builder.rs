pub use crate::config::*;
use crate::parse::parse_cell;

/// A builder for assembling a decision matrix row by row.
///
/// It is the most convenient entry point when the data comes from a text source, since
/// it takes care of parsing and checking the cells.
///
/// ```
/// pub use topsis_ranking::builder::Builder;
/// pub use topsis_ranking::{Impact, TopsisRules};
/// # use topsis_ranking::TopsisErrors;
///
/// let mut builder = Builder::new(&TopsisRules::DEFAULT_RULES)?
///     .criteria(&["Price".to_string(), "Storage".to_string()])?;
///
/// builder.add_row(&["Phone A".to_string(), "250".to_string(), "16".to_string()])?;
/// builder.add_alternative("Phone B", &[200.0, 32.0])?;
///
/// let result = builder
///     .weights(&[1.0, 1.0])
///     .impacts(&[Impact::Minimize, Impact::Maximize])
///     .rank()?;
/// assert_eq!(result.scores[1].rank, 1);
///
/// # Ok::<(), TopsisErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: TopsisRules,
    pub(crate) _criteria: Option<Vec<String>>,
    pub(crate) _alternatives: Vec<Alternative>,
    pub(crate) _weights: Vec<f64>,
    pub(crate) _impacts: Vec<Impact>,
}

impl Builder {
    pub fn new(rules: &TopsisRules) -> Result<Builder, TopsisErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _criteria: None,
            _alternatives: Vec::new(),
            _weights: Vec::new(),
            _impacts: Vec::new(),
        })
    }

    /// Names the criteria. Resets the alternatives already added.
    pub fn criteria(self, names: &[String]) -> Result<Builder, TopsisErrors> {
        if names.len() < 2 {
            return Err(TopsisErrors::InsufficientCriteria(names.len()));
        }
        Ok(Builder {
            _criteria: Some(names.to_vec()),
            _alternatives: Vec::new(),
            ..self
        })
    }

    pub fn weights(self, weights: &[f64]) -> Builder {
        Builder {
            _weights: weights.to_vec(),
            ..self
        }
    }

    pub fn impacts(self, impacts: &[Impact]) -> Builder {
        Builder {
            _impacts: impacts.to_vec(),
            ..self
        }
    }

    /// Adds a row as read from a file: the first cell is the identifier, the other ones are the
    /// values of the criteria.
    pub fn add_row(&mut self, cells: &[String]) -> Result<(), TopsisErrors> {
        let row = self._alternatives.len();
        let (id, rest) = cells.split_first().ok_or(TopsisErrors::RaggedRow {
            row,
            expected: self.expected_len().unwrap_or(0),
            found: 0,
        })?;
        let mut values: Vec<f64> = Vec::with_capacity(rest.len());
        for (column, cell) in rest.iter().enumerate() {
            values.push(parse_cell(row, column, cell)?);
        }
        self.add_alternative(id, &values)
    }

    /// Adds an alternative with already numeric values.
    pub fn add_alternative(&mut self, id: &str, values: &[f64]) -> Result<(), TopsisErrors> {
        let row = self._alternatives.len();
        if let Some(expected) = self.expected_len() {
            if values.len() != expected {
                return Err(TopsisErrors::RaggedRow {
                    row,
                    expected,
                    found: values.len(),
                });
            }
        }
        if let Some(column) = values.iter().position(|v| !v.is_finite()) {
            return Err(TopsisErrors::NonFiniteValue { row, column });
        }
        self._alternatives.push(Alternative {
            id: id.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    /// The matrix assembled so far.
    pub fn matrix(&self) -> DecisionMatrix {
        DecisionMatrix {
            criteria: self._criteria.clone(),
            alternatives: self._alternatives.clone(),
        }
    }

    pub fn rank(&self) -> Result<TopsisResult, TopsisErrors> {
        crate::run_topsis(&self.matrix(), &self._weights, &self._impacts, &self._rules)
    }

    fn expected_len(&self) -> Option<usize> {
        self._criteria
            .as_ref()
            .map(|c| c.len())
            .or_else(|| self._alternatives.first().map(|a| a.values.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rows_are_parsed() {
        let mut builder = Builder::new(&TopsisRules::DEFAULT_RULES).unwrap();
        builder.add_row(&row(&["A", "250", " 16", "12"])).unwrap();
        builder.add_row(&row(&["B", "200", "16", "8"])).unwrap();
        let m = builder.matrix();
        assert_eq!(m.num_criteria(), 3);
        assert_eq!(m.alternatives[0].values, vec![250.0, 16.0, 12.0]);
        assert_eq!(m.alternatives[1].id, "B");
    }

    #[test]
    fn non_numeric_cell() {
        let mut builder = Builder::new(&TopsisRules::DEFAULT_RULES).unwrap();
        builder.add_row(&row(&["A", "1", "2"])).unwrap();
        let err = builder.add_row(&row(&["B", "1", "lots"])).unwrap_err();
        assert_eq!(
            err,
            TopsisErrors::NonNumericCell {
                row: 1,
                column: 1,
                content: "lots".to_string()
            }
        );
    }

    #[test]
    fn ragged_rows() {
        let mut builder = Builder::new(&TopsisRules::DEFAULT_RULES)
            .unwrap()
            .criteria(&row(&["x", "y"]))
            .unwrap();
        let err = builder.add_alternative("A", &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            TopsisErrors::RaggedRow {
                row: 0,
                expected: 2,
                found: 3
            }
        );
        let err = builder.add_row(&[]).unwrap_err();
        assert!(matches!(err, TopsisErrors::RaggedRow { found: 0, .. }));
    }

    #[test]
    fn too_few_criteria() {
        let err = Builder::new(&TopsisRules::DEFAULT_RULES)
            .unwrap()
            .criteria(&row(&["x"]))
            .err();
        assert_eq!(err, Some(TopsisErrors::InsufficientCriteria(1)));
    }

    #[test]
    fn rank_without_parameters() {
        let mut builder = Builder::new(&TopsisRules::DEFAULT_RULES).unwrap();
        builder.add_alternative("A", &[1.0, 2.0]).unwrap();
        assert_eq!(
            builder.rank().unwrap_err(),
            TopsisErrors::EmptyParameter("weights")
        );
    }
}
