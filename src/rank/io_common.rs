use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use crate::rank::*;

/// A table, as read by the readers.
/// This is before checking that the cells are numeric.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedTable {
    pub header: Option<Vec<String>>,
    // The first cell of each row is the name of the alternative.
    pub rows: Vec<Vec<String>>,
}

impl ParsedTable {
    /// The names of the criteria found in the header, without the identifier column.
    pub fn criteria_names(&self) -> Option<Vec<String>> {
        self.header
            .as_ref()
            .map(|h| h.iter().skip(1).cloned().collect())
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct OutputColumns {
    pub score: String,
    pub rank: String,
    /// Number of decimals of the scores. Full precision if not set.
    pub precision: Option<usize>,
}

impl OutputColumns {
    pub fn format_score(&self, score: f64) -> String {
        match self.precision {
            Some(p) => format!("{:.*}", p, score),
            None => score.to_string(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn parse(s: &str) -> Destination {
        match s {
            "" | "stdout" => Destination::Stdout,
            p => Destination::File(PathBuf::from(p)),
        }
    }

    /// Writes the content, creating the parent directories if needed.
    pub fn write(&self, content: &str) -> RankResult<()> {
        match self {
            Destination::Stdout => {
                print!("{}", content);
                Ok(())
            }
            Destination::File(p) => {
                let path = p.display().to_string();
                if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).context(WritingOutputSnafu { path: &path })?;
                }
                fs::write(p, content).context(WritingOutputSnafu { path })
            }
        }
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stdout => write!(f, "stdout"),
            Destination::File(p) => write!(f, "{}", p.display()),
        }
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations() {
        assert_eq!(Destination::parse("stdout"), Destination::Stdout);
        assert_eq!(Destination::parse(""), Destination::Stdout);
        assert_eq!(
            Destination::parse("out/result.csv"),
            Destination::File(PathBuf::from("out/result.csv"))
        );
        assert_eq!(
            Destination::parse("out/result.csv").to_string(),
            "out/result.csv"
        );
    }

    #[test]
    fn score_format() {
        let mut columns = OutputColumns {
            score: "Topsis Score".to_string(),
            rank: "Rank".to_string(),
            precision: Some(3),
        };
        assert_eq!(columns.format_score(0.5573165774426992), "0.557");
        columns.precision = None;
        assert_eq!(columns.format_score(0.5), "0.5");
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/data/phones.csv"), "phones.csv");
        assert_eq!(simplify_file_name("phones.csv"), "phones.csv");
    }
}
