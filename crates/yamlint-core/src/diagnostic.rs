use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// Details on the violated rule.
pub trait Violation {
    /// Name of the rule.
    fn name(&self) -> &'static str;
    /// Explanation of the violation.
    fn body(&self) -> String;
}

#[derive(Serialize, Deserialize, Debug, Clone)]
// A single style violation as reported by a rule. Positions are 1-indexed.
// Problems compare by position and rule only, so that sorting keeps the
// emission order of several messages of one rule at the same position.
pub struct LintProblem {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub rule: String,
}

impl LintProblem {
    pub fn new<T: Violation>(line: usize, column: usize, violation: T) -> Self {
        Self {
            line,
            column,
            message: violation.body(),
            rule: violation.name().to_string(),
        }
    }
}

impl fmt::Display for LintProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} ({})", self.line, self.column, self.message, self.rule)
    }
}

impl PartialEq for LintProblem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LintProblem {}

impl Ord for LintProblem {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.column, &self.rule).cmp(&(other.line, other.column, &other.rule))
    }
}

impl PartialOrd for LintProblem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
// The object that is eventually reported and printed in the console.
pub struct Diagnostic {
    pub filename: PathBuf,
    #[serde(flatten)]
    pub problem: LintProblem,
}

impl Diagnostic {
    pub fn new(filename: PathBuf, problem: LintProblem) -> Self {
        Self { filename, problem }
    }

    pub fn rule(&self) -> &str {
        &self.problem.rule
    }

    pub fn message(&self) -> &str {
        &self.problem.message
    }

    pub fn line(&self) -> usize {
        self.problem.line
    }

    pub fn column(&self) -> usize {
        self.problem.column
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare first by filename, then by position
        match self.filename.cmp(&other.filename) {
            Ordering::Equal => self.problem.cmp(&other.problem),
            other => other,
        }
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
