use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use crate::analyze;
use crate::config::{Config, RuleOptions};
use crate::diagnostic::*;
use crate::fs::relativize_path;
use crate::rule_set::{Rule, RuleSet};
use crate::suppression::SuppressionManager;
use crate::token::{tokenize, windows};

pub fn check(config: Config) -> Vec<(String, Result<Vec<Diagnostic>, anyhow::Error>)> {
    // Wrap config in Arc to avoid expensive clones in parallel execution
    let config = Arc::new(config);

    config
        .paths
        .par_iter()
        .map(|file| {
            let res = lint_only(file, Arc::clone(&config));
            (relativize_path(file), res)
        })
        .collect()
}

pub fn lint_only(path: &PathBuf, config: Arc<Config>) -> Result<Vec<Diagnostic>, anyhow::Error> {
    let path = relativize_path(path);
    tracing::debug!("Checking {path}");

    let contents = fs::read_to_string(Path::new(&path))
        .with_context(|| format!("Failed to read file: {path}"))?;

    let checks = get_checks(&contents, &PathBuf::from(&path), &config)
        .with_context(|| format!("Failed to get checks for file: {path}"))?;

    Ok(checks)
}

#[derive(Debug)]
// The object that collects problems while the token stream of one file is
// walked.
pub struct Checker {
    // The problems to report (possibly empty).
    pub problems: Vec<LintProblem>,
    pub rules: RuleSet,
    pub options: RuleOptions,
    // Tracks comment-based suppression directives like `# yamlint disable-line`
    pub suppression: SuppressionManager,
}

impl Checker {
    fn new(rules: RuleSet, options: RuleOptions, suppression: SuppressionManager) -> Self {
        Self { problems: vec![], rules, options, suppression }
    }

    pub(crate) fn report_problems(&mut self, rule: Rule, problems: Vec<LintProblem>) {
        for problem in problems {
            if self.suppression.should_skip_rule(problem.line, rule.name()) {
                tracing::trace!("Suppressed {problem}");
                continue;
            }
            self.problems.push(problem);
        }
    }

    pub(crate) fn is_rule_enabled(&self, rule: Rule) -> bool {
        self.rules.contains(rule)
    }
}

// Takes the YAML text, tokenizes it, and obtains a (possibly empty) vector of
// `Diagnostic`s sorted by position.
pub fn get_checks(contents: &str, file: &Path, config: &Config) -> Result<Vec<Diagnostic>> {
    let suppression = SuppressionManager::from_text(contents);

    if suppression.should_skip_file() {
        tracing::debug!("Skipping {file} due to `disable-file`", file = file.display());
        return Ok(vec![]);
    }

    let tokens = tokenize(contents).map_err(|err| err.with_filename(file))?;

    let mut checker = Checker::new(config.rules.clone(), config.options, suppression);
    for window in windows(&tokens) {
        analyze::token::token(&window, &mut checker);
    }

    let mut diagnostics: Vec<Diagnostic> = checker
        .problems
        .into_iter()
        .map(|problem| Diagnostic::new(file.to_path_buf(), problem))
        .collect();

    // Stable, so problems at the same position keep their emission order.
    diagnostics.sort();

    Ok(diagnostics)
}
