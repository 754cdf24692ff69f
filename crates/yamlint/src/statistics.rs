use colored::Colorize;
use std::{collections::HashMap, path::PathBuf};
use yamlint_core::diagnostic::Diagnostic;

use crate::status::ExitStatus;

/// Number of violations of each rule, most frequent first. Ties are sorted by
/// rule name so that the output is stable.
pub fn count_by_rule<'a>(diagnostics: &[&'a Diagnostic]) -> Vec<(&'a str, usize)> {
    let mut hm: HashMap<&str, usize> = HashMap::new();

    for diagnostic in diagnostics {
        *hm.entry(diagnostic.rule()).or_default() += 1;
    }

    let mut sorted: Vec<_> = hm.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    sorted
}

pub fn print_statistics(
    diagnostics: &[&Diagnostic],
    parent_config_path: Option<PathBuf>,
) -> anyhow::Result<ExitStatus> {
    if diagnostics.is_empty() {
        println!("All checks passed!");
        return Ok(ExitStatus::Success);
    }

    for (rule, count) in count_by_rule(diagnostics) {
        println!("{:>5} {}", count.to_string().bold(), rule.bold().red());
    }

    // Inform the user if the config file used comes from a parent directory.
    if let Some(config_path) = parent_config_path {
        println!("\nUsed '{}'", config_path.display());
    }

    Ok(ExitStatus::Failure)
}
