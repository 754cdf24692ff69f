use crate::{
    lints::document_start::document_start::DocumentStartOptions,
    rule_set::{Rule, RuleSet, RuleType},
    settings::Settings,
};
use anyhow::Result;
use std::{collections::HashSet, path::PathBuf};

#[derive(Clone, Debug, Default)]
/// Arguments provided in the CLI.
pub struct ArgsConfig {
    /// Paths to files to lint.
    pub files: Vec<PathBuf>,
    /// Names of rules to use. A single string with commas between rule names.
    pub select: String,
    /// Names of rules to ignore. A single string with commas between rule names.
    pub ignore: String,
}

/// Options of every configurable rule. Fixed for a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleOptions {
    pub document_start: DocumentStartOptions,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Paths to files to lint.
    pub paths: Vec<PathBuf>,
    /// Rules to apply, after reconciling the CLI and the config file.
    pub rules: RuleSet,
    pub options: RuleOptions,
}

impl Config {
    pub fn new(paths: Vec<PathBuf>, rules: RuleSet, options: RuleOptions) -> Self {
        Self { paths, rules, options }
    }
}

pub fn build_config(
    args: &ArgsConfig,
    settings: Option<&Settings>,
    paths: Vec<PathBuf>,
) -> Result<Config> {
    let rules_cli = parse_rules_cli(&args.select, &args.ignore)?;
    let rules_toml = parse_rules_toml(settings)?;
    let rules = reconcile_rules(rules_cli, rules_toml);

    let options = RuleOptions {
        document_start: settings
            .and_then(|s| s.linter.document_start)
            .unwrap_or_default(),
    };

    tracing::debug!(
        "Linting {} file(s) with rules: {}",
        paths.len(),
        rules.iter().map(|r| r.name()).collect::<Vec<_>>().join(", ")
    );

    Ok(Config { paths, rules, options })
}

type SelectedAndIgnored = (Option<HashSet<Rule>>, HashSet<Rule>);

/// Parse CLI rule arguments and return (selected_rules, ignored_rules).
///
/// Returns None for selected_rules if no --select was specified.
/// Returns empty set for ignored_rules if no --ignore was specified.
pub fn parse_rules_cli(select: &str, ignore: &str) -> Result<SelectedAndIgnored> {
    let selected_rules = if select.is_empty() {
        None
    } else {
        let passed_by_user: Vec<&str> = select.split(',').collect();
        Some(resolve_rule_names(&passed_by_user, "--select")?)
    };

    let ignored_rules = if ignore.is_empty() {
        HashSet::new()
    } else {
        let passed_by_user: Vec<&str> = ignore.split(',').collect();
        resolve_rule_names(&passed_by_user, "--ignore")?
    };

    Ok((selected_rules, ignored_rules))
}

/// Same as [parse_rules_cli] for the `select` and `ignore` fields of
/// `yamlint.toml`.
pub fn parse_rules_toml(settings: Option<&Settings>) -> Result<SelectedAndIgnored> {
    let Some(settings) = settings else {
        return Ok((None, HashSet::new()));
    };
    let linter = &settings.linter;

    let selected_rules = match &linter.select {
        Some(names) => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            Some(resolve_rule_names(&names, "select")?)
        }
        None => None,
    };

    let ignored_rules = match &linter.ignore {
        Some(names) => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            resolve_rule_names(&names, "ignore")?
        }
        None => HashSet::new(),
    };

    Ok((selected_rules, ignored_rules))
}

/// The CLI `select` replaces the TOML one, ignored rules from both sides add
/// up, and `ignore` always wins over `select`.
pub fn reconcile_rules(rules_cli: SelectedAndIgnored, rules_toml: SelectedAndIgnored) -> RuleSet {
    let (select_cli, ignore_cli) = rules_cli;
    let (select_toml, ignore_toml) = rules_toml;

    let selected: HashSet<Rule> = select_cli
        .or(select_toml)
        .unwrap_or_else(|| Rule::enabled_by_default().collect());

    selected
        .into_iter()
        .filter(|rule| !ignore_cli.contains(rule) && !ignore_toml.contains(rule))
        .collect()
}

/// Turn rule names and rule types into rules. Empty names are skipped so that
/// `select = [""]` selects nothing.
fn resolve_rule_names(names: &[&str], origin: &str) -> Result<HashSet<Rule>> {
    let mut rules = HashSet::new();
    let mut invalid_rules = Vec::new();

    for name in names.iter().map(|name| name.trim()) {
        if name.is_empty() {
            continue;
        }
        if let Some(rule) = Rule::from_name(name) {
            rules.insert(rule);
        } else if let Ok(rule_type) = name.parse::<RuleType>() {
            rules.extend(Rule::by_type(rule_type));
        } else {
            invalid_rules.push(name.to_string());
        }
    }

    if !invalid_rules.is_empty() {
        return Err(anyhow::anyhow!(
            "Unknown rules in `{}`: {}",
            origin,
            invalid_rules.join(", ")
        ));
    }

    Ok(rules)
}
