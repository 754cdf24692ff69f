use yamlint_core::discovery::{discover_settings, discover_yaml_file_paths};
use yamlint_core::{config::ArgsConfig, config::build_config, diagnostic::Diagnostic};

use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::args::CheckCommand;
use crate::output_format::{self, GithubEmitter};
use crate::statistics::print_statistics;
use crate::status::ExitStatus;

use output_format::{ConciseEmitter, Emitter, FullEmitter, JsonEmitter, OutputFormat};

pub fn check(args: CheckCommand) -> Result<ExitStatus> {
    let start = if args.with_timing {
        Some(Instant::now())
    } else {
        None
    };

    // Track if we're using a config from a parent directory
    let mut parent_config_path: Option<PathBuf> = None;
    let cwd = env::current_dir().ok();

    // A single configuration applies to the whole run: the one closest to the
    // first path.
    let mut discovered = discover_settings(&args.files)?.into_iter();
    let settings = discovered.next().map(|mut ds| {
        if args.no_default_exclude {
            ds.settings.linter.default_exclude = Some(false);
        }
        ds
    });
    for ignored in discovered {
        if let Some(config_path) = ignored.config_path {
            tracing::warn!(
                "Ignoring '{}': only one configuration file is used per run",
                config_path.display()
            );
        }
    }

    if let Some(ds) = &settings
        && let (Some(config_path), Some(current_dir)) = (&ds.config_path, &cwd)
        && let Some(config_dir) = config_path.parent()
        && config_dir != current_dir
    {
        parent_config_path = Some(config_path.clone());
    }

    let paths = discover_yaml_file_paths(&args.files, settings.as_ref(), args.no_default_exclude)
        .into_iter()
        .filter_map(|path| match path {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!("Failed to walk path: {err}");
                None
            }
        })
        .collect::<Vec<_>>();

    if paths.is_empty() {
        println!(
            "{}: {}",
            "Warning".yellow().bold(),
            "No YAML files found under the given path(s).".white().bold()
        );
        return Ok(ExitStatus::Success);
    }

    let check_config = ArgsConfig {
        files: args.files.iter().map(|s| s.into()).collect(),
        select: args.select.clone(),
        ignore: args.ignore.clone(),
    };

    let config = build_config(&check_config, settings.as_ref().map(|ds| &ds.settings), paths)?;

    let file_results = yamlint_core::check::check(config);

    let mut all_errors = Vec::new();
    let mut all_diagnostics = Vec::new();

    for (path, result) in file_results {
        match result {
            Ok(diagnostics) => {
                if !diagnostics.is_empty() {
                    all_diagnostics.push((path, diagnostics));
                }
            }
            Err(e) => {
                all_errors.push((path, e));
            }
        }
    }

    // Flatten all diagnostics into a single vector and sort globally
    let mut all_diagnostics_flat: Vec<&Diagnostic> = all_diagnostics
        .iter()
        .flat_map(|(_path, diagnostics)| diagnostics.iter())
        .collect();

    all_diagnostics_flat.sort();

    if args.statistics {
        for (_path, err) in &all_errors {
            eprintln!("{}: {:#}", "Error".red().bold(), err);
        }
        let status = print_statistics(&all_diagnostics_flat, parent_config_path)?;
        if !all_errors.is_empty() {
            return Ok(ExitStatus::Error);
        }
        return Ok(status);
    }

    let mut stdout = std::io::stdout();

    match args.output_format {
        OutputFormat::Concise => {
            ConciseEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Json => {
            JsonEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Github => {
            GithubEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
        OutputFormat::Full => {
            FullEmitter.emit(&mut stdout, &all_diagnostics_flat, &all_errors)?;
        }
    }

    // For human-readable formats, print timing and config info
    // Skip for JSON/GitHub to avoid corrupting structured output
    let is_structured_format = matches!(
        args.output_format,
        OutputFormat::Json | OutputFormat::Github
    );

    if !is_structured_format {
        // Inform the user if the config file used comes from a parent directory.
        if let Some(config_path) = parent_config_path {
            println!("\nUsed '{}'", config_path.display());
        }

        if let Some(start) = start {
            let duration = start.elapsed();
            println!("\nChecked files in: {duration:?}");
        }
    }

    if !all_errors.is_empty() {
        return Ok(ExitStatus::Error);
    }

    if all_diagnostics.is_empty() {
        return Ok(ExitStatus::Success);
    }

    Ok(ExitStatus::Failure)
}
