use annotate_snippets::{Level, Renderer, Snippet};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use yamlint_core::diagnostic::Diagnostic;
use yamlint_core::error::ParseError;
use yamlint_core::fs::relativize_path;

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    errors: Vec<JsonError>,
}

#[derive(Debug, Serialize)]
struct JsonError {
    file: String,
    error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    /// Print diagnostics with full context using annotated code snippets
    Full,
    /// Print diagnostics in a concise format, one per line
    Concise,
    /// Print diagnostics as GitHub format
    Github,
    /// Print diagnostics as JSON
    Json,
}

/// Takes the diagnostics and errors in each file and then displays them in
/// different ways depending on the `--output-format` provided by the user.
pub trait Emitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()>;
}

/// Print file errors on stderr. Tokenizer errors are shown without the
/// context chain since they already name the file and position.
fn print_errors(errors: &[(String, anyhow::Error)]) {
    for (_path, err) in errors {
        let root_cause = err.root_cause();
        if root_cause.is::<ParseError>() {
            eprintln!("{}: {}", "Error".red().bold(), root_cause);
        } else {
            eprintln!("{}: {:#}", "Error".red().bold(), err);
        }
    }
}

fn write_summary<W: Write>(writer: &mut W, total_diagnostics: usize) -> std::io::Result<()> {
    match total_diagnostics {
        0 => writeln!(writer, "All checks passed!"),
        1 => writeln!(writer, "\nFound 1 error."),
        n => writeln!(writer, "\nFound {n} errors."),
    }
}

pub struct ConciseEmitter;

impl Emitter for ConciseEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        print_errors(errors);

        // Cache relativized paths to avoid repeated filesystem operations
        let mut path_cache = HashMap::new();

        for diagnostic in diagnostics {
            let relative_path = path_cache
                .entry(&diagnostic.filename)
                .or_insert_with(|| relativize_path(&diagnostic.filename));

            writeln!(
                writer,
                "{} [{}:{}] {} {}",
                relative_path.white(),
                diagnostic.line(),
                diagnostic.column(),
                diagnostic.rule().red(),
                diagnostic.message()
            )?;
        }

        if diagnostics.is_empty() && !errors.is_empty() {
            writer.flush()?;
            return Ok(());
        }
        write_summary(&mut writer, diagnostics.len())?;

        writer.flush()?;
        Ok(())
    }
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        // Convert errors to a serializable format
        let json_errors: Vec<JsonError> = errors
            .iter()
            .map(|(path, err)| JsonError { file: path.clone(), error: format!("{:#}", err) })
            .collect();

        let output = JsonOutput { diagnostics: diagnostics.to_vec(), errors: json_errors };

        serde_json::to_writer_pretty(&mut writer, &output)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub struct GithubEmitter;

impl Emitter for GithubEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        _errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        for diagnostic in diagnostics {
            // We want a message like this:
            // ::warning title=yamlint (document-start),file=ci.yml,line=1,col=1::ci.yml:1:1: [document-start] missing document start "---"
            //
            // The location appears twice:
            // - one between the "::" markers: this is for the annotation to
            //   appear when we browse changed files in Github PR;
            // - one after the "::" marker: this is so that the workflow shows
            //   the location of diagnostics when we inspect the workflow itself,
            //   without the Github annotations.
            writeln!(
                writer,
                "::warning title=yamlint ({rule}),file={file},line={row},col={col}::{file}:{row}:{col}: [{rule}] {message}",
                rule = diagnostic.rule(),
                file = diagnostic.filename.to_string_lossy(),
                row = diagnostic.line(),
                col = diagnostic.column(),
                message = diagnostic.message(),
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Byte offset of a 1-indexed `line` and `column` in `source`, where the
/// column counts characters. Positions past the end of a line stick to its
/// end.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let text = text.trim_end_matches(['\n', '\r']);
            let in_line = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map_or(text.len(), |(offset, _)| offset);
            return line_start + in_line;
        }
        line_start += text.len();
    }
    source.len()
}

pub struct FullEmitter;

impl Emitter for FullEmitter {
    fn emit<W: Write>(
        &self,
        writer: &mut W,
        diagnostics: &[&Diagnostic],
        errors: &[(String, anyhow::Error)],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);
        // Use plain renderer when NO_COLOR is set or in snapshots
        let use_colors = std::env::var("NO_COLOR").is_err() && colored::control::SHOULD_COLORIZE.should_colorize();
        let renderer = if use_colors {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        print_errors(errors);
        if !errors.is_empty() && !diagnostics.is_empty() {
            eprintln!(); // Add separator between errors and diagnostics
        }

        // Cache file contents and relativized paths
        let mut file_cache: HashMap<&Path, String> = HashMap::new();
        let mut path_cache = HashMap::new();

        for diagnostic in diagnostics {
            if !file_cache.contains_key(diagnostic.filename.as_path()) {
                match fs::read_to_string(&diagnostic.filename) {
                    Ok(content) => {
                        file_cache.insert(diagnostic.filename.as_path(), content);
                    }
                    Err(err) => {
                        tracing::warn!(
                            "Could not read source file {}: {}",
                            diagnostic.filename.display(),
                            err
                        );
                    }
                }
            }
        }

        let mut total_diagnostics = 0;

        for diagnostic in diagnostics {
            let file_path = path_cache
                .entry(&diagnostic.filename)
                .or_insert_with(|| relativize_path(&diagnostic.filename));

            let Some(source) = file_cache.get(diagnostic.filename.as_path()) else {
                // Fall back to the concise form if the file vanished
                writeln!(
                    writer,
                    "{file_path} [{}:{}] {} {}\n",
                    diagnostic.line(),
                    diagnostic.column(),
                    diagnostic.rule(),
                    diagnostic.message()
                )?;
                total_diagnostics += 1;
                continue;
            };

            let start = byte_offset(source, diagnostic.line(), diagnostic.column());
            let end = source[start..]
                .chars()
                .next()
                .filter(|c| *c != '\n' && *c != '\r')
                .map_or(start, |c| start + c.len_utf8());

            let snippet = Snippet::source(source)
                .origin(file_path)
                .fold(true)
                .annotation(Level::Warning.span(start..end).label(diagnostic.message()));

            let message = Level::Warning.title(diagnostic.rule()).snippet(snippet);

            let rendered = renderer.render(message);
            writeln!(writer, "{rendered}\n")?;

            total_diagnostics += 1;
        }

        if total_diagnostics == 0 && !errors.is_empty() {
            writer.flush()?;
            return Ok(());
        }
        match total_diagnostics {
            0 => writeln!(writer, "All checks passed!")?,
            1 => writeln!(writer, "Found 1 error.")?,
            n => writeln!(writer, "Found {n} errors.")?,
        }

        writer.flush()?;
        Ok(())
    }
}
