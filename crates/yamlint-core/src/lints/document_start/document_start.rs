use serde::Deserialize;

use crate::diagnostic::*;
use crate::token::{TokenKind, TokenWindow};

/// Options of the `document-start` rule, as written in `[lint.document-start]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DocumentStartOptions {
    /// `true` when the `---` marker is required, `false` when it is forbidden.
    pub present: bool,
    /// Minimal number of empty lines after `---`.
    pub min_empty_lines_after: i64,
    /// Maximal number of empty lines after `---`. `-1` means no limit.
    pub max_empty_lines_after: i64,
}

impl Default for DocumentStartOptions {
    fn default() -> Self {
        Self { present: true, min_empty_lines_after: 0, max_empty_lines_after: -1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStart {
    Missing,
    Forbidden,
    TooManyEmptyLines,
    TooFewEmptyLines,
}

/// ## What it does
///
/// Requires or forbids the document start marker (`---`), and optionally
/// bounds the number of empty lines that follow it.
///
/// ## Why is this bad?
///
/// In a stream with several documents, an explicit `---` makes it obvious
/// where each document begins. Some projects prefer the opposite and never
/// write the marker, so the rule can be flipped with `present = false`.
///
/// ## Example
///
/// With `present = true`:
///
/// ```yaml
/// this:
///   is: [a, document]
/// ---
/// - this
/// - is: another one
/// ```
///
/// Use instead:
///
/// ```yaml
/// ---
/// this:
///   is: [a, document]
/// ---
/// - this
/// - is: another one
/// ```
///
/// With `present = false`, the following is reported:
///
/// ```yaml
/// ---
/// this:
///   is: [a, document]
/// ...
/// ```
impl Violation for DocumentStart {
    fn name(&self) -> &'static str {
        "document-start"
    }
    fn body(&self) -> String {
        match self {
            Self::Missing => "missing document start \"---\"",
            Self::Forbidden => "found forbidden document start \"---\"",
            Self::TooManyEmptyLines => "too many empty lines after document start",
            Self::TooFewEmptyLines => "too few empty lines after document start",
        }
        .to_string()
    }
}

/// Tokens after which a new document begins.
const DOCUMENT_OPENERS: &[TokenKind] =
    &[TokenKind::StreamStart, TokenKind::DocumentEnd, TokenKind::Directive];

/// Tokens that may legitimately follow a document opener.
const MARKER_OR_END: &[TokenKind] =
    &[TokenKind::DocumentStart, TokenKind::Directive, TokenKind::StreamEnd];

pub fn document_start(options: &DocumentStartOptions, window: &TokenWindow) -> Vec<LintProblem> {
    let token = window.token;
    let mut problems = Vec::new();

    if !options.present {
        if token.is(TokenKind::DocumentStart) {
            problems.push(LintProblem::new(
                token.line + 1,
                token.column + 1,
                DocumentStart::Forbidden,
            ));
        }
        return problems;
    }

    let Some(prev) = window.prev else {
        return problems;
    };

    if prev.is_any(DOCUMENT_OPENERS) && !token.is_any(MARKER_OR_END) {
        problems.push(LintProblem::new(token.line + 1, 1, DocumentStart::Missing));
    }

    if prev.is(TokenKind::DocumentStart) {
        // Negative when the document starts on the same line as `---`.
        let empty_lines = token.line as i64 - prev.line as i64 - 1;

        if options.max_empty_lines_after >= 0 && empty_lines > options.max_empty_lines_after {
            problems.push(LintProblem::new(
                token.line + 1,
                token.column + 1,
                DocumentStart::TooManyEmptyLines,
            ));
        }

        if options.min_empty_lines_after > 0 && empty_lines < options.min_empty_lines_after {
            problems.push(LintProblem::new(
                token.line + 1,
                token.column + 1,
                DocumentStart::TooFewEmptyLines,
            ));
        }
    }

    problems
}
