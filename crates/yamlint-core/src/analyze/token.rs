use crate::check::Checker;
use crate::rule_set::Rule;
use crate::token::TokenWindow;

use crate::lints::document_start::document_start::document_start;

pub fn token(window: &TokenWindow, checker: &mut Checker) {
    if checker.is_rule_enabled(Rule::DocumentStart) {
        let problems = document_start(&checker.options.document_start, window);
        checker.report_problems(Rule::DocumentStart, problems);
    }
}
