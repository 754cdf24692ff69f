use rustc_hash::{FxHashMap, FxHashSet};

const DISABLE_FILE: &str = "# yamlint disable-file";
const DISABLE_LINE: &str = "# yamlint disable-line";

/// Rules silenced on one line. An empty set silences every rule.
type SilencedRules = FxHashSet<String>;

/// Tracks comment-based suppression directives:
///
/// - `# yamlint disable-file` on the first line skips the whole file;
/// - `# yamlint disable-line` at the end of a line skips every rule on that
///   line, and on the following line when the comment stands alone;
/// - `# yamlint disable-line rule:document-start rule:...` restricts the
///   above to the listed rules.
#[derive(Debug, Default, Clone)]
pub struct SuppressionManager {
    skip_file: bool,
    /// Keyed by 1-indexed line number.
    lines: FxHashMap<usize, SilencedRules>,
}

impl SuppressionManager {
    pub fn from_text(contents: &str) -> Self {
        let skip_file = contents
            .lines()
            .next()
            .is_some_and(|first| first.trim() == DISABLE_FILE);
        let mut manager = Self { skip_file, lines: FxHashMap::default() };

        for (index, line) in contents.lines().enumerate() {
            let Some(start) = line.find(DISABLE_LINE) else {
                continue;
            };

            let rest = &line[start + DISABLE_LINE.len()..];
            // `# yamlint disable-lines` or similar are not directives
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                continue;
            }

            let rules: SilencedRules = rest
                .split_whitespace()
                .filter_map(|word| word.strip_prefix("rule:"))
                .map(str::to_string)
                .collect();

            let line_number = if line[..start].trim().is_empty() {
                index + 2
            } else {
                index + 1
            };

            tracing::trace!("Suppression directive applies to line {line_number}");
            manager.lines.insert(line_number, rules);
        }

        manager
    }

    pub fn should_skip_file(&self) -> bool {
        self.skip_file
    }

    /// Check if `rule` is silenced on `line` (1-indexed).
    pub fn should_skip_rule(&self, line: usize, rule: &str) -> bool {
        match self.lines.get(&line) {
            Some(rules) => rules.is_empty() || rules.contains(rule),
            None => false,
        }
    }
}
