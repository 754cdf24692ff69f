use std::fmt::Display;
use std::fmt::Formatter;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::lints::document_start::document_start::DocumentStartOptions;
use crate::settings::LinterSettings;
use crate::settings::Settings;

#[derive(Debug)]
pub enum ParseTomlError {
    Read(PathBuf, io::Error),
    Deserialize(PathBuf, toml::de::Error),
}

impl std::error::Error for ParseTomlError {}

impl Display for ParseTomlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // It's nicer if we don't make these paths relative, so we can quickly
            // jump to the TOML file to see what is wrong
            Self::Read(path, err) => {
                write!(f, "Failed to read {path}:\n{err}", path = path.display())
            }
            Self::Deserialize(path, err) => {
                write!(f, "Failed to parse {path}:\n{err}", path = path.display())
            }
        }
    }
}

pub fn parse_yamlint_toml(path: &Path) -> Result<TomlOptions, ParseTomlError> {
    let toml =
        fs::read_to_string(path).map_err(|err| ParseTomlError::Read(path.to_path_buf(), err))?;
    toml::from_str(&toml).map_err(|err| ParseTomlError::Deserialize(path.to_path_buf(), err))
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TomlOptions {
    pub lint: Option<LinterTomlOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LinterTomlOptions {
    /// # Rules to select
    ///
    /// If this is missing, then all rules that are enabled by default are
    /// used. Rule types (`token`, `line`, `comment`) can be used to select all
    /// rules of that type at once.
    pub select: Option<Vec<String>>,

    /// # Rules to ignore
    ///
    /// If this is empty, then no rules are excluded. This field has higher
    /// importance than `select`, so if a rule name appears by mistake in both
    /// `select` and `ignore`, it is ignored.
    pub ignore: Option<Vec<String>>,

    /// # Patterns to exclude from checking
    ///
    /// Exclude patterns are modeled after what you can provide in a
    /// [.gitignore](https://git-scm.com/docs/gitignore), and are resolved
    /// relative to the directory containing `yamlint.toml`. For example,
    /// `vendor/` excludes a directory named `vendor` anywhere below it, and
    /// `/ci.yml` only excludes the `ci.yml` file next to `yamlint.toml`.
    pub exclude: Option<Vec<String>>,

    /// # Whether or not to use default exclude patterns
    ///
    /// yamlint automatically excludes `.git/`, `node_modules/` and `.venv/`.
    /// Set this to `false` to check those folders too.
    pub default_exclude: Option<bool>,

    /// # Options of the `document-start` rule
    ///
    /// ```toml
    /// [lint.document-start]
    /// present = true
    /// min-empty-lines-after = 0
    /// max-empty-lines-after = -1
    /// ```
    pub document_start: Option<DocumentStartOptions>,
}

/// Return the path to the `yamlint.toml` or `.yamlint.toml` file in a given directory.
pub fn find_yamlint_toml_in_directory<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    // Check for `yamlint.toml` first, as we prioritize the "visible" one.
    let toml = path.as_ref().join("yamlint.toml");
    if toml.is_file() {
        return Some(toml);
    }

    let toml = path.as_ref().join(".yamlint.toml");
    if toml.is_file() {
        return Some(toml);
    }

    None
}

/// Find the path to the closest `yamlint.toml` or `.yamlint.toml` if one exists, walking up the filesystem
pub fn find_yamlint_toml<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    path.as_ref().ancestors().find_map(find_yamlint_toml_in_directory)
}

impl TomlOptions {
    pub fn into_settings(self) -> Settings {
        let linter = self.lint.unwrap_or_default();

        let linter = LinterSettings {
            select: linter.select,
            ignore: linter.ignore,
            exclude: linter.exclude,
            default_exclude: linter.default_exclude,
            document_start: linter.document_start,
        };

        Settings { linter }
    }
}
