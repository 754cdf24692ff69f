use ignore::DirEntry;
use rustc_hash::FxHashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::fs;
use crate::fs::has_yaml_extension;
use crate::settings::Settings;
use crate::toml::find_yamlint_toml_in_directory;
use crate::toml::parse_yamlint_toml;
use etcetera::BaseStrategy;

/// Default patterns to exclude from linting
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[".git/", "node_modules/", ".venv/"];

#[derive(Debug)]
pub struct DiscoveredSettings {
    pub directory: PathBuf,
    pub settings: Settings,
    /// Path to the config file that was used
    pub config_path: Option<PathBuf>,
}

/// Get the user config directory for yamlint
fn get_user_config_dir() -> Option<PathBuf> {
    let strategy = etcetera::base_strategy::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("yamlint"))
}

/// Walk a set of `paths` looking for `yamlint.toml`s.
///
/// For each `path`, we:
/// - Walk up its ancestors until the user config directory, looking for a `yamlint.toml`
/// - If no config found in ancestors, fall back to checking the user config directory
pub fn discover_settings<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Vec<DiscoveredSettings>> {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let mut seen = FxHashSet::default();
    let mut discovered_settings = Vec::with_capacity(paths.len());
    let user_config_dir = get_user_config_dir();

    for path in &paths {
        let mut found_config = false;

        for ancestor in path.ancestors() {
            let is_new_ancestor = seen.insert(ancestor);

            if !is_new_ancestor {
                // We already visited this ancestor, we can stop here.
                break;
            }

            if let Some(toml) = find_yamlint_toml_in_directory(ancestor) {
                tracing::debug!("Found configuration file {path}", path = toml.display());
                let settings = parse_settings(&toml)?;
                discovered_settings.push(DiscoveredSettings {
                    directory: ancestor.to_path_buf(),
                    settings,
                    config_path: Some(toml),
                });
                found_config = true;
                break;
            }

            // Stop at user config directory if we have one
            if let Some(ref config_dir) = user_config_dir
                && ancestor == config_dir
            {
                break;
            }
        }

        // If no config found in ancestors, check user config directory as fallback
        if !found_config
            && let Some(ref config_dir) = user_config_dir
            && seen.insert(config_dir.as_path())
            && let Some(toml) = find_yamlint_toml_in_directory(config_dir)
        {
            tracing::debug!("Using user configuration file {path}", path = toml.display());
            let settings = parse_settings(&toml)?;
            discovered_settings.push(DiscoveredSettings {
                directory: config_dir.clone(),
                settings,
                config_path: Some(toml),
            });
        }
    }

    Ok(discovered_settings)
}

/// Parse [Settings] from a given `yamlint.toml`
fn parse_settings(toml: &Path) -> anyhow::Result<Settings> {
    let options = parse_yamlint_toml(toml)?;
    Ok(options.into_settings())
}

type DiscoveredFiles = Vec<Result<PathBuf, ignore::Error>>;

/// For each provided `path`, recursively search for any YAML files within
/// that `path` that match our inclusion criteria.
///
/// Exclude patterns from `settings` are resolved relative to the directory
/// containing its `yamlint.toml`.
pub fn discover_yaml_file_paths<P: AsRef<Path>>(
    paths: &[P],
    settings: Option<&DiscoveredSettings>,
    no_default_exclude: bool,
) -> DiscoveredFiles {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let Some((first_path, paths)) = paths.split_first() else {
        // No paths provided
        return Vec::new();
    };

    let mut builder = ignore::WalkBuilder::new(first_path);

    for path in paths {
        builder.add(path);
    }

    builder.hidden(true);
    builder.parents(true);
    builder.ignore(false);
    builder.git_ignore(true);
    builder.git_global(true);
    builder.git_exclude(true);

    let mut patterns: Vec<&str> = Vec::new();
    let mut root = PathBuf::from(".");

    if let Some(discovered) = settings {
        root = discovered.directory.clone();
        let linter = &discovered.settings.linter;

        if let Some(exclude_patterns) = &linter.exclude {
            patterns.extend(exclude_patterns.iter().map(String::as_str));
        }
        if !no_default_exclude && linter.default_exclude.unwrap_or(true) {
            patterns.extend_from_slice(DEFAULT_EXCLUDE_PATTERNS);
        }
    } else if !no_default_exclude {
        patterns.extend_from_slice(DEFAULT_EXCLUDE_PATTERNS);
    }

    if !patterns.is_empty() {
        let mut override_builder = ignore::overrides::OverrideBuilder::new(&root);
        for pattern in patterns {
            // Add as negation pattern (exclude)
            if let Err(e) = override_builder.add(&format!("!{pattern}")) {
                tracing::warn!("Failed to add exclude pattern '{}': {}", pattern, e);
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                builder.overrides(overrides);
            }
            Err(e) => tracing::warn!("Failed to build exclude patterns: {}", e),
        }
    }

    // Prefer `available_parallelism()`, with a max of 12 threads
    builder.threads(
        std::thread::available_parallelism()
            .map_or(1, std::num::NonZeroUsize::get)
            .min(12),
    );

    let walker = builder.build_parallel();

    let state = FilesState::new();
    let mut visitor_builder = FilesVisitorBuilder::new(&state);
    walker.visit(&mut visitor_builder);

    let mut files = state.finish();
    // The parallel walk has no stable order
    files.sort_by(|a, b| match (a, b) {
        (Ok(a), Ok(b)) => a.cmp(b),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    });
    files
}

/// Shared state across the threads of the walker
struct FilesState {
    files: std::sync::Mutex<DiscoveredFiles>,
}

impl FilesState {
    fn new() -> Self {
        Self { files: std::sync::Mutex::new(Vec::new()) }
    }

    fn finish(self) -> DiscoveredFiles {
        self.files
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Object capable of building a [FilesVisitor]
///
/// Implements the `build()` method of [ignore::ParallelVisitorBuilder], which
/// [ignore::WalkParallel] utilizes to create one [FilesVisitor] per thread.
struct FilesVisitorBuilder<'state> {
    state: &'state FilesState,
}

impl<'state> FilesVisitorBuilder<'state> {
    fn new(state: &'state FilesState) -> Self {
        Self { state }
    }
}

impl<'state> ignore::ParallelVisitorBuilder<'state> for FilesVisitorBuilder<'state> {
    fn build(&mut self) -> Box<dyn ignore::ParallelVisitor + 'state> {
        Box::new(FilesVisitor { files: vec![], state: self.state })
    }
}

/// Collects files on one thread of the walker. On `Drop`, the collected
/// `files` are appended to the global set of `state.files`.
struct FilesVisitor<'state> {
    files: DiscoveredFiles,
    state: &'state FilesState,
}

impl ignore::ParallelVisitor for FilesVisitor<'_> {
    fn visit(&mut self, result: std::result::Result<DirEntry, ignore::Error>) -> ignore::WalkState {
        let entry = match result {
            Ok(entry) => entry,
            Err(error) => {
                // Store error but continue walking
                self.files.push(Err(error));
                return ignore::WalkState::Continue;
            }
        };

        let path = entry.path();

        // An entry is explicit if it was provided directly, not discovered by looking into a directory
        let is_explicit = entry.depth() == 0;
        let is_directory = entry.file_type().is_none_or(|ft| ft.is_dir());

        if is_explicit && !is_directory {
            // `yamlint check config.txt` lints the file whatever its extension.
            tracing::trace!(
                "Included file due to explicit provision {path}",
                path = path.display()
            );
            self.files.push(Ok(entry.into_path()));
            return ignore::WalkState::Continue;
        }

        if !is_directory && has_yaml_extension(path) {
            tracing::trace!("Included YAML file {path}", path = path.display());
            self.files.push(Ok(entry.into_path()));
            return ignore::WalkState::Continue;
        }

        tracing::trace!(
            "Excluded file due to fallthrough {path}",
            path = path.display()
        );
        ignore::WalkState::Continue
    }
}

impl Drop for FilesVisitor<'_> {
    fn drop(&mut self) {
        let mut files = match self.state.files.lock() {
            Ok(files) => files,
            Err(poisoned) => poisoned.into_inner(),
        };

        if files.is_empty() {
            *files = std::mem::take(&mut self.files);
        } else {
            files.append(&mut self.files);
        }
    }
}
