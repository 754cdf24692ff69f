use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;

/// Make `path` absolute and lexically normalized (no `.` or `..`), without
/// touching the file system.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match path.absolutize() {
        Ok(normalized) => normalized.into_owned(),
        Err(_) => path.to_path_buf(),
    }
}

/// Strip the current working directory from `path` when possible.
pub fn relativize_path<P: AsRef<Path>>(path: P) -> String {
    let path = normalize_path(path);

    if let Ok(cwd) = std::env::current_dir()
        && let Ok(relative) = path.strip_prefix(&cwd)
    {
        return relative.display().to_string();
    }

    path.display().to_string()
}

pub fn has_yaml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
