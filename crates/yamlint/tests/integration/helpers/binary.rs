use std::path::PathBuf;

/// Path to the `yamlint` binary built by cargo for this test run
pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_yamlint"))
}
