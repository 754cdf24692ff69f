use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

#[test]
fn test_statistics() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("a.yaml"), "key: value\n")?;
    std::fs::write(directory.join("b.yaml"), "a: 1\n...\nb: 2\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--statistics")
        .arg("--no-color")
        .run();

    assert_eq!(output.code(), 1, "{output}");
    assert_eq!(output.plain_stdout(), "    3 document-start\n");

    Ok(())
}

#[test]
fn test_statistics_no_violations() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("a.yaml"), "---\nkey: value\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--statistics")
        .run();

    assert_eq!(output.code(), 0, "{output}");
    assert_eq!(output.plain_stdout(), "All checks passed!\n");

    Ok(())
}
