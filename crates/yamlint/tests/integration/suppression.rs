use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

fn check(directory: &std::path::Path) -> crate::helpers::Output {
    Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("concise")
        .run()
}

#[test]
fn test_disable_file() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.yaml"), "# yamlint disable-file\nkey: value\n")?;

    let output = check(directory);
    assert_eq!(output.code(), 0, "{output}");

    Ok(())
}

#[test]
fn test_disable_line() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(
        directory.join("test.yaml"),
        "# yamlint disable-line rule:document-start\nkey: value\n...\nother: 1\n",
    )?;

    let output = check(directory);
    assert_eq!(output.code(), 1, "{output}");
    assert_eq!(
        output.plain_stdout(),
        "test.yaml [4:1] document-start missing document start \"---\"\n\nFound 1 error.\n"
    );

    Ok(())
}
