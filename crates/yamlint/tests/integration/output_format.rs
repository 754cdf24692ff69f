use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

fn check_with_format(directory: &std::path::Path, format: &str) -> crate::helpers::Output {
    Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg(format)
        .arg("--with-timing")
        .run()
}

#[test]
fn test_json_output() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.yaml"), "key: value\n")?;
    std::fs::write(directory.join("broken.yaml"), "key: \"value\n")?;

    let output = check_with_format(directory, "json");
    assert_eq!(output.code(), 2, "{output}");

    // Timing is not printed so that stdout stays valid JSON
    let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        value["diagnostics"],
        serde_json::json!([{
            "filename": "test.yaml",
            "line": 1,
            "column": 1,
            "message": "missing document start \"---\"",
            "rule": "document-start",
        }])
    );
    assert_eq!(value["errors"][0]["file"], "broken.yaml");
    assert!(
        value["errors"][0]["error"]
            .as_str()
            .is_some_and(|error| error.contains("Failed to parse broken.yaml")),
        "{output}"
    );

    Ok(())
}

#[test]
fn test_github_output() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.yaml"), "---\nkey: value\n...\nother: 1\n")?;

    let output = check_with_format(directory, "github");
    assert_eq!(output.code(), 1, "{output}");
    assert_eq!(
        output.stdout,
        "::warning title=yamlint (document-start),file=test.yaml,line=4,col=1::test.yaml:4:1: [document-start] missing document start \"---\"\n"
    );

    Ok(())
}

#[test]
fn test_concise_output_with_timing() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.yaml"), "---\nkey: value\n")?;

    let output = check_with_format(directory, "concise");
    assert_eq!(output.code(), 0, "{output}");
    let stdout = output.plain_stdout();
    assert!(stdout.starts_with("All checks passed!\n"), "{output}");
    assert!(stdout.contains("Checked files in:"), "{output}");

    Ok(())
}
