use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

fn check_concise(directory: &std::path::Path) -> crate::helpers::Output {
    Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("concise")
        .arg("--no-color")
        .run()
}

#[test]
fn test_missing_document_start() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.yaml"), "key: value\n")?;

    let output = check_concise(directory);
    assert_eq!(output.code(), 1, "{output}");
    assert_eq!(
        output.plain_stdout(),
        "test.yaml [1:1] document-start missing document start \"---\"\n\nFound 1 error.\n"
    );

    Ok(())
}

#[test]
fn test_no_violations() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.yaml"), "---\nkey: value\n")?;
    std::fs::write(directory.join("other.yml"), "%YAML 1.2\n---\n- a\n...\n")?;

    let output = check_concise(directory);
    assert_eq!(output.code(), 0, "{output}");
    assert_eq!(output.plain_stdout(), "All checks passed!\n");

    Ok(())
}

#[test]
fn test_diagnostics_are_sorted_across_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("b.yaml"), "a: 1\n")?;
    std::fs::write(directory.join("a.yaml"), "---\na: 1\n...\nb: 2\n")?;
    // Not YAML, never checked
    std::fs::write(directory.join("c.json"), "{}\n")?;

    let output = check_concise(directory);
    assert_eq!(output.code(), 1, "{output}");
    assert_eq!(
        output.plain_stdout(),
        "a.yaml [4:1] document-start missing document start \"---\"\n\
         b.yaml [1:1] document-start missing document start \"---\"\n\
         \n\
         Found 2 errors.\n"
    );

    Ok(())
}

#[test]
fn test_full_output_shows_source() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.yaml"), "key: value\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .env("NO_COLOR", "1")
        .arg("check")
        .arg(".")
        .run();

    assert_eq!(output.code(), 1, "{output}");
    let stdout = output.plain_stdout();
    assert!(stdout.contains("warning: document-start"), "{output}");
    assert!(stdout.contains("test.yaml:1:1"), "{output}");
    assert!(stdout.contains("key: value"), "{output}");
    assert!(stdout.contains("missing document start \"---\""), "{output}");
    assert!(stdout.ends_with("Found 1 error.\n"), "{output}");

    Ok(())
}

#[test]
fn test_select_and_ignore() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.yaml"), "key: value\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--ignore")
        .arg("document-start")
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 0, "{output}");

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--select")
        .arg("token")
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 1, "{output}");

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--select")
        .arg("document-start,unknown-rule")
        .run();
    assert_eq!(output.code(), 2, "{output}");
    assert!(output.plain_stderr().contains("yamlint failed"), "{output}");
    assert!(
        output.plain_stderr().contains("Unknown rules in `--select`: unknown-rule"),
        "{output}"
    );

    Ok(())
}

#[test]
fn test_invalid_yaml_is_an_error() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("broken.yaml"), "key: \"value\n")?;
    std::fs::write(directory.join("test.yaml"), "key: value\n")?;

    let output = check_concise(directory);
    assert_eq!(output.code(), 2, "{output}");
    assert!(output.plain_stderr().contains("Failed to parse broken.yaml"), "{output}");
    // Other files are still checked
    assert!(output.plain_stdout().contains("test.yaml [1:1] document-start"), "{output}");

    Ok(())
}

#[test]
fn test_check_single_file() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("good.yaml"), "---\na: 1\n")?;
    std::fs::write(directory.join("bad.yaml"), "a: 1\n")?;

    let output = Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg("good.yaml")
        .arg("--output-format")
        .arg("concise")
        .run();
    assert_eq!(output.code(), 0, "{output}");

    Ok(())
}
