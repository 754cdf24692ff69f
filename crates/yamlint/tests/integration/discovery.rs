use std::process::Command;

use tempfile::TempDir;

use crate::helpers::CommandExt;
use crate::helpers::binary_path;

fn check(directory: &std::path::Path, extra_args: &[&str]) -> crate::helpers::Output {
    Command::new(binary_path())
        .current_dir(directory)
        .arg("check")
        .arg(".")
        .arg("--output-format")
        .arg("concise")
        .args(extra_args)
        .run()
}

#[test]
fn test_no_yaml_files() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::write(directory.join("test.json"), "{}\n")?;

    let output = check(directory, &[]);
    assert_eq!(output.code(), 0, "{output}");
    assert!(
        output.plain_stdout().contains("No YAML files found under the given path(s)."),
        "{output}"
    );

    Ok(())
}

#[test]
fn test_default_exclude() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::create_dir(directory.join("node_modules"))?;
    std::fs::write(directory.join("node_modules").join("test.yaml"), "key: value\n")?;
    std::fs::write(directory.join("ok.yaml"), "---\nkey: value\n")?;

    let output = check(directory, &[]);
    assert_eq!(output.code(), 0, "{output}");

    let output = check(directory, &["--no-default-exclude"]);
    assert_eq!(output.code(), 1, "{output}");
    assert!(output.plain_stdout().contains("[1:1] document-start"), "{output}");

    Ok(())
}

#[test]
fn test_exclude_from_toml() -> anyhow::Result<()> {
    let directory = TempDir::new()?;
    let directory = directory.path();
    std::fs::create_dir(directory.join("vendor"))?;
    std::fs::write(directory.join("vendor").join("test.yaml"), "key: value\n")?;
    std::fs::write(directory.join("ok.yml"), "---\nkey: value\n")?;

    std::fs::write(
        directory.join("yamlint.toml"),
        r#"
[lint]
exclude = ["vendor/"]
"#,
    )?;

    let output = check(directory, &[]);
    assert_eq!(output.code(), 0, "{output}");
    assert_eq!(output.plain_stdout(), "All checks passed!\n");

    Ok(())
}
