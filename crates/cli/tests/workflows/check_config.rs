//! `--check` prints the validated config

use crate::common::TestProject;
use crate::wev;
use anyhow::Result;

#[test]
fn check_prints_actions() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.write_config(
        r#"
shell = ["sh", "-c"]

[[action]]
name = "build"
on = ["write", "create"]
interval = "2s"
run = "make"

[[action.interval_action]]
on = "self"
do = "retry"

[[action]]
name = "lint"
on = ["write"]
run = "cargo clippy"
"#,
    )?;

    let result = wev!(project.root(), "-c", &config, "--check").execute()?;

    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.contains_stdout("Configuration"));
    assert!(result.contains_stdout("sh -c"));
    assert!(result.contains_stdout("[build]"));
    assert!(result.contains_stdout("write, create"));
    assert!(result.contains_stdout("(2000ms)"));
    assert!(result.contains_stdout("self -> retry"));
    assert!(result.contains_stdout("[lint]"));
    assert!(result.contains_stdout("2 action(s) OK"));
    Ok(())
}

#[test]
fn check_does_not_need_directories() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.write_config(
        r#"
[[action]]
name = "only"
on = ["remove"]
run = "true"
"#,
    )?;

    let result = wev!(project.root(), "-c", &config, "--check").execute()?;

    assert_eq!(result.exit_code, 0);
    assert!(result.contains_stdout("1 action(s) OK"));
    Ok(())
}

#[test]
fn check_rejects_invalid_config() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.write_config(
        r#"
[[action]]
name = "x"
on = ["write"]
run = "true"
colour = "red"
"#,
    )?;

    let result = wev!(project.root(), "-c", &config, "--check").execute()?;

    assert_eq!(result.exit_code, 4);
    assert!(!result.contains_stdout("OK"));
    Ok(())
}
