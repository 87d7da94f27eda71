//! End-to-end runs against a real watched directory

use crate::common::fixtures::wait_for_contents;
use crate::common::TestProject;
use crate::wev;
use anyhow::Result;
use std::time::Duration;

/// Time for the watcher to register before the test touches the tree
const STARTUP: Duration = Duration::from_millis(700);

#[cfg(unix)]
#[test]
fn create_runs_command_with_event_env() -> Result<()> {
    let project = TestProject::new()?;
    let marker = project.out().join("marker");
    let config = project.write_config(&format!(
        r#"
shell = ["sh", "-c"]

[[action]]
name = "record"
on = ["create"]
run = 'echo "$WEV_EVENT $WEV_PATH" >> "{}"'
"#,
        marker.display()
    ))?;
    let watched = project.watched_arg();

    let mut running = wev!(project.root(), "-c", &config, "-d", &watched).spawn()?;
    std::thread::sleep(STARTUP);
    let created = project.watched().join("new.txt");
    std::fs::write(&created, b"hello")?;

    let contents = wait_for_contents(&marker, Duration::from_secs(10));
    assert!(running.is_running(), "wev exited early");

    let contents = contents.expect("action never ran");
    let line = contents.lines().next().unwrap_or_default();
    assert!(line.starts_with("CREATE "), "unexpected line: {}", line);
    assert!(line.ends_with("new.txt"), "unexpected line: {}", line);
    Ok(())
}

#[cfg(unix)]
#[test]
fn created_directory_is_watched() -> Result<()> {
    let project = TestProject::new()?;
    let marker = project.out().join("marker");
    let config = project.write_config(&format!(
        r#"
shell = ["sh", "-c"]

[[action]]
name = "record"
on = ["write"]
run = 'echo "$WEV_PATH" >> "{}"'
"#,
        marker.display()
    ))?;
    let watched = project.watched_arg();

    let _running = wev!(project.root(), "-c", &config, "-d", &watched).spawn()?;
    std::thread::sleep(STARTUP);
    let nested = project.watched().join("nested");
    std::fs::create_dir(&nested)?;
    std::thread::sleep(STARTUP);
    std::fs::write(nested.join("inner.txt"), b"data")?;

    let contents = wait_for_contents(&marker, Duration::from_secs(10)).expect("action never ran");
    assert!(contents.contains("inner.txt"), "unexpected contents: {}", contents);
    Ok(())
}

#[cfg(unix)]
#[test]
fn launch_failure_exits_22() -> Result<()> {
    let project = TestProject::new()?;
    let config = project.write_config(
        r#"
shell = ["/nonexistent/wev-shell", "-c"]

[[action]]
name = "doomed"
on = ["create"]
run = "true"
"#,
    )?;
    let watched = project.watched_arg();

    let mut running = wev!(project.root(), "-c", &config, "-d", &watched).spawn()?;
    std::thread::sleep(STARTUP);
    std::fs::write(project.watched().join("trigger.txt"), b"x")?;

    let result = running.wait_timeout(Duration::from_secs(10))?;
    assert_eq!(result.exit_code, 22, "stderr: {}", result.stderr);
    Ok(())
}

#[cfg(unix)]
#[test]
fn failing_command_keeps_running() -> Result<()> {
    let project = TestProject::new()?;
    let marker = project.out().join("marker");
    let config = project.write_config(&format!(
        r#"
shell = ["sh", "-c"]

[[action]]
name = "fails"
on = ["create"]
run = 'echo ran >> "{}"; exit 3'
"#,
        marker.display()
    ))?;
    let watched = project.watched_arg();

    let mut running = wev!(project.root(), "-c", &config, "-d", &watched).spawn()?;
    std::thread::sleep(STARTUP);
    std::fs::write(project.watched().join("a.txt"), b"x")?;

    wait_for_contents(&marker, Duration::from_secs(10)).expect("action never ran");
    std::thread::sleep(Duration::from_millis(300));
    assert!(running.is_running(), "non-zero command status ended wev");
    Ok(())
}
