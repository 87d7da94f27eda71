//! Validate a config file and print its actions

use crate::exit::{code, ExitCodeExt, Fatal};
use anyhow::Context;
use owo_colors::OwoColorize;
use std::path::Path;
use wev_core::{Action, Config};

pub fn run(config_path: &Path) -> Result<i32, Fatal> {
    let config = Config::load(config_path)
        .with_context(|| format!("{}: Could not load config file", config_path.display()))
        .exit_code(code::CONFIG)?;

    println!("{}", "Configuration".bold());
    println!("{}: {}", "Location".dimmed(), config_path.display().dimmed());
    println!("{}: {}\n", "Shell".dimmed(), config.shell.join(" "));

    for action in &config.actions {
        print_action(action);
    }

    println!("{} {} action(s) OK", "✓".green(), config.actions.len());
    Ok(0)
}

fn print_action(action: &Action) {
    let on: Vec<_> = action.on.iter().map(|k| k.config_name()).collect();

    println!("{}", format!("[{}]", action.name).yellow());
    println!("  {} = {}", "on".cyan(), on.join(", "));
    println!(
        "  {} = {} {}",
        "interval".cyan(),
        action.interval,
        format!("({}ms)", action.interval_ms).dimmed()
    );
    println!("  {} = {}", "run".cyan(), action.run);
    for rule in &action.interval_action {
        println!(
            "  {} {} -> {}",
            "interval_action".cyan(),
            rule.on.join(", "),
            rule.disposition
        );
    }
    println!();
}
