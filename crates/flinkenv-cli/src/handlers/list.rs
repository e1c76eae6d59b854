//! List command handler.
//!
//! Displays all registered environments in a formatted table.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::{format_optional, print_separator, truncate_string};

/// Execute the list command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let envs = ctx.envs().list().await?;

    if envs.is_empty() {
        println!("No Flink environments registered.");
        println!("Use 'flinkenv add <name> <flink_home>' to add your first one.");
        return Ok(());
    }

    println!("Found {} Flink environment(s):\n", envs.len());

    println!(
        "{:<3} {:<1} {:<24} {:<10} {:<6} {:<20} {:<24} Flink Home",
        "ID", "*", "Name", "Version", "Scala", "Added", "Description"
    );
    print_separator(110);

    for env in envs {
        println!(
            "{:<3} {:<1} {:<24} {:<10} {:<6} {:<20} {:<24} {}",
            env.id,
            if env.is_default { "*" } else { "" },
            truncate_string(&env.name, 24),
            truncate_string(&env.version, 10),
            truncate_string(&env.scala_version, 6),
            env.created_at.format("%Y-%m-%d %H:%M:%S"),
            truncate_string(&format_optional(&env.description, "--"), 24),
            env.flink_home.display()
        );
    }

    Ok(())
}
