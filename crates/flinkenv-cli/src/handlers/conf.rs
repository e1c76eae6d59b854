//! Conf command handler.
//!
//! Prints the configuration captured at registration (or the last sync),
//! not the file currently on disk.

use anyhow::Result;
use flinkenv_core::ConfMap;

use super::resolve_env;
use crate::bootstrap::CliContext;

/// Execute the conf command.
pub async fn execute(ctx: &CliContext, identifier: &str, raw: bool) -> Result<()> {
    let env = resolve_env(ctx, identifier).await?;

    if raw {
        print!("{}", env.conf_text()?);
        return Ok(());
    }

    let map = env.conf_map()?;
    if map.is_empty() {
        println!("No configuration entries stored for '{}'.", env.name);
        return Ok(());
    }
    for line in render_entries(&map) {
        println!("{line}");
    }
    Ok(())
}

fn render_entries(map: &ConfMap) -> Vec<String> {
    map.iter().map(|(key, value)| format!("{key}: {value}")).collect()
}
