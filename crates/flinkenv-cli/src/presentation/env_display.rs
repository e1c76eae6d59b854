//! Environment summary display for CLI output.

use flinkenv_core::FlinkEnv;

use super::tables::format_optional;

/// Options for displaying an environment summary.
#[derive(Debug, Clone, Default)]
pub struct EnvSummaryOpts<'a> {
    /// Optional title to display before the details.
    pub title: Option<&'a str>,
    /// Whether to include the ID and registration time.
    pub show_id: bool,
    /// Whether to include the number of stored config entries.
    pub show_conf: bool,
}

impl<'a> EnvSummaryOpts<'a> {
    /// Create options with a title and default fields.
    pub fn with_title(title: &'a str) -> Self {
        Self {
            title: Some(title),
            show_id: true,
            ..Default::default()
        }
    }

    /// Every field, for `show`.
    pub fn detailed() -> Self {
        Self {
            title: None,
            show_id: true,
            show_conf: true,
        }
    }

    /// Create options for removal confirmation.
    pub fn for_removal() -> Self {
        Self {
            title: Some("Environment to remove:"),
            show_id: true,
            ..Default::default()
        }
    }
}

/// Render the summary as lines, without printing.
pub fn summary_lines(env: &FlinkEnv, opts: &EnvSummaryOpts<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(title) = opts.title {
        lines.push(title.to_string());
    }
    if opts.show_id {
        lines.push(format!("  ID:          {}", env.id));
    }
    lines.push(format!("  Name:        {}", env.name));
    lines.push(format!("  Flink home:  {}", env.flink_home.display()));
    lines.push(format!(
        "  Version:     {} ({})",
        env.version,
        env.major_minor().unwrap_or_else(|_| "malformed".to_string())
    ));
    lines.push(format!("  Scala:       {}", env.scala_version));
    lines.push(format!(
        "  Default:     {}",
        if env.is_default { "yes" } else { "no" }
    ));
    lines.push(format!(
        "  Description: {}",
        format_optional(&env.description, "--")
    ));
    if opts.show_id {
        lines.push(format!(
            "  Added:       {}",
            env.created_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    if opts.show_conf {
        let entries = env
            .conf_map()
            .map_or_else(|e| format!("unreadable ({e})"), |m| m.len().to_string());
        lines.push(format!("  Config keys: {entries}"));
    }
    lines
}

/// Display an environment summary to stdout.
pub fn display_env_summary(env: &FlinkEnv, opts: EnvSummaryOpts<'_>) {
    for line in summary_lines(env, &opts) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod fixture {
        use flinkenv_core::conf::compress;
        use flinkenv_core::{FlinkEnv, NewFlinkEnv};

        pub fn env(version: &str) -> FlinkEnv {
            let created_at = "2024-05-01T08:30:00Z".parse().unwrap();
            let mut new = NewFlinkEnv::new("streaming", "/opt/flink-1.13.2", created_at);
            new.flink_conf = compress("rest.port: 8081\nparallelism.default: 2\n").unwrap();
            new.scala_version = "2.11".to_string();
            new.version = version.to_string();
            FlinkEnv::from_new(3, new, true)
        }
    }

    #[test]
    fn test_detailed_summary() {
        let lines = summary_lines(&fixture::env("1.13.2"), &EnvSummaryOpts::detailed());
        assert!(lines.contains(&"  ID:          3".to_string()));
        assert!(lines.contains(&"  Version:     1.13.2 (1.13)".to_string()));
        assert!(lines.contains(&"  Default:     yes".to_string()));
        assert!(lines.contains(&"  Description: --".to_string()));
        assert!(lines.contains(&"  Added:       2024-05-01 08:30:00".to_string()));
        assert!(lines.contains(&"  Config keys: 2".to_string()));
    }

    #[test]
    fn test_titled_summary_marks_malformed_version() {
        let lines = summary_lines(
            &fixture::env("1.13"),
            &EnvSummaryOpts::with_title("Flink environment added:"),
        );
        assert_eq!(lines[0], "Flink environment added:");
        assert!(lines.contains(&"  Version:     1.13 (malformed)".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Config keys")));
    }
}
