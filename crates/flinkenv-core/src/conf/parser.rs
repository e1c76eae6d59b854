//! Flink configuration document parsing.
//!
//! Two dialects are accepted:
//!
//! - Standard YAML. Nested mappings are flattened into dotted keys
//!   (`taskmanager: {memory: {process.size: 2g}}` becomes
//!   `taskmanager.memory.process.size`), sequences are joined with `;` the way
//!   Flink writes list options. Numbers, booleans and `null` keep the text
//!   they were written with (`0.40` stays `0.40`), as Flink's own loader
//!   reads them as strings.
//! - The legacy line format Flink itself reads: one `key: value` pair per
//!   line, `#` starts a comment, lines without a key or value are skipped.
//!
//! The legacy format is used whenever the document is not valid YAML.

use std::collections::{BTreeMap, HashMap};

use serde_yaml::Value;
use tracing::{debug, warn};

/// Flat mapping from configuration key to value.
pub type ConfMap = BTreeMap<String, String>;

/// Parse a configuration document into a flat key/value map.
pub fn parse_flink_conf(text: &str) -> ConfMap {
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Mapping(mapping)) => {
            let sources = scalar_sources(text);
            let mut out = ConfMap::new();
            flatten_mapping(None, &mapping, &sources, &mut out);
            out
        }
        Ok(Value::Null) => ConfMap::new(),
        Ok(_) => parse_legacy(text),
        Err(e) => {
            debug!(error = %e, "Config is not valid YAML, using line-based parser");
            parse_legacy(text)
        }
    }
}

/// Line-based parser matching Flink's own `flink-conf.yaml` loader.
pub fn parse_legacy(text: &str) -> ConfMap {
    let mut out = ConfMap::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let Some((key, value)) = content.split_once(": ") else {
            warn!(line = line_no, "Skipping config line without `key: value` separator");
            continue;
        };

        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            warn!(line = line_no, "Skipping config line with empty key or value");
            continue;
        }

        out.insert(key.to_string(), value.to_string());
    }

    out
}

/// Source text of every `key: value` line in block mappings, by dotted key.
///
/// Only consulted for untyped scalars, which cannot contain `#`, so cutting
/// at the first `#` is safe here.
fn scalar_sources(text: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let mut parents: Vec<(usize, String)> = Vec::new();

    for line in text.lines() {
        let content = line.split('#').next().unwrap_or_default().trim_end();
        let body = content.trim_start();
        if body.is_empty() || body.starts_with('-') {
            continue;
        }
        let indent = content.len() - body.len();

        let (key, value) = match body.split_once(": ") {
            Some((key, value)) => (key.trim(), value.trim()),
            None => match body.strip_suffix(':') {
                Some(key) => (key.trim(), ""),
                None => continue,
            },
        };

        while parents.last().is_some_and(|(depth, _)| *depth >= indent) {
            parents.pop();
        }

        let mut full_key = String::new();
        for (_, parent) in &parents {
            full_key.push_str(parent);
            full_key.push('.');
        }
        full_key.push_str(key);

        if value.is_empty() {
            parents.push((indent, key.to_string()));
        } else {
            out.insert(full_key, value.to_string());
        }
    }

    out
}

fn flatten_mapping(
    prefix: Option<&str>,
    mapping: &serde_yaml::Mapping,
    sources: &HashMap<String, String>,
    out: &mut ConfMap,
) {
    for (key, value) in mapping {
        let Some(key) = scalar_text(key) else {
            warn!("Skipping config entry with a non-scalar key");
            continue;
        };
        let full_key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key,
        };

        match value {
            Value::Mapping(nested) => flatten_mapping(Some(&full_key), nested, sources, out),
            Value::Number(_) | Value::Bool(_) | Value::Null => {
                match sources.get(&full_key).cloned().or_else(|| scalar_text(value)) {
                    Some(text) => {
                        out.insert(full_key, text);
                    }
                    None => warn!(key = %full_key, "Skipping config entry without a value"),
                }
            }
            other => {
                if let Some(text) = value_text(other) {
                    out.insert(full_key, text);
                }
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Sequence(items) => Some(
            items
                .iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join(";"),
        ),
        // Maps inside lists use Flink's `k:v,k:v` notation.
        Value::Mapping(map) => Some(
            map.iter()
                .filter_map(|(k, v)| Some(format!("{}:{}", scalar_text(k)?, value_text(v)?)))
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Tagged(tagged) => value_text(&tagged.value),
        other => scalar_text(other),
    }
}
