//! Output formatting for CLI commands.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cli::args::{FalxArgs, OutputFormat};
use crate::model::Classification;

/// Result structure for snapshot creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct InitResult {
    pub path: String,
    pub model: String,
    pub smoothing: f64,
    pub analyzer: String,
}

/// Result structure for document addition.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddResult {
    pub label: String,
    pub accepted: bool,
    pub tokens: Vec<String>,
    pub documents: usize,
    pub pending: usize,
    pub trained: usize,
}

/// Result structure for document removal.
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveResult {
    pub label: String,
    pub matched: bool,
    pub rolled_back: bool,
    pub documents: usize,
    pub features: usize,
    pub watermark: usize,
}

/// Result structure for training and retraining.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub trained: usize,
    pub documents: usize,
    pub watermark: usize,
    pub duration_ms: u64,
}

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<Classification>>,
}

/// Classifier statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifierStats {
    pub documents: usize,
    pub pending: usize,
    pub watermark: usize,
    pub features: usize,
    pub labels: IndexMap<String, usize>,
    pub model: String,
    pub smoothing: f64,
    pub total_examples: f64,
    pub analyzer: String,
    pub retraction: String,
    pub rollback: String,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &FalxArgs) -> anyhow::Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &FalxArgs) -> anyhow::Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    for line in human_lines(&value) {
        println!("{line}");
    }
    Ok(())
}

/// Output as JSON.
fn output_json<T: Serialize>(result: &T, args: &FalxArgs) -> anyhow::Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Render a result object as `key: value` lines.
///
/// Arrays of objects with a `label` and a `value` (ranked classifications)
/// get one indented line per entry.
fn human_lines(value: &serde_json::Value) -> Vec<String> {
    let Some(object) = value.as_object() else {
        return vec![format_value(value)];
    };

    let mut lines = Vec::new();
    for (key, field) in object {
        let name = key.replace('_', " ");
        match field {
            serde_json::Value::Array(entries) if entries.iter().all(is_classification) => {
                lines.push(format!("{name}:"));
                for entry in entries {
                    lines.push(format!(
                        "  {:<20} {:.6}",
                        entry["label"].as_str().unwrap_or("?"),
                        entry["value"].as_f64().unwrap_or(0.0)
                    ));
                }
            }
            serde_json::Value::Object(map) => {
                lines.push(format!("{name}:"));
                for (inner_key, inner) in map {
                    lines.push(format!("  {inner_key}: {}", format_value(inner)));
                }
            }
            _ => lines.push(format!("{name}: {}", format_value(field))),
        }
    }
    lines
}

fn is_classification(entry: &serde_json::Value) -> bool {
    entry.get("label").is_some() && entry.get("value").is_some()
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(" "),
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("spam")), "spam");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(["bui", "cheap"])), "bui cheap");
        assert_eq!(format_value(&serde_json::Value::Null), "-");
    }

    #[test]
    fn test_human_lines() {
        let result = ClassifyResult {
            label: Some("spam".to_string()),
            classifications: Some(vec![
                Classification {
                    label: "spam".to_string(),
                    value: 0.5,
                },
                Classification {
                    label: "ham".to_string(),
                    value: 0.25,
                },
            ]),
        };

        let lines = human_lines(&serde_json::to_value(&result).unwrap());

        let start = lines.iter().position(|line| line == "classifications:").unwrap();
        assert!(lines[start + 1].starts_with("  spam"));
        assert!(lines[start + 1].ends_with("0.500000"));
        assert!(lines[start + 2].starts_with("  ham"));
        assert!(lines.contains(&"label: spam".to_string()));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_human_lines_nested_map() {
        let lines = human_lines(&json!({"labels": {"spam": 2}, "pending_docs": 1}));
        assert_eq!(lines, vec!["labels:", "  spam: 2", "pending docs: 1"]);
    }
}
