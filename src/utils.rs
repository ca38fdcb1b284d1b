use serde_json::Value;

/// Normalizes the `skills`/`required_skills` field at the system boundary.
///
/// Callers send it as an actual array, a JSON-encoded string, or a
/// comma-separated string; all three collapse to one ordered list of
/// trimmed, non-empty strings so no call site needs its own fallback
/// parsing.
pub fn normalize_skills(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_owned)
            .collect(),
        Value::String(text) => {
            if let Ok(parsed @ Value::Array(_)) = serde_json::from_str::<Value>(text) {
                return normalize_skills(&parsed);
            }

            text.split(',')
                .map(str::trim)
                .filter(|skill| !skill.is_empty())
                .map(str::to_owned)
                .collect()
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_actual_array() {
        let raw = json!(["Rust", " SQL ", ""]);
        assert_eq!(normalize_skills(&raw), vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_json_encoded_string() {
        let raw = json!("[\"Rust\", \"SQL\"]");
        assert_eq!(normalize_skills(&raw), vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_comma_separated_string() {
        let raw = json!("Rust, SQL,,Kubernetes ");
        assert_eq!(normalize_skills(&raw), vec!["Rust", "SQL", "Kubernetes"]);
    }

    #[test]
    fn test_unexpected_shapes_collapse_to_empty() {
        assert!(normalize_skills(&json!(null)).is_empty());
        assert!(normalize_skills(&json!(42)).is_empty());
        assert!(normalize_skills(&json!({"skill": "Rust"})).is_empty());
    }
}
