//! Normalization of loosely-shaped suite declarations.
//!
//! Manifests declare suites as bare path strings or as objects carrying
//! `path`, `options` (alias `option`) and `filter`. Everything downstream sees
//! only [`TestSuiteSpec`].

use serde_json::{Map, Value};

use super::types::{DEFAULT_SUITE_PATH, TestSuiteSpec};

/// Normalize a `tests` value into an ordered suite list.
///
/// A single string or object counts as a one-element list. Entries of any
/// other shape are dropped.
pub fn normalize_tests(value: &Value) -> Vec<TestSuiteSpec> {
    match value {
        Value::Array(entries) => entries.iter().filter_map(normalize_suite).collect(),
        Value::Null => Vec::new(),
        other => normalize_suite(other).into_iter().collect(),
    }
}

/// Normalize a single suite entry.
pub fn normalize_suite(value: &Value) -> Option<TestSuiteSpec> {
    match value {
        Value::String(path) => Some(TestSuiteSpec {
            path: non_empty_or_default(path),
            ..TestSuiteSpec::default()
        }),
        Value::Object(fields) => Some(suite_from_object(fields)),
        _ => None,
    }
}

/// Build a suite from an object; every field is independently optional.
pub fn suite_from_object(fields: &Map<String, Value>) -> TestSuiteSpec {
    let path = match fields.get("path") {
        Some(Value::String(path)) => non_empty_or_default(path),
        _ => DEFAULT_SUITE_PATH.to_string(),
    };
    let options = fields
        .get("options")
        .filter(|value| !value.is_null())
        .or_else(|| fields.get("option"))
        .map(normalize_options)
        .unwrap_or_default();
    let filter = match fields.get("filter") {
        Some(Value::String(filter)) if !filter.is_empty() => Some(filter.clone()),
        _ => None,
    };
    TestSuiteSpec {
        path,
        options,
        filter,
    }
}

fn normalize_options(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty_or_default(path: &str) -> String {
    if path.is_empty() {
        DEFAULT_SUITE_PATH.to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_string_becomes_path_only_suite() {
        let suites = normalize_tests(&json!(["tests/Unit"]));
        assert_eq!(
            suites,
            vec![TestSuiteSpec {
                path: "tests/Unit".to_string(),
                options: Vec::new(),
                filter: None,
            }]
        );
    }

    #[test]
    fn object_fields_default_independently() {
        let suites = normalize_tests(&json!([{ "filter": "FlowTest" }]));
        assert_eq!(suites[0].path, "tests");
        assert!(suites[0].options.is_empty());
        assert_eq!(suites[0].filter.as_deref(), Some("FlowTest"));
    }

    #[test]
    fn options_key_wins_over_option_alias() {
        let suite = normalize_suite(&json!({
            "options": ["--colors=never"],
            "option": ["--debug"]
        }))
        .expect("suite");
        assert_eq!(suite.options, vec!["--colors=never"]);

        let suite = normalize_suite(&json!({ "option": "--debug" })).expect("suite");
        assert_eq!(suite.options, vec!["--debug"]);
    }

    #[test]
    fn scalar_tests_value_is_single_suite() {
        let suites = normalize_tests(&json!("tests/Feature"));
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].path, "tests/Feature");
    }

    #[test]
    fn unusable_entries_are_dropped() {
        let suites = normalize_tests(&json!([42, null, "tests", { "options": [1, true, {}] }]));
        assert_eq!(suites.len(), 2);
        assert_eq!(suites[1].options, vec!["1", "true"]);
    }
}
