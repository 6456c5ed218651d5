use serde_json::Value;

/// A value the remote API should never see as a query parameter: absent,
/// `false`, `0`, an empty string, or an empty sequence/mapping.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(num) => num.as_f64().map(|n| n == 0.0).unwrap_or(false),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(num) => num.to_string(),
        other => other.to_string(),
    }
}

pub fn query_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => scalar_to_string(other),
    }
}

/// Selects the allow-listed fields of `args` as query pairs, in allow-list
/// order, dropping empty values and joining sequences with commas.
pub fn build_query(args: &Value, allowed: &[&str]) -> Vec<(String, String)> {
    let Some(map) = args.as_object() else {
        return Vec::new();
    };
    allowed
        .iter()
        .filter_map(|key| {
            let value = map.get(*key)?;
            if is_empty_value(value) {
                return None;
            }
            Some((key.to_string(), query_value(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::build_query;
    use serde_json::json;

    #[test]
    fn skips_falsy_values_and_unlisted_fields() {
        let args = json!({
            "cluster_id": "abc",
            "limit": 10,
            "offset": 0,
            "order": "",
            "with_hosts": false,
            "name": "not-a-query-field",
        });
        let query = build_query(&args, &["cluster_id", "limit", "order", "offset", "with_hosts"]);
        assert_eq!(
            query,
            vec![
                ("cluster_id".to_string(), "abc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn joins_sequences_with_commas() {
        let args = json!({"severities": ["warning", "error"], "with_hosts": true});
        let query = build_query(&args, &["with_hosts", "severities"]);
        assert_eq!(
            query,
            vec![
                ("with_hosts".to_string(), "true".to_string()),
                ("severities".to_string(), "warning,error".to_string()),
            ]
        );
    }

    #[test]
    fn empty_sequence_is_omitted() {
        let args = json!({"severities": []});
        assert!(build_query(&args, &["severities"]).is_empty());
    }
}
