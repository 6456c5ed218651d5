use crate::utils::text::clip_for_log;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

const DEFAULT_REDACTION: &str = "[REDACTED]";
const INLINE_REDACTION: &str = "***REDACTED***";

static SENSITIVE_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "pull_secret",
        "access_token",
        "refresh_token",
        "offline_token",
        "api_token",
        "authorization",
        "password",
        "auth",
        "ssh_public_key",
    ]
    .into_iter()
    .collect()
});

static INLINE_REDACTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b")
                .expect("inline redaction regex"),
            INLINE_REDACTION,
        ),
        (
            Regex::new(r"\b(Bearer)\s+([A-Za-z0-9._~-]{10,})\b").expect("inline redaction regex"),
            "$1 ***REDACTED***",
        ),
        (
            Regex::new(r#""(auth|access_token|refresh_token|pull_secret)"\s*:\s*"[^"]*""#)
                .expect("inline redaction regex"),
            r#""$1":"***REDACTED***""#,
        ),
        (
            Regex::new(r"\b(access_token|refresh_token|offline_token)\b\s*=\s*([^\s&]+)")
                .expect("inline redaction regex"),
            "$1=***REDACTED***",
        ),
    ]
});

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

pub fn is_sensitive_key(key: &str) -> bool {
    let normalized = normalize_key(key);
    if normalized.is_empty() {
        return false;
    }
    if SENSITIVE_KEYS.contains(normalized.as_str()) {
        return true;
    }
    normalized.contains("secret") || normalized.contains("token")
}

fn redact_inline_secrets(value: &str, extra: Option<&[String]>) -> String {
    let mut out = value.to_string();
    for (re, replacement) in INLINE_REDACTION_PATTERNS.iter() {
        if re.is_match(&out) {
            out = re.replace_all(&out, *replacement).to_string();
        }
    }
    if let Some(values) = extra {
        for raw in values {
            let needle = raw.trim();
            if needle.len() < 6 {
                continue;
            }
            out = out.replace(needle, INLINE_REDACTION);
        }
    }
    out
}

pub fn redact_text(value: &str, max_string: usize, extra_secrets: Option<&[String]>) -> String {
    let redacted = redact_inline_secrets(value, extra_secrets);
    clip_for_log(&redacted, max_string)
}

/// Copy of `value` safe to log: sensitive keys are masked at any depth and
/// string leaves go through inline redaction.
pub fn redact_object(value: &Value, max_string: usize, extra_secrets: Option<&[String]>) -> Value {
    match value {
        Value::String(text) => Value::String(redact_text(text, max_string, extra_secrets)),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_object(item, max_string, extra_secrets))
                .collect(),
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, entry) in map.iter() {
                if is_sensitive_key(key) && !entry.is_null() {
                    out.insert(key.clone(), Value::String(DEFAULT_REDACTION.to_string()));
                    continue;
                }
                out.insert(key.clone(), redact_object(entry, max_string, extra_secrets));
            }
            Value::Object(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_sensitive_key, redact_object, redact_text};
    use serde_json::{json, Value};

    #[test]
    fn masks_pull_secret_nested_in_data() {
        let input = json!({"state": "present", "data": {"name": "c1", "pull_secret": "{}"}});
        let out = redact_object(&input, usize::MAX, None);
        assert_eq!(out["data"]["pull_secret"], Value::String("[REDACTED]".to_string()));
        assert_eq!(out["data"]["name"], "c1");
        assert_eq!(out["state"], "present");
    }

    #[test]
    fn inline_pull_secret_auth_is_masked() {
        let body = r#"{"auths":{"cloud.openshift.com":{"auth":"c2VjcmV0","email":"a@b"}}}"#;
        let out = redact_text(body, usize::MAX, None);
        assert!(!out.contains("c2VjcmV0"));
        assert!(out.contains("a@b"));
    }

    #[test]
    fn bearer_values_and_extra_secrets_are_masked() {
        let out = redact_text(
            "Authorization: Bearer abcdefghijklmnop, offline=zzzzzzzz",
            usize::MAX,
            Some(&["zzzzzzzz".to_string()]),
        );
        assert_eq!(out, "Authorization: Bearer ***REDACTED***, offline=***REDACTED***");
    }

    #[test]
    fn key_detection_is_case_insensitive() {
        assert!(is_sensitive_key("Pull_Secret"));
        assert!(is_sensitive_key("AI_OFFLINE_TOKEN"));
        assert!(!is_sensitive_key("cluster_id"));
    }
}
