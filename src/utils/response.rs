use crate::errors::ModuleError;
use crate::services::api_client::ApiResponse;
use serde_json::{Map, Value};

/// Success result: `{"changed": .., <key>: <value>, ..}`.
pub fn module_result(changed: bool, fields: Vec<(&str, Value)>) -> Value {
    let mut out = Map::new();
    out.insert("changed".to_string(), Value::Bool(changed));
    for (key, value) in fields {
        out.insert(key.to_string(), value);
    }
    Value::Object(out)
}

/// GET/POST mapping: any 2xx yields the decoded body, everything else a
/// failure carrying the raw response text.
pub fn expect_success(response: &ApiResponse, failure: &str) -> Result<Value, ModuleError> {
    if response.is_success() {
        return Ok(response.payload());
    }
    Err(ModuleError::remote(failure, response.status, response.raw()).with_changed(true))
}

/// DELETE mapping: only 204 counts as done.
pub fn expect_no_content(response: &ApiResponse, failure: &str) -> Result<(), ModuleError> {
    if response.status == 204 {
        return Ok(());
    }
    Err(ModuleError::remote(failure, response.status, response.raw()))
}
