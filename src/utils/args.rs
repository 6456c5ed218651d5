use crate::errors::ModuleError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const WRAPPER_KEY: &str = "ANSIBLE_MODULE_ARGS";

/// Accepts either a bare argument object or one wrapped under
/// `ANSIBLE_MODULE_ARGS`. `null` and an empty document mean no arguments.
pub fn normalize_module_args(raw: Value) -> Result<Value, ModuleError> {
    match raw {
        Value::Null => Ok(Value::Object(Default::default())),
        Value::Object(mut map) => {
            if map.len() == 1 {
                if let Some(inner) = map.remove(WRAPPER_KEY) {
                    return normalize_module_args(inner);
                }
            }
            Ok(Value::Object(map))
        }
        _ => Err(ModuleError::invalid_params(
            "Module arguments must be a JSON object",
        )),
    }
}

pub fn parse_module_args(text: &str) -> Result<Value, ModuleError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    let raw: Value = serde_json::from_str(text).map_err(|err| {
        ModuleError::invalid_params(format!("Module arguments are not valid JSON: {}", err))
    })?;
    normalize_module_args(raw)
}

pub fn decode_args<T: DeserializeOwned>(module: &str, args: Value) -> Result<T, ModuleError> {
    let args = normalize_module_args(args)?;
    serde_json::from_value(args).map_err(|err| {
        ModuleError::invalid_params(format!("Invalid arguments for module {}: {}", module, err))
    })
}

fn missing<'a>(fields: &[(&'a str, bool)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect()
}

pub fn require_all(fields: &[(&str, bool)]) -> Result<(), ModuleError> {
    let missing = missing(fields);
    if missing.is_empty() {
        return Ok(());
    }
    Err(ModuleError::invalid_params(format!(
        "missing required arguments: {}",
        missing.join(", ")
    )))
}

/// Conditional requirement: when `param` equals `value`, every listed field
/// must be present.
pub fn require_if(param: &str, value: &str, fields: &[(&str, bool)]) -> Result<(), ModuleError> {
    let missing = missing(fields);
    if missing.is_empty() {
        return Ok(());
    }
    Err(ModuleError::invalid_params(format!(
        "{} is {} but all of the following are missing: {}",
        param,
        value,
        missing.join(", ")
    )))
}

/// Field deserializer that treats an explicit `null` like an omitted field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn has_text(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}
