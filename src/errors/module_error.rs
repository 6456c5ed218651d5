use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleErrorKind {
    InvalidParams,
    Remote,
    Transport,
    Internal,
}

/// Failure half of a module result.
///
/// Renders as `{"failed": true, "changed": .., "msg": .., "response": ..}`
/// plus any module specific `extra` keys.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleError {
    pub kind: ModuleErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub changed: bool,
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl ModuleError {
    pub fn new(kind: ModuleErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            response: None,
            hint: None,
            changed: false,
            extra: Map::new(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ModuleErrorKind::InvalidParams, message)
    }

    pub fn remote(message: impl Into<String>, status: u16, response: Value) -> Self {
        let mut err = Self::new(ModuleErrorKind::Remote, message);
        err.status = Some(status);
        err.response = Some(response);
        err
    }

    pub fn transport(message: impl Into<String>, detail: impl Into<String>) -> Self {
        let mut err = Self::new(ModuleErrorKind::Transport, message);
        err.response = Some(Value::String(detail.into()));
        err
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ModuleErrorKind::Internal, message)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_changed(mut self, changed: bool) -> Self {
        self.changed = changed;
        self
    }

    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn to_result(&self) -> Value {
        let mut out = Map::new();
        out.insert("failed".to_string(), Value::Bool(true));
        out.insert("changed".to_string(), Value::Bool(self.changed));
        out.insert("msg".to_string(), Value::String(self.message.clone()));
        if let Some(response) = &self.response {
            out.insert("response".to_string(), response.clone());
        }
        if let Some(status) = self.status {
            out.insert("status".to_string(), Value::from(status));
        }
        if let Some(hint) = &self.hint {
            out.insert("hint".to_string(), Value::String(hint.clone()));
        }
        for (key, value) in &self.extra {
            out.insert(key.clone(), value.clone());
        }
        Value::Object(out)
    }
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ModuleError {}

impl From<std::io::Error> for ModuleError {
    fn from(err: std::io::Error) -> Self {
        ModuleError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for ModuleError {
    fn from(err: serde_json::Error) -> Self {
        ModuleError::invalid_params(format!("Invalid module arguments: {}", err))
    }
}
