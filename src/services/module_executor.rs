use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::{alias_by_name, known_module_names};
use crate::errors::ModuleError;
use crate::services::logger::Logger;
use crate::utils::args::{normalize_module_args, require_all};
use crate::utils::module_errors::unknown_module_error;
use crate::utils::redact::redact_object;

const ARG_LOG_LENGTH: usize = 256;

#[async_trait]
pub trait ModuleHandler: Send + Sync {
    async fn handle(&self, args: Value) -> Result<Value, ModuleError>;
}

#[derive(Clone)]
pub struct ModuleExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ModuleHandler>>>,
}

impl ModuleExecutor {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ModuleHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
        }
    }

    /// Maps an alias onto its canonical module. Arguments outside the alias'
    /// accepted set are rejected before its required ones are checked and
    /// its fixed ones pinned.
    pub fn resolve(&self, module: &str, args: Value) -> Result<(String, Value), ModuleError> {
        let Some(alias) = alias_by_name(module) else {
            return Ok((module.to_string(), args));
        };
        let Value::Object(mut map) = args else {
            return Err(ModuleError::invalid_params(
                "Module arguments must be a JSON object",
            ));
        };
        let mut unsupported: Vec<&str> = map
            .keys()
            .map(String::as_str)
            .filter(|key| !alias.accepted.iter().any(|accepted| accepted == key))
            .collect();
        if !unsupported.is_empty() {
            unsupported.sort_unstable();
            return Err(ModuleError::invalid_params(format!(
                "Unsupported parameters for module {}: {}",
                module,
                unsupported.join(", ")
            ))
            .with_hint(format!(
                "{} accepts: {}",
                module,
                alias.accepted.join(", ")
            )));
        }
        let presence: Vec<(&str, bool)> = alias
            .required
            .iter()
            .map(|key| (*key, map.get(*key).map(|v| !v.is_null()).unwrap_or(false)))
            .collect();
        require_all(&presence)?;
        for (key, value) in alias.pinned {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
        Ok((alias.target.to_string(), Value::Object(map)))
    }

    pub async fn execute(&self, module: &str, args: Value) -> Result<Value, ModuleError> {
        let args = normalize_module_args(args)?;
        let (target, args) = self.resolve(module, args)?;
        let handler = self
            .handlers
            .get(&target)
            .cloned()
            .ok_or_else(|| unknown_module_error(module, &known_module_names()))?;

        let invoked_as = if target != module { Some(module) } else { None };
        self.logger.info(
            "invoking module",
            Some(&serde_json::json!({
                "module": target,
                "invoked_as": invoked_as,
                "args": redact_object(&args, ARG_LOG_LENGTH, None),
            })),
        );
        let started = Instant::now();
        let result = handler.handle(args).await;
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => self.logger.info(
                "module finished",
                Some(&serde_json::json!({ "module": target, "duration_ms": duration_ms })),
            ),
            Err(err) => self.logger.warn(
                "module failed",
                Some(&serde_json::json!({
                    "module": target,
                    "kind": err.kind,
                    "msg": err.message,
                    "status": err.status,
                    "duration_ms": duration_ms,
                })),
            ),
        }
        result
    }
}
