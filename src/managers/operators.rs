use crate::errors::ModuleError;
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::services::logger::Logger;
use crate::utils::args::decode_args;
use crate::utils::response::module_result;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const MODULE: &str = "operators";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorArgs {
    /// Accepted from older playbooks; the listing is never filtered by it.
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct OperatorsManager {
    logger: Logger,
    api: Arc<ApiClient>,
}

impl OperatorsManager {
    pub fn new(logger: Logger, api: Arc<ApiClient>) -> Self {
        Self {
            logger: logger.child(MODULE),
            api,
        }
    }

    pub async fn handle_action(&self, args: Value) -> Result<Value, ModuleError> {
        let _: OperatorArgs = decode_args(MODULE, args)?;
        let failure = "Error listing supported operators";
        let response = self
            .api
            .execute(ApiRequest::get(&["supported-operators"]), failure)
            .await
            .map_err(|err| err.with_extra("operators", Value::Array(Vec::new())))?;

        // Unlike the other listings, failures keep the decoded error body and
        // report an empty operator list.
        if !response.is_success() {
            return Err(
                ModuleError::remote(failure, response.status, response.payload())
                    .with_extra("operators", Value::Array(Vec::new())),
            );
        }
        let operators = response.payload();
        if let Some(items) = operators.as_array() {
            self.logger.debug(
                "supported operators",
                Some(&serde_json::json!({ "count": items.len() })),
            );
        }
        Ok(module_result(false, vec![("operators", operators)]))
    }
}

#[async_trait::async_trait]
impl crate::services::module_executor::ModuleHandler for OperatorsManager {
    async fn handle(&self, args: Value) -> Result<Value, ModuleError> {
        self.handle_action(args).await
    }
}
