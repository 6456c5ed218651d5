use crate::errors::ModuleError;
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::services::logger::Logger;
use crate::utils::args::{decode_args, null_as_default};
use crate::utils::query::build_query;
use crate::utils::response::{expect_success, module_result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const MODULE: &str = "openshift_versions";
const QUERY_PARAMS: &[&str] = &["version", "only_latest"];

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionArgs {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub only_latest: bool,
}

#[derive(Clone)]
pub struct OpenshiftVersionsManager {
    logger: Logger,
    api: Arc<ApiClient>,
}

impl OpenshiftVersionsManager {
    pub fn new(logger: Logger, api: Arc<ApiClient>) -> Self {
        Self {
            logger: logger.child(MODULE),
            api,
        }
    }

    pub async fn handle_action(&self, args: Value) -> Result<Value, ModuleError> {
        let args: VersionArgs = decode_args(MODULE, args)?;
        let failure = "Error querying openshift versions";
        let query = build_query(&serde_json::to_value(&args)?, QUERY_PARAMS);
        let response = self
            .api
            .execute(ApiRequest::get(&["openshift-versions"]).with_query(query), failure)
            .await?;
        let versions = expect_success(&response, failure)?;
        if let Some(map) = versions.as_object() {
            self.logger.debug(
                "openshift versions",
                Some(&serde_json::json!({ "count": map.len() })),
            );
        }
        Ok(module_result(false, vec![("versions", versions)]))
    }
}

#[async_trait::async_trait]
impl crate::services::module_executor::ModuleHandler for OpenshiftVersionsManager {
    async fn handle(&self, args: Value) -> Result<Value, ModuleError> {
        self.handle_action(args).await
    }
}
