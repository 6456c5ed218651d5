use crate::errors::ModuleError;
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::services::logger::Logger;
use crate::utils::args::{decode_args, has_text, null_as_default, require_if};
use crate::utils::query::build_query;
use crate::utils::response::{expect_no_content, expect_success, module_result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

const MODULE: &str = "clusters";
const LIST_QUERY_PARAMS: &[&str] = &["with_hosts"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterState {
    Present,
    Absent,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterArgs {
    #[serde(default)]
    pub state: Option<ClusterState>,
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub with_hosts: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub openshift_version: Option<String>,
    /// Free-form registration payload merged under the typed fields.
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl ClusterArgs {
    fn data_text(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key)?.as_str()
    }

    fn validate(&self) -> Result<(), ModuleError> {
        match self.state {
            Some(ClusterState::Present) => require_if(
                "state",
                "present",
                &[
                    (
                        "name",
                        has_text(self.name.as_deref()) || has_text(self.data_text("name")),
                    ),
                    (
                        "openshift_version",
                        has_text(self.openshift_version.as_deref())
                            || has_text(self.data_text("openshift_version")),
                    ),
                ],
            ),
            Some(ClusterState::Absent) => require_if(
                "state",
                "absent",
                &[("cluster_id", has_text(self.cluster_id.as_deref()))],
            ),
            None => Ok(()),
        }
    }

    /// Registration body: `data`, then the typed fields, then the pull
    /// secret from settings.
    fn registration_body(&self, pull_secret: Option<&str>) -> Value {
        let mut body = self.data.clone().unwrap_or_default();
        if let Some(name) = self.name.as_deref().filter(|v| !v.is_empty()) {
            body.insert("name".to_string(), Value::String(name.to_string()));
        }
        if let Some(version) = self.openshift_version.as_deref().filter(|v| !v.is_empty()) {
            body.insert(
                "openshift_version".to_string(),
                Value::String(version.to_string()),
            );
        }
        if let Some(secret) = pull_secret {
            body.insert("pull_secret".to_string(), Value::String(secret.to_string()));
        }
        Value::Object(body)
    }
}

/// List, register and delete clusters.
#[derive(Clone)]
pub struct ClustersManager {
    logger: Logger,
    api: Arc<ApiClient>,
}

impl ClustersManager {
    pub fn new(logger: Logger, api: Arc<ApiClient>) -> Self {
        Self {
            logger: logger.child(MODULE),
            api,
        }
    }

    pub async fn handle_action(&self, args: Value) -> Result<Value, ModuleError> {
        let args: ClusterArgs = decode_args(MODULE, args)?;
        args.validate()?;
        match args.state {
            Some(ClusterState::Absent) => self.delete(&args).await,
            Some(ClusterState::Present) => self.register(&args).await,
            None => self.list(&args).await,
        }
    }

    async fn list(&self, args: &ClusterArgs) -> Result<Value, ModuleError> {
        let failure = "Error listing clusters";
        let query = build_query(&serde_json::to_value(args)?, LIST_QUERY_PARAMS);
        let response = self
            .api
            .execute(ApiRequest::get(&["clusters"]).with_query(query), failure)
            .await?;
        let clusters = expect_success(&response, failure)?;
        Ok(module_result(false, vec![("clusters", clusters)]))
    }

    async fn register(&self, args: &ClusterArgs) -> Result<Value, ModuleError> {
        let failure = "Error registering cluster";
        let pull_secret = self.api.settings().pull_secret.clone();
        if pull_secret.is_none() {
            self.logger
                .warn("no pull secret configured; registering without one", None);
        }
        let body = args.registration_body(pull_secret.as_deref());
        let response = self
            .api
            .execute(ApiRequest::post(&["clusters"], body), failure)
            .await?;
        let cluster = expect_success(&response, failure)?;
        self.logger.info(
            "cluster registered",
            Some(&serde_json::json!({ "id": cluster.get("id") })),
        );
        Ok(module_result(false, vec![("clusters", cluster)]))
    }

    async fn delete(&self, args: &ClusterArgs) -> Result<Value, ModuleError> {
        let cluster_id = args.cluster_id.as_deref().unwrap_or_default();
        let failure = format!("Error deleting cluster_id: {}", cluster_id);
        let response = self
            .api
            .execute(ApiRequest::delete(&["clusters", cluster_id]), &failure)
            .await?;
        expect_no_content(&response, &failure)?;
        self.logger.info(
            "cluster deleted",
            Some(&serde_json::json!({ "cluster_id": cluster_id })),
        );
        Ok(module_result(true, vec![("clusters", Value::Array(Vec::new()))]))
    }
}

#[async_trait::async_trait]
impl crate::services::module_executor::ModuleHandler for ClustersManager {
    async fn handle(&self, args: Value) -> Result<Value, ModuleError> {
        self.handle_action(args).await
    }
}
