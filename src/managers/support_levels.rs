use crate::errors::ModuleError;
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::services::logger::Logger;
use crate::utils::args::{decode_args, has_text, require_all};
use crate::utils::query::build_query;
use crate::utils::response::{expect_success, module_result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const MODULE: &str = "support_levels";
const QUERY_PARAMS: &[&str] = &[
    "openshift_version",
    "cpu_architecture",
    "platform_type",
    "external_platform_name",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Architectures,
    Features,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Architectures => "architectures",
            ResourceType::Features => "features",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuArchitecture {
    #[default]
    #[serde(rename = "x86_64")]
    X86_64,
    Aarch64,
    Arm64,
    Ppc64le,
    S390x,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Baremetal,
    None,
    Nutanix,
    Vsphere,
    External,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportLevelArgs {
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    #[serde(default)]
    pub openshift_version: Option<String>,
    #[serde(default)]
    pub cpu_architecture: Option<CpuArchitecture>,
    #[serde(default)]
    pub platform_type: Option<PlatformType>,
    #[serde(default)]
    pub external_platform_name: Option<String>,
}

/// Support level matrices for architectures and features.
#[derive(Clone)]
pub struct SupportLevelsManager {
    logger: Logger,
    api: Arc<ApiClient>,
}

impl SupportLevelsManager {
    pub fn new(logger: Logger, api: Arc<ApiClient>) -> Self {
        Self {
            logger: logger.child(MODULE),
            api,
        }
    }

    pub async fn handle_action(&self, args: Value) -> Result<Value, ModuleError> {
        let mut args: SupportLevelArgs = decode_args(MODULE, args)?;
        require_all(&[
            ("resource_type", args.resource_type.is_some()),
            ("openshift_version", has_text(args.openshift_version.as_deref())),
        ])?;
        let resource_type = args.resource_type.ok_or_else(|| {
            ModuleError::invalid_params("missing required arguments: resource_type")
        })?;
        args.cpu_architecture.get_or_insert(CpuArchitecture::default());

        let failure = format!("Error querying {}", resource_type.as_str());
        let query = build_query(&serde_json::to_value(&args)?, QUERY_PARAMS);
        self.logger.debug(
            "querying support levels",
            Some(&serde_json::json!({ "resource_type": resource_type, "query": query })),
        );
        let response = self
            .api
            .execute(
                ApiRequest::get(&["support-levels", resource_type.as_str()]).with_query(query),
                &failure,
            )
            .await?;
        let payload = expect_success(&response, &failure)?;
        Ok(spread_payload(resource_type, payload))
    }
}

/// The API wraps each matrix in an object keyed by the resource type
/// (`{"architectures": {...}}`), so object payloads become the result
/// itself. Anything else is nested under the resource type.
fn spread_payload(resource_type: ResourceType, payload: Value) -> Value {
    match payload {
        Value::Object(map) => {
            let mut out = module_result(false, Vec::new());
            if let Value::Object(target) = &mut out {
                target.extend(map);
            }
            out
        }
        other => module_result(false, vec![(resource_type.as_str(), other)]),
    }
}

#[async_trait::async_trait]
impl crate::services::module_executor::ModuleHandler for SupportLevelsManager {
    async fn handle(&self, args: Value) -> Result<Value, ModuleError> {
        self.handle_action(args).await
    }
}
