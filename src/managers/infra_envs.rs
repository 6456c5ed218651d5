use crate::errors::ModuleError;
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::services::logger::Logger;
use crate::utils::args::{decode_args, has_text, require_if};
use crate::utils::response::{expect_success, module_result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const MODULE: &str = "infra_envs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfraEnvState {
    Present,
    Absent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InfraEnvArgs {
    #[serde(default)]
    pub state: Option<InfraEnvState>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pull_secret: Option<String>,
}

#[derive(Debug, Serialize)]
struct InfraEnvCreate<'a> {
    name: &'a str,
    pull_secret: &'a str,
}

#[derive(Clone)]
pub struct InfraEnvsManager {
    logger: Logger,
    api: Arc<ApiClient>,
}

impl InfraEnvsManager {
    pub fn new(logger: Logger, api: Arc<ApiClient>) -> Self {
        Self {
            logger: logger.child(MODULE),
            api,
        }
    }

    pub async fn handle_action(&self, args: Value) -> Result<Value, ModuleError> {
        let mut args: InfraEnvArgs = decode_args(MODULE, args)?;
        if !has_text(args.pull_secret.as_deref()) {
            args.pull_secret = self.api.settings().pull_secret.clone();
        }
        match args.state {
            Some(InfraEnvState::Present) => self.create(&args).await,
            Some(InfraEnvState::Absent) => Err(ModuleError::invalid_params(
                "state=absent is not supported by infra_envs",
            )),
            None => Err(ModuleError::invalid_params(
                "infra_envs requires state=present",
            )),
        }
    }

    async fn create(&self, args: &InfraEnvArgs) -> Result<Value, ModuleError> {
        require_if(
            "state",
            "present",
            &[
                ("name", has_text(args.name.as_deref())),
                ("pull_secret", has_text(args.pull_secret.as_deref())),
            ],
        )?;
        let body = InfraEnvCreate {
            name: args.name.as_deref().unwrap_or_default(),
            pull_secret: args.pull_secret.as_deref().unwrap_or_default(),
        };
        let failure = "Error creating infra-envs";
        let response = self
            .api
            .execute(
                ApiRequest::post(&["infra-envs"], serde_json::to_value(&body)?),
                failure,
            )
            .await?;
        let infra_env = expect_success(&response, failure)?;
        self.logger.info(
            "infra-env created",
            Some(&serde_json::json!({ "name": body.name, "id": infra_env.get("id") })),
        );
        Ok(module_result(false, vec![("infra_envs", infra_env)]))
    }
}

#[async_trait::async_trait]
impl crate::services::module_executor::ModuleHandler for InfraEnvsManager {
    async fn handle(&self, args: Value) -> Result<Value, ModuleError> {
        self.handle_action(args).await
    }
}
