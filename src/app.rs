use crate::catalog::MODULES;
use crate::errors::ModuleError;
use crate::managers;
use crate::services::api_client::ApiClient;
use crate::services::logger::Logger;
use crate::services::module_executor::{ModuleExecutor, ModuleHandler};
use crate::services::settings::Settings;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub struct App {
    pub executor: ModuleExecutor,
}

impl App {
    fn validate_module_wiring(
        handlers: &HashMap<String, Arc<dyn ModuleHandler>>,
    ) -> Result<(), ModuleError> {
        let mut missing: Vec<&str> = MODULES
            .iter()
            .map(|module| module.name)
            .filter(|name| !handlers.contains_key(*name))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort_unstable();
        Err(ModuleError::internal(format!(
            "Module wiring is incomplete: {}",
            missing.join(", ")
        )))
    }

    pub fn initialize(settings: Settings) -> Result<Self, ModuleError> {
        let logger = Logger::with_level("assisted-installer", settings.log_level);
        let settings = Arc::new(settings);
        let api = Arc::new(ApiClient::new(settings, &logger)?);

        let mut handlers: HashMap<String, Arc<dyn ModuleHandler>> = HashMap::new();
        handlers.insert(
            "clusters".to_string(),
            Arc::new(managers::clusters::ClustersManager::new(
                logger.clone(),
                api.clone(),
            )),
        );
        handlers.insert(
            "events".to_string(),
            Arc::new(managers::events::EventsManager::new(
                logger.clone(),
                api.clone(),
            )),
        );
        handlers.insert(
            "infra_envs".to_string(),
            Arc::new(managers::infra_envs::InfraEnvsManager::new(
                logger.clone(),
                api.clone(),
            )),
        );
        handlers.insert(
            "openshift_versions".to_string(),
            Arc::new(managers::openshift_versions::OpenshiftVersionsManager::new(
                logger.clone(),
                api.clone(),
            )),
        );
        handlers.insert(
            "operators".to_string(),
            Arc::new(managers::operators::OperatorsManager::new(
                logger.clone(),
                api.clone(),
            )),
        );
        handlers.insert(
            "support_levels".to_string(),
            Arc::new(managers::support_levels::SupportLevelsManager::new(
                logger.clone(),
                api,
            )),
        );

        Self::validate_module_wiring(&handlers)?;

        Ok(Self {
            executor: ModuleExecutor::new(logger, handlers),
        })
    }

    pub async fn run(&self, module: &str, args: Value) -> Result<Value, ModuleError> {
        self.executor.execute(module, args).await
    }

    /// Runs `module` and renders either outcome as the result document.
    pub async fn run_to_result(&self, module: &str, args: Value) -> (bool, Value) {
        match self.run(module, args).await {
            Ok(result) => (true, result),
            Err(err) => (false, err.to_result()),
        }
    }
}
