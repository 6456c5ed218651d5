use crate::errors::ModuleError;
use crate::services::api_client::{ApiClient, ApiRequest};
use crate::services::logger::Logger;
use crate::utils::args::{decode_args, has_text};
use crate::utils::query::build_query;
use crate::utils::response::{expect_success, module_result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const MODULE: &str = "events";
const QUERY_PARAMS: &[&str] = &["cluster_id", "limit", "order", "offset", "severities"];
const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    #[default]
    List,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventArgs {
    #[serde(default)]
    pub action: Option<EventAction>,
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub order: Option<EventOrder>,
    #[serde(default)]
    pub severities: Option<Vec<Severity>>,
}

impl EventArgs {
    fn with_defaults(mut self) -> Self {
        self.action.get_or_insert(EventAction::default());
        self.limit.get_or_insert(DEFAULT_LIMIT);
        self.offset.get_or_insert(0);
        self.order.get_or_insert(EventOrder::default());
        self
    }
}

#[derive(Clone)]
pub struct EventsManager {
    logger: Logger,
    api: Arc<ApiClient>,
}

impl EventsManager {
    pub fn new(logger: Logger, api: Arc<ApiClient>) -> Self {
        Self {
            logger: logger.child(MODULE),
            api,
        }
    }

    pub async fn handle_action(&self, args: Value) -> Result<Value, ModuleError> {
        let args = decode_args::<EventArgs>(MODULE, args)?.with_defaults();
        match args.action.unwrap_or_default() {
            EventAction::List => self.list(&args).await,
        }
    }

    async fn list(&self, args: &EventArgs) -> Result<Value, ModuleError> {
        if !has_text(args.cluster_id.as_deref()) {
            return Err(ModuleError::invalid_params(
                "cluster_id is required for list cluster events action",
            ));
        }
        let failure = "Error listing cluster events";
        let query = build_query(&serde_json::to_value(args)?, QUERY_PARAMS);
        self.logger.debug(
            "listing events",
            Some(&serde_json::json!({ "query": query })),
        );
        let response = self
            .api
            .execute(ApiRequest::get(&["events"]).with_query(query), failure)
            .await?;
        let events = expect_success(&response, failure)?;
        Ok(module_result(false, vec![("cluster_events", events)]))
    }
}

#[async_trait::async_trait]
impl crate::services::module_executor::ModuleHandler for EventsManager {
    async fn handle(&self, args: Value) -> Result<Value, ModuleError> {
        self.handle_action(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::{EventArgs, QUERY_PARAMS};
    use crate::utils::query::build_query;
    use serde_json::json;

    #[test]
    fn defaults_fill_limit_and_order_but_zero_offset_is_dropped() {
        let args: EventArgs = serde_json::from_value(json!({"cluster_id": "c1"})).expect("args");
        let args = args.with_defaults();
        let query = build_query(&serde_json::to_value(&args).expect("value"), QUERY_PARAMS);
        assert_eq!(
            query,
            vec![
                ("cluster_id".to_string(), "c1".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("order".to_string(), "ascending".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_unknown_severity() {
        let parsed: Result<EventArgs, _> =
            serde_json::from_value(json!({"cluster_id": "c1", "severities": ["fatal"]}));
        assert!(parsed.is_err());
    }
}
