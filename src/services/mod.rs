pub mod api_client;
pub mod logger;
pub mod module_executor;
pub mod settings;
pub mod token;
