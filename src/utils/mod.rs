pub mod args;
pub mod module_errors;
pub mod query;
pub mod redact;
pub mod response;
pub mod suggest;
pub mod text;
