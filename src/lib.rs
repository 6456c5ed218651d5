pub mod app;
pub mod catalog;
pub mod cli;
pub mod constants;
pub mod errors;
pub mod managers;
pub mod services;
pub mod utils;

pub use cli::Cli;
