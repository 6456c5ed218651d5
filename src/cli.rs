use crate::app::App;
use crate::catalog::{MODULES, MODULE_ALIASES};
use crate::errors::ModuleError;
use crate::services::settings::Settings;
use crate::utils::args::parse_module_args;
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Drive the Assisted Installer API one module call at a time.
///
/// Arguments are a JSON object given with `--args`, read from ARGS_FILE, or
/// read from stdin. The module result is printed as JSON on stdout.
#[derive(Debug, Parser)]
#[command(name = "assisted-installer", version, about)]
pub struct Cli {
    /// Module to run (e.g. clusters, events, support_levels)
    #[arg(required_unless_present = "list_modules")]
    pub module: Option<String>,

    /// File holding the module arguments as JSON
    pub args_file: Option<PathBuf>,

    /// Module arguments as inline JSON
    #[arg(long, conflicts_with = "args_file")]
    pub args: Option<String>,

    /// Override the API base URL (default: AI_API_URL or the public endpoint)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override the SSO token endpoint (default: AI_SSO_URL or Red Hat SSO)
    #[arg(long)]
    pub sso_url: Option<String>,

    /// Request timeout in milliseconds (default: AI_TIMEOUT_MS or none)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Print the available modules and exit
    #[arg(long)]
    pub list_modules: bool,
}

impl Cli {
    /// Runs the CLI and returns the process exit code.
    pub async fn run(self) -> i32 {
        if self.list_modules {
            print_modules();
            return 0;
        }
        let (ok, result) = match self.execute().await {
            Ok(outcome) => outcome,
            Err(err) => (false, err.to_result()),
        };
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("assisted-installer: failed to render result: {}", err);
                return 1;
            }
        }
        if ok {
            0
        } else {
            1
        }
    }

    async fn execute(&self) -> Result<(bool, Value), ModuleError> {
        let settings = self.settings()?;
        let args = self.read_args().await?;
        let module = self.module.as_deref().unwrap_or_default();
        let app = App::initialize(settings)?;
        Ok(app.run_to_result(module, args).await)
    }

    fn settings(&self) -> Result<Settings, ModuleError> {
        let setup_error = |err: crate::services::settings::SettingsError| {
            ModuleError::invalid_params(err.to_string())
        };
        let mut settings = Settings::from_env().map_err(setup_error)?;
        if let Some(url) = self.api_url.as_deref() {
            settings = settings.with_api_url(url).map_err(setup_error)?;
        }
        if let Some(url) = self.sso_url.as_deref() {
            settings = settings.with_sso_url(url).map_err(setup_error)?;
        }
        if let Some(ms) = self.timeout_ms {
            settings = settings.with_timeout(Duration::from_millis(ms));
        }
        Ok(settings)
    }

    async fn read_args(&self) -> Result<Value, ModuleError> {
        if let Some(inline) = self.args.as_deref() {
            return parse_module_args(inline);
        }
        if let Some(path) = self.args_file.as_ref() {
            let text = tokio::fs::read_to_string(path).await.map_err(|err| {
                ModuleError::invalid_params(format!(
                    "Cannot read arguments file {}: {}",
                    path.display(),
                    err
                ))
            })?;
            return parse_module_args(&text);
        }
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        parse_module_args(&text)
    }
}

fn print_modules() {
    for module in MODULES {
        println!("{:<20} {}", module.name, module.summary);
    }
    for alias in MODULE_ALIASES {
        println!("{:<20} alias of {}", alias.name, alias.target);
    }
}
