use crate::config::env;
use crate::config::toml_config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "stackcheck")]
#[command(about = "Diagnostic and deployment checks for the web application stack")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CheckCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CheckCommand {
    /// Classify the database connection string as LOCAL or REMOTE
    Env {
        /// Environment variable holding the connection string
        #[arg(long)]
        var: Option<String>,
    },
    /// Publish the application through the deployment CLI
    Deploy {
        #[arg(long)]
        program: Option<String>,
        /// Arguments passed to the deployment CLI (repeatable)
        #[arg(long = "arg", allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Reproduce a signup request with a fresh user
    Signup,
    /// Check the backend health endpoint
    Health,
    /// Send the signup request the frontend sends and inspect the response shape
    Probe,
    /// Open, insert, delete and close against the database
    Db {
        #[arg(long)]
        collection: Option<String>,
    },
}

impl CliConfig {
    /// 載入環境變數與配置檔，套用命令列覆蓋後驗證
    pub fn load_app_config(&self) -> Result<AppConfig> {
        match &self.env_file {
            Some(path) => env::load_dotenv_from(path)?,
            None => env::load_dotenv(),
        }

        let mut config = AppConfig::load_or_default(&self.config)?;
        self.apply_overrides(&mut config);

        // 驗證配置
        config.validate()?;
        Ok(config)
    }

    /// 命令列參數覆蓋檔案設定
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.server.timeout_seconds = timeout;
        }

        match &self.command {
            CheckCommand::Env { var: Some(var) } => config.database.uri_var = var.clone(),
            CheckCommand::Deploy { program, args } => {
                if let Some(program) = program {
                    config.deploy.program = program.clone();
                }
                if !args.is_empty() {
                    config.deploy.args = args.clone();
                }
            }
            CheckCommand::Db {
                collection: Some(collection),
            } => config.database.collection = collection.clone(),
            _ => {}
        }
    }
}
