pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CheckCommand, CliConfig};

pub use adapters::{MongoConnector, SystemCommandRunner};
pub use config::AppConfig;
pub use core::{
    db_check::DbCheck, deploy::DeployTrigger, env_check::EnvReport, http_probe::HttpProber,
};
pub use utils::error::{DiagError, Result};
