pub mod db_check;
pub mod deploy;
pub mod env_check;
pub mod http_probe;

pub use crate::domain::model::{
    DbCheckReport, DbStep, DeployOutcome, EnvClassification, ProbeOutcome, SignupShape, TestUser,
};
pub use crate::domain::ports::{CommandRunner, CommandStatus, StoreConnector, UserStore};
pub use crate::utils::error::Result;
