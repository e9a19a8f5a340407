use crate::domain::ports::{CommandRunner, CommandStatus};
use crate::utils::error::{DiagError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// 直接執行外部程式，輸出直接接到目前的終端機
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandStatus> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| DiagError::CommandError {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        Ok(CommandStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}
