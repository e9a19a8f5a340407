use crate::config::toml_config::DeployConfig;
use crate::domain::model::DeployOutcome;
use crate::domain::ports::CommandRunner;
use std::fmt;

pub struct DeployTrigger<R: CommandRunner> {
    runner: R,
    config: DeployConfig,
}

impl<R: CommandRunner> DeployTrigger<R> {
    pub fn new(runner: R, config: DeployConfig) -> Self {
        Self { runner, config }
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.config.program.as_str())
            .chain(self.config.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub async fn run(&self) -> DeployOutcome {
        tracing::info!("🚀 Running: {}", self.command_line());

        match self.runner.run(&self.config.program, &self.config.args).await {
            Ok(status) if status.success => DeployOutcome::Succeeded,
            Ok(status) => {
                tracing::debug!("Deploy exited with {:?}", status.code);
                DeployOutcome::Failed { code: status.code }
            }
            Err(e) => DeployOutcome::NotLaunched {
                reason: e.to_string(),
            },
        }
    }

    pub fn report<'a>(&'a self, outcome: &'a DeployOutcome) -> DeployReport<'a> {
        DeployReport {
            program: &self.config.program,
            outcome,
        }
    }
}

pub struct DeployReport<'a> {
    program: &'a str,
    outcome: &'a DeployOutcome,
}

impl fmt::Display for DeployReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            DeployOutcome::Succeeded => write!(f, "✅ Deployment completed successfully"),
            DeployOutcome::Failed { code } => {
                match code {
                    Some(code) => write!(f, "❌ Deployment failed (exit code {})", code)?,
                    None => write!(f, "❌ Deployment failed (terminated by signal)")?,
                }
                write!(
                    f,
                    "\n💡 Run `{} login` and check the project is linked, then retry",
                    self.program
                )
            }
            DeployOutcome::NotLaunched { reason } => write!(
                f,
                "❌ Could not start '{}': {}\n💡 Install it first (e.g. `npm install -g {}`) and make sure it is on PATH",
                self.program, reason, self.program
            ),
        }
    }
}
