use clap::Parser;
use stackcheck::config::env;
use stackcheck::config::LogFormat;
use stackcheck::core::db_check::ConsoleReporter;
use stackcheck::core::TestUser;
use stackcheck::utils::{logger, validation::validate_required_field};
use stackcheck::{
    AppConfig, CheckCommand, CliConfig, DbCheck, DeployTrigger, DiagError, EnvReport,
    HttpProber, MongoConnector, SystemCommandRunner,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::info!("Starting stackcheck");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load_app_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let passed = match run_check(&cli, config).await {
        Ok(passed) => passed,
        Err(e) => exit_with(&e),
    };

    if !passed {
        std::process::exit(1);
    }
}

/// 回傳檢查是否通過；只有無法開始檢查時才回傳錯誤
async fn run_check(cli: &CliConfig, config: AppConfig) -> stackcheck::Result<bool> {
    match &cli.command {
        CheckCommand::Env { .. } => {
            let report = EnvReport::from_env(&config.database.uri_var);
            println!("{}", report);
            Ok(true)
        }
        CheckCommand::Deploy { .. } => {
            let trigger = DeployTrigger::new(SystemCommandRunner, config.deploy);
            let outcome = trigger.run().await;
            println!("{}", trigger.report(&outcome));
            Ok(outcome.is_success())
        }
        CheckCommand::Health => {
            let prober = HttpProber::new(config.server)?;
            println!("🩺 Checking {}", display_endpoint(&prober, &prober.server().health_path));
            let outcome = prober.health().await;
            println!("{}", outcome);
            Ok(outcome.is_success())
        }
        CheckCommand::Signup => {
            let user = TestUser::generate();
            let prober = HttpProber::new(config.server)?;
            println!("📝 Signing up {} <{}>", user.name, user.email);
            let outcome = prober.signup(&user).await;
            println!("{}", outcome);
            Ok(outcome.is_success())
        }
        CheckCommand::Probe => {
            let user = TestUser::generate();
            let prober = HttpProber::new(config.server)?;
            println!("🔍 Sending frontend signup request for {}", user.email);
            let report = prober.frontend_probe(&user).await;
            println!("{}", report);
            Ok(report.is_success())
        }
        CheckCommand::Db { .. } => {
            let uri_var = config.database.uri_var.clone();
            let connection_string = env::read_var(&uri_var);
            let connection_string = validate_required_field(&uri_var, &connection_string)?;

            let check = DbCheck::new(MongoConnector::new(config.database)).with_timing(cli.verbose);
            let report = check
                .run(connection_string, &TestUser::generate(), &mut ConsoleReporter)
                .await;

            if report.is_success() {
                println!("🎉 Database connectivity check passed");
            }
            Ok(report.is_success())
        }
    }
}

fn display_endpoint(prober: &HttpProber, path: &str) -> String {
    prober
        .endpoint(path)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| path.to_string())
}

fn exit_with(e: &DiagError) -> ! {
    tracing::error!(
        "❌ stackcheck failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
