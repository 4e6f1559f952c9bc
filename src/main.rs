use anyhow::Context;
use callerid_whitelist::utils::{logger, validation::Validate};
use callerid_whitelist::{
    preview_phone_book, CliArgs, RunLog, RunReporter, VoipMsClient, WhitelistConfig,
    WhitelistError, WhitelistRunner,
};
use chrono::Local;
use clap::Parser;

fn report_fatal(e: &WhitelistError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    // 記錄開始時間，用於日誌檔名
    let started_at = Local::now();
    tracing::info!("📁 Loading configuration from: {}", args.config.display());

    let mut config = match WhitelistConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "❌ Failed to load config file '{}': {}",
                args.config.display(),
                e
            );
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        report_fatal(&e);
        std::process::exit(1);
    }
    tracing::debug!("Config: {:?}", config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No filters will be created");
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = preview_phone_book(&config.phone_book, &config.routing, &mut stdout) {
            report_fatal(&e);
            std::process::exit(1);
        }
        return Ok(());
    }

    if let Err(e) = config.api.validate() {
        report_fatal(&e);
        std::process::exit(1);
    }

    let log = if config.log_enabled() {
        Some(
            RunLog::create(&config.log.directory, &started_at)
                .context("failed to create run log")?,
        )
    } else {
        None
    };
    let mut reporter = RunReporter::new(std::io::stdout(), log);

    let client = VoipMsClient::new(&config.api).context("failed to build HTTP client")?;
    let runner = WhitelistRunner::new(client, config.routing.clone());

    match runner.run(&config.phone_book, &mut reporter).await {
        Ok(summary) => {
            if let Some(path) = reporter.log_path() {
                tracing::info!("📁 Run log saved to: {}", path.display());
            }
            if summary.failed > 0 {
                tracing::warn!("{} filter(s) were not created", summary.failed);
            }
        }
        Err(e) => {
            report_fatal(&e);
            // 結束前釋放日誌檔
            drop(reporter);
            std::process::exit(1);
        }
    }

    Ok(())
}
