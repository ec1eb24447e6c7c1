use clap::Parser;
use employee_directory::core::ConfigProvider;
use employee_directory::utils::error::ErrorSeverity;
use employee_directory::utils::{logger, validation::Validate};
use employee_directory::{
    build_notifier, CliConfig, CsvExporter, Directory, DirectoryError, LocalStorage, Shell,
    TomlConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting employee-directory");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入 TOML 配置（未指定時使用預設值），再套用命令列覆蓋
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => TomlConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }
    tracing::debug!(
        "Company: {}, welcome emails: {}",
        config.company_name(),
        config.notifications_enabled() && !cli.no_notify
    );

    let notifier = match build_notifier(config.notification.as_ref(), cli.no_notify) {
        Ok(notifier) => notifier,
        Err(e) => exit_with(&e),
    };
    let directory = match Directory::from_config(&config, notifier) {
        Ok(directory) => directory,
        Err(e) => exit_with(&e),
    };

    let storage = LocalStorage::new(config.export_path());
    let exporter = CsvExporter::new(storage, config.export_file_name());

    let stdin = std::io::stdin();
    let mut shell = Shell::new(directory, exporter, stdin.lock(), std::io::stdout())
        .with_append_on_add(config.append_on_add());

    if let Err(e) = shell.run().await {
        tracing::error!(
            "❌ Interactive session failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        "Session ended with {} employees on record",
        shell.directory().len()
    );
    Ok(())
}

fn exit_with(e: &DirectoryError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
