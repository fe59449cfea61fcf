use anyhow::{Context, Result};
use rigpill::config::Config;
use rigpill::devicestatus::load_reports;
use rigpill::logging::{LogContext, get_logger_with_context, init_logging};
use rigpill::{MemorySandbox, RigPlugin};
use serde_json::json;

fn main() -> Result<()> {
    // Config path from the first argument, else the default search
    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => Config::load().context("Failed to load config")?,
    };
    config.validate().context("Invalid configuration")?;

    init_logging(&config.logging).context("Failed to initialize logging")?;

    let reports = load_reports(&config.devicestatus_file)
        .with_context(|| format!("Failed to read {}", config.devicestatus_file))?;

    let logger = get_logger_with_context(
        LogContext::new("cli")
            .with_field(
                "config",
                config_path.unwrap_or_else(|| "default".to_string()),
            )
            .with_field("reports", reports.len().to_string()),
    );
    logger.info(&format!(
        "rigpill {} evaluating device status",
        env!("APP_VERSION")
    ));

    let now = chrono::Utc::now().timestamp_millis();
    let mut sbx = MemorySandbox::new(now, reports)
        .with_settings(config.settings.clone())
        .with_offline(config.offline);

    let plugin = RigPlugin::new();
    plugin.tick(&mut sbx);

    let output = json!({
        "pill": sbx.last_pill(),
        "notifications": sbx.notifications,
        "status": sbx.rig,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
