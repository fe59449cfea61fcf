use super::*;

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: "/tmp/rigpill.log".to_string(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            settings: ExtendedSettings::new(),
            devicestatus_file: "devicestatus.json".to_string(),
            offline: false,
        }
    }
}
