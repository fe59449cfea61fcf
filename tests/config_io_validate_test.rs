use rigpill::config::Config;
use rigpill::devicestatus::load_reports;
use rigpill::rig::{RigPlugin, RigPrefs};
use rigpill::sandbox::MemorySandbox;
use serde_json::Value;
use std::fs;

#[test]
fn save_and_load_yaml_roundtrip() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("config.yaml");

    let mut cfg = Config::default();
    cfg.devicestatus_file = "/data/devicestatus.json".to_string();
    cfg.logging.file = path.with_extension("log").to_string_lossy().to_string();
    cfg.settings
        .insert("urgentLoad".to_string(), Value::from(3.5));

    cfg.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.devicestatus_file, "/data/devicestatus.json");
    assert_eq!(loaded.logging.file, cfg.logging.file);
    assert_eq!(loaded.settings.get("urgentLoad"), Some(&Value::from(3.5)));
}

#[test]
fn config_validation_errors() {
    let mut cfg = Config::default();

    // Unknown log level
    cfg.logging.level = "chatty".to_string();
    assert!(cfg.validate().is_err());

    // Missing report file
    cfg = Config::default();
    cfg.devicestatus_file = "  ".to_string();
    assert!(cfg.validate().is_err());

    // Non-positive and non-numeric thresholds
    cfg = Config::default();
    cfg.settings.insert("warnLastPing".to_string(), Value::from(0));
    assert!(cfg.validate().is_err());

    cfg = Config::default();
    cfg.settings
        .insert("warnLoad".to_string(), Value::from("lots"));
    assert!(cfg.validate().is_err());
}

#[test]
fn from_file_with_invalid_yaml_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), b"settings: [unclosed").unwrap();
    let err = Config::from_file(tmp.path()).unwrap_err();
    let msg = format!("{}", err);
    assert!(msg.contains("Serialization error"));
}

#[test]
fn yaml_settings_drive_the_plugin() {
    let yaml = r#"
settings:
  fields: "load%20lastPing"
  warnLoad: 4
  urgentLoad: "2"
  enableAlerts: true
"#;
    let cfg: Config = serde_yaml::from_str(yaml).unwrap();
    cfg.validate().unwrap();

    let prefs = RigPrefs::resolve(&cfg.settings);
    assert_eq!(prefs.fields, vec!["load", "lastping"]);
    assert!((prefs.urgent_load - 2.0).abs() < f64::EPSILON);
    assert!(prefs.enable_alerts);

    let tmp_dir = tempfile::tempdir().unwrap();
    let reports_path = tmp_dir.path().join("devicestatus.json");
    fs::write(
        &reports_path,
        r#"[{"mills": 1000, "device": "edison", "rig": {"load": 3, "lastPing": 1}}]"#,
    )
    .unwrap();
    let reports = load_reports(&reports_path).unwrap();
    assert_eq!(reports.len(), 1);

    let mut sbx = MemorySandbox::new(2000, reports).with_settings(cfg.settings);
    RigPlugin::new().tick(&mut sbx);
    let pill = sbx.last_pill().unwrap();
    assert_eq!(pill.value, "3 1m");
    assert_eq!(pill.pill_class, "urgent");
    assert_eq!(sbx.notifications.len(), 1);
}

#[test]
fn load_reports_rejects_non_array() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), br#"{"mills": 1}"#).unwrap();
    assert!(load_reports(tmp.path()).is_err());
}
