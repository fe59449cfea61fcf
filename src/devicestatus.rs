//! Device status reports as ingested by the host
//!
//! Reports arrive as JSON documents; every field is optional so that partial
//! uploads deserialize instead of failing. Numeric readings also accept
//! numeric strings, and values of any other shape read as missing.

use crate::error::Result;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A single device status upload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Report timestamp in epoch milliseconds
    #[serde(
        default,
        deserialize_with = "lenient::mills",
        skip_serializing_if = "Option::is_none"
    )]
    pub mills: Option<i64>,

    /// Report timestamp as uploaded, used when `mills` is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Uploader device name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,

    /// Rig health payload; reports without one are ignored by the plugin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rig: Option<RigReport>,
}

/// Rig connectivity and health readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi: Option<Reading>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub load: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<Reading>,
    /// Minutes since the rig last reached the uploader
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_ping: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump: Option<PumpReport>,
}

/// Pump telemetry relayed by the rig
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PumpReport {
    /// Pump clock, RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<PumpBattery>,
    /// Remaining insulin units
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub reservoir: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PumpBattery {
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub voltage: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent: Option<f64>,
}

/// A reading that uploaders send either as a number or as free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(as_f64))
    }

    /// Integer milliseconds; fractional values are truncated
    #[allow(clippy::cast_possible_truncation)]
    pub fn mills<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(|v| match v {
            Value::Number(n) => n.as_i64().or_else(|| as_f64(v).map(|f| f.trunc() as i64)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| as_f64(v).map(|f| f.trunc() as i64)),
            _ => None,
        }))
    }

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|f| f.is_finite())
    }
}

/// Parse an RFC 3339 timestamp into epoch milliseconds
pub fn parse_mills(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.timestamp_millis())
}

impl DeviceStatus {
    /// Report timestamp: `mills`, else the parsed `created_at`
    pub fn entry_mills(&self) -> Option<i64> {
        self.mills
            .or_else(|| self.created_at.as_deref().and_then(parse_mills))
    }

    /// Pump clock in epoch milliseconds, when present and parseable
    pub fn pump_clock_mills(&self) -> Option<i64> {
        self.pump()
            .and_then(|p| p.clock.as_deref())
            .and_then(parse_mills)
    }

    /// Effective clock used for recency and selection: pump clock if
    /// available, otherwise the report timestamp
    pub fn clock_mills(&self) -> Option<i64> {
        self.pump_clock_mills().or_else(|| self.entry_mills())
    }

    pub fn pump(&self) -> Option<&PumpReport> {
        self.rig.as_ref().and_then(|r| r.pump.as_ref())
    }

    pub const fn has_rig(&self) -> bool {
        self.rig.is_some()
    }
}

/// Load a JSON array of device status reports from disk
pub fn load_reports<P: AsRef<Path>>(path: P) -> Result<Vec<DeviceStatus>> {
    let contents = std::fs::read_to_string(path)?;
    let reports: Vec<DeviceStatus> = serde_json::from_str(&contents)?;
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_nightscout_shape() {
        let status: DeviceStatus = serde_json::from_value(json!({
            "mills": 1_000,
            "device": "openaps://edison",
            "rig": {
                "wifi": -52,
                "load": 0.4,
                "uptime": "3 days",
                "lastPing": 2,
                "pump": {
                    "clock": "2016-09-07T17:37:56-07:00",
                    "battery": { "voltage": 1.52 },
                    "reservoir": 86.5
                }
            }
        }))
        .unwrap();

        let rig = status.rig.as_ref().unwrap();
        assert_eq!(rig.wifi, Some(Reading::Number(-52.0)));
        assert_eq!(rig.uptime, Some(Reading::Text("3 days".into())));
        assert_eq!(rig.last_ping, Some(2.0));
        assert_eq!(status.pump().unwrap().reservoir, Some(86.5));
    }

    #[test]
    fn empty_rig_object_still_counts_as_payload() {
        let status: DeviceStatus =
            serde_json::from_value(json!({ "mills": 5, "rig": {} })).unwrap();
        assert!(status.has_rig());

        let status: DeviceStatus = serde_json::from_value(json!({ "mills": 5 })).unwrap();
        assert!(!status.has_rig());
    }

    #[test]
    fn clock_prefers_pump_clock() {
        let status = DeviceStatus {
            mills: Some(1),
            rig: Some(RigReport {
                pump: Some(PumpReport {
                    clock: Some("1970-01-01T00:00:10Z".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(status.clock_mills(), Some(10_000));
    }

    #[test]
    fn clock_falls_back_to_report_time() {
        let unparseable = DeviceStatus {
            mills: Some(42),
            rig: Some(RigReport {
                pump: Some(PumpReport {
                    clock: Some("yesterday".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(unparseable.clock_mills(), Some(42));

        let created_only = DeviceStatus {
            created_at: Some("1970-01-01T00:01:00Z".into()),
            ..Default::default()
        };
        assert_eq!(created_only.clock_mills(), Some(60_000));
        assert_eq!(DeviceStatus::default().clock_mills(), None);
    }

    #[test]
    fn numbers_in_other_shapes_are_accepted() {
        let statuses: Vec<DeviceStatus> = serde_json::from_str(
            r#"[
                {"mills": 1700000000000.0, "rig": {}},
                {"mills": "1700000000123", "rig": {"load": "0.4", "lastPing": " 3 "}},
                {"mills": 1700000000999.9, "rig": {"pump": {
                    "reservoir": "86.5",
                    "battery": {"voltage": "1.52", "percent": 80}
                }}}
            ]"#,
        )
        .unwrap();

        assert_eq!(statuses[0].mills, Some(1_700_000_000_000));
        assert_eq!(statuses[1].mills, Some(1_700_000_000_123));
        let rig = statuses[1].rig.as_ref().unwrap();
        assert_eq!(rig.load, Some(0.4));
        assert_eq!(rig.last_ping, Some(3.0));

        assert_eq!(statuses[2].mills, Some(1_700_000_000_999));
        let pump = statuses[2].pump().unwrap();
        assert_eq!(pump.reservoir, Some(86.5));
        let battery = pump.battery.as_ref().unwrap();
        assert_eq!(battery.voltage, Some(1.52));
        assert_eq!(battery.percent, Some(80.0));
    }

    #[test]
    fn unusable_numbers_read_as_missing() {
        let statuses: Vec<DeviceStatus> = serde_json::from_str(
            r#"[
                {"mills": "soon", "created_at": "1970-01-01T00:01:00Z",
                 "rig": {"load": "high", "lastPing": [1], "pump": {"reservoir": {}}}},
                {"mills": null, "rig": {"load": null, "lastPing": true}}
            ]"#,
        )
        .unwrap();

        assert_eq!(statuses[0].mills, None);
        assert_eq!(statuses[0].clock_mills(), Some(60_000));
        let rig = statuses[0].rig.as_ref().unwrap();
        assert_eq!(rig.load, None);
        assert_eq!(rig.last_ping, None);
        assert_eq!(statuses[0].pump().unwrap().reservoir, None);

        assert_eq!(statuses[1].mills, None);
        assert!(statuses[1].has_rig());
        assert_eq!(statuses[1].rig.as_ref().unwrap().last_ping, None);
    }

    #[test]
    fn reading_display() {
        assert_eq!(Reading::Number(3.0).to_string(), "3");
        assert_eq!(Reading::Number(-61.5).to_string(), "-61.5");
        assert_eq!(Reading::Text("up 2h".into()).to_string(), "up 2h");
    }
}
