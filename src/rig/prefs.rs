use super::types::StatusField;
use crate::sandbox::ExtendedSettings;
use serde::Serialize;
use serde_json::Value;

const DEFAULT_FIELDS: [&str; 2] = ["wifi", "lastping"];
const DEFAULT_WARN_LAST_PING: f64 = 5.0;
const DEFAULT_URGENT_LAST_PING: f64 = 20.0;
const DEFAULT_WARN_LOAD: f64 = 2.0;
const DEFAULT_URGENT_LOAD: f64 = 5.0;

/// Setting keys recognized in the extended settings
pub mod keys {
    pub const FIELDS: &str = "fields";
    pub const WARN_LAST_PING: &str = "warnLastPing";
    pub const URGENT_LAST_PING: &str = "urgentLastPing";
    pub const WARN_LOAD: &str = "warnLoad";
    pub const URGENT_LOAD: &str = "urgentLoad";
    pub const ENABLE_ALERTS: &str = "enableAlerts";

    pub const THRESHOLDS: [&str; 4] = [WARN_LAST_PING, URGENT_LAST_PING, WARN_LOAD, URGENT_LOAD];
}

/// Preferences resolved for one hook call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RigPrefs {
    /// Lowercased names of the fields shown in the pill itself
    pub fields: Vec<String>,
    /// Minutes
    pub warn_last_ping: f64,
    /// Minutes; also bounds report recency at twice this value
    pub urgent_last_ping: f64,
    pub warn_load: f64,
    pub urgent_load: f64,
    pub enable_alerts: bool,
}

impl Default for RigPrefs {
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS.iter().map(|f| (*f).to_string()).collect(),
            warn_last_ping: DEFAULT_WARN_LAST_PING,
            urgent_last_ping: DEFAULT_URGENT_LAST_PING,
            warn_load: DEFAULT_WARN_LOAD,
            urgent_load: DEFAULT_URGENT_LOAD,
            enable_alerts: false,
        }
    }
}

impl RigPrefs {
    /// Apply defaults for every option that is absent, empty, zero or not
    /// understood. Never fails.
    pub fn resolve(settings: &ExtendedSettings) -> Self {
        let defaults = Self::default();

        let fields = settings
            .get(keys::FIELDS)
            .and_then(Value::as_str)
            .map(clean_list)
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.fields);

        Self {
            fields,
            warn_last_ping: setting_number(settings, keys::WARN_LAST_PING)
                .unwrap_or(defaults.warn_last_ping),
            urgent_last_ping: setting_number(settings, keys::URGENT_LAST_PING)
                .unwrap_or(defaults.urgent_last_ping),
            warn_load: setting_number(settings, keys::WARN_LOAD).unwrap_or(defaults.warn_load),
            urgent_load: setting_number(settings, keys::URGENT_LOAD)
                .unwrap_or(defaults.urgent_load),
            enable_alerts: setting_bool(settings, keys::ENABLE_ALERTS)
                .unwrap_or(defaults.enable_alerts),
        }
    }

    /// Whether `field` goes into the pill text rather than the detail list
    pub fn is_selected(&self, field: StatusField) -> bool {
        let key = field.key().to_lowercase();
        self.fields.iter().any(|f| *f == key)
    }
}

/// Numeric setting; JSON numbers and numeric strings are accepted, zero and
/// negative values count as unset
fn setting_number(settings: &ExtendedSettings, key: &str) -> Option<f64> {
    let n = match settings.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (n.is_finite() && n > 0.0).then_some(n)
}

fn setting_bool(settings: &ExtendedSettings, key: &str) -> Option<bool> {
    match settings.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Some(true),
            "false" | "off" | "no" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Decode a URL-encoded, space separated list into lowercase names
fn clean_list(value: &str) -> Vec<String> {
    percent_decode(value)
        .to_lowercase()
        .split_whitespace()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decode `%XX` escapes; malformed escapes are kept literally
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2]))
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
