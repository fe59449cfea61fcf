use crate::devicestatus::{DeviceStatus, Reading};
use crate::levels::Level;
use serde::{Deserialize, Serialize};

/// Fields that take part in severity aggregation and the pill, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    Wifi,
    Load,
    Uptime,
    LastPing,
}

impl StatusField {
    pub const ALL: [Self; 4] = [Self::Wifi, Self::Load, Self::Uptime, Self::LastPing];

    /// Name used in the `fields` setting
    pub const fn key(self) -> &'static str {
        match self {
            Self::Wifi => "wifi",
            Self::Load => "load",
            Self::Uptime => "uptime",
            Self::LastPing => "lastPing",
        }
    }
}

/// One derived value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Reading>,
    pub display: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Field {
    pub(crate) fn new(label: &str, value: Option<Reading>, display: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            display,
            level: Level::None,
            message: None,
        }
    }

    #[must_use]
    pub(crate) fn with_level(mut self, level: Level, message: Option<&str>) -> Self {
        self.level = level;
        self.message = message.map(str::to_string);
        self
    }
}

/// Everything derived from the selected report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigData {
    /// Highest level among the status fields
    pub level: Level,
    /// Message of the field that set `level`, or "Rig Status"
    pub title: String,
    /// Pump battery and reservoir summary, filled only while alerting
    pub message: String,
    pub clock: Option<Field>,
    pub wifi: Option<Field>,
    pub load: Option<Field>,
    pub uptime: Option<Field>,
    pub last_ping: Option<Field>,
    pub battery: Option<Field>,
    pub reservoir: Option<Field>,
    pub device: Field,
}

impl RigData {
    pub const fn field(&self, field: StatusField) -> Option<&Field> {
        match field {
            StatusField::Wifi => self.wifi.as_ref(),
            StatusField::Load => self.load.as_ref(),
            StatusField::Uptime => self.uptime.as_ref(),
            StatusField::LastPing => self.last_ping.as_ref(),
        }
    }
}

/// The `rig` property: selected report plus derived data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigStatus {
    /// Selected report; all fields empty when nothing qualified
    #[serde(flatten)]
    pub report: DeviceStatus,
    /// Effective clock of the selected report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_mills: Option<i64>,
    pub data: RigData,
}

impl RigStatus {
    /// True when no report qualified
    pub fn is_placeholder(&self) -> bool {
        self.report == DeviceStatus::default()
    }
}
