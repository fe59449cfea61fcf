//! Host capabilities available to the plugin during a refresh tick
//!
//! The host owns data ingestion, notification delivery and the pill UI. It
//! hands the plugin a [`Sandbox`] on every hook call; nothing is kept between
//! calls except the rig status the host stores on the plugin's behalf.

use crate::devicestatus::DeviceStatus;
use crate::levels::Level;
use crate::rig::RigStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-plugin settings as configured by the user (string or number values)
pub type ExtendedSettings = BTreeMap<String, serde_json::Value>;

/// Identity a plugin presents to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub plugin_type: &'static str,
}

/// Alert request handed to the host's notification subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub message: String,
    pub pushover_sound: String,
    /// Name of the requesting plugin, used by the host for dedup and silencing
    pub plugin: String,
}

/// Secondary (expanded view) pill entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillInfo {
    pub label: String,
    pub value: String,
}

/// Content pushed to the host's pill-rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillUpdate {
    pub value: String,
    pub info: Vec<PillInfo>,
    pub label: String,
    pub pill_class: String,
}

/// Capabilities the host provides for one tick
pub trait Sandbox {
    /// Current sandbox time in epoch milliseconds
    fn time(&self) -> i64;

    /// All ingested device status reports
    fn device_statuses(&self) -> &[DeviceStatus];

    /// User settings for this plugin
    fn extended_settings(&self) -> &ExtendedSettings;

    /// Whether the monitored loop is known to be intentionally offline
    fn offline_marker(&self) -> bool;

    /// Store the derived rig status as the current `rig` property
    fn publish_rig_status(&mut self, status: RigStatus);

    /// The `rig` property stored earlier in this tick, if any
    fn rig_status(&self) -> Option<&RigStatus>;

    fn request_notify(&mut self, notification: Notification);

    fn update_pill(&mut self, plugin: &PluginInfo, pill: PillUpdate);
}

/// In-memory host that records everything the plugin emits
#[derive(Debug, Clone, Default)]
pub struct MemorySandbox {
    pub now: i64,
    pub statuses: Vec<DeviceStatus>,
    pub settings: ExtendedSettings,
    pub offline: bool,
    pub rig: Option<RigStatus>,
    pub notifications: Vec<Notification>,
    pub pills: Vec<(String, PillUpdate)>,
}

impl MemorySandbox {
    pub fn new(now: i64, statuses: Vec<DeviceStatus>) -> Self {
        Self {
            now,
            statuses,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ExtendedSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set a single extended setting
    #[must_use]
    pub fn with_setting<V: Into<serde_json::Value>>(mut self, key: &str, value: V) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }

    #[must_use]
    pub const fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Most recent pill pushed to the host
    pub fn last_pill(&self) -> Option<&PillUpdate> {
        self.pills.last().map(|(_, pill)| pill)
    }
}

impl Sandbox for MemorySandbox {
    fn time(&self) -> i64 {
        self.now
    }

    fn device_statuses(&self) -> &[DeviceStatus] {
        &self.statuses
    }

    fn extended_settings(&self) -> &ExtendedSettings {
        &self.settings
    }

    fn offline_marker(&self) -> bool {
        self.offline
    }

    fn publish_rig_status(&mut self, status: RigStatus) {
        self.rig = Some(status);
    }

    fn rig_status(&self) -> Option<&RigStatus> {
        self.rig.as_ref()
    }

    fn request_notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn update_pill(&mut self, plugin: &PluginInfo, pill: PillUpdate) {
        self.pills.push((plugin.name.to_string(), pill));
    }
}
