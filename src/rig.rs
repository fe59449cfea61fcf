//! Rig status pill
//!
//! Summarizes the health of the rig (the controller running the closed loop)
//! from recent device status uploads. The host calls three hooks per refresh
//! tick, in order:
//!
//! 1. [`RigPlugin::set_properties`] selects the freshest report and publishes
//!    it together with its derived data as the `rig` property.
//! 2. [`RigPlugin::check_notifications`] raises an alert when enabled and the
//!    aggregate level reaches WARN.
//! 3. [`RigPlugin::update_visualisation`] pushes pill text, detail entries and
//!    a style class to the host.

use crate::logging::{StructuredLogger, get_logger};
use crate::sandbox::{PluginInfo, Sandbox};
use crate::timeago::{DefaultTimeAgo, TimeAgo};

mod data;
mod notify;
mod prefs;
mod render;
mod select;
mod types;

pub use data::build_data;
pub use prefs::{RigPrefs, keys};
pub use render::{render_pill, status_class};
pub use select::{recent_mills, select_status};
pub use types::{Field, RigData, RigStatus, StatusField};

/// Identity presented to the host
pub const PLUGIN: PluginInfo = PluginInfo {
    name: "rig",
    label: "Rig",
    plugin_type: "pill-status",
};

/// Sound requested for rig alerts
pub const ALERT_SOUND: &str = "echo";

/// The rig status pill plugin
pub struct RigPlugin {
    time_ago: Box<dyn TimeAgo>,
    logger: StructuredLogger,
}

impl Default for RigPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl RigPlugin {
    pub fn new() -> Self {
        Self::with_time_ago(DefaultTimeAgo)
    }

    /// Use a host-provided relative time formatter
    pub fn with_time_ago<T: TimeAgo + 'static>(time_ago: T) -> Self {
        Self {
            time_ago: Box::new(time_ago),
            logger: get_logger(PLUGIN.name),
        }
    }

    pub const fn info(&self) -> &'static PluginInfo {
        &PLUGIN
    }

    /// Resolve preferences from the sandbox's extended settings
    pub fn get_prefs<S: Sandbox + ?Sized>(&self, sbx: &S) -> RigPrefs {
        RigPrefs::resolve(sbx.extended_settings())
    }

    /// Run the three hooks in the order the host invokes them
    pub fn tick<S: Sandbox + ?Sized>(&self, sbx: &mut S) {
        self.set_properties(sbx);
        self.check_notifications(sbx);
        self.update_visualisation(sbx);
    }
}
