use super::{ALERT_SOUND, PLUGIN};
use crate::levels::Level;
use crate::sandbox::{Notification, Sandbox};

impl super::RigPlugin {
    /// Ask the host to notify when alerts are enabled and the rig status
    /// reaches WARN or above
    pub fn check_notifications<S: Sandbox + ?Sized>(&self, sbx: &mut S) {
        let prefs = self.get_prefs(&*sbx);
        if !prefs.enable_alerts {
            return;
        }

        let report = sbx
            .rig_status()
            .map(|status| status.report.clone())
            .unwrap_or_default();
        let data = self.prepare_data(&report, &prefs, &*sbx);

        if data.level >= Level::Warn {
            self.logger.warn(&format!(
                "Requesting {} notification: {}",
                data.level, data.title
            ));
            sbx.request_notify(Notification {
                level: data.level,
                title: data.title,
                message: data.message,
                pushover_sound: ALERT_SOUND.to_string(),
                plugin: PLUGIN.name.to_string(),
            });
        }
    }
}
