use super::prefs::RigPrefs;
use super::types::RigStatus;
use crate::devicestatus::DeviceStatus;
use crate::sandbox::Sandbox;

const MINUTE_MS: f64 = 60_000.0;

/// Oldest effective clock still considered: `now - 2 * urgent_last_ping` minutes
#[allow(clippy::cast_possible_truncation)]
pub fn recent_mills(now: i64, prefs: &RigPrefs) -> i64 {
    // float to int casts saturate, so huge thresholds clamp the window
    let window = (prefs.urgent_last_ping * 2.0 * MINUTE_MS) as i64;
    now.saturating_sub(window.max(0))
}

/// Pick the report with the latest effective clock among those carrying a rig
/// payload inside the recency window. On equal clocks the earlier report in
/// `statuses` wins.
pub fn select_status<'a>(
    statuses: &'a [DeviceStatus],
    now: i64,
    prefs: &RigPrefs,
) -> Option<&'a DeviceStatus> {
    let recent = recent_mills(now, prefs);
    let mut best: Option<(&DeviceStatus, i64)> = None;

    for status in statuses.iter().filter(|s| s.has_rig()) {
        let Some(clock) = status.clock_mills() else {
            continue;
        };
        if clock > now || clock < recent {
            continue;
        }
        if best.is_none_or(|(_, best_clock)| clock > best_clock) {
            best = Some((status, clock));
        }
    }

    best.map(|(status, _)| status)
}

impl super::RigPlugin {
    /// Select the freshest rig report and publish it with its derived data
    pub fn set_properties<S: Sandbox + ?Sized>(&self, sbx: &mut S) {
        let prefs = self.get_prefs(&*sbx);
        let now = sbx.time();

        let selected = select_status(sbx.device_statuses(), now, &prefs).cloned();
        match &selected {
            Some(status) => self.logger.debug(&format!(
                "Selected rig status from {} with clock {:?}",
                status.device.as_deref().unwrap_or("unknown device"),
                status.clock_mills()
            )),
            None => self.logger.debug("No recent rig status available"),
        }

        let report = selected.unwrap_or_default();
        let data = self.prepare_data(&report, &prefs, &*sbx);
        let status = RigStatus {
            clock_mills: report.clock_mills(),
            report,
            data,
        };
        sbx.publish_rig_status(status);
    }
}
