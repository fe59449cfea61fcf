use super::PLUGIN;
use super::prefs::RigPrefs;
use super::types::{RigData, StatusField};
use crate::levels::Level;
use crate::sandbox::{PillInfo, PillUpdate, Sandbox};

/// Pill style class for an aggregate level
pub const fn status_class(level: Level) -> &'static str {
    match level {
        Level::Urgent => "urgent",
        Level::Warn => "warn",
        Level::None => "current",
    }
}

/// Compose pill text and detail entries. Selected fields go into the pill
/// text in canonical order, the rest into `info`.
pub fn render_pill(data: &RigData, prefs: &RigPrefs) -> PillUpdate {
    let mut values = Vec::new();
    let mut info = Vec::new();

    for key in StatusField::ALL {
        let Some(field) = data.field(key) else {
            continue;
        };
        if prefs.is_selected(key) {
            values.push(field.display.clone());
        } else {
            info.push(PillInfo {
                label: field.label.clone(),
                value: field.display.clone(),
            });
        }
    }

    PillUpdate {
        value: values.join(" "),
        info,
        label: PLUGIN.label.to_string(),
        pill_class: status_class(data.level).to_string(),
    }
}

impl super::RigPlugin {
    /// Push the pill for the current rig property to the host
    pub fn update_visualisation<S: Sandbox + ?Sized>(&self, sbx: &mut S) {
        let prefs = self.get_prefs(&*sbx);
        let report = sbx
            .rig_status()
            .map(|status| status.report.clone())
            .unwrap_or_default();
        let data = self.prepare_data(&report, &prefs, &*sbx);

        let pill = render_pill(&data, &prefs);
        self.logger.trace(&format!(
            "Pill '{}' class={}",
            pill.value, pill.pill_class
        ));
        sbx.update_pill(&PLUGIN, pill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devicestatus::{DeviceStatus, Reading, RigReport};
    use crate::rig::build_data;
    use crate::timeago::DefaultTimeAgo;

    const NOW: i64 = 1_700_000_000_000;

    fn data_for(rig: RigReport, prefs: &RigPrefs) -> RigData {
        let report = DeviceStatus {
            mills: Some(NOW),
            rig: Some(rig),
            ..Default::default()
        };
        build_data(&report, prefs, NOW, false, &DefaultTimeAgo)
    }

    #[test]
    fn classes() {
        assert_eq!(status_class(Level::None), "current");
        assert_eq!(status_class(Level::Warn), "warn");
        assert_eq!(status_class(Level::Urgent), "urgent");
    }

    #[test]
    fn selected_fields_in_text_others_in_info() {
        let prefs = RigPrefs {
            warn_last_ping: 1.0,
            urgent_last_ping: 0.5,
            warn_load: 0.5,
            urgent_load: 0.1,
            ..Default::default()
        };
        let data = data_for(
            RigReport {
                wifi: Some(Reading::Number(-60.0)),
                load: Some(1.2),
                uptime: Some(Reading::Text("4h".into())),
                last_ping: Some(2.0),
                pump: None,
            },
            &prefs,
        );
        let pill = render_pill(&data, &prefs);
        assert_eq!(pill.value, "-60 2m");
        assert_eq!(pill.label, "Rig");
        assert_eq!(pill.pill_class, "current");
        assert_eq!(
            pill.info,
            vec![
                PillInfo {
                    label: "Load".into(),
                    value: "1.2".into()
                },
                PillInfo {
                    label: "Uptime".into(),
                    value: "4h".into()
                },
            ]
        );
    }

    #[test]
    fn missing_fields_are_skipped() {
        let prefs = RigPrefs::default();
        let data = data_for(RigReport::default(), &prefs);
        let pill = render_pill(&data, &prefs);
        assert_eq!(pill.value, "");
        assert!(pill.info.is_empty());
        assert_eq!(pill.pill_class, "current");
    }

    #[test]
    fn urgent_class_follows_aggregate() {
        let prefs = RigPrefs::default();
        let data = data_for(
            RigReport {
                last_ping: Some(3.0),
                ..Default::default()
            },
            &prefs,
        );
        let pill = render_pill(&data, &prefs);
        assert_eq!(pill.value, "3m");
        assert_eq!(pill.pill_class, "urgent");
    }
}
