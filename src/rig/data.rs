use super::prefs::RigPrefs;
use super::types::{Field, RigData, StatusField};
use crate::devicestatus::{DeviceStatus, PumpBattery, Reading};
use crate::levels::Level;
use crate::sandbox::Sandbox;
use crate::timeago::{TimeAgo, format_time};

const DEFAULT_TITLE: &str = "Rig Status";

/// Unit appended to the last ping display
const PING_UNITS: &str = "m";

impl super::RigPlugin {
    /// Derive field values and the aggregate level for `report`
    pub fn prepare_data<S: Sandbox + ?Sized>(
        &self,
        report: &DeviceStatus,
        prefs: &RigPrefs,
        sbx: &S,
    ) -> RigData {
        let offline = sbx.offline_marker();
        if offline {
            self.logger
                .info("Loop known offline, not checking for alerts");
        }
        build_data(report, prefs, sbx.time(), offline, self.time_ago.as_ref())
    }
}

/// Build the derived data for a report.
///
/// With `offline` set the per-field levels are still computed but the
/// aggregate stays at [`Level::None`], which keeps the plugin quiet while the
/// loop is intentionally down.
pub fn build_data(
    report: &DeviceStatus,
    prefs: &RigPrefs,
    now: i64,
    offline: bool,
    time_ago: &dyn TimeAgo,
) -> RigData {
    let rig = report.rig.as_ref();
    let pump = report.pump();

    let mut data = RigData {
        level: Level::None,
        title: DEFAULT_TITLE.to_string(),
        message: String::new(),
        clock: pump
            .and_then(|p| p.clock.as_ref())
            .map(|_| clock_field(report.pump_clock_mills(), now, time_ago)),
        wifi: rig
            .and_then(|r| r.wifi.as_ref())
            .map(|w| passthrough_field("WiFi", w)),
        load: rig.and_then(|r| r.load).map(|l| load_field(l, prefs)),
        uptime: rig
            .and_then(|r| r.uptime.as_ref())
            .map(|u| passthrough_field("Uptime", u)),
        last_ping: rig.and_then(|r| r.last_ping).map(|p| ping_field(p, prefs)),
        battery: pump.and_then(|p| p.battery.as_ref()).and_then(battery_field),
        reservoir: pump.and_then(|p| p.reservoir).map(reservoir_field),
        device: Field::new(
            "Device",
            None,
            report.device.clone().unwrap_or_default(),
        ),
    };

    if !offline {
        aggregate(&mut data);
    }
    build_message(&mut data);

    data
}

/// Lower load readings are the ones that alert
fn load_field(value: f64, prefs: &RigPrefs) -> Field {
    let field = Field::new("Load", Some(Reading::Number(value)), value.to_string());
    if value < prefs.urgent_load {
        field.with_level(Level::Urgent, Some("URGENT: High System Load"))
    } else if value < prefs.warn_load {
        field.with_level(Level::Warn, Some("Warning, System Load"))
    } else {
        field
    }
}

fn ping_field(value: f64, prefs: &RigPrefs) -> Field {
    let field = Field::new(
        "Last Ping",
        Some(Reading::Number(value)),
        format!("{value}{PING_UNITS}"),
    );
    if value < prefs.urgent_last_ping {
        field.with_level(Level::Urgent, Some("URGENT: Rig not connected"))
    } else if value < prefs.warn_last_ping {
        field.with_level(Level::Warn, Some("Warning, Rig not connected"))
    } else {
        field
    }
}

fn passthrough_field(label: &str, value: &Reading) -> Field {
    Field::new(label, Some(value.clone()), value.to_string())
}

#[allow(clippy::cast_precision_loss)]
fn clock_field(clock: Option<i64>, now: i64, time_ago: &dyn TimeAgo) -> Field {
    Field::new(
        "Last Clock",
        clock.map(|c| Reading::Number(c as f64)),
        format_time(time_ago, clock, now),
    )
}

fn battery_field(battery: &PumpBattery) -> Option<Field> {
    if let Some(voltage) = battery.voltage {
        return Some(Field::new(
            "Battery",
            Some(Reading::Number(voltage)),
            format!("{voltage}v"),
        ));
    }
    battery.percent.map(|percent| {
        Field::new(
            "Battery",
            Some(Reading::Number(percent)),
            format!("{percent}%"),
        )
    })
}

fn reservoir_field(units: f64) -> Field {
    Field::new("Reservoir", Some(Reading::Number(units)), format!("{units}U"))
}

/// Raise the aggregate to the highest field level; the first field reaching
/// that level supplies the title
fn aggregate(data: &mut RigData) {
    let mut level = Level::None;
    let mut title = None;
    for key in StatusField::ALL {
        if let Some(field) = data.field(key)
            && field.level > level
        {
            level = field.level;
            title = field.message.clone();
        }
    }
    data.level = level;
    if let Some(title) = title {
        data.title = title;
    }
}

fn build_message(data: &mut RigData) {
    if data.level == Level::None {
        return;
    }
    let mut lines = Vec::new();
    if let Some(battery) = &data.battery {
        lines.push(format!("Pump Battery: {}", battery.display));
    }
    if let Some(reservoir) = &data.reservoir {
        lines.push(format!("Pump Reservoir: {}", reservoir.display));
    }
    data.message = lines.join("\n");
}
