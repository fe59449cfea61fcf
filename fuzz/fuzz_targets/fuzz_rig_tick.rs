#![no_main]
use libfuzzer_sys::fuzz_target;
use rigpill::devicestatus::DeviceStatus;
use rigpill::{MemorySandbox, RigPlugin};

fuzz_target!(|data: &[u8]| {
    // Interpret the input as a JSON array of device status reports
    let Ok(reports) = serde_json::from_slice::<Vec<DeviceStatus>>(data) else {
        return;
    };

    // Every hook must degrade gracefully on arbitrary reports
    let mut sbx = MemorySandbox::new(1_700_000_000_000, reports)
        .with_setting("enableAlerts", true);
    RigPlugin::new().tick(&mut sbx);
});
