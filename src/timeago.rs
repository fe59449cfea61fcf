//! Relative time formatting ("5m ago")

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Clock skew tolerated before a timestamp is reported as being in the future
const FUTURE_TOLERANCE_MS: i64 = 5 * MINUTE_MS;

/// Magnitude and unit of an elapsed interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAgoDisplay {
    pub value: Option<i64>,
    pub short_label: String,
}

/// Converts a timestamp relative to `now` into a value/unit pair.
///
/// Hosts that already have their own formatter can plug it in here;
/// [`DefaultTimeAgo`] covers the usual minute/hour/day buckets.
pub trait TimeAgo {
    fn calc_display(&self, mills: i64, now: i64) -> TimeAgoDisplay;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTimeAgo;

impl TimeAgo for DefaultTimeAgo {
    fn calc_display(&self, mills: i64, now: i64) -> TimeAgoDisplay {
        let delta = now.saturating_sub(mills);
        let (value, short_label) = if delta < -FUTURE_TOLERANCE_MS {
            (None, "in the future")
        } else if delta < MINUTE_MS {
            (None, "now")
        } else if delta < HOUR_MS {
            (Some(delta / MINUTE_MS), "m")
        } else if delta < 2 * DAY_MS {
            (Some(delta / HOUR_MS), "h")
        } else {
            (Some(delta / DAY_MS), "d")
        };
        TimeAgoDisplay {
            value,
            short_label: short_label.to_string(),
        }
    }
}

/// "5m ago", "now", "in the future"
pub fn format_ago(time_ago: &dyn TimeAgo, mills: i64, now: i64) -> String {
    let ago = time_ago.calc_display(mills, now);
    let value = ago.value.map(|v| v.to_string()).unwrap_or_default();
    let suffix = if ago.short_label.chars().count() == 1 {
        " ago"
    } else {
        ""
    };
    format!("{value}{}{suffix}", ago.short_label)
}

/// Like [`format_ago`] but yields "unknown" when there is no timestamp
pub fn format_time(time_ago: &dyn TimeAgo, when: Option<i64>, now: i64) -> String {
    match when {
        Some(mills) => format_ago(time_ago, mills, now),
        None => "unknown".to_string(),
    }
}
