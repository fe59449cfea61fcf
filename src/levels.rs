//! Severity levels shared by the derived fields, notifications and pill class

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered alert severity: `None < Warn < Urgent`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    #[default]
    None,
    Warn,
    Urgent,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Warn => "WARN",
            Self::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
