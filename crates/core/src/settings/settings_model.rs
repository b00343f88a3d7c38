use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub const SETTING_COMPLETION_GATING: &str = "completion_gating";

/// Whether the tick window blocks completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionGating {
    /// Completions are always accepted; the window only decides the streak.
    #[default]
    Permissive,
    /// Too-early completions are rejected; lapsed goals restart from zero.
    Enforced,
}

impl CompletionGating {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionGating::Permissive => "permissive",
            CompletionGating::Enforced => "enforced",
        }
    }
}

impl fmt::Display for CompletionGating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionGating {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(CompletionGating::Permissive),
            "enforced" => Ok(CompletionGating::Enforced),
            _ => Err(Error::Configuration(format!(
                "Unknown completion gating: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSettings {
    pub completion_gating: CompletionGating,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub completion_gating: Option<CompletionGating>,
}
