use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub const PERIODICITY_DAILY: &str = "daily";
pub const PERIODICITY_WEEKLY: &str = "weekly";

/// Cadence of a habit and its goal.
///
/// Stored explicitly on the habit; never inferred from a goal's target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    Daily,
    Weekly,
}

impl Periodicity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Daily => PERIODICITY_DAILY,
            Periodicity::Weekly => PERIODICITY_WEEKLY,
        }
    }

    /// Amount added to a goal's current value per completion.
    pub fn increment(&self) -> f64 {
        match self {
            Periodicity::Daily => 1.0,
            Periodicity::Weekly => 7.0,
        }
    }

    /// Target used when a goal is created without an explicit one.
    pub fn default_target(&self) -> f64 {
        self.increment()
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            PERIODICITY_DAILY => Ok(Periodicity::Daily),
            PERIODICITY_WEEKLY => Ok(Periodicity::Weekly),
            _ => Err(Error::Configuration(format!("Unknown periodicity: {}", s))),
        }
    }
}
