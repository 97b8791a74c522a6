use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency attached to a stored case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("urgency must be one of low, medium, high (got '{}')", other)),
        }
    }
}

/// Urgency for a seeded sample/demo case: high when it mentions an emergency
pub fn seed_urgency(case: &str) -> Urgency {
    if case.to_lowercase().contains("emergency") {
        Urgency::High
    } else {
        Urgency::Medium
    }
}
