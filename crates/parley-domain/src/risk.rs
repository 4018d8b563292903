//! Risk levels for enforceability and business exposure

use serde::{Deserialize, Serialize};

/// Coarse risk level, ordered from `Low` to `High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Moderate risk
    Moderate,
    /// High risk
    High,
}

impl RiskLevel {
    /// Every level in ascending order
    pub const ALL: &'static [RiskLevel] = &[RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    /// Parse a level, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "moderate" => Some(RiskLevel::Moderate),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }

    /// The closed set of machine values, for diagnostics
    pub fn allowed_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|r| r.as_str()).collect()
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid risk level: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(RiskLevel::parse("Moderate"), Some(RiskLevel::Moderate));
        assert_eq!(RiskLevel::parse("very_high"), None);
        assert!("extreme".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
    }
}
