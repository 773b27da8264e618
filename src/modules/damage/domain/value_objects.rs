/// Value objects for damage reports
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageStatus {
    Pending,
    Resolved,
}

impl DamageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageStatus::Pending => "pending",
            DamageStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for DamageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DamageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(DamageStatus::Pending),
            "resolved" => Ok(DamageStatus::Resolved),
            _ => Err(format!("Invalid damage status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse() {
        assert_eq!("low".parse::<Severity>().unwrap(), Severity::Low);
        assert_eq!(" High ".parse::<Severity>().unwrap(), Severity::High);
        assert!("critical".parse::<Severity>().is_err());
        assert!("".parse::<Severity>().is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DamageStatus::Pending.to_string(), "pending");
        assert_eq!(
            "resolved".parse::<DamageStatus>().unwrap(),
            DamageStatus::Resolved
        );
    }
}
