use serde::{Deserialize, Serialize};

/// Bounded heuristic summary of fraud and manipulation signals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// Always within `0..=100`.
    pub risk_score: u8,
    /// Findings in rule-evaluation order.
    pub signals: Vec<String>,
}

impl RiskReport {
    /// Builds a report from accumulated rule points, clamping into `0..=100`.
    #[must_use]
    pub fn from_points(points: u32, signals: Vec<String>) -> Self {
        let risk_score = u8::try_from(points.min(100)).unwrap_or(100);
        Self {
            risk_score,
            signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_clamps_to_hundred() {
        assert_eq!(RiskReport::from_points(250, Vec::new()).risk_score, 100);
        assert_eq!(RiskReport::from_points(0, Vec::new()).risk_score, 0);
        assert_eq!(RiskReport::from_points(37, Vec::new()).risk_score, 37);
    }

    #[test]
    fn serializes_risk_score_in_camel_case() {
        let json = serde_json::to_value(RiskReport::from_points(12, vec!["x".into()])).unwrap();
        assert_eq!(json["riskScore"], 12);
        assert_eq!(json["signals"][0], "x");
    }
}
