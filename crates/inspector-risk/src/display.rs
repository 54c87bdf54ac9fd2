//! Presentation helpers layered on top of raw scores and snapshot fields.

use std::fmt;

use serde::{Serialize, Serializer};

/// Coarse band for a 0..=100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=19 => Self::VeryLow,
            20..=39 => Self::Low,
            40..=59 => Self::Medium,
            60..=79 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "VERY LOW",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::VeryHigh => "VERY HIGH",
        }
    }

    /// Hex color used by the UI badge.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::VeryLow => "#22c55e",
            Self::Low => "#84cc16",
            Self::Medium => "#f59e0b",
            Self::High => "#ef4444",
            Self::VeryHigh => "#dc2626",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RiskLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// How established a seller looks from tenure and sales alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerTrust {
    VeryTrustworthy,
    Trustworthy,
    ModeratelyTrustworthy,
    NewUnestablished,
    Unknown,
}

impl SellerTrust {
    /// A missing input never satisfies a threshold; both missing is
    /// [`SellerTrust::Unknown`].
    #[must_use]
    pub fn assess(seller_age_months: Option<u32>, sales_count: Option<u64>) -> Self {
        if seller_age_months.is_none() && sales_count.is_none() {
            return Self::Unknown;
        }
        let age = |min: u32| seller_age_months.is_some_and(|m| m >= min);
        let sales = |min: u64| sales_count.is_some_and(|s| s >= min);

        if age(24) && sales(1000) {
            Self::VeryTrustworthy
        } else if age(12) && sales(100) {
            Self::Trustworthy
        } else if age(6) || sales(50) {
            Self::ModeratelyTrustworthy
        } else {
            Self::NewUnestablished
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryTrustworthy => "Very Trustworthy",
            Self::Trustworthy => "Trustworthy",
            Self::ModeratelyTrustworthy => "Moderately Trustworthy",
            Self::NewUnestablished => "New/Unestablished",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::VeryTrustworthy => "#22c55e",
            Self::Trustworthy => "#84cc16",
            Self::ModeratelyTrustworthy => "#f59e0b",
            Self::NewUnestablished => "#ef4444",
            Self::Unknown => "#666666",
        }
    }
}

impl fmt::Display for SellerTrust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SellerTrust {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Renders month tenure as `"X years Y months"`, or `"Unknown"`.
#[must_use]
pub fn format_tenure(seller_age_months: Option<u32>) -> String {
    match seller_age_months {
        Some(months) => format!("{} years {} months", months / 12, months % 12),
        None => "Unknown".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_band_edges() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::VeryLow);
        assert_eq!(RiskLevel::from_score(19), RiskLevel::VeryLow);
        assert_eq!(RiskLevel::from_score(20), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::VeryHigh);
    }

    #[test]
    fn risk_level_serializes_as_label() {
        let json = serde_json::to_value(RiskLevel::VeryHigh).unwrap();
        assert_eq!(json, "VERY HIGH");
        assert_eq!(RiskLevel::Medium.color(), "#f59e0b");
    }

    #[test]
    fn seller_trust_bands() {
        assert_eq!(
            SellerTrust::assess(Some(36), Some(5000)),
            SellerTrust::VeryTrustworthy
        );
        assert_eq!(
            SellerTrust::assess(Some(12), Some(100)),
            SellerTrust::Trustworthy
        );
        assert_eq!(
            SellerTrust::assess(Some(2), Some(60)),
            SellerTrust::ModeratelyTrustworthy
        );
        assert_eq!(
            SellerTrust::assess(Some(3), Some(10)),
            SellerTrust::NewUnestablished
        );
    }

    #[test]
    fn seller_trust_with_missing_inputs() {
        assert_eq!(SellerTrust::assess(None, None), SellerTrust::Unknown);
        assert_eq!(
            SellerTrust::assess(Some(48), None),
            SellerTrust::ModeratelyTrustworthy
        );
        assert_eq!(
            SellerTrust::assess(None, Some(10)),
            SellerTrust::NewUnestablished
        );
    }

    #[test]
    fn tenure_is_rendered_in_years_and_months() {
        assert_eq!(format_tenure(Some(30)), "2 years 6 months");
        assert_eq!(format_tenure(Some(5)), "0 years 5 months");
        assert_eq!(format_tenure(None), "Unknown");
    }
}
