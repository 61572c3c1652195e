//! Badges derived from a record's headcount.

use std::fmt;

use serde::Serialize;

use crate::Record;

/// Headcount band shown as a trend indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthTrend {
    Growing,
    Stable,
    Declining,
}

impl GrowthTrend {
    /// More than 800 employees is growing, more than 400 is stable.
    pub const fn for_employees(employees: u64) -> Self {
        if employees > 800 {
            Self::Growing
        } else if employees > 400 {
            Self::Stable
        } else {
            Self::Declining
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Growing => "growing",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }
}

impl fmt::Display for GrowthTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status badge on a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Verified,
    Hiring,
}

impl CompanyStatus {
    /// Badges for a headcount, in display order. Every company is active.
    pub fn for_employees(employees: u64) -> Vec<Self> {
        let mut statuses = vec![Self::Active];
        if employees > 500 {
            statuses.push(Self::Verified);
        }
        if employees > 300 && employees < 600 {
            statuses.push(Self::Hiring);
        }
        statuses
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Verified => "verified",
            Self::Hiring => "hiring",
        }
    }
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Record {
    pub fn growth_trend(&self) -> GrowthTrend {
        GrowthTrend::for_employees(self.employees)
    }

    pub fn statuses(&self) -> Vec<CompanyStatus> {
        CompanyStatus::for_employees(self.employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CompanyStatus::{Active, Hiring, Verified};

    #[test]
    fn trend_bands() {
        assert_eq!(GrowthTrend::for_employees(0), GrowthTrend::Declining);
        assert_eq!(GrowthTrend::for_employees(400), GrowthTrend::Declining);
        assert_eq!(GrowthTrend::for_employees(401), GrowthTrend::Stable);
        assert_eq!(GrowthTrend::for_employees(800), GrowthTrend::Stable);
        assert_eq!(GrowthTrend::for_employees(801), GrowthTrend::Growing);
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(CompanyStatus::for_employees(300), [Active]);
        assert_eq!(CompanyStatus::for_employees(301), [Active, Hiring]);
        assert_eq!(CompanyStatus::for_employees(500), [Active, Hiring]);
        assert_eq!(CompanyStatus::for_employees(501), [Active, Verified, Hiring]);
        assert_eq!(CompanyStatus::for_employees(599), [Active, Verified, Hiring]);
        assert_eq!(CompanyStatus::for_employees(600), [Active, Verified]);
    }

    #[test]
    fn record_badges_follow_headcount() {
        let record: Record = serde_json::from_str(
            r#"{"id": 1, "name": "Acme", "location": "Berlin", "industry": "Retail",
                "employees": 850, "founded": 1990}"#,
        )
        .unwrap();
        assert_eq!(record.growth_trend(), GrowthTrend::Growing);
        assert_eq!(record.statuses(), [Active, Verified]);
        assert_eq!(GrowthTrend::Stable.to_string(), "stable");
    }
}
