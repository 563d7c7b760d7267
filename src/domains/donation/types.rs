use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Donation lifecycle status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Validated,
    Refused,
    Cancelled,
    Refunded,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Validated => "validated",
            DonationStatus::Refused => "refused",
            DonationStatus::Cancelled => "cancelled",
            DonationStatus::Refunded => "refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(DonationStatus::Pending),
            "validated" => Some(DonationStatus::Validated),
            "refused" => Some(DonationStatus::Refused),
            "cancelled" => Some(DonationStatus::Cancelled),
            "refunded" => Some(DonationStatus::Refunded),
            _ => None,
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["pending", "validated", "refused", "cancelled", "refunded"]
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A monetary contribution from a donor to a project.
///
/// Status transitions and the linked settlement transaction are owned by
/// external workflows; the engine only reads the current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    /// Always strictly positive.
    pub amount: f64,
    pub status: DonationStatus,
    pub date: NaiveDate,
    pub anonymous: bool,
    pub message: Option<String>,
    pub donor_id: Uuid,
    pub project_id: Uuid,
}

impl Donation {
    /// Whether this donation counts toward its project's collected amount.
    pub fn is_validated(&self) -> bool {
        self.status == DonationStatus::Validated
    }

    /// Whether the donation carries a non-blank message.
    pub fn has_message(&self) -> bool {
        self.message
            .as_deref()
            .map_or(false, |m| !m.trim().is_empty())
    }
}

/// Donation filtering capabilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonationFilter {
    /// Filter by lifecycle statuses
    pub statuses: Option<Vec<DonationStatus>>,
    /// Inclusive calendar-date range
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Filter by donors
    pub donor_ids: Option<Vec<Uuid>>,
    /// Filter by target projects
    pub project_ids: Option<Vec<Uuid>>,
    /// Filter by minimum amount
    pub min_amount: Option<f64>,
}

impl DonationFilter {
    /// Create a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statuses filter.
    pub fn with_statuses(mut self, statuses: Vec<DonationStatus>) -> Self {
        self.statuses = Some(statuses);
        self
    }

    /// Add inclusive date range filter.
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// Add donors filter.
    pub fn with_donor_ids(mut self, donor_ids: Vec<Uuid>) -> Self {
        self.donor_ids = Some(donor_ids);
        self
    }

    /// Add projects filter.
    pub fn with_project_ids(mut self, project_ids: Vec<Uuid>) -> Self {
        self.project_ids = Some(project_ids);
        self
    }

    /// Add minimum amount filter.
    pub fn with_min_amount(mut self, min_amount: f64) -> Self {
        self.min_amount = Some(min_amount);
        self
    }

    /// Whether a donation satisfies every set criterion.
    pub fn matches(&self, donation: &Donation) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&donation.status) {
                return false;
            }
        }
        if let Some((start, end)) = self.date_range {
            if donation.date < start || donation.date > end {
                return false;
            }
        }
        if let Some(donor_ids) = &self.donor_ids {
            if !donor_ids.contains(&donation.donor_id) {
                return false;
            }
        }
        if let Some(project_ids) = &self.project_ids {
            if !project_ids.contains(&donation.project_id) {
                return false;
            }
        }
        if let Some(min_amount) = self.min_amount {
            if donation.amount < min_amount {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation(amount: f64, status: DonationStatus, date: NaiveDate) -> Donation {
        Donation {
            id: Uuid::new_v4(),
            amount,
            status,
            date,
            anonymous: false,
            message: None,
            donor_id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_round_trip() {
        for name in DonationStatus::all_variants() {
            let status = DonationStatus::from_str(name).unwrap();
            assert_eq!(status.as_str(), name);
        }
        assert!(DonationStatus::from_str("unknown").is_none());
    }

    #[test]
    fn test_has_message_ignores_blank_text() {
        let mut d = donation(10.0, DonationStatus::Validated, day(2024, 3, 1));
        assert!(!d.has_message());
        d.message = Some("   ".to_string());
        assert!(!d.has_message());
        d.message = Some("Bravo pour ce projet".to_string());
        assert!(d.has_message());
    }

    #[test]
    fn test_filter_date_range_is_inclusive() {
        let filter = DonationFilter::new().with_date_range(day(2024, 1, 1), day(2024, 1, 31));
        assert!(filter.matches(&donation(5.0, DonationStatus::Pending, day(2024, 1, 1))));
        assert!(filter.matches(&donation(5.0, DonationStatus::Pending, day(2024, 1, 31))));
        assert!(!filter.matches(&donation(5.0, DonationStatus::Pending, day(2024, 2, 1))));
        assert!(!filter.matches(&donation(5.0, DonationStatus::Pending, day(2023, 12, 31))));
    }

    #[test]
    fn test_filter_combines_criteria() {
        let d = donation(250.0, DonationStatus::Validated, day(2024, 6, 15));
        let filter = DonationFilter::new()
            .with_statuses(vec![DonationStatus::Validated])
            .with_donor_ids(vec![d.donor_id])
            .with_min_amount(100.0);
        assert!(filter.matches(&d));

        let too_small = DonationFilter::new().with_min_amount(500.0);
        assert!(!too_small.matches(&d));

        let wrong_status = DonationFilter::new().with_statuses(vec![DonationStatus::Refunded]);
        assert!(!wrong_status.matches(&d));
    }
}
