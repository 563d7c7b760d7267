use crate::domains::stats::metrics::{round2, safe_ratio};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Project lifecycle status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Completed,
    Cancelled,
    Suspended,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::Suspended => "suspended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(ProjectStatus::Draft),
            "in_progress" => Some(ProjectStatus::InProgress),
            "completed" => Some(ProjectStatus::Completed),
            "cancelled" => Some(ProjectStatus::Cancelled),
            "suspended" => Some(ProjectStatus::Suspended),
            _ => None,
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["draft", "in_progress", "completed", "cancelled", "suspended"]
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fundraising project run by an association.
///
/// `collected_amount` and `status` are maintained by the donation
/// confirmation workflow; the engine never recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    /// Always strictly positive.
    pub requested_amount: f64,
    /// Non-negative, bounded by the validated donation total.
    pub collected_amount: f64,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub association_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Progress toward the requested amount, as a percentage rounded to
    /// 2 decimal places. Zero when the requested amount is not positive.
    pub fn progress(&self) -> f64 {
        round2(safe_ratio(self.collected_amount, self.requested_amount))
    }

    /// Amount still missing, floored at zero once the goal is exceeded.
    pub fn remaining_amount(&self) -> f64 {
        (self.requested_amount - self.collected_amount).max(0.0)
    }

    /// An in-progress project whose end date has passed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == ProjectStatus::InProgress
            && self.end_date.map_or(false, |end| end < today)
    }

    /// An in-progress project at or beyond the given progress threshold.
    pub fn is_near_goal(&self, threshold_pct: f64) -> bool {
        self.status == ProjectStatus::InProgress && self.progress() >= threshold_pct
    }
}

/// Project filtering capabilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFilter {
    /// Filter by lifecycle statuses
    pub statuses: Option<Vec<ProjectStatus>>,
    /// Filter by owning associations
    pub association_ids: Option<Vec<Uuid>>,
    /// Inclusive creation-date range
    pub created_range: Option<(NaiveDate, NaiveDate)>,
    /// Keep only projects overdue as of this date
    pub overdue_as_of: Option<NaiveDate>,
    /// Keep only in-progress projects at or beyond this progress percentage
    pub near_goal_threshold: Option<f64>,
}

impl ProjectFilter {
    /// Create a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statuses filter.
    pub fn with_statuses(mut self, statuses: Vec<ProjectStatus>) -> Self {
        self.statuses = Some(statuses);
        self
    }

    /// Add owning associations filter.
    pub fn with_association_ids(mut self, association_ids: Vec<Uuid>) -> Self {
        self.association_ids = Some(association_ids);
        self
    }

    /// Add inclusive creation-date range filter.
    pub fn with_created_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.created_range = Some((start, end));
        self
    }

    /// Keep only projects overdue as of the given date.
    pub fn overdue_as_of(mut self, today: NaiveDate) -> Self {
        self.overdue_as_of = Some(today);
        self
    }

    /// Keep only in-progress projects at or beyond the threshold.
    pub fn near_goal(mut self, threshold_pct: f64) -> Self {
        self.near_goal_threshold = Some(threshold_pct);
        self
    }

    /// Whether a project satisfies every set criterion.
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&project.status) {
                return false;
            }
        }
        if let Some(association_ids) = &self.association_ids {
            if !association_ids.contains(&project.association_id) {
                return false;
            }
        }
        if let Some((start, end)) = self.created_range {
            let created = project.created_at.date_naive();
            if created < start || created > end {
                return false;
            }
        }
        if let Some(today) = self.overdue_as_of {
            if !project.is_overdue(today) {
                return false;
            }
        }
        if let Some(threshold) = self.near_goal_threshold {
            if !project.is_near_goal(threshold) {
                return false;
            }
        }
        true
    }
}
