use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Settlement transaction status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Succeeded,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Succeeded => "succeeded",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(TransactionStatus::Pending),
            "succeeded" => Some(TransactionStatus::Succeeded),
            "failed" => Some(TransactionStatus::Failed),
            "cancelled" => Some(TransactionStatus::Cancelled),
            _ => None,
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["pending", "succeeded", "failed", "cancelled"]
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A settlement transaction, linked one-to-one to a donation.
///
/// Owned by the payment workflow; the engine only reads it for financial
/// and success-rate figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub fee: f64,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    pub donation_id: Uuid,
}

impl Transaction {
    /// Amount after the processor fee.
    pub fn net_amount(&self) -> f64 {
        self.amount - self.fee
    }
}

/// Transaction filtering capabilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Filter by settlement statuses
    pub statuses: Option<Vec<TransactionStatus>>,
    /// Half-open `[start, end)` timestamp range
    pub timestamp_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl TransactionFilter {
    /// Create a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statuses filter.
    pub fn with_statuses(mut self, statuses: Vec<TransactionStatus>) -> Self {
        self.statuses = Some(statuses);
        self
    }

    /// Add half-open `[start, end)` timestamp range filter.
    pub fn with_timestamp_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.timestamp_range = Some((start, end));
        self
    }

    /// Whether a transaction satisfies every set criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&transaction.status) {
                return false;
            }
        }
        if let Some((start, end)) = self.timestamp_range {
            if transaction.timestamp < start || transaction.timestamp >= end {
                return false;
            }
        }
        true
    }
}
