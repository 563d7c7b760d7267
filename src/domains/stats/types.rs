//! Report structures produced by the aggregation engine.
//!
//! Every struct here is ephemeral: built fresh per call, serialized by the
//! embedding layer, never stored. Field names serialize to the platform's
//! public JSON vocabulary (`totalDons`, `montantTotalCollecte`,
//! `tauxReussite`, `evolutionMontant`, ...), which is French; identifiers
//! inside the engine stay the crate's own.

use crate::domains::project::types::{Project, ProjectStatus};
use crate::domains::stats::profile::DonorLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tunable report parameters.
///
/// The thresholds are deliberate inputs rather than constants inside the
/// metric code; defaults mirror the platform's standard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Progress percentage from which an in-progress project counts as
    /// "near goal".
    pub near_goal_threshold: f64,
    /// Amount from which a validated donation counts as a large donation.
    pub large_donation_threshold: f64,
    /// Number of entries in dashboard leaderboards.
    pub leaderboard_size: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            near_goal_threshold: 90.0,
            large_donation_threshold: 1000.0,
            leaderboard_size: 5,
        }
    }
}

/// Largest validated donation of a donor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargestGift {
    pub montant: f64,
    pub date: NaiveDate,
}

/// Largest validated donation received by a project, with the donor label
/// already anonymized where the donation asks for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTopGift {
    pub montant: f64,
    pub date: NaiveDate,
    pub donateur: String,
}

/// One month of the trailing collection breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAmount {
    pub mois: String,
    pub montant: f64,
}

/// Compact project entry for leaderboards and "best project" slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHighlight {
    pub id: Uuid,
    pub titre: String,
    pub montant_collecte: f64,
    pub progres: f64,
}

impl ProjectHighlight {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id,
            titre: project.title.clone(),
            montant_collecte: project.collected_amount,
            progres: project.progress(),
        }
    }
}

/// Statistical profile of one donor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfile {
    pub nombre_dons: i64,
    pub nombre_dons_valides: i64,
    pub nombre_dons_en_attente: i64,
    pub montant_total_donne: f64,
    pub montant_moyen_par_don: f64,
    pub nombre_projets_soutenus: i64,
    pub nombre_associations_soutenues: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plus_gros_don: Option<LargestGift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premier_don: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dernier_don: Option<NaiveDate>,
    pub niveau: DonorLevel,
}

/// Statistical profile of one association.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationProfile {
    pub nombre_projets: i64,
    pub nombre_projets_en_cours: i64,
    pub nombre_projets_termines: i64,
    pub montant_total_collecte: f64,
    pub montant_total_demande: f64,
    pub taux_reussite: f64,
    pub nombre_dons: i64,
    pub nombre_donateurs: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meilleur_projet: Option<ProjectHighlight>,
}

/// Statistical profile of one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProfile {
    pub montant_demande: f64,
    pub montant_collecte: f64,
    pub progres: f64,
    pub montant_restant: f64,
    pub nombre_dons: i64,
    pub nombre_donateurs: i64,
    pub montant_moyen_par_don: f64,
    pub nombre_dons_avec_message: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pourcentage_temps_ecoule: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plus_gros_don: Option<ProjectTopGift>,
    pub collecte_par_mois: Vec<MonthlyAmount>,
}

/// Aggregates over one date window, compared against the immediately
/// preceding window of the same length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub debut: NaiveDate,
    pub fin: NaiveDate,
    pub nombre_dons: i64,
    pub montant_total: f64,
    pub nombre_transactions: i64,
    pub montant_transactions: f64,
    pub nouvelles_associations: i64,
    pub montant_periode_precedente: f64,
    pub evolution_montant: f64,
}

/// Financial block of the global dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTotals {
    pub montant_total_collecte: f64,
    pub montant_moyen_par_don: f64,
    pub frais_totaux: f64,
    pub taux_reussite_transactions: f64,
    pub nombre_gros_dons: i64,
}

/// Attention counters of the global dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCounts {
    pub projets_en_retard: i64,
    pub projets_proches_objectif: i64,
    pub associations_en_attente: i64,
    pub transactions_echouees: i64,
    pub dons_en_attente: i64,
}

/// Top-level platform dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDashboard {
    pub total_donateurs: i64,
    pub total_associations: i64,
    pub total_projets: i64,
    pub total_dons: i64,
    pub finances: FinancialTotals,
    pub derniers_trente_jours: PeriodSummary,
    pub alertes: AlertCounts,
    pub top_projets: Vec<ProjectHighlight>,
}

/// Calendar-month report: current month against the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub mois: PeriodSummary,
    pub mois_precedent: PeriodSummary,
    pub nouveaux_projets: i64,
    pub nouvelles_associations: i64,
}

/// Per-association report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationReport {
    pub id: Uuid,
    pub nom: String,
    pub profil: AssociationProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periode: Option<PeriodSummary>,
}

/// Per-donor report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorReport {
    pub id: Uuid,
    pub nom: String,
    pub profil: DonorProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periode: Option<PeriodSummary>,
}

/// Per-project report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub id: Uuid,
    pub titre: String,
    pub statut: ProjectStatus,
    pub profil: ProjectProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periode: Option<PeriodSummary>,
}

/// Donor leaderboard entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedDonor {
    pub id: Uuid,
    pub nom: String,
    pub montant_total: f64,
    pub nombre_dons: i64,
}

/// Association leaderboard entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedAssociation {
    pub id: Uuid,
    pub nom: String,
    pub montant_total_collecte: f64,
    pub nombre_projets: i64,
}
