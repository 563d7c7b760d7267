use crate::domains::association::repository::AssociationRepository;
use crate::domains::association::types::AssociationFilter;
use crate::domains::donation::repository::DonationRepository;
use crate::domains::donation::types::{Donation, DonationFilter, DonationStatus};
use crate::domains::project::repository::ProjectRepository;
use crate::domains::project::types::ProjectFilter;
use crate::domains::stats::metrics::{
    count_by, evolution_percent, round2, safe_average, safe_ratio, sum_by,
};
use crate::domains::stats::period::PeriodWindow;
use crate::domains::stats::profile::{
    association_profile, donor_profile, project_profile, ANONYMOUS_DONOR_LABEL,
};
use crate::domains::stats::ranking::select_top_n;
use crate::domains::stats::types::{
    AlertCounts, AssociationReport, DonorReport, FinancialTotals, GlobalDashboard,
    MonthlyReport, PeriodSummary, ProjectHighlight, ProjectReport, RankedAssociation,
    RankedDonor, StatsConfig,
};
use crate::domains::transaction::repository::TransactionRepository;
use crate::domains::transaction::types::{TransactionFilter, TransactionStatus};
use crate::domains::user::repository::UserDirectory;
use crate::domains::user::types::UserRole;
use crate::errors::{DomainResult, ServiceResult};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Trait defining the reporting operations of the aggregation engine.
///
/// Every operation re-derives its result from fresh collaborator queries;
/// nothing is cached and no input is mutated, so concurrent calls need no
/// coordination.
pub trait StatisticsService: Send + Sync {
    /// Top-level platform dashboard: general counts, financial totals,
    /// 30-day activity and attention counters.
    fn global_dashboard(&self) -> ServiceResult<GlobalDashboard>;

    /// Current calendar month against the previous one.
    fn monthly_report(&self) -> ServiceResult<MonthlyReport>;

    /// Aggregates over an arbitrary window, compared against the
    /// immediately preceding window of the same length.
    fn period_summary(&self, window: PeriodWindow) -> ServiceResult<PeriodSummary>;

    /// Full statistical report for one association.
    fn association_report(
        &self,
        id: Uuid,
        window: Option<PeriodWindow>,
    ) -> ServiceResult<AssociationReport>;

    /// Full statistical report for one donor.
    fn donor_report(&self, id: Uuid, window: Option<PeriodWindow>)
        -> ServiceResult<DonorReport>;

    /// Full statistical report for one project.
    fn project_report(
        &self,
        id: Uuid,
        window: Option<PeriodWindow>,
    ) -> ServiceResult<ProjectReport>;

    /// Projects ranked by collected amount, best first.
    fn top_projects(&self, n: usize) -> ServiceResult<Vec<ProjectHighlight>>;

    /// Donors ranked by validated amount sum, best first.
    fn top_donors(&self, n: usize) -> ServiceResult<Vec<RankedDonor>>;

    /// Validated associations ranked by collected amount, best first.
    fn top_associations(&self, n: usize) -> ServiceResult<Vec<RankedAssociation>>;
}

/// Aggregate totals of one window, before any period-over-period
/// comparison is derived. Deliberately carries no evolution field: the
/// previous window contributes its amount sum and nothing else, which
/// keeps the comparison chain at depth one.
struct PeriodTotals {
    donation_count: i64,
    validated_amount: f64,
    transaction_count: i64,
    succeeded_amount: f64,
    new_association_count: i64,
}

pub struct StatisticsServiceImpl {
    donation_repo: Arc<dyn DonationRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    association_repo: Arc<dyn AssociationRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
    user_directory: Arc<dyn UserDirectory>,
    config: StatsConfig,
}

impl StatisticsServiceImpl {
    pub fn new(
        donation_repo: Arc<dyn DonationRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        association_repo: Arc<dyn AssociationRepository>,
        transaction_repo: Arc<dyn TransactionRepository>,
        user_directory: Arc<dyn UserDirectory>,
        config: StatsConfig,
    ) -> Self {
        Self {
            donation_repo,
            project_repo,
            association_repo,
            transaction_repo,
            user_directory,
            config,
        }
    }

    /// Raw aggregates of one window. Donations filter on calendar date,
    /// transactions on the half-open timestamp range covering the same
    /// days, associations on their validation instant from the window
    /// start onward.
    fn window_totals(&self, window: &PeriodWindow) -> DomainResult<PeriodTotals> {
        let donations = self
            .donation_repo
            .list(&DonationFilter::new().with_date_range(window.start, window.end))?;

        let (ts_start, ts_end) = window.timestamp_range();
        let transactions = self
            .transaction_repo
            .list(&TransactionFilter::new().with_timestamp_range(ts_start, ts_end))?;

        let new_associations = self.association_repo.list(
            &AssociationFilter::new()
                .with_validated(true)
                .with_validated_since(ts_start),
        )?;

        Ok(PeriodTotals {
            donation_count: donations.len() as i64,
            validated_amount: sum_by(&donations, Donation::is_validated, |d| d.amount),
            transaction_count: transactions.len() as i64,
            succeeded_amount: sum_by(
                &transactions,
                |t| t.status == TransactionStatus::Succeeded,
                |t| t.amount,
            ),
            new_association_count: new_associations.len() as i64,
        })
    }
}

impl StatisticsService for StatisticsServiceImpl {
    fn global_dashboard(&self) -> ServiceResult<GlobalDashboard> {
        let today = Utc::now().date_naive();
        log::debug!("Building global dashboard as of {}", today);

        // 1. General counts over the unfiltered collections
        let total_donateurs = self.user_directory.count_by_role(UserRole::Donor)?;
        let associations = self
            .association_repo
            .list(&AssociationFilter::new().with_validated(true))?;
        let projects = self.project_repo.list(&ProjectFilter::new())?;
        let donations = self.donation_repo.list(&DonationFilter::new())?;
        let transactions = self.transaction_repo.list(&TransactionFilter::new())?;

        // 2. Financial totals
        let montant_total_collecte = sum_by(&donations, Donation::is_validated, |d| d.amount);
        let nombre_dons_valides = count_by(&donations, Donation::is_validated);
        let succeeded_count = count_by(&transactions, |t| {
            t.status == TransactionStatus::Succeeded
        });
        let gros_dons = self.donation_repo.list(
            &DonationFilter::new()
                .with_statuses(vec![DonationStatus::Validated])
                .with_min_amount(self.config.large_donation_threshold),
        )?;
        let finances = FinancialTotals {
            montant_total_collecte,
            montant_moyen_par_don: safe_average(montant_total_collecte, nombre_dons_valides),
            frais_totaux: sum_by(
                &transactions,
                |t| t.status == TransactionStatus::Succeeded,
                |t| t.fee,
            ),
            taux_reussite_transactions: round2(safe_ratio(
                succeeded_count as f64,
                transactions.len() as f64,
            )),
            nombre_gros_dons: gros_dons.len() as i64,
        };

        // 3. Activity over the trailing 30 days
        let derniers_trente_jours = self.period_summary(PeriodWindow::last_days(today, 30))?;

        // 4. Attention counters
        let overdue = self
            .project_repo
            .list(&ProjectFilter::new().overdue_as_of(today))?;
        let near_goal = self
            .project_repo
            .list(&ProjectFilter::new().near_goal(self.config.near_goal_threshold))?;
        let pending_associations = self
            .association_repo
            .list(&AssociationFilter::new().with_validated(false))?;
        let alertes = AlertCounts {
            projets_en_retard: overdue.len() as i64,
            projets_proches_objectif: near_goal.len() as i64,
            associations_en_attente: pending_associations.len() as i64,
            transactions_echouees: count_by(&transactions, |t| {
                t.status == TransactionStatus::Failed
            }),
            dons_en_attente: count_by(&donations, |d| d.status == DonationStatus::Pending),
        };

        // 5. Leaderboard
        let top_projets = select_top_n(projects.clone(), self.config.leaderboard_size, |p| {
            p.collected_amount
        })
        .iter()
        .map(ProjectHighlight::from_project)
        .collect();

        Ok(GlobalDashboard {
            total_donateurs,
            total_associations: associations.len() as i64,
            total_projets: projects.len() as i64,
            total_dons: donations.len() as i64,
            finances,
            derniers_trente_jours,
            alertes,
            top_projets,
        })
    }

    fn monthly_report(&self) -> ServiceResult<MonthlyReport> {
        let today = Utc::now().date_naive();
        let current = PeriodWindow::month_of(today);
        let previous = PeriodWindow::previous_calendar_month(today);
        log::debug!(
            "Building monthly report for {} .. {}",
            current.start,
            current.end
        );

        // 1. Period aggregates for both calendar months
        let mois = self.period_summary(current)?;
        let mois_precedent = self.period_summary(previous)?;

        // 2. Entities appearing during the current month
        let nouveaux_projets = self
            .project_repo
            .list(&ProjectFilter::new().with_created_range(current.start, current.end))?
            .len() as i64;

        let (month_start, month_end_exclusive) = current.timestamp_range();
        let validated_since = self.association_repo.list(
            &AssociationFilter::new()
                .with_validated(true)
                .with_validated_since(month_start),
        )?;
        let nouvelles_associations = validated_since
            .iter()
            .filter(|a| a.validated_at.map_or(false, |at| at < month_end_exclusive))
            .count() as i64;

        Ok(MonthlyReport {
            mois,
            mois_precedent,
            nouveaux_projets,
            nouvelles_associations,
        })
    }

    fn period_summary(&self, window: PeriodWindow) -> ServiceResult<PeriodSummary> {
        // Current window first, then one plain pass over the preceding
        // window of the same length. Only the amount sum of the previous
        // totals is read, never a derived comparison.
        let current = self.window_totals(&window)?;
        let previous = self.window_totals(&window.previous())?;

        Ok(PeriodSummary {
            debut: window.start,
            fin: window.end,
            nombre_dons: current.donation_count,
            montant_total: current.validated_amount,
            nombre_transactions: current.transaction_count,
            montant_transactions: current.succeeded_amount,
            nouvelles_associations: current.new_association_count,
            montant_periode_precedente: previous.validated_amount,
            evolution_montant: evolution_percent(
                current.validated_amount,
                previous.validated_amount,
            ),
        })
    }

    fn association_report(
        &self,
        id: Uuid,
        window: Option<PeriodWindow>,
    ) -> ServiceResult<AssociationReport> {
        // 1. The association must exist; unknown ids propagate as not-found.
        let association = self.association_repo.find_by_id(id)?;

        // 2. Related collections
        let projects = self
            .project_repo
            .list(&ProjectFilter::new().with_association_ids(vec![id]))?;
        let project_ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();
        let donations = if project_ids.is_empty() {
            Vec::new()
        } else {
            self.donation_repo
                .list(&DonationFilter::new().with_project_ids(project_ids))?
        };

        // 3. Profile, plus window aggregates when the caller asked for them
        let periode = match window {
            Some(w) => Some(self.period_summary(w)?),
            None => None,
        };

        Ok(AssociationReport {
            id: association.id,
            nom: association.name,
            profil: association_profile(&projects, &donations),
            periode,
        })
    }

    fn donor_report(
        &self,
        id: Uuid,
        window: Option<PeriodWindow>,
    ) -> ServiceResult<DonorReport> {
        // 1. The donor must exist; unknown ids propagate as not-found.
        let donor = self.user_directory.find_donor(id)?;

        // 2. The donor's donations, and the project list to resolve which
        //    associations those donations reached
        let donations = self
            .donation_repo
            .list(&DonationFilter::new().with_donor_ids(vec![id]))?;
        let projects = self.project_repo.list(&ProjectFilter::new())?;

        let periode = match window {
            Some(w) => Some(self.period_summary(w)?),
            None => None,
        };

        Ok(DonorReport {
            id: donor.id,
            nom: donor.display_name,
            profil: donor_profile(&donations, &projects),
            periode,
        })
    }

    fn project_report(
        &self,
        id: Uuid,
        window: Option<PeriodWindow>,
    ) -> ServiceResult<ProjectReport> {
        // 1. The project must exist; unknown ids propagate as not-found.
        let project = self.project_repo.find_by_id(id)?;

        // 2. The project's donations and the donor names labeling them
        let donations = self
            .donation_repo
            .list(&DonationFilter::new().with_project_ids(vec![id]))?;
        let mut donor_ids: Vec<Uuid> = donations.iter().map(|d| d.donor_id).collect();
        donor_ids.sort();
        donor_ids.dedup();
        let donor_names = self.user_directory.donor_display_names(&donor_ids)?;

        let periode = match window {
            Some(w) => Some(self.period_summary(w)?),
            None => None,
        };

        let today = Utc::now().date_naive();
        Ok(ProjectReport {
            id: project.id,
            titre: project.title.clone(),
            statut: project.status,
            profil: project_profile(&project, &donations, &donor_names, today),
            periode,
        })
    }

    fn top_projects(&self, n: usize) -> ServiceResult<Vec<ProjectHighlight>> {
        let projects = self.project_repo.list(&ProjectFilter::new())?;
        Ok(select_top_n(projects, n, |p| p.collected_amount)
            .iter()
            .map(ProjectHighlight::from_project)
            .collect())
    }

    fn top_donors(&self, n: usize) -> ServiceResult<Vec<RankedDonor>> {
        let donations = self
            .donation_repo
            .list(&DonationFilter::new().with_statuses(vec![DonationStatus::Validated]))?;

        // Aggregate per donor in first-appearance order so equal totals
        // keep a stable rank.
        struct DonorTally {
            amount: f64,
            count: i64,
            all_anonymous: bool,
        }
        let mut order: Vec<Uuid> = Vec::new();
        let mut tallies: HashMap<Uuid, DonorTally> = HashMap::new();
        for donation in &donations {
            let tally = tallies.entry(donation.donor_id).or_insert_with(|| {
                order.push(donation.donor_id);
                DonorTally {
                    amount: 0.0,
                    count: 0,
                    all_anonymous: true,
                }
            });
            tally.amount += donation.amount;
            tally.count += 1;
            tally.all_anonymous &= donation.anonymous;
        }

        let names = self.user_directory.donor_display_names(&order)?;
        let entries: Vec<RankedDonor> = order
            .iter()
            .map(|id| {
                let tally = &tallies[id];
                // A donor who only ever gave anonymously stays unnamed on
                // the leaderboard, whatever the directory knows.
                let nom = if tally.all_anonymous {
                    ANONYMOUS_DONOR_LABEL.to_string()
                } else {
                    names
                        .get(id)
                        .cloned()
                        .unwrap_or_else(|| ANONYMOUS_DONOR_LABEL.to_string())
                };
                RankedDonor {
                    id: *id,
                    nom,
                    montant_total: tally.amount,
                    nombre_dons: tally.count,
                }
            })
            .collect();

        Ok(select_top_n(entries, n, |e| e.montant_total))
    }

    fn top_associations(&self, n: usize) -> ServiceResult<Vec<RankedAssociation>> {
        let associations = self
            .association_repo
            .list(&AssociationFilter::new().with_validated(true))?;
        let projects = self.project_repo.list(&ProjectFilter::new())?;

        let mut tallies: HashMap<Uuid, (f64, i64)> = HashMap::new();
        for project in &projects {
            let tally = tallies.entry(project.association_id).or_insert((0.0, 0));
            tally.0 += project.collected_amount;
            tally.1 += 1;
        }

        let entries: Vec<RankedAssociation> = associations
            .iter()
            .map(|a| {
                let (montant, nombre) = tallies.get(&a.id).copied().unwrap_or((0.0, 0));
                RankedAssociation {
                    id: a.id,
                    nom: a.name.clone(),
                    montant_total_collecte: montant,
                    nombre_projets: nombre,
                }
            })
            .collect();

        Ok(select_top_n(entries, n, |e| e.montant_total_collecte))
    }
}
