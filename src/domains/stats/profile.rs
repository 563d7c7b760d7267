//! Per-entity statistical profiles.
//!
//! Donor, association and project profiles are three independent pure
//! functions over explicit record slices. They share no base behavior
//! beyond producing a report struct, and none of them queries a
//! collaborator: the service layer fetches the related collections first.

use crate::domains::donation::types::{Donation, DonationStatus};
use crate::domains::project::types::{Project, ProjectStatus};
use crate::domains::stats::metrics::{count_by, distinct_count, safe_average, safe_ratio, sum_by};
use crate::domains::stats::period::PeriodWindow;
use crate::domains::stats::types::{
    AssociationProfile, DonorProfile, LargestGift, MonthlyAmount, ProjectHighlight,
    ProjectProfile, ProjectTopGift,
};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

/// Label shown wherever a donor must not be identified.
pub(crate) const ANONYMOUS_DONOR_LABEL: &str = "Donateur anonyme";

const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Donor engagement tier.
///
/// Variants are ordered from least to most engaged, so `Ord` reflects the
/// tier hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonorLevel {
    New,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl DonorLevel {
    /// Classify from the validated totals. Rules are evaluated top-down,
    /// first match wins.
    pub fn classify(total_validated_amount: f64, validated_count: i64) -> Self {
        if total_validated_amount >= 5000.0 || validated_count >= 20 {
            DonorLevel::Platinum
        } else if total_validated_amount >= 2000.0 || validated_count >= 10 {
            DonorLevel::Gold
        } else if total_validated_amount >= 500.0 || validated_count >= 5 {
            DonorLevel::Silver
        } else if validated_count >= 1 {
            DonorLevel::Bronze
        } else {
            DonorLevel::New
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DonorLevel::New => "new",
            DonorLevel::Bronze => "bronze",
            DonorLevel::Silver => "silver",
            DonorLevel::Gold => "gold",
            DonorLevel::Platinum => "platinum",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(DonorLevel::New),
            "bronze" => Some(DonorLevel::Bronze),
            "silver" => Some(DonorLevel::Silver),
            "gold" => Some(DonorLevel::Gold),
            "platinum" => Some(DonorLevel::Platinum),
            _ => None,
        }
    }

    pub fn all_variants() -> Vec<&'static str> {
        vec!["new", "bronze", "silver", "gold", "platinum"]
    }
}

impl fmt::Display for DonorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the statistical profile of one donor from their donations.
///
/// `projects` supplies the project → association mapping for the
/// "associations supported" figure; projects missing from the slice simply
/// do not contribute an association.
pub fn donor_profile(donations: &[Donation], projects: &[Project]) -> DonorProfile {
    let association_of: HashMap<Uuid, Uuid> =
        projects.iter().map(|p| (p.id, p.association_id)).collect();

    let nombre_dons_valides = count_by(donations, Donation::is_validated);
    let montant_total_donne = sum_by(donations, Donation::is_validated, |d| d.amount);

    let associations_soutenues: HashSet<Uuid> = donations
        .iter()
        .filter(|d| d.is_validated())
        .filter_map(|d| association_of.get(&d.project_id).copied())
        .collect();

    let validated: Vec<&Donation> = donations.iter().filter(|d| d.is_validated()).collect();

    DonorProfile {
        nombre_dons: donations.len() as i64,
        nombre_dons_valides,
        nombre_dons_en_attente: count_by(donations, |d| d.status == DonationStatus::Pending),
        montant_total_donne,
        montant_moyen_par_don: safe_average(montant_total_donne, nombre_dons_valides),
        nombre_projets_soutenus: distinct_count(&validated, |d| d.project_id),
        nombre_associations_soutenues: associations_soutenues.len() as i64,
        plus_gros_don: largest_validated(donations).map(|d| LargestGift {
            montant: d.amount,
            date: d.date,
        }),
        premier_don: donations.iter().map(|d| d.date).min(),
        dernier_don: donations.iter().map(|d| d.date).max(),
        niveau: DonorLevel::classify(montant_total_donne, nombre_dons_valides),
    }
}

/// Build the statistical profile of one association from its projects and
/// the donations those projects received (every status).
pub fn association_profile(projects: &[Project], donations: &[Donation]) -> AssociationProfile {
    let montant_total_collecte = sum_by(projects, |_| true, |p| p.collected_amount);
    let montant_total_demande = sum_by(projects, |_| true, |p| p.requested_amount);

    AssociationProfile {
        nombre_projets: projects.len() as i64,
        nombre_projets_en_cours: count_by(projects, |p| p.status == ProjectStatus::InProgress),
        nombre_projets_termines: count_by(projects, |p| p.status == ProjectStatus::Completed),
        montant_total_collecte,
        montant_total_demande,
        taux_reussite: safe_ratio(montant_total_collecte, montant_total_demande),
        nombre_dons: donations.len() as i64,
        nombre_donateurs: distinct_count(donations, |d| d.donor_id),
        meilleur_projet: best_project(projects).map(ProjectHighlight::from_project),
    }
}

/// Build the statistical profile of one project from its donations.
///
/// `donor_names` labels the largest gift; the donation's own anonymity
/// flag always wins over the directory answer — a name is never shown for
/// an anonymous donation, and an unknown donor stays anonymous too.
pub fn project_profile(
    project: &Project,
    donations: &[Donation],
    donor_names: &HashMap<Uuid, String>,
    today: NaiveDate,
) -> ProjectProfile {
    let nombre_dons = donations.len() as i64;

    let pourcentage_temps_ecoule = project.end_date.map(|end| {
        let total_days = (end - project.start_date).num_days();
        let elapsed_days = (today - project.start_date).num_days();
        if total_days > 0 {
            (elapsed_days as f64 / total_days as f64 * 100.0).min(100.0)
        } else {
            0.0
        }
    });

    let plus_gros_don = largest_validated(donations).map(|d| {
        let donateur = if d.anonymous {
            ANONYMOUS_DONOR_LABEL.to_string()
        } else {
            donor_names
                .get(&d.donor_id)
                .cloned()
                .unwrap_or_else(|| ANONYMOUS_DONOR_LABEL.to_string())
        };
        ProjectTopGift {
            montant: d.amount,
            date: d.date,
            donateur,
        }
    });

    ProjectProfile {
        montant_demande: project.requested_amount,
        montant_collecte: project.collected_amount,
        progres: project.progress(),
        montant_restant: project.remaining_amount(),
        nombre_dons,
        nombre_donateurs: distinct_count(donations, |d| d.donor_id),
        montant_moyen_par_don: safe_average(project.collected_amount, nombre_dons),
        nombre_dons_avec_message: count_by(donations, Donation::has_message),
        pourcentage_temps_ecoule,
        plus_gros_don,
        collecte_par_mois: trailing_monthly_breakdown(donations, today),
    }
}

/// Largest validated donation; ties go to the earliest date.
fn largest_validated(donations: &[Donation]) -> Option<&Donation> {
    donations
        .iter()
        .filter(|d| d.is_validated())
        .fold(None, |best: Option<&Donation>, d| match best {
            None => Some(d),
            Some(b) if d.amount > b.amount || (d.amount == b.amount && d.date < b.date) => Some(d),
            Some(b) => Some(b),
        })
}

/// Best-collecting project; ties go to the earliest creation.
fn best_project(projects: &[Project]) -> Option<&Project> {
    projects
        .iter()
        .fold(None, |best: Option<&Project>, p| match best {
            None => Some(p),
            Some(b)
                if p.collected_amount > b.collected_amount
                    || (p.collected_amount == b.collected_amount
                        && p.created_at < b.created_at) =>
            {
                Some(p)
            }
            Some(b) => Some(b),
        })
}

/// Validated amounts bucketed per calendar month over the 12 months ending
/// with the month of `today`, oldest month first.
fn trailing_monthly_breakdown(donations: &[Donation], today: NaiveDate) -> Vec<MonthlyAmount> {
    let current_first = today.with_day(1).unwrap_or(today);
    let mut breakdown = Vec::with_capacity(12);
    for offset in (0u32..12).rev() {
        let first = current_first
            .checked_sub_months(Months::new(offset))
            .unwrap_or(current_first);
        let window = PeriodWindow::month_of(first);
        let montant = sum_by(
            donations,
            |d| d.is_validated() && window.contains(d.date),
            |d| d.amount,
        );
        breakdown.push(MonthlyAmount {
            mois: MONTH_NAMES[first.month0() as usize].to_string(),
            montant,
        });
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

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

    fn project(requested: f64, collected: f64) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: "Cantine solidaire".to_string(),
            requested_amount: requested,
            collected_amount: collected,
            status: ProjectStatus::InProgress,
            start_date: day(2024, 1, 1),
            end_date: None,
            association_id: Uuid::new_v4(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_level_classification_tiers() {
        assert_eq!(DonorLevel::classify(0.0, 0), DonorLevel::New);
        assert_eq!(DonorLevel::classify(10.0, 1), DonorLevel::Bronze);
        assert_eq!(DonorLevel::classify(499.99, 4), DonorLevel::Bronze);
        assert_eq!(DonorLevel::classify(500.0, 1), DonorLevel::Silver);
        assert_eq!(DonorLevel::classify(10.0, 5), DonorLevel::Silver);
        assert_eq!(DonorLevel::classify(2000.0, 1), DonorLevel::Gold);
        assert_eq!(DonorLevel::classify(10.0, 10), DonorLevel::Gold);
        assert_eq!(DonorLevel::classify(5000.0, 1), DonorLevel::Platinum);
        assert_eq!(DonorLevel::classify(10.0, 20), DonorLevel::Platinum);
    }

    #[test]
    fn test_level_classification_is_monotonic() {
        let amounts = [0.0, 100.0, 499.0, 500.0, 1999.0, 2000.0, 4999.0, 5000.0, 9000.0];
        let counts = [0, 1, 4, 5, 9, 10, 19, 20, 50];
        for window in amounts.windows(2) {
            for &count in &counts {
                assert!(
                    DonorLevel::classify(window[1], count)
                        >= DonorLevel::classify(window[0], count)
                );
            }
        }
        for &amount in &amounts {
            for window in counts.windows(2) {
                assert!(
                    DonorLevel::classify(amount, window[1])
                        >= DonorLevel::classify(amount, window[0])
                );
            }
        }
    }

    #[test]
    fn test_donor_profile_mixed_statuses() {
        let donations = vec![
            donation(100.0, DonationStatus::Validated, day(2024, 2, 10)),
            donation(50.0, DonationStatus::Pending, day(2024, 3, 5)),
        ];
        let profile = donor_profile(&donations, &[]);

        assert_eq!(profile.nombre_dons, 2);
        assert_eq!(profile.nombre_dons_valides, 1);
        assert_eq!(profile.nombre_dons_en_attente, 1);
        assert_eq!(profile.montant_total_donne, 100.0);
        assert_eq!(profile.montant_moyen_par_don, 100.0);
        assert_eq!(profile.niveau, DonorLevel::Bronze);
        assert_eq!(profile.premier_don, Some(day(2024, 2, 10)));
        assert_eq!(profile.dernier_don, Some(day(2024, 3, 5)));
        assert_eq!(profile.nombre_projets_soutenus, 1);
        // No project records supplied, so no association can be resolved.
        assert_eq!(profile.nombre_associations_soutenues, 0);
    }

    #[test]
    fn test_donor_profile_resolves_associations_through_projects() {
        let p1 = project(1000.0, 0.0);
        let mut p2 = project(1000.0, 0.0);
        p2.association_id = p1.association_id;
        let p3 = project(1000.0, 0.0);

        let mut d1 = donation(10.0, DonationStatus::Validated, day(2024, 1, 1));
        d1.project_id = p1.id;
        let mut d2 = donation(20.0, DonationStatus::Validated, day(2024, 1, 2));
        d2.project_id = p2.id;
        let mut d3 = donation(30.0, DonationStatus::Validated, day(2024, 1, 3));
        d3.project_id = p3.id;
        let mut refused = donation(40.0, DonationStatus::Refused, day(2024, 1, 4));
        refused.project_id = p3.id;

        let projects = vec![p1, p2, p3];
        let profile = donor_profile(&[d1, d2, d3, refused], &projects);
        assert_eq!(profile.nombre_projets_soutenus, 3);
        // p1 and p2 share an association.
        assert_eq!(profile.nombre_associations_soutenues, 2);
    }

    #[test]
    fn test_largest_gift_tie_goes_to_earliest() {
        let donations = vec![
            donation(100.0, DonationStatus::Validated, day(2024, 5, 20)),
            donation(100.0, DonationStatus::Validated, day(2024, 2, 1)),
            donation(80.0, DonationStatus::Validated, day(2024, 1, 1)),
            donation(500.0, DonationStatus::Pending, day(2024, 1, 2)),
        ];
        let profile = donor_profile(&donations, &[]);
        let largest = profile.plus_gros_don.unwrap();
        assert_eq!(largest.montant, 100.0);
        assert_eq!(largest.date, day(2024, 2, 1));
    }

    #[test]
    fn test_association_profile_totals() {
        let association_id = Uuid::new_v4();
        let mut p1 = project(1000.0, 300.0);
        p1.association_id = association_id;
        let mut p2 = project(1000.0, 700.0);
        p2.association_id = association_id;
        p2.status = ProjectStatus::Completed;

        let mut d1 = donation(300.0, DonationStatus::Validated, day(2024, 1, 5));
        d1.project_id = p1.id;
        let mut d2 = donation(700.0, DonationStatus::Validated, day(2024, 1, 6));
        d2.project_id = p2.id;
        d2.donor_id = d1.donor_id;

        let profile = association_profile(&[p1, p2.clone()], &[d1, d2]);
        assert_eq!(profile.nombre_projets, 2);
        assert_eq!(profile.nombre_projets_en_cours, 1);
        assert_eq!(profile.nombre_projets_termines, 1);
        assert_eq!(profile.montant_total_collecte, 1000.0);
        assert_eq!(profile.montant_total_demande, 2000.0);
        assert_eq!(profile.taux_reussite, 50.0);
        assert_eq!(profile.nombre_dons, 2);
        assert_eq!(profile.nombre_donateurs, 1);

        let best = profile.meilleur_projet.unwrap();
        assert_eq!(best.id, p2.id);
        assert_eq!(best.montant_collecte, 700.0);
        assert_eq!(best.progres, 70.0);
    }

    #[test]
    fn test_best_project_tie_goes_to_earliest_created() {
        let mut older = project(1000.0, 500.0);
        older.created_at = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let newer = project(1000.0, 500.0);

        let profile = association_profile(&[newer, older.clone()], &[]);
        assert_eq!(profile.meilleur_projet.unwrap().id, older.id);
    }

    #[test]
    fn test_empty_association_profile_is_all_zeroes() {
        let profile = association_profile(&[], &[]);
        assert_eq!(profile.nombre_projets, 0);
        assert_eq!(profile.taux_reussite, 0.0);
        assert!(profile.meilleur_projet.is_none());
    }

    #[test]
    fn test_project_profile_amounts_and_messages() {
        let p = project(1000.0, 250.0);
        let mut d1 = donation(150.0, DonationStatus::Validated, day(2024, 2, 1));
        d1.project_id = p.id;
        d1.message = Some("Bon courage !".to_string());
        let mut d2 = donation(100.0, DonationStatus::Validated, day(2024, 2, 2));
        d2.project_id = p.id;
        let mut d3 = donation(60.0, DonationStatus::Pending, day(2024, 2, 3));
        d3.project_id = p.id;
        d3.message = Some("  ".to_string());

        let profile = project_profile(&p, &[d1, d2, d3], &HashMap::new(), day(2024, 3, 1));
        assert_eq!(profile.progres, 25.0);
        assert_eq!(profile.montant_restant, 750.0);
        assert_eq!(profile.nombre_dons, 3);
        assert_eq!(profile.nombre_donateurs, 3);
        // Collected amount spread over every donation on record.
        assert!((profile.montant_moyen_par_don - 250.0 / 3.0).abs() < 1e-9);
        assert_eq!(profile.nombre_dons_avec_message, 1);
    }

    #[test]
    fn test_project_top_gift_respects_anonymity() {
        let p = project(1000.0, 500.0);
        let mut named = donation(200.0, DonationStatus::Validated, day(2024, 2, 1));
        named.project_id = p.id;
        let mut anonymous = donation(300.0, DonationStatus::Validated, day(2024, 2, 2));
        anonymous.project_id = p.id;
        anonymous.anonymous = true;

        let mut names = HashMap::new();
        names.insert(named.donor_id, "Claire Morel".to_string());
        names.insert(anonymous.donor_id, "Jean Petit".to_string());

        let profile = project_profile(&p, &[named.clone(), anonymous], &names, day(2024, 3, 1));
        let top = profile.plus_gros_don.unwrap();
        assert_eq!(top.montant, 300.0);
        assert_eq!(top.donateur, ANONYMOUS_DONOR_LABEL);

        // With the anonymous gift out of the picture the name shows up.
        let profile = project_profile(&p, &[named], &names, day(2024, 3, 1));
        assert_eq!(profile.plus_gros_don.unwrap().donateur, "Claire Morel");
    }

    #[test]
    fn test_project_top_gift_unknown_donor_stays_masked() {
        let p = project(1000.0, 500.0);
        let mut d = donation(200.0, DonationStatus::Validated, day(2024, 2, 1));
        d.project_id = p.id;

        let profile = project_profile(&p, &[d], &HashMap::new(), day(2024, 3, 1));
        assert_eq!(profile.plus_gros_don.unwrap().donateur, ANONYMOUS_DONOR_LABEL);
    }

    #[test]
    fn test_elapsed_time_percentage() {
        let mut p = project(1000.0, 0.0);
        p.start_date = day(2024, 1, 1);
        p.end_date = Some(day(2024, 1, 11));

        let halfway = project_profile(&p, &[], &HashMap::new(), day(2024, 1, 6));
        assert_eq!(halfway.pourcentage_temps_ecoule, Some(50.0));

        let past_end = project_profile(&p, &[], &HashMap::new(), day(2024, 6, 1));
        assert_eq!(past_end.pourcentage_temps_ecoule, Some(100.0));

        p.end_date = None;
        let open_ended = project_profile(&p, &[], &HashMap::new(), day(2024, 1, 6));
        assert_eq!(open_ended.pourcentage_temps_ecoule, None);
    }

    #[test]
    fn test_trailing_monthly_breakdown_boundaries() {
        let p = project(1000.0, 0.0);
        let today = day(2024, 6, 15);

        let mut in_first_month = donation(40.0, DonationStatus::Validated, day(2023, 7, 1));
        in_first_month.project_id = p.id;
        let mut too_old = donation(25.0, DonationStatus::Validated, day(2023, 6, 30));
        too_old.project_id = p.id;
        let mut current = donation(60.0, DonationStatus::Validated, day(2024, 6, 15));
        current.project_id = p.id;
        let mut pending = donation(500.0, DonationStatus::Pending, day(2024, 6, 10));
        pending.project_id = p.id;

        let profile = project_profile(
            &p,
            &[in_first_month, too_old, current, pending],
            &HashMap::new(),
            today,
        );
        let months = &profile.collecte_par_mois;
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].mois, "juillet");
        assert_eq!(months[0].montant, 40.0);
        assert_eq!(months[11].mois, "juin");
        assert_eq!(months[11].montant, 60.0);
        // Every other bucket stays empty.
        assert_eq!(
            months.iter().map(|m| m.montant).sum::<f64>(),
            100.0
        );
    }
}
