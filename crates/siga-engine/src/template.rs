//! Carry-forward: building a fresh draft from the catalog and the previous
//! visit's findings.

use chrono::NaiveDate;
use siga_core::{
    Actor, Catalog, ItemResult, ItemStatus, Report, ReportStatus, SignatureBlock,
};
use siga_scoring::compute_scores;
use uuid::Uuid;

/// Build a Draft report template for a new inspection visit.
///
/// Every catalog item gets an unanswered result. When a prior report exists
/// for the project, items it marked Não Conforme are flagged as recurring
/// (`previous_non_compliance`); the prior report is the one with the most
/// recent date, ties broken by id so the choice is deterministic.
pub fn build_template(
    catalog: &Catalog,
    project_id: &str,
    prior_reports: &[Report],
    author: &Actor,
    date: NaiveDate,
) -> Report {
    let prior = prior_reports
        .iter()
        .filter(|r| r.project_id == project_id)
        .max_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let results: Vec<ItemResult> = catalog
        .items()
        .map(|item| {
            let mut result = ItemResult::unanswered(&item.id);
            if let Some(prior) = prior {
                result.previous_non_compliance = prior
                    .result(&item.id)
                    .map(|r| matches!(r.status, ItemStatus::NonCompliant { .. }))
                    .unwrap_or(false);
            }
            result
        })
        .collect();

    let scorecard = compute_scores(catalog, &results);

    Report {
        id: format!("report-{}", Uuid::new_v4()),
        project_id: project_id.to_string(),
        date,
        author_name: author.display_name.clone(),
        author_id: author.id.clone(),
        status: ReportStatus::Draft,
        results,
        signatures: SignatureBlock::default(),
        scorecard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siga_core::{
        ActionPlan, ChecklistCategory, ChecklistItem, ChecklistSubCategory, Role,
    };

    fn make_catalog() -> Catalog {
        Catalog::new(vec![ChecklistCategory {
            id: "a".to_string(),
            title: "Categoria A".to_string(),
            sub_categories: vec![ChecklistSubCategory {
                title: "Itens".to_string(),
                items: vec![
                    ChecklistItem { id: "a-1".to_string(), text: "Pergunta 1?".to_string() },
                    ChecklistItem { id: "a-2".to_string(), text: "Pergunta 2?".to_string() },
                ],
            }],
        }])
        .unwrap()
    }

    fn author() -> Actor {
        Actor {
            id: "user-1".to_string(),
            display_name: "Gediel da Silva".to_string(),
            role: Role::Assistant,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn prior_with_nc(catalog: &Catalog, id: &str, on: NaiveDate, nc_item: &str) -> Report {
        let mut report = build_template(catalog, "proj-1", &[], &author(), on);
        report.id = id.to_string();
        for result in &mut report.results {
            result.status = if result.item_id == nc_item {
                ItemStatus::NonCompliant { plan: ActionPlan::default() }
            } else {
                ItemStatus::Compliant
            };
        }
        report
    }

    #[test]
    fn test_fresh_template_without_prior() {
        let catalog = make_catalog();
        let report = build_template(&catalog, "proj-1", &[], &author(), date(2024, 6, 1));

        assert_eq!(report.status, ReportStatus::Draft);
        assert_eq!(report.results.len(), catalog.item_count());
        assert!(report.results.iter().all(|r| r.status == ItemStatus::Unanswered));
        assert!(report.results.iter().all(|r| !r.previous_non_compliance));
        assert!(report.signatures.inspector.is_none());
        // Untouched template already carries a computed scorecard
        assert_eq!(report.scorecard.overall_score, 0);
    }

    #[test]
    fn test_carry_forward_from_most_recent_prior() {
        let catalog = make_catalog();
        let older = prior_with_nc(&catalog, "report-a", date(2024, 4, 1), "a-1");
        let newer = prior_with_nc(&catalog, "report-b", date(2024, 5, 1), "a-2");

        let template = build_template(
            &catalog,
            "proj-1",
            &[older, newer],
            &author(),
            date(2024, 6, 1),
        );

        // Only the newer report's finding carries forward
        assert!(!template.result("a-1").unwrap().previous_non_compliance);
        assert!(template.result("a-2").unwrap().previous_non_compliance);
    }

    #[test]
    fn test_date_tie_broken_by_id() {
        let catalog = make_catalog();
        let same_day = date(2024, 5, 1);
        let first = prior_with_nc(&catalog, "report-a", same_day, "a-1");
        let second = prior_with_nc(&catalog, "report-b", same_day, "a-2");

        let template =
            build_template(&catalog, "proj-1", &[first, second], &author(), date(2024, 6, 1));

        // Highest id wins the tie, deterministically
        assert!(!template.result("a-1").unwrap().previous_non_compliance);
        assert!(template.result("a-2").unwrap().previous_non_compliance);
    }

    #[test]
    fn test_other_projects_ignored() {
        let catalog = make_catalog();
        let mut foreign = prior_with_nc(&catalog, "report-x", date(2024, 5, 1), "a-1");
        foreign.project_id = "proj-2".to_string();

        let template =
            build_template(&catalog, "proj-1", &[foreign], &author(), date(2024, 6, 1));
        assert!(template.results.iter().all(|r| !r.previous_non_compliance));
    }
}
