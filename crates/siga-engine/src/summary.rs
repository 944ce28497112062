//! Trend and pending-action summaries consumed by the presentation layer.
//!
//! Pure functions over report slices; the caller decides which reports an
//! actor may see.

use serde::{Deserialize, Serialize};
use siga_core::{EvaluationBand, ItemStatus, Report};
use std::collections::BTreeMap;

/// Headline numbers for one construction site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub report_count: usize,
    /// Overall score of the most recent report, if any exists.
    pub latest_score: Option<u32>,
    pub latest_evaluation: Option<EvaluationBand>,
    /// Non-conformities across all reports still lacking an action plan.
    pub pending_actions: usize,
}

/// One open non-conformity: non-compliant answer, empty action plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub report_id: String,
    pub project_id: String,
    pub report_date: chrono::NaiveDate,
    pub item_id: String,
    pub comment: String,
}

/// Counts of answered, applicable results across reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub compliant: usize,
    pub non_compliant: usize,
}

pub fn project_summary(project_id: &str, reports: &[Report]) -> ProjectSummary {
    let own: Vec<&Report> = reports.iter().filter(|r| r.project_id == project_id).collect();

    let latest = own
        .iter()
        .max_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    let pending_actions = own.iter().map(|r| r.open_non_conformities().count()).sum();

    ProjectSummary {
        project_id: project_id.to_string(),
        report_count: own.len(),
        latest_score: latest.map(|r| r.scorecard.overall_score),
        latest_evaluation: latest.map(|r| r.scorecard.evaluation),
        pending_actions,
    }
}

/// Open non-conformities across the given reports, newest report first.
pub fn pending_actions(reports: &[Report]) -> Vec<PendingAction> {
    let mut sorted: Vec<&Report> = reports.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

    sorted
        .iter()
        .flat_map(|report| {
            report.open_non_conformities().map(|result| PendingAction {
                report_id: report.id.clone(),
                project_id: report.project_id.clone(),
                report_date: report.date,
                item_id: result.item_id.clone(),
                comment: result.comment.clone(),
            })
        })
        .collect()
}

/// Average overall score per calendar month ("YYYY-MM"), for trend charts.
pub fn monthly_trend(reports: &[Report]) -> BTreeMap<String, u32> {
    let mut buckets: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for report in reports {
        buckets
            .entry(report.date.format("%Y-%m").to_string())
            .or_default()
            .push(report.scorecard.overall_score);
    }

    buckets
        .into_iter()
        .map(|(month, scores)| {
            let sum: u32 = scores.iter().sum();
            let avg = (f64::from(sum) / scores.len() as f64).round() as u32;
            (month, avg)
        })
        .collect()
}

/// Distribution of answered, applicable results across the given reports.
pub fn status_distribution(reports: &[Report]) -> StatusDistribution {
    let mut distribution = StatusDistribution::default();
    for result in reports.iter().flat_map(|r| r.results.iter()) {
        match result.status {
            ItemStatus::Compliant => distribution.compliant += 1,
            ItemStatus::NonCompliant { .. } => distribution.non_compliant += 1,
            ItemStatus::Unanswered | ItemStatus::NotApplicable => {}
        }
    }
    distribution
}
