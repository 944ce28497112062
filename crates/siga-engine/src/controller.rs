//! The report lifecycle controller.
//!
//! Single entry point for the presentation layer: create, update, save,
//! sign, complete. Every mutation recomputes the derived scorecard; every
//! decision is audited. One editing session mutates a given report at a
//! time.

use crate::collaborators::{EvidenceStore, IdentityProvider, ReportStore};
use crate::template::build_template;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use siga_core::{
    Actor, Catalog, EngineError, EvidenceRef, ItemStatus, Report, ReportStatus, Role, SignerSlot,
};
use siga_gate::ValidationGate;
use siga_policy::{
    authorize, ActionKind, AuditEntry, AuditEvent, AuditLog, EnginePolicy, FindingRetention,
    SignatureWorkflow,
};
use siga_scoring::compute_scores;
use std::sync::Arc;
use tracing::{info, warn};

/// Partial update of one item result, merged by `update_item`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    /// New answer status, replacing the current one (including the action
    /// plan carried by a NonCompliant status).
    pub status: Option<ItemStatus>,
    pub comment: Option<String>,
    #[serde(default)]
    pub add_evidence: Vec<EvidenceRef>,
    /// Evidence ids to drop.
    #[serde(default)]
    pub remove_evidence: Vec<String>,
}

pub struct ReportController {
    catalog: Arc<Catalog>,
    policy: EnginePolicy,
    gate: ValidationGate,
    workflow: SignatureWorkflow,
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn ReportStore>,
    evidence: Arc<dyn EvidenceStore>,
    audit: AuditLog,
}

impl ReportController {
    pub fn new(
        catalog: Arc<Catalog>,
        policy: EnginePolicy,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ReportStore>,
        evidence: Arc<dyn EvidenceStore>,
    ) -> Self {
        let gate = ValidationGate::new(policy.signature_requirement);
        Self {
            catalog,
            policy,
            gate,
            workflow: SignatureWorkflow::new(gate),
            identity,
            store,
            evidence,
            audit: AuditLog::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Start a new Draft for a project, carrying forward recurring
    /// non-conformities from the most recent prior report. Not persisted
    /// until the first save.
    pub fn create(&mut self, project_id: &str) -> Result<Report, EngineError> {
        let actor = self.acting_user()?;
        authorize(&actor, ActionKind::CreateReport)?;

        let prior = self.store.load_reports(project_id)?;
        let report = build_template(
            &self.catalog,
            project_id,
            &prior,
            &actor,
            Utc::now().date_naive(),
        );

        info!(report_id = %report.id, project_id, "report template created");
        self.audit
            .log(AuditEntry::new(AuditEvent::ReportCreated, actor.id.clone(), report.id.clone()));
        Ok(report)
    }

    /// Merge a partial update into one item result and recompute the
    /// scorecard. Refused for unauthorized roles and for Completed reports,
    /// unless the amend policy applies.
    pub fn update_item(
        &mut self,
        report: &mut Report,
        item_id: &str,
        update: ItemUpdate,
    ) -> Result<(), EngineError> {
        let actor = self.acting_user()?;
        self.guard_edit(&actor, report)?;

        let retention = self.policy.finding_retention;
        let result = report
            .result_mut(item_id)
            .ok_or_else(|| EngineError::validation_at("unknown checklist item", item_id))?;

        if let Some(status) = update.status {
            let leaving_nc = matches!(result.status, ItemStatus::NonCompliant { .. })
                && !matches!(status, ItemStatus::NonCompliant { .. });
            result.status = status;
            if leaving_nc && retention == FindingRetention::Discard {
                result.comment.clear();
                result.evidence.clear();
            }
        }
        if let Some(comment) = update.comment {
            result.comment = comment;
        }
        result.evidence.extend(update.add_evidence);
        if !update.remove_evidence.is_empty() {
            result
                .evidence
                .retain(|e| !update.remove_evidence.iter().any(|id| id == e.id()));
        }

        report.scorecard = compute_scores(&self.catalog, &report.results);

        self.audit.log(
            AuditEntry::new(AuditEvent::ItemUpdated, actor.id.clone(), report.id.clone())
                .with_detail(item_id),
        );
        Ok(())
    }

    /// Persist the current state without running the validation gate. On a
    /// persistence failure the caller keeps the in-memory report untouched
    /// and simply retries.
    pub fn save_draft(&mut self, report: &mut Report) -> Result<Report, EngineError> {
        let actor = self.acting_user()?;
        self.guard_edit(&actor, report)?;

        report.scorecard = compute_scores(&self.catalog, &report.results);

        match self.store.save_report(report) {
            Ok(stored) => {
                info!(report_id = %report.id, score = report.scorecard.overall_score, "draft saved");
                self.audit.log(AuditEntry::new(
                    AuditEvent::DraftSaved,
                    actor.id.clone(),
                    report.id.clone(),
                ));
                Ok(stored)
            }
            Err(err) => {
                warn!(report_id = %report.id, %err, "persistence failed; in-memory report kept for retry");
                Err(err.into())
            }
        }
    }

    /// Store a piece of photographic evidence on an item. A blob-store
    /// failure degrades to keeping the original bytes inline instead of
    /// failing the mutation.
    pub async fn attach_evidence(
        &mut self,
        report: &mut Report,
        item_id: &str,
        data: Vec<u8>,
    ) -> Result<(), EngineError> {
        let actor = self.acting_user()?;
        self.guard_edit(&actor, report)?;

        if self.catalog.find_item(item_id).is_none() {
            return Err(EngineError::validation_at("unknown checklist item", item_id));
        }

        let evidence = match self.evidence.store_evidence(&data).await {
            Ok(reference) => reference,
            Err(err) => {
                warn!(item_id, %err, "evidence upload failed; keeping inline representation");
                EvidenceRef::inline(data)
            }
        };

        let result = report
            .result_mut(item_id)
            .ok_or_else(|| EngineError::validation_at("unknown checklist item", item_id))?;
        result.evidence.push(evidence);

        self.audit.log(
            AuditEntry::new(AuditEvent::ItemUpdated, actor.id.clone(), report.id.clone())
                .with_detail(format!("evidence on {}", item_id)),
        );
        Ok(())
    }

    /// Apply the acting user's signature to a slot, after identity
    /// re-verification.
    pub fn sign(&mut self, report: &mut Report, slot: SignerSlot) -> Result<(), EngineError> {
        let actor = self.acting_user()?;

        if report.is_completed() && !self.late_manager_signature_allowed(report, slot) {
            return Err(EngineError::authorization("completed reports cannot be signed"));
        }

        let confirmation = self.identity.reauthenticate(&actor)?;
        match self.workflow.sign(&self.catalog, report, slot, &actor, &confirmation, Utc::now()) {
            Ok(()) => {
                info!(report_id = %report.id, %slot, "signature applied");
                self.audit.log(
                    AuditEntry::new(AuditEvent::SignatureApplied, actor.id.clone(), report.id.clone())
                        .with_detail(slot.to_string()),
                );
                Ok(())
            }
            Err(err) => {
                self.audit.log(
                    AuditEntry::new(AuditEvent::SignatureRefused, actor.id.clone(), report.id.clone())
                        .with_detail(err.to_string()),
                );
                Err(err)
            }
        }
    }

    /// Run the validation gate and, if it passes, complete the report. The
    /// acting user's applicable slot is signed on the way when still empty.
    /// The caller's report is only mutated once the store accepts the
    /// completed record, so a persistence failure loses nothing.
    pub fn complete(&mut self, report: &mut Report) -> Result<Report, EngineError> {
        let actor = self.acting_user()?;
        authorize(&actor, ActionKind::EditDraft)?;

        if report.is_completed() {
            return Err(EngineError::validation("report already completed"));
        }

        let mut candidate = report.clone();

        if let Err(err) = self.gate.check_answers(&self.catalog, &candidate).into_result() {
            self.reject_completion(&actor, report, &err);
            return Err(err);
        }

        if let Some(slot) = applicable_slot(actor.role, &candidate) {
            let confirmation = self.identity.reauthenticate(&actor)?;
            self.workflow
                .sign(&self.catalog, &mut candidate, slot, &actor, &confirmation, Utc::now())?;
        }

        if let Err(err) = self.gate.can_complete(&self.catalog, &candidate).into_result() {
            // Keep any signature applied above; only the status stays Draft.
            *report = candidate;
            self.reject_completion(&actor, report, &err);
            return Err(err);
        }

        candidate.status = ReportStatus::Completed;
        candidate.scorecard = compute_scores(&self.catalog, &candidate.results);

        match self.store.save_report(&candidate) {
            Ok(stored) => {
                *report = candidate;
                info!(
                    report_id = %report.id,
                    score = report.scorecard.overall_score,
                    evaluation = %report.scorecard.evaluation,
                    "report completed"
                );
                self.audit.log(AuditEntry::new(
                    AuditEvent::CompletionAccepted,
                    actor.id.clone(),
                    report.id.clone(),
                ));
                Ok(stored)
            }
            Err(err) => {
                warn!(report_id = %report.id, %err, "completion persist failed; report stays draft");
                Err(err.into())
            }
        }
    }

    fn acting_user(&self) -> Result<Actor, EngineError> {
        self.identity
            .current_actor()
            .ok_or_else(|| EngineError::authorization("no authenticated user"))
    }

    /// Edit authorization plus an audit entry when refused.
    fn guard_edit(&mut self, actor: &Actor, report: &Report) -> Result<(), EngineError> {
        if let Err(err) = self.authorize_edit(actor, report) {
            self.audit.log(
                AuditEntry::new(AuditEvent::EditRefused, actor.id.clone(), report.id.clone())
                    .with_detail(err.to_string()),
            );
            return Err(err);
        }
        Ok(())
    }

    fn authorize_edit(&self, actor: &Actor, report: &Report) -> Result<(), EngineError> {
        if !report.is_completed() {
            return authorize(actor, ActionKind::EditDraft);
        }
        if !self.policy.manager_may_amend_completed {
            return Err(EngineError::authorization("completed reports are immutable"));
        }
        if report.signatures.is_signed(SignerSlot::Manager) {
            return Err(EngineError::authorization("completed report already fully signed"));
        }
        authorize(actor, ActionKind::AmendCompleted)
    }

    fn late_manager_signature_allowed(&self, report: &Report, slot: SignerSlot) -> bool {
        self.policy.manager_may_amend_completed
            && slot == SignerSlot::Manager
            && !report.signatures.is_signed(SignerSlot::Manager)
    }

    fn reject_completion(&mut self, actor: &Actor, report: &Report, err: &EngineError) {
        self.audit.log(
            AuditEntry::new(AuditEvent::CompletionRejected, actor.id.clone(), report.id.clone())
                .with_detail(err.to_string()),
        );
    }
}

/// The slot a role signs when completing a report, if it is still empty.
/// Administrators may sign either; the inspector slot comes first.
fn applicable_slot(role: Role, report: &Report) -> Option<SignerSlot> {
    let unsigned = |slot| !report.signatures.is_signed(slot);
    match role {
        Role::Assistant => Some(SignerSlot::Inspector).filter(|s| unsigned(*s)),
        Role::Manager => Some(SignerSlot::Manager).filter(|s| unsigned(*s)),
        Role::Administrator => [SignerSlot::Inspector, SignerSlot::Manager]
            .into_iter()
            .find(|s| unsigned(*s)),
        Role::Viewer => None,
    }
}
