//! Audit trail of lifecycle and authorization decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of audited event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    ReportCreated,
    ItemUpdated,
    DraftSaved,
    SignatureApplied,
    SignatureRefused,
    CompletionAccepted,
    CompletionRejected,
    EditRefused,
}

/// One audited decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event: AuditEvent,
    pub actor_id: String,
    pub report_id: String,
    /// Free-form detail: offending item, refused action, unsigned slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    pub fn new(event: AuditEvent, actor_id: impl Into<String>, report_id: impl Into<String>) -> Self {
        Self {
            id: format!("aud-{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            event,
            actor_id: actor_id.into(),
            report_id: report_id.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Bounded in-memory audit log.
pub struct AuditLog {
    entries: Vec<AuditEntry>,
    max_entries: usize,
}

impl AuditLog {
    pub fn new() -> Self {
        Self { entries: Vec::new(), max_entries: 10_000 }
    }

    pub fn with_max_entries(max: usize) -> Self {
        Self { entries: Vec::new(), max_entries: max }
    }

    pub fn log(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            let drain_count = self.entries.len() - self.max_entries;
            self.entries.drain(0..drain_count);
        }
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn entries_for_report(&self, report_id: &str) -> Vec<&AuditEntry> {
        self.entries.iter().filter(|e| e.report_id == report_id).collect()
    }

    pub fn refusals(&self) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.event,
                    AuditEvent::SignatureRefused
                        | AuditEvent::CompletionRejected
                        | AuditEvent::EditRefused
                )
            })
            .collect()
    }

    /// Export as JSON Lines.
    pub fn to_jsonl(&self) -> String {
        self.entries
            .iter()
            .filter_map(|e| serde_json::to_string(e).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
