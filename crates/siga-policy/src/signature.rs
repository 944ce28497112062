//! The signature workflow: `Unsigned → Signed`, once, role-gated.

use crate::capability::{authorize, ActionKind};
use chrono::{DateTime, Utc};
use siga_core::{Actor, Catalog, Confirmation, EngineError, Report, Signature, SignerSlot};
use siga_gate::ValidationGate;

/// Applies signatures to a report's slots. A slot transition requires the
/// acting role to be authorized for it, the gate's answer checks to pass,
/// and a fresh confirmation from the identity provider; the slot is then
/// stamped with the actor's display name and the given timestamp.
#[derive(Debug, Clone, Copy)]
pub struct SignatureWorkflow {
    gate: ValidationGate,
}

impl SignatureWorkflow {
    pub fn new(gate: ValidationGate) -> Self {
        Self { gate }
    }

    pub fn sign(
        &self,
        catalog: &Catalog,
        report: &mut Report,
        slot: SignerSlot,
        actor: &Actor,
        confirmation: &Confirmation,
        signed_at: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        authorize(actor, ActionKind::for_slot(slot))?;

        if !confirmation.covers(actor) {
            return Err(EngineError::authorization(format!(
                "re-verification does not match acting user {}",
                actor.id
            )));
        }

        self.gate.check_answers(catalog, report).into_result()?;

        let signature = Signature { name: actor.display_name.clone(), signed_at };
        report
            .signatures
            .stamp(slot, signature)
            .map_err(|_| EngineError::validation(format!("{} slot already signed", slot)))?;

        Ok(())
    }
}
