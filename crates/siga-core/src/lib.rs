//! SIGA Core: Catálogo, Relatório e Modelo de Dados
//!
//! Núcleo do domínio de inspeções ambientais: o catálogo fixo de perguntas,
//! o agregado Report e a taxonomia de erros compartilhada.

pub mod actor;
pub mod catalog;
pub mod error;
pub mod report;
pub mod result;

pub use actor::{Actor, Confirmation, Role};
pub use catalog::{Catalog, ChecklistCategory, ChecklistItem, ChecklistSubCategory};
pub use error::{CollaboratorError, EngineError};
pub use report::{
    EvaluationBand, Project, Report, ReportStatus, Scorecard, Signature, SignatureBlock,
    SignerSlot,
};
pub use result::{ActionPlan, EvidenceRef, ItemResult, ItemStatus, ResourceFlags};

/// Versão do motor SIGA
pub const SIGA_VERSION: &str = "1.0.0";
