//! SIGA Scoring: pontuação de conformidade por categoria
//!
//! A pure function from a report's item results to per-category and overall
//! compliance scores plus the qualitative evaluation band. Deterministic, no
//! side effects, safe to call on every mutation.

pub mod score;

pub use score::compute_scores;
