//! Rule-based compliance analysis for Java-like source trees.
//!
//! Pipeline: unit list → [`core::resolve`] → [`core::classify`] →
//! [`core::inspect`] → [`core::evaluate`] → [`export`]. The [`run`] module wires
//! these stages into a bounded, order-preserving worker pool.

pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod model;
pub mod rules;
pub mod run;

pub use config::model::AuditConfig;
pub use errors::{EngineError, Result};
pub use export::{report::QualityReport, save_all::ReportFiles};
pub use run::{AuditContext, AuditRun, evaluate_all, run_audit};
