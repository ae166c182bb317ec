//! # evpolicy-core
//!
//! Converts transport EV adoption-target tables into the coefficient tables
//! and RES policy document consumed by an energy-systems model.
//!
//! The pipeline is a deterministic one-shot batch conversion: two delimited
//! input tables in, two CSV tables and one XML document out. Everything is
//! fully materialized in memory; any stage failure aborts the run before a
//! single output file is written.
//!
//! ## Pipeline
//!
//! | Stage | Module | What it does |
//! |-------|--------|--------------|
//! | Load | [`loader`] | Read the target and assumptions tables |
//! | Key space | [`keyspace`] | Distinct (region, year) × technology triples |
//! | Coefficients | [`calculator`] | BEV target join, fuel coefficients |
//! | Resources | [`calculator`] | Same join, secondary-output ratios |
//! | Assemble | [`assembler`] | Left join, naming, market, sort |
//! | Document | [`document`] | Grouping pass into the policy tree |
//! | Serialize | [`serializer`] | CSV tables and the XML document |
//! | Report | [`report`] | Counts and distinct values for inspection |
//!
//! ## Quick Start
//!
//! ```no_run
//! use evpolicy_core::{ConvertOptions, Converter};
//!
//! let converter = Converter::new(ConvertOptions {
//!     targets_path: "EVTarget.csv".into(),
//!     assumptions_path:
//!         "Assumptions on annual travel per vehicle and load factor.csv".into(),
//!     output_dir: "out".into(),
//! });
//!
//! let summary = converter.run()?;
//! println!("{summary}");
//! # Ok::<(), evpolicy_core::EvPolicyError>(())
//! ```
//!
//! ## Classification strictness
//!
//! Supplysector names are classified by prefix (`trn_freight*` → freight,
//! `trn_pass*` → pass). The energy-input naming path treats anything else as
//! a fatal [`EvPolicyError::InvalidFormat`]; the policy-node category
//! collection silently filters unrecognized sectors. Both behaviors are
//! deliberate and sit on the single [`classify::TransportCategory`]
//! classifier.

pub mod assembler;
pub mod calculator;
pub mod classify;
pub mod converter;
pub mod document;
pub mod error;
pub mod keyspace;
pub mod loader;
pub mod records;
pub mod report;
pub mod serializer;

pub use classify::{derive_energy_input_name, TransportCategory};
pub use converter::{
    ConvertOptions, Converter, COEF_TABLE_FILENAME, DOCUMENT_FILENAME, RES_TABLE_FILENAME,
};
pub use error::{EvPolicyError, Result};
pub use records::{
    AssumptionRecord, CanonicalRow, CoefTableRow, CoefficientRow, ResTableRow, ResourceRow,
    TargetRecord, TechTriple,
};
pub use report::RunSummary;
