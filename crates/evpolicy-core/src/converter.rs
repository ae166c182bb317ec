//! End-to-end conversion facade.
//!
//! Runs the whole pipeline in order: load, key space, coefficient and
//! resource joins, table assembly, document build, serialization. Output
//! files are written only after every artifact has been produced in memory,
//! so a failing stage leaves the output directory untouched.

use crate::assembler::{assemble_coef_table, assemble_res_table};
use crate::calculator::{coefficient_rows, resource_rows};
use crate::classify::TransportCategory;
use crate::document::build_document;
use crate::error::Result;
use crate::keyspace::{canonical_rows, tech_triples};
use crate::loader::{load_assumptions, load_targets};
use crate::report::RunSummary;
use crate::serializer::{coef_table_to_csv, res_table_to_csv, XmlSerializer};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

/// Output file name for table 1.
pub const COEF_TABLE_FILENAME: &str = "StubTranTechCoef.csv";
/// Output file name for table 2.
pub const RES_TABLE_FILENAME: &str = "StubTranTechRES.csv";
/// Output file name for the policy document.
pub const DOCUMENT_FILENAME: &str = "new_RPS_BEV2.xml";

/// Where to read the inputs and write the outputs.
///
/// All paths are explicit; the converter never changes the process working
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConvertOptions {
    /// Path to the EV adoption-target table
    pub targets_path: PathBuf,
    /// Path to the travel/load-factor assumptions table
    pub assumptions_path: PathBuf,
    /// Directory receiving the three output files (created if absent)
    pub output_dir: PathBuf,
}

/// One-shot converter from the two input tables to the three output files.
///
/// # Examples
///
/// ```no_run
/// use evpolicy_core::{ConvertOptions, Converter};
///
/// let converter = Converter::new(ConvertOptions {
///     targets_path: "data/EVTarget.csv".into(),
///     assumptions_path: "data/assumptions.csv".into(),
///     output_dir: "out".into(),
/// });
/// let summary = converter.run()?;
/// println!("{summary}");
/// # Ok::<(), evpolicy_core::EvPolicyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter for the given paths.
    #[must_use]
    pub const fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Run the full pipeline and write the outputs.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from any stage: load, key-space
    /// construction, either join, name derivation, or serialization. No
    /// output file is written unless every stage succeeded.
    pub fn run(&self) -> Result<RunSummary> {
        let targets = load_targets(&self.options.targets_path)?;
        let assumptions = load_assumptions(&self.options.assumptions_path)?;

        let canonical = canonical_rows(&targets, &assumptions)?;
        log::info!("canonical key space has {} rows", canonical.len());

        let coefficients = coefficient_rows(&targets, &assumptions)?;
        let resources = resource_rows(&targets, &assumptions)?;

        let coef_table = assemble_coef_table(&canonical, &coefficients)?;
        let res_table = assemble_res_table(&resources);

        let document = build_document(&coef_table, &res_table);
        let policy_nodes = document.regions.iter().map(|r| r.policies.len()).sum();

        let coef_csv = coef_table_to_csv(&coef_table)?;
        let res_csv = res_table_to_csv(&res_table)?;
        let xml = XmlSerializer::new().serialize(&document)?;

        fs::create_dir_all(&self.options.output_dir)?;
        let mut outputs = Vec::with_capacity(3);
        for (filename, content) in [
            (COEF_TABLE_FILENAME, &coef_csv),
            (RES_TABLE_FILENAME, &res_csv),
            (DOCUMENT_FILENAME, &xml),
        ] {
            let path = self.options.output_dir.join(filename);
            fs::write(&path, content)?;
            log::info!("wrote {}", path.display());
            outputs.push(path.display().to_string());
        }

        let regions: BTreeSet<String> = targets.iter().map(|t| t.region.clone()).collect();
        let years: BTreeSet<i32> = targets.iter().map(|t| t.year).collect();
        let categories: BTreeSet<String> = targets
            .iter()
            .filter_map(|t| TransportCategory::of(&t.supplysector).label())
            .map(str::to_string)
            .collect();

        Ok(RunSummary {
            target_rows: targets.len(),
            assumption_rows: assumptions.len(),
            regions: regions.into_iter().collect(),
            years: years.into_iter().collect(),
            technology_triples: tech_triples(&assumptions).len(),
            categories: categories.into_iter().collect(),
            canonical_rows: canonical.len(),
            coefficient_rows: coefficients.len(),
            resource_rows: resources.len(),
            policy_nodes,
            outputs,
        })
    }
}
