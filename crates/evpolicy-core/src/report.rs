//! Run summary for operator inspection.
//!
//! Produced after a successful conversion; purely informational and never
//! part of the output files themselves.

use serde::Serialize;
use std::fmt;

/// Counts and distinct-value listings describing one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Rows read from the target table
    pub target_rows: usize,
    /// Rows read from the assumptions table
    pub assumption_rows: usize,
    /// Distinct regions observed in the target table, sorted
    pub regions: Vec<String>,
    /// Distinct years observed in the target table, sorted
    pub years: Vec<i32>,
    /// Distinct technology triples observed in the assumptions table
    pub technology_triples: usize,
    /// Transport categories present across the target sectors, sorted
    pub categories: Vec<String>,
    /// Canonical key-space size (rows of output table 1)
    pub canonical_rows: usize,
    /// Matched BEV coefficient rows
    pub coefficient_rows: usize,
    /// Matched BEV resource rows (rows of output table 2)
    pub resource_rows: usize,
    /// Total policy nodes across all regions
    pub policy_nodes: usize,
    /// Files written, in write order
    pub outputs: Vec<String>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "conversion summary")?;
        writeln!(f, "  target rows:       {}", self.target_rows)?;
        writeln!(f, "  assumption rows:   {}", self.assumption_rows)?;
        writeln!(
            f,
            "  regions ({}):       {}",
            self.regions.len(),
            self.regions.join(", ")
        )?;
        writeln!(
            f,
            "  years ({}):         {}",
            self.years.len(),
            self.years
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        writeln!(f, "  technology triples: {}", self.technology_triples)?;
        writeln!(f, "  categories:        {}", self.categories.join(", "))?;
        writeln!(f, "  canonical rows:    {}", self.canonical_rows)?;
        writeln!(f, "  coefficient rows:  {}", self.coefficient_rows)?;
        writeln!(f, "  resource rows:     {}", self.resource_rows)?;
        writeln!(f, "  policy nodes:      {}", self.policy_nodes)?;
        for output in &self.outputs {
            writeln!(f, "  wrote {output}")?;
        }
        Ok(())
    }
}
