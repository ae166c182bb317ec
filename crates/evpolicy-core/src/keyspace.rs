//! Canonical key-space construction.
//!
//! The canonical row set for output table 1 is the full Cartesian product of
//! the distinct (region, year) pairs from the target table and the distinct
//! technology triples from the assumptions table. Every combination is a
//! candidate output row whether or not coefficient data exists for it.

use crate::error::{EvPolicyError, Result};
use crate::records::{AssumptionRecord, CanonicalRow, TargetRecord, TechTriple};
use std::collections::HashSet;

/// Distinct (region, year) pairs from the target table, in first-occurrence
/// order.
#[must_use]
pub fn region_years(targets: &[TargetRecord]) -> Vec<(String, i32)> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();
    for record in targets {
        let key = (record.region.clone(), record.year);
        if seen.insert(key.clone()) {
            pairs.push(key);
        }
    }
    pairs
}

/// Distinct technology triples from the assumptions table, in
/// first-occurrence order.
#[must_use]
pub fn tech_triples(assumptions: &[AssumptionRecord]) -> Vec<TechTriple> {
    let mut seen = HashSet::new();
    let mut triples = Vec::new();
    for record in assumptions {
        let triple = TechTriple::from_assumption(record);
        if seen.insert(triple.clone()) {
            triples.push(triple);
        }
    }
    triples
}

/// Build the canonical row set: distinct (region, year) × distinct triples.
///
/// Invariant: the returned row count equals
/// |regions| × |years| × |triples|.
///
/// # Errors
///
/// Returns [`EvPolicyError::EmptyKeySpace`] when the target table contains
/// no distinct regions or no distinct years. This is a correctness guard:
/// with an empty key space the run cannot produce meaningful output and must
/// stop before anything is written.
pub fn canonical_rows(
    targets: &[TargetRecord],
    assumptions: &[AssumptionRecord],
) -> Result<Vec<CanonicalRow>> {
    let regions: HashSet<&str> = targets.iter().map(|t| t.region.as_str()).collect();
    let years: HashSet<i32> = targets.iter().map(|t| t.year).collect();

    if regions.is_empty() {
        return Err(EvPolicyError::EmptyKeySpace(
            "target table contains no regions".to_string(),
        ));
    }
    if years.is_empty() {
        return Err(EvPolicyError::EmptyKeySpace(
            "target table contains no years".to_string(),
        ));
    }

    let pairs = region_years(targets);
    let triples = tech_triples(assumptions);
    log::debug!(
        "key space: {} region/year pairs x {} technology triples",
        pairs.len(),
        triples.len()
    );

    let mut rows = Vec::with_capacity(pairs.len() * triples.len());
    for (region, year) in &pairs {
        for triple in &triples {
            rows.push(CanonicalRow {
                region: region.clone(),
                year: *year,
                tech: triple.clone(),
            });
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(region: &str, year: i32) -> TargetRecord {
        TargetRecord {
            region: region.to_string(),
            year,
            supplysector: "trn_pass_road_LDV_4W".to_string(),
            tran_subsector: "Car".to_string(),
            sale_target_percent: 0.3,
        }
    }

    fn assumption(sector: &str, subsector: &str, tech: &str) -> AssumptionRecord {
        AssumptionRecord {
            supplysector: sector.to_string(),
            tran_subsector: subsector.to_string(),
            stub_technology: tech.to_string(),
            year: 2030,
            annual_travel_per_vehicle: 15000.0,
            load_factor: 1.5,
        }
    }

    #[test]
    fn test_region_years_dedupes_in_order() {
        let targets = vec![
            target("USA", 2030),
            target("USA", 2030),
            target("EU-15", 2030),
            target("USA", 2035),
        ];

        let pairs = region_years(&targets);
        assert_eq!(
            pairs,
            vec![
                ("USA".to_string(), 2030),
                ("EU-15".to_string(), 2030),
                ("USA".to_string(), 2035),
            ],
            "pairs should be distinct and in first-occurrence order"
        );
    }

    #[test]
    fn test_tech_triples_dedupes() {
        let assumptions = vec![
            assumption("trn_pass_road", "Car", "BEV"),
            assumption("trn_pass_road", "Car", "BEV"),
            assumption("trn_pass_road", "Car", "Liquids"),
        ];

        let triples = tech_triples(&assumptions);
        assert_eq!(triples.len(), 2, "duplicate triples should collapse");
    }

    #[test]
    fn test_canonical_row_count_is_cartesian_product() {
        // 2 regions x 2 years = 4 pairs, but only 3 pairs occur in the data;
        // the product is over observed (region, year) pairs, not a grid of
        // regions times years.
        let targets = vec![target("USA", 2030), target("USA", 2035), target("EU-15", 2030)];
        let assumptions = vec![
            assumption("trn_pass_road", "Car", "BEV"),
            assumption("trn_pass_road", "Car", "Liquids"),
        ];

        let rows = canonical_rows(&targets, &assumptions).expect("key space should build");
        assert_eq!(
            rows.len(),
            3 * 2,
            "canonical rows = observed pairs x distinct triples"
        );
    }

    #[test]
    fn test_empty_targets_fail() {
        let assumptions = vec![assumption("trn_pass_road", "Car", "BEV")];
        let err = canonical_rows(&[], &assumptions).unwrap_err();
        match err {
            EvPolicyError::EmptyKeySpace(msg) => {
                assert!(msg.contains("regions"), "should report the empty set");
            }
            _ => panic!("Expected EmptyKeySpace error"),
        }
    }

    #[test]
    fn test_empty_assumptions_give_empty_rows() {
        // An empty triple set is not a key-space error; the downstream join
        // guard reports it as missing data instead.
        let targets = vec![target("USA", 2030)];
        let rows = canonical_rows(&targets, &[]).expect("empty triples are allowed here");
        assert!(rows.is_empty());
    }
}
